use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Number of horizontal and vertical blocks in a piece mask.
pub const PIECE_BLOCKS: usize = 5;

/// A single cell of a piece mask.
///
/// Every shape rotates around its [`BlockType::Pivot`], which always sits at
/// mask position `(2, 2)`. Renderers use the distinction to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BlockType {
    /// No block at this mask position.
    #[default]
    Empty = 0,
    /// Regular block.
    Block = 1,
    /// Rotation center.
    Pivot = 2,
}

impl BlockType {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, BlockType::Empty)
    }

    /// Returns the raw mask code (`0` empty, `1` block, `2` pivot).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// One of the seven tetrominoes.
///
/// Discriminants are the piece ids used by the random generator and by the
/// raw-integer conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// Square.
    O = 0,
    /// Straight bar.
    I = 1,
    L = 2,
    /// Mirrored L.
    J = 3,
    Z = 4,
    /// Mirrored Z.
    S = 5,
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::O,
            1 => PieceKind::I,
            2 => PieceKind::L,
            3 => PieceKind::J,
            4 => PieceKind::Z,
            5 => PieceKind::S,
            _ => PieceKind::T,
        }
    }
}

impl TryFrom<u8> for PieceKind {
    type Error = CatalogError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PieceKind::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(CatalogError::InvalidPieceId { id })
    }
}

impl From<PieceKind> for u8 {
    fn from(kind: PieceKind) -> Self {
        kind as u8
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in id order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    const fn as_usize(self) -> usize {
        self as usize
    }

    /// Returns the mask value at `(row, col)` of the piece in the given rotation.
    ///
    /// # Example
    ///
    /// ```
    /// use stackfall_engine::{BlockType, PieceKind, PieceRotation};
    ///
    /// let block = PieceKind::I.block_type(PieceRotation::SPAWN, 2, 2).unwrap();
    /// assert_eq!(block, BlockType::Pivot);
    /// assert!(PieceKind::I.block_type(PieceRotation::SPAWN, 5, 0).is_err());
    /// ```
    pub fn block_type(
        self,
        rotation: PieceRotation,
        row: usize,
        col: usize,
    ) -> Result<BlockType, CatalogError> {
        if row >= PIECE_BLOCKS || col >= PIECE_BLOCKS {
            return Err(CatalogError::OutOfMask { row, col });
        }
        Ok(self.mask(rotation)[row][col])
    }

    pub(crate) fn mask(self, rotation: PieceRotation) -> &'static PieceMask {
        &PIECE_MASKS[self.as_usize()][rotation.as_usize()]
    }

    /// Returns the `(row, col)` mask positions holding a block, in row-major order.
    #[must_use]
    pub fn occupied_cells(self, rotation: PieceRotation) -> ArrayVec<(usize, usize), 4> {
        let mut cells = ArrayVec::new();
        for (row, line) in self.mask(rotation).iter().enumerate() {
            for (col, block) in line.iter().enumerate() {
                if !block.is_empty() {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Horizontal spawn offset, relative to the board's center column.
    #[must_use]
    pub fn initial_x(self, rotation: PieceRotation) -> i32 {
        INITIAL_POSITIONS[self.as_usize()][rotation.as_usize()].0
    }

    /// Vertical spawn offset, relative to the top row.
    #[must_use]
    pub fn initial_y(self, rotation: PieceRotation) -> i32 {
        INITIAL_POSITIONS[self.as_usize()][rotation.as_usize()].1
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::O.as_char(), 'O');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::O => 'O',
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
        }
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PieceRotation(u8);

impl Distribution<PieceRotation> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceRotation {
        PieceRotation(rng.random_range(0..4))
    }
}

impl TryFrom<u8> for PieceRotation {
    type Error = CatalogError;

    fn try_from(rotation: u8) -> Result<Self, Self::Error> {
        if rotation < 4 {
            Ok(Self(rotation))
        } else {
            Err(CatalogError::InvalidRotation { rotation })
        }
    }
}

impl From<PieceRotation> for u8 {
    fn from(rotation: PieceRotation) -> Self {
        rotation.0
    }
}

impl PieceRotation {
    pub const SPAWN: Self = Self(0);
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A piece rotation as a 5×5 block mask, indexed `[row][col]`.
pub(crate) type PieceMask = [[BlockType; PIECE_BLOCKS]; PIECE_BLOCKS];

const PIECE_MASKS: [[PieceMask; 4]; PieceKind::LEN] = {
    use BlockType::{Block as B, Empty as E, Pivot as P};
    const EEEEE: [BlockType; PIECE_BLOCKS] = [E; PIECE_BLOCKS];
    const SQUARE: PieceMask = [EEEEE, EEEEE, [E, E, P, B, E], [E, E, B, B, E], EEEEE];
    [
        // O-piece
        [SQUARE, SQUARE, SQUARE, SQUARE],
        // I-piece
        [
            [EEEEE, EEEEE, [E, B, P, B, B], EEEEE, EEEEE],
            [
                EEEEE,
                [E, E, B, E, E],
                [E, E, P, E, E],
                [E, E, B, E, E],
                [E, E, B, E, E],
            ],
            [EEEEE, EEEEE, [B, B, P, B, E], EEEEE, EEEEE],
            [
                [E, E, B, E, E],
                [E, E, B, E, E],
                [E, E, P, E, E],
                [E, E, B, E, E],
                EEEEE,
            ],
        ],
        // L-piece
        [
            [EEEEE, [E, E, B, E, E], [E, E, P, E, E], [E, E, B, B, E], EEEEE],
            [EEEEE, EEEEE, [E, B, P, B, E], [E, B, E, E, E], EEEEE],
            [EEEEE, [E, B, B, E, E], [E, E, P, E, E], [E, E, B, E, E], EEEEE],
            [EEEEE, [E, E, E, B, E], [E, B, P, B, E], EEEEE, EEEEE],
        ],
        // J-piece
        [
            [EEEEE, [E, E, B, E, E], [E, E, P, E, E], [E, B, B, E, E], EEEEE],
            [EEEEE, [E, B, E, E, E], [E, B, P, B, E], EEEEE, EEEEE],
            [EEEEE, [E, E, B, B, E], [E, E, P, E, E], [E, E, B, E, E], EEEEE],
            [EEEEE, EEEEE, [E, B, P, B, E], [E, E, E, B, E], EEEEE],
        ],
        // Z-piece
        [
            [EEEEE, [E, E, E, B, E], [E, E, P, B, E], [E, E, B, E, E], EEEEE],
            [EEEEE, EEEEE, [E, B, P, E, E], [E, E, B, B, E], EEEEE],
            [EEEEE, [E, E, B, E, E], [E, B, P, E, E], [E, B, E, E, E], EEEEE],
            [EEEEE, [E, B, B, E, E], [E, E, P, B, E], EEEEE, EEEEE],
        ],
        // S-piece
        [
            [EEEEE, [E, E, B, E, E], [E, E, P, B, E], [E, E, E, B, E], EEEEE],
            [EEEEE, EEEEE, [E, E, P, B, E], [E, B, B, E, E], EEEEE],
            [EEEEE, [E, B, E, E, E], [E, B, P, E, E], [E, E, B, E, E], EEEEE],
            [EEEEE, [E, E, B, B, E], [E, B, P, E, E], EEEEE, EEEEE],
        ],
        // T-piece
        [
            [EEEEE, [E, E, B, E, E], [E, E, P, B, E], [E, E, B, E, E], EEEEE],
            [EEEEE, EEEEE, [E, B, P, B, E], [E, E, B, E, E], EEEEE],
            [EEEEE, [E, E, B, E, E], [E, B, P, E, E], [E, E, B, E, E], EEEEE],
            [EEEEE, [E, E, B, E, E], [E, B, P, B, E], EEEEE, EEEEE],
        ],
    ]
};

/// Spawn offsets `(x, y)` per piece and rotation.
///
/// The vertical offset puts the lowest block of every piece on row 0, except
/// for the standing bar (I, rotation 1) which reaches down to row 1.
const INITIAL_POSITIONS: [[(i32, i32); 4]; PieceKind::LEN] = [
    // O-piece
    [(-2, -3), (-2, -3), (-2, -3), (-2, -3)],
    // I-piece
    [(-2, -2), (-2, -3), (-2, -2), (-2, -3)],
    // L-piece
    [(-2, -3), (-2, -3), (-2, -3), (-2, -2)],
    // J-piece
    [(-2, -3), (-2, -2), (-2, -3), (-2, -3)],
    // Z-piece
    [(-2, -3), (-2, -3), (-2, -3), (-2, -2)],
    // S-piece
    [(-2, -3), (-2, -3), (-2, -3), (-2, -2)],
    // T-piece
    [(-2, -3), (-2, -3), (-2, -3), (-2, -2)],
];
