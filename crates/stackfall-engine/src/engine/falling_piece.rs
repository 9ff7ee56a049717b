use arrayvec::ArrayVec;

use crate::{
    BOARD_WIDTH, BlockType, Board, PieceKind, PieceRotation,
    core::board::{placed_cells, to_i32},
};

/// A piece together with its rotation and the grid position of its mask origin.
///
/// Movement methods return the moved piece without checking it against a
/// board; callers validate with [`FallingPiece::is_placeable`] before
/// committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
    y: i32,
}

impl FallingPiece {
    /// Column at which the next-piece preview is drawn.
    pub const PREVIEW_X: i32 = to_i32(BOARD_WIDTH) + 5;
    /// Row at which the next-piece preview is drawn.
    pub const PREVIEW_Y: i32 = 5;

    #[must_use]
    pub const fn new(kind: PieceKind, rotation: PieceRotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Places the piece at its spawn position above the board's center.
    ///
    /// # Example
    ///
    /// ```
    /// use stackfall_engine::{Board, FallingPiece, PieceKind, PieceRotation};
    ///
    /// let piece = FallingPiece::spawn(PieceKind::T, PieceRotation::SPAWN);
    /// assert_eq!((piece.x(), piece.y()), (3, -3));
    /// assert!(piece.is_placeable(&Board::default()));
    /// ```
    #[must_use]
    pub fn spawn(kind: PieceKind, rotation: PieceRotation) -> Self {
        let center = to_i32(BOARD_WIDTH / 2);
        Self::new(
            kind,
            rotation,
            center + kind.initial_x(rotation),
            kind.initial_y(rotation),
        )
    }

    /// Places the piece at the next-piece preview position.
    #[must_use]
    pub const fn preview(kind: PieceKind, rotation: PieceRotation) -> Self {
        Self::new(kind, rotation, Self::PREVIEW_X, Self::PREVIEW_Y)
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        Self::new(self.kind, self.rotation, self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        Self::new(self.kind, self.rotation, self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        Self::new(self.kind, self.rotation, self.x, self.y + 1)
    }

    /// Rotates clockwise in place around the pivot.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self::new(self.kind, self.rotation.rotated_right(), self.x, self.y)
    }

    #[must_use]
    pub fn is_placeable(&self, board: &Board) -> bool {
        board.is_possible_movement(self.x, self.y, self.kind, self.rotation)
    }

    /// Returns the grid positions covered by the piece, including rows above the board.
    #[must_use]
    pub fn occupied_positions(&self) -> ArrayVec<(i32, i32), 4> {
        placed_cells(self.x, self.y, self.kind, self.rotation).collect()
    }

    /// Returns every block of the piece with its grid position and mask value.
    pub fn blocks(&self) -> impl Iterator<Item = ((i32, i32), BlockType)> + use<> {
        let Self {
            kind,
            rotation,
            x,
            y,
        } = *self;
        let mask = kind.mask(rotation);
        kind.occupied_cells(rotation)
            .into_iter()
            .map(move |(row, col)| ((x + to_i32(col), y + to_i32(row)), mask[row][col]))
    }

    /// Returns the lowest placeable position reachable by moving straight down.
    ///
    /// Returns `self` unchanged if it cannot move down at all.
    #[must_use]
    pub fn drop_position(&self, board: &Board) -> Self {
        let mut piece = *self;
        while piece.down().is_placeable(board) {
            piece = piece.down();
        }
        piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_positions() {
        let board = Board::default();
        for kind in PieceKind::ALL {
            for rotation in PieceRotation::ALL {
                let piece = FallingPiece::spawn(kind, rotation);
                assert_eq!(piece.x(), 3);
                assert!(piece.is_placeable(&board), "{kind:?} {rotation:?}");
                // Lowest block on the top row (one deeper for the standing
                // bar), the rest hidden above it.
                let lowest = piece.occupied_positions().iter().map(|&(_, y)| y).max();
                let expected = i32::from(kind == PieceKind::I && rotation.as_u8() == 1);
                assert_eq!(lowest, Some(expected), "{kind:?} {rotation:?}");
            }
        }
    }

    #[test]
    fn test_moves_are_unit_steps() {
        let piece = FallingPiece::new(PieceKind::L, PieceRotation::SPAWN, 2, 4);
        assert_eq!((piece.left().x(), piece.left().y()), (1, 4));
        assert_eq!((piece.right().x(), piece.right().y()), (3, 4));
        assert_eq!((piece.down().x(), piece.down().y()), (2, 5));

        let rotated = piece.rotated_right();
        assert_eq!((rotated.x(), rotated.y()), (2, 4));
        assert_eq!(rotated.rotation().as_u8(), 1);
        assert_eq!(rotated.kind(), PieceKind::L);
    }

    #[test]
    fn test_drop_position() {
        let board = Board::from_ascii(
            r"
            ..........
            ...##.....
            ..........
            ",
        );
        // Square over columns 3..=4 rests on row 18.
        let piece = FallingPiece::new(PieceKind::O, PieceRotation::SPAWN, 1, -3);
        let dropped = piece.drop_position(&board);
        assert_eq!((dropped.x(), dropped.y()), (1, 14));

        // Already resting: unchanged.
        assert_eq!(dropped.drop_position(&board), dropped);
    }

    #[test]
    fn test_blocks_mark_the_pivot() {
        let piece = FallingPiece::new(PieceKind::T, PieceRotation::SPAWN, 4, 7);
        let blocks: Vec<_> = piece.blocks().collect();
        assert_eq!(
            blocks,
            [
                ((6, 8), BlockType::Block),
                ((6, 9), BlockType::Pivot),
                ((7, 9), BlockType::Block),
                ((6, 10), BlockType::Block),
            ]
        );
    }

    #[test]
    fn test_preview_position() {
        let piece = FallingPiece::preview(PieceKind::S, PieceRotation::SPAWN);
        assert_eq!((piece.x(), piece.y()), (15, 5));
    }
}
