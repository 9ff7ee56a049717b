use super::{
    geometry::ScreenGeometry,
    grid::{Cell, Grid},
    piece::{PieceKind, PieceRotation},
};

/// Board width, in blocks.
pub const BOARD_WIDTH: usize = 10;
/// Board height, in blocks.
pub const BOARD_HEIGHT: usize = 20;

/// The playfield: locked blocks plus the rules deciding where a piece may go.
///
/// Coordinates are `(x, y)` with `x` the column (0 = left) and `y` the row
/// (0 = top). A piece position is the grid position of its 5×5 mask origin,
/// so it may be negative while the piece is partly outside the grid.
///
/// # Placement rules
///
/// For every occupied mask cell of a piece:
///
/// - a column outside `0..BOARD_WIDTH` or a row at or below `BOARD_HEIGHT` is
///   illegal
/// - a row above the top (`y < 0`) is always legal, which lets pieces spawn
///   partially hidden
/// - any other cell must be free
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, PieceKind, PieceRotation};
///
/// let mut board = Board::default();
/// let rotation = PieceRotation::SPAWN;
/// // The square's blocks sit at mask rows/cols 2..=3.
/// assert!(board.is_possible_movement(0, 16, PieceKind::O, rotation));
/// board.store_piece(0, 16, PieceKind::O, rotation);
/// assert!(!board.is_free_block(2, 18));
/// assert!(!board.is_possible_movement(0, 15, PieceKind::O, rotation));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    geometry: ScreenGeometry,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(ScreenGeometry::default())
    }
}

impl Board {
    /// Creates an empty board laid out on the given screen.
    #[must_use]
    pub fn new(geometry: ScreenGeometry) -> Self {
        Self {
            grid: Grid::new(BOARD_WIDTH, BOARD_HEIGHT),
            geometry,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    /// Returns `true` if `(x, y)` is inside the grid and free.
    #[must_use]
    pub fn is_free_block(&self, x: i32, y: i32) -> bool {
        matches!(self.grid.get(x, y), Ok(Cell::Free))
    }

    /// Returns `true` if the piece fits at `(x, y)` according to the placement rules.
    #[must_use]
    pub fn is_possible_movement(
        &self,
        x: i32,
        y: i32,
        kind: PieceKind,
        rotation: PieceRotation,
    ) -> bool {
        placed_cells(x, y, kind, rotation).all(|(cx, cy)| {
            if cx < 0 || cx >= grid_width() || cy >= grid_height() {
                return false;
            }
            cy < 0 || self.is_free_block(cx, cy)
        })
    }

    /// Marks every block of the piece at `(x, y)` as filled.
    ///
    /// Collisions are not checked; validate with
    /// [`is_possible_movement`](Self::is_possible_movement) first. Blocks
    /// outside the grid are dropped.
    pub fn store_piece(&mut self, x: i32, y: i32, kind: PieceKind, rotation: PieceRotation) {
        for (cx, cy) in placed_cells(x, y, kind, rotation) {
            // Off-grid blocks are rejected by the grid and dropped here.
            self.grid.set(cx, cy, Cell::Filled).ok();
        }
    }

    /// Removes every filled row and returns how many were removed.
    ///
    /// Rows are scanned top to bottom. Removing a row shifts the rows above it
    /// down by one, so the row moved into the scanned position was already
    /// checked and a single pass clears them all.
    pub fn delete_possible_lines(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..self.grid.height() {
            if self.grid.is_row_filled(y) {
                self.grid.delete_row(y);
                cleared += 1;
            }
        }
        cleared
    }

    /// Returns `true` once any block of the top row is filled.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.grid
            .row(0)
            .is_some_and(|row| row.iter().any(|cell| cell.is_filled()))
    }

    #[must_use]
    pub fn board_position(&self) -> i32 {
        self.geometry.board_position()
    }

    #[must_use]
    pub fn x_pos_in_pixels(&self, col: i32) -> i32 {
        self.geometry.x_pos_in_pixels(col)
    }

    #[must_use]
    pub fn y_pos_in_pixels(&self, row: i32) -> i32 {
        self.geometry.y_pos_in_pixels(row)
    }

    /// Builds a board from ASCII art (`#` filled, `.` free).
    ///
    /// The rows of `art` fill the bottom of the board; missing rows at the
    /// top stay free. Whitespace and blank lines are ignored.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::default();
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "Board must have at most {BOARD_HEIGHT} rows, got {}",
            lines.len()
        );

        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    let (x, y) = (to_i32(x), to_i32(top + i));
                    board.grid.set(x, y, Cell::Filled).ok();
                }
            }
        }
        board
    }
}

/// Grid positions of the occupied mask cells of a piece placed at `(x, y)`.
pub(crate) fn placed_cells(
    x: i32,
    y: i32,
    kind: PieceKind,
    rotation: PieceRotation,
) -> impl Iterator<Item = (i32, i32)> {
    kind.occupied_cells(rotation)
        .into_iter()
        .map(move |(row, col)| (x + to_i32(col), y + to_i32(row)))
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const fn to_i32(n: usize) -> i32 {
    n as i32
}

const fn grid_width() -> i32 {
    to_i32(BOARD_WIDTH)
}

const fn grid_height() -> i32 {
    to_i32(BOARD_HEIGHT)
}
