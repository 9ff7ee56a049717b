use crate::GridError;

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Free,
    Filled,
}

/// Fixed-size 2D cell buffer with checked access.
///
/// Cells are stored row-major (`y * width + x`); row 0 is the top of the
/// board. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell [`Cell::Free`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Free; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> GridError {
        GridError {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        self.index(x, y)
            .map(|i| self.cells[i])
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), GridError> {
        let i = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Returns the cells of row `y`, left to right.
    #[must_use]
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        (y < self.height).then(|| &self.cells[y * self.width..][..self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width.max(1)).take(self.height)
    }

    #[must_use]
    pub fn is_row_filled(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_filled()))
    }

    /// Removes row `y` by shifting every row above it down by one.
    ///
    /// The vacated top row becomes [`Cell::Free`]. Rows below `y` are untouched.
    pub fn delete_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        let width = self.width;
        self.cells.copy_within(..y * width, width);
        self.cells[..width].fill(Cell::Free);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_free() {
        let grid = Grid::new(10, 20);
        assert_eq!((grid.width(), grid.height()), (10, 20));
        assert_eq!(grid.rows().count(), 20);
        assert!(grid.rows().flatten().all(|cell| cell.is_free()));
    }

    #[test]
    fn test_checked_access() {
        let mut grid = Grid::new(10, 20);
        grid.set(3, 4, Cell::Filled).unwrap();
        assert_eq!(grid.get(3, 4), Ok(Cell::Filled));
        assert_eq!(grid.get(4, 3), Ok(Cell::Free));

        for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 20)] {
            let err = grid.get(x, y).unwrap_err();
            assert_eq!((err.x, err.y), (x, y));
            assert!(grid.set(x, y, Cell::Filled).is_err());
        }
    }

    #[test]
    fn test_delete_row_shifts_rows_above() {
        let mut grid = Grid::new(3, 4);
        // Row 0: #.., row 1: .#., row 2: ###, row 3: ..#
        for (x, y) in [(0, 0), (1, 1), (0, 2), (1, 2), (2, 2), (2, 3)] {
            grid.set(x, y, Cell::Filled).unwrap();
        }
        assert!(grid.is_row_filled(2));
        assert!(!grid.is_row_filled(3));

        grid.delete_row(2);

        let filled = |row: &[Cell]| row.iter().map(|c| c.is_filled()).collect::<Vec<_>>();
        assert_eq!(filled(grid.row(0).unwrap()), [false, false, false]);
        assert_eq!(filled(grid.row(1).unwrap()), [true, false, false]);
        assert_eq!(filled(grid.row(2).unwrap()), [false, true, false]);
        assert_eq!(filled(grid.row(3).unwrap()), [false, false, true]);
    }

    #[test]
    fn test_delete_top_row_clears_it() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, Cell::Filled).unwrap();
        grid.set(1, 0, Cell::Filled).unwrap();
        grid.delete_row(0);
        assert!(grid.rows().flatten().all(|cell| cell.is_free()));

        // Out-of-range rows are ignored.
        grid.delete_row(2);
        assert!(grid.row(2).is_none());
    }
}
