use crate::GeometryError;

use super::board::{BOARD_HEIGHT, BOARD_WIDTH, to_i32};

/// Width and height of a block, in pixels.
pub const BLOCK_SIZE: i32 = 16;
/// Width of the lines delimiting the board, in pixels.
pub const BOARD_LINE_WIDTH: i32 = 6;
pub const MIN_VERTICAL_MARGIN: i32 = 5;
pub const MIN_HORIZONTAL_MARGIN: i32 = 5;
/// Largest accepted screen width or height, keeping pixel positions within `i32`.
pub const MAX_SCREEN_SIZE: u32 = 1 << 16;

/// Pixel layout of the board on a screen of a given size.
///
/// The board is centered horizontally and sits on the bottom edge of the
/// screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    screen_width: u32,
    screen_height: u32,
}

impl ScreenGeometry {
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Validates that the board and its frame fit on the screen.
    ///
    /// # Example
    ///
    /// ```
    /// use stackfall_engine::ScreenGeometry;
    ///
    /// assert!(ScreenGeometry::new(640, 480).is_ok());
    /// assert!(ScreenGeometry::new(640, 300).is_err());
    /// ```
    pub fn new(screen_width: u32, screen_height: u32) -> Result<Self, GeometryError> {
        let geometry = Self {
            screen_width,
            screen_height,
        };

        if screen_width > MAX_SCREEN_SIZE || screen_height > MAX_SCREEN_SIZE {
            return Err(GeometryError::TooLarge {
                screen_width,
                screen_height,
                max: MAX_SCREEN_SIZE,
            });
        }

        let vertical_margin = i64::from(screen_height) - i64::from(board_height_px());
        if vertical_margin <= i64::from(MIN_VERTICAL_MARGIN) {
            return Err(GeometryError::TooShort {
                screen_height,
                margin: vertical_margin,
                min: MIN_VERTICAL_MARGIN.into(),
            });
        }

        // Keeps the left frame line, `BOARD_LINE_WIDTH` wide, on screen.
        let left_edge = i64::from(screen_width / 2) - i64::from(board_width_px() / 2) - 1;
        if left_edge <= i64::from(MIN_HORIZONTAL_MARGIN) {
            return Err(GeometryError::TooNarrow {
                screen_width,
                margin: left_edge,
                min: MIN_HORIZONTAL_MARGIN.into(),
            });
        }

        Ok(geometry)
    }

    #[must_use]
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    #[must_use]
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// Horizontal pixel of the board's center line.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn board_position(&self) -> i32 {
        // Dimensions are bounded by `MAX_SCREEN_SIZE`.
        (self.screen_width / 2) as i32
    }

    /// Pixel x of the left edge of grid column `col`.
    #[must_use]
    pub fn x_pos_in_pixels(&self, col: i32) -> i32 {
        self.board_position() - board_width_px() / 2 + col * BLOCK_SIZE
    }

    /// Pixel y of the top edge of grid row `row`.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn y_pos_in_pixels(&self, row: i32) -> i32 {
        self.screen_height as i32 - board_height_px() + row * BLOCK_SIZE
    }
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            screen_width: Self::DEFAULT_WIDTH,
            screen_height: Self::DEFAULT_HEIGHT,
        }
    }
}

const fn board_width_px() -> i32 {
    BLOCK_SIZE * to_i32(BOARD_WIDTH)
}

const fn board_height_px() -> i32 {
    BLOCK_SIZE * to_i32(BOARD_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_screen_layout() {
        let geometry = ScreenGeometry::new(640, 480).unwrap();
        assert_eq!(geometry, ScreenGeometry::default());
        assert_eq!(geometry.board_position(), 320);
        // 320 - 16 * 10 / 2
        assert_eq!(geometry.x_pos_in_pixels(0), 240);
        assert_eq!(geometry.x_pos_in_pixels(9), 384);
        // 480 - 16 * 20
        assert_eq!(geometry.y_pos_in_pixels(0), 160);
        assert_eq!(geometry.y_pos_in_pixels(19), 464);
        // Cells above the board and the next-piece area are still defined.
        assert_eq!(geometry.y_pos_in_pixels(-2), 128);
        assert_eq!(geometry.x_pos_in_pixels(15), 480);
    }

    #[test]
    fn test_screen_too_short() {
        // 326 - 320 = 6 > 5
        assert!(ScreenGeometry::new(640, 326).is_ok());
        let err = ScreenGeometry::new(640, 325).unwrap_err();
        assert_eq!(
            err,
            GeometryError::TooShort {
                screen_height: 325,
                margin: 5,
                min: 5,
            }
        );
    }

    #[test]
    fn test_screen_too_narrow() {
        // 174 / 2 - 80 - 1 = 6 > 5
        assert!(ScreenGeometry::new(174, 480).is_ok());
        assert!(ScreenGeometry::new(175, 480).is_ok());
        assert!(matches!(
            ScreenGeometry::new(172, 480),
            Err(GeometryError::TooNarrow { margin: 5, .. })
        ));
    }

    #[test]
    fn test_screen_too_large() {
        let geometry = ScreenGeometry::new(MAX_SCREEN_SIZE, MAX_SCREEN_SIZE).unwrap();
        // Next-piece column and bottom row stay in range.
        assert_eq!(geometry.x_pos_in_pixels(19), 32768 - 80 + 19 * 16);
        assert_eq!(geometry.y_pos_in_pixels(19), 65536 - 320 + 19 * 16);

        assert_eq!(
            ScreenGeometry::new(u32::MAX, 480),
            Err(GeometryError::TooLarge {
                screen_width: u32::MAX,
                screen_height: 480,
                max: MAX_SCREEN_SIZE,
            })
        );
        assert!(matches!(
            ScreenGeometry::new(640, 1 << 31),
            Err(GeometryError::TooLarge { .. })
        ));
        assert!(ScreenGeometry::new(MAX_SCREEN_SIZE + 1, 480).is_err());
    }
}
