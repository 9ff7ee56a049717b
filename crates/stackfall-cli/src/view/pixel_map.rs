use ratatui::layout::{Position, Rect};

/// Horizontal pixels covered by one terminal column.
pub const PX_PER_COLUMN: i32 = 8;
/// Vertical pixels covered by one terminal row.
pub const PX_PER_ROW: i32 = 16;

/// Projects the game's virtual screen onto a terminal area.
///
/// A 16 px block becomes two columns by one row. The virtual screen is
/// centered horizontally and anchored to the bottom of the area, where the
/// board sits; whatever falls outside the area is clipped.
#[derive(Debug, Clone, Copy)]
pub struct PixelMap {
    area: Rect,
    origin_x: i32,
    origin_y: i32,
}

impl PixelMap {
    pub fn new(area: Rect, screen_width: u32, screen_height: u32) -> Self {
        let columns = cells(screen_width, PX_PER_COLUMN);
        let rows = cells(screen_height, PX_PER_ROW);
        Self {
            area,
            origin_x: i32::from(area.x) + (i32::from(area.width) - columns) / 2,
            origin_y: i32::from(area.bottom()) - rows,
        }
    }

    fn column(&self, x_px: i32) -> i32 {
        self.origin_x + x_px.div_euclid(PX_PER_COLUMN)
    }

    fn row(&self, y_px: i32) -> i32 {
        self.origin_y + y_px.div_euclid(PX_PER_ROW)
    }

    /// Terminal cells covering the given pixel rectangle, clipped to the area.
    ///
    /// Rectangles thinner than a cell still cover one cell.
    pub fn rect(&self, x_px: i32, y_px: i32, width_px: i32, height_px: i32) -> Option<Rect> {
        let left = self.column(x_px);
        let right = self.column(x_px + width_px).max(left + 1);
        let top = self.row(y_px);
        let bottom = self.row(y_px + height_px).max(top + 1);

        let left = left.max(i32::from(self.area.left()));
        let right = right.min(i32::from(self.area.right()));
        let top = top.max(i32::from(self.area.top()));
        let bottom = bottom.min(i32::from(self.area.bottom()));
        if left >= right || top >= bottom {
            return None;
        }

        Some(Rect::new(
            u16::try_from(left).ok()?,
            u16::try_from(top).ok()?,
            u16::try_from(right - left).ok()?,
            u16::try_from(bottom - top).ok()?,
        ))
    }

    /// Terminal cell containing the given pixel, if it is inside the area.
    pub fn position(&self, x_px: i32, y_px: i32) -> Option<Position> {
        let position = Position::new(
            u16::try_from(self.column(x_px)).ok()?,
            u16::try_from(self.row(y_px)).ok()?,
        );
        self.area.contains(position).then_some(position)
    }
}

fn cells(pixels: u32, px_per_cell: i32) -> i32 {
    i32::try_from(pixels.div_ceil(px_per_cell.unsigned_abs())).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_screen_fills_80x30() {
        let map = PixelMap::new(Rect::new(0, 0, 80, 30), 640, 480);
        // Leftmost board block.
        assert_eq!(map.rect(240, 160, 16, 16), Some(Rect::new(30, 10, 2, 1)));
        assert_eq!(map.position(0, 0), Some(Position::new(0, 0)));
        assert_eq!(map.position(639, 479), Some(Position::new(79, 29)));
    }

    #[test]
    fn test_screen_is_centered_and_bottom_anchored() {
        let map = PixelMap::new(Rect::new(2, 1, 100, 40), 640, 480);
        // 10 spare columns on each side, 10 spare rows above.
        assert_eq!(map.position(0, 0), Some(Position::new(12, 11)));
        assert_eq!(map.rect(0, 464, 16, 16), Some(Rect::new(12, 40, 2, 1)));
    }

    #[test]
    fn test_small_area_clips_the_top() {
        let map = PixelMap::new(Rect::new(0, 0, 80, 24), 640, 480);
        // The top 6 rows of the virtual screen are cut off.
        assert_eq!(map.position(10, 10), None);
        assert_eq!(map.position(10, 96), Some(Position::new(1, 0)));
        assert_eq!(map.rect(0, 0, 16, 112), Some(Rect::new(0, 0, 2, 1)));
        assert_eq!(map.rect(0, 0, 16, 16), None);
    }

    #[test]
    fn test_thin_rectangles_cover_a_cell() {
        let map = PixelMap::new(Rect::new(0, 0, 80, 30), 640, 480);
        // Left board wall: 7 px wide.
        assert_eq!(map.rect(233, 160, 7, 320), Some(Rect::new(29, 10, 1, 20)));
    }
}
