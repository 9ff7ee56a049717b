pub use self::{pixel_map::*, scene::*};

mod pixel_map;
mod scene;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const WALL: Style = bg_only(color::BLUE);
    pub const STORED_BLOCK: Style = bg_only(color::RED);
    pub const PIECE_BLOCK: Style = bg_only(color::GREEN);
    pub const PIECE_PIVOT: Style = bg_only(color::CYAN);
    pub const TEXT: Style = Style::new().fg(color::GREEN);
}
