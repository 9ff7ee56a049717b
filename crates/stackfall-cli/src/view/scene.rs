use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use stackfall_engine::{
    BLOCK_SIZE, BOARD_LINE_WIDTH, BlockType, Board, FallingPiece, Game,
};

use crate::view::{PixelMap, PX_PER_ROW, style};

/// Pixel position of the score line.
const SCORE_X: i32 = 10;
const SCORE_Y: i32 = 10;
const FONT_SIZE: i32 = 24;
const LINE_SPACE: i32 = FONT_SIZE / 3;

const CONTROLS: [&str; 3] = ["Rotate=Z/Up", "Drop=X/Space", "Quit=Esc/Q"];

/// Whole-screen view of a game: board frame, blocks, next piece and text.
#[derive(Debug)]
pub struct SceneDisplay<'a> {
    game: &'a Game,
}

impl<'a> SceneDisplay<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game }
    }
}

impl Widget for SceneDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SceneDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.game.board();
        let geometry = board.geometry();
        let map = PixelMap::new(area, geometry.screen_width(), geometry.screen_height());
        let mut canvas = Canvas { map, buf };

        canvas.draw_board(board);
        canvas.draw_piece(board, self.game.falling_piece());
        canvas.draw_piece(board, self.game.next_piece());

        canvas.draw_text(SCORE_X, SCORE_Y, &format!("Score: {}", self.game.score()));
        if self.game.state().is_game_over() {
            canvas.draw_text(SCORE_X, SCORE_Y + FONT_SIZE + LINE_SPACE, "GAME OVER");
        }

        let next = self.game.next_piece();
        canvas.draw_text(
            board.x_pos_in_pixels(next.x()),
            board.y_pos_in_pixels(next.y()) - FONT_SIZE - LINE_SPACE,
            "NEXT:",
        );

        let board_bottom = board.y_pos_in_pixels(grid_height(board));
        let controls_y = board_bottom - SCORE_Y - FONT_SIZE * 2 - LINE_SPACE;
        for (line, text) in (0..).zip(CONTROLS) {
            canvas.draw_text(SCORE_X, controls_y + line * PX_PER_ROW, text);
        }
    }
}

struct Canvas<'b> {
    map: PixelMap,
    buf: &'b mut Buffer,
}

impl Canvas<'_> {
    fn fill(&mut self, x_px: i32, y_px: i32, width_px: i32, height_px: i32, style: Style) {
        if let Some(rect) = self.map.rect(x_px, y_px, width_px, height_px) {
            self.buf.set_style(rect, style);
        }
    }

    fn draw_block(&mut self, board: &Board, x: i32, y: i32, style: Style) {
        self.fill(
            board.x_pos_in_pixels(x),
            board.y_pos_in_pixels(y),
            BLOCK_SIZE,
            BLOCK_SIZE,
            style,
        );
    }

    /// Draws the two walls delimiting the board and the stored blocks.
    fn draw_board(&mut self, board: &Board) {
        let half_width = BLOCK_SIZE * grid_width(board) / 2;
        let left = board.board_position() - half_width - 1;
        let right = board.board_position() + half_width;
        let top = board.y_pos_in_pixels(0);
        let height = board.y_pos_in_pixels(grid_height(board)) - top;

        self.fill(left - BOARD_LINE_WIDTH, top, BOARD_LINE_WIDTH + 1, height, style::WALL);
        self.fill(right, top, BOARD_LINE_WIDTH + 1, height, style::WALL);

        for y in 0..grid_height(board) {
            for x in 0..grid_width(board) {
                if !board.is_free_block(x, y) {
                    self.draw_block(board, x, y, style::STORED_BLOCK);
                }
            }
        }
    }

    fn draw_piece(&mut self, board: &Board, piece: &FallingPiece) {
        for ((x, y), block) in piece.blocks() {
            let style = match block {
                BlockType::Pivot => style::PIECE_PIVOT,
                BlockType::Block | BlockType::Empty => style::PIECE_BLOCK,
            };
            self.draw_block(board, x, y, style);
        }
    }

    fn draw_text(&mut self, x_px: i32, y_px: i32, text: &str) {
        let Some(position) = self.map.position(x_px, y_px) else {
            return;
        };
        let area = self.buf.area;
        let max_width = usize::from(area.right().saturating_sub(position.x));
        self.buf
            .set_stringn(position.x, position.y, text, max_width, style::TEXT);
    }
}

fn grid_width(board: &Board) -> i32 {
    i32::try_from(board.grid().width()).unwrap_or(i32::MAX)
}

fn grid_height(board: &Board) -> i32 {
    i32::try_from(board.grid().height()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use stackfall_engine::{GameConfig, PieceSeed};

    use super::*;

    fn render(game: &Game, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        SceneDisplay::new(game).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn new_game() -> Game {
        Game::with_seed(GameConfig::default(), PieceSeed::from_bytes([3; 16]))
    }

    #[test]
    fn test_walls_and_text_layout() {
        let game = new_game();
        let buf = render(&game, 80, 30);

        for y in 10..30 {
            assert_eq!(buf[(29, y)].bg, style::WALL.bg.unwrap(), "left wall at row {y}");
            assert_eq!(buf[(50, y)].bg, style::WALL.bg.unwrap(), "right wall at row {y}");
        }
        assert!(row_text(&buf, 0).starts_with(" Score: 0"));
        assert!(row_text(&buf, 13)[60..].starts_with("NEXT:"));
        assert!(row_text(&buf, 25).contains("Rotate=Z/Up"));
        assert!(!(0..30).any(|y| row_text(&buf, y).contains("GAME OVER")));
    }

    #[test]
    fn test_blocks_are_drawn_in_board_cells() {
        let mut game = new_game();
        game.hard_drop_and_lock().unwrap();
        let buf = render(&game, 80, 30);

        let board = game.board();
        for y in 0..20_u16 {
            for x in 0..10_u16 {
                let cell = &buf[(30 + 2 * x, 10 + y)];
                if !board.is_free_block(x.into(), y.into()) {
                    assert_eq!(cell.bg, style::STORED_BLOCK.bg.unwrap(), "({x}, {y})");
                }
            }
        }

        for ((x, y), block) in game.next_piece().blocks() {
            let expected = match block {
                BlockType::Pivot => style::PIECE_PIVOT,
                _ => style::PIECE_BLOCK,
            };
            let column = u16::try_from(30 + 2 * x).unwrap();
            let row = u16::try_from(10 + y).unwrap();
            assert_eq!(buf[(column, row)].bg, expected.bg.unwrap());
        }
    }

    #[test]
    fn test_game_over_text() {
        let mut game = new_game();
        while game.state().is_playing() {
            game.hard_drop_and_lock().unwrap();
        }
        let buf = render(&game, 80, 30);
        assert!(row_text(&buf, 2).starts_with(" GAME OVER"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let game = new_game();
        let buf = render(&game, 5, 3);
        assert_eq!(buf.area, Rect::new(0, 0, 5, 3));
    }
}
