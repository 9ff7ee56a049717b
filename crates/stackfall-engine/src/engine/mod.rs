//! Game controller and the pieces it orchestrates.
//!
//! - [`Game`] - board, falling piece, next piece, score; driven one frame at a time
//! - [`Shell`] - presentation contract used by [`Game::run_frame`]
//! - [`PieceGenerator`] - seeded uniform piece and rotation draws
//! - [`GameStats`] - score and line clear statistics
//!
//! # Frame Flow
//!
//! 1. The shell draws the current game
//! 2. Pending input events are drained and applied to the falling piece
//! 3. Gravity moves the piece down, or locks it once it rests
//! 4. Locking clears full lines and spawns the queued next piece
//! 5. Repeat until a block reaches the top row

pub use self::{falling_piece::*, game::*, game_stats::*, piece_generator::*, shell::*};

mod falling_piece;
mod game;
mod game_stats;
mod piece_generator;
mod shell;
