//! Board and piece simulation core of the stackfall falling-block game.
//!
//! The crate is split the same way the game is:
//!
//! - [`core`] holds the static piece catalog, the bounds-checked grid, the
//!   screen geometry and the [`Board`] rules (collision, placement, line clears).
//! - [`engine`] holds the frame-driven controller ([`Game`]), the seeded piece
//!   generator, score statistics and the [`Shell`] contract that presentation
//!   layers implement.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Raw input rejected by the piece catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    #[display("invalid piece id {id} (expected 0..=6)")]
    InvalidPieceId { id: u8 },
    #[display("invalid piece rotation {rotation} (expected 0..=3)")]
    InvalidRotation { rotation: u8 },
    #[display("mask position ({row}, {col}) is outside the 5x5 piece mask")]
    OutOfMask { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell ({x}, {y}) is outside the {width}x{height} grid")]
pub struct GridError {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

/// Screen dimensions that cannot hold the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GeometryError {
    #[display("screen height {screen_height} leaves a vertical margin of {margin}px (need more than {min}px)")]
    TooShort {
        screen_height: u32,
        margin: i64,
        min: i64,
    },
    #[display("screen width {screen_width} leaves a horizontal margin of {margin}px (need more than {min}px)")]
    TooNarrow {
        screen_width: u32,
        margin: i64,
        min: i64,
    },
    #[display("screen size {screen_width}x{screen_height} exceeds {max}x{max}")]
    TooLarge {
        screen_width: u32,
        screen_height: u32,
        max: u32,
    },
}

/// A falling piece command that could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("piece colliding at the requested position")]
    Collision,
    #[display("game is over")]
    GameOver,
}
