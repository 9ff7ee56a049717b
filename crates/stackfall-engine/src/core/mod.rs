pub use self::{board::*, geometry::*, grid::*, piece::*};

pub(crate) mod board;
pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod piece;
