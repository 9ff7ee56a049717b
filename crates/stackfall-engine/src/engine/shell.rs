use std::time::Duration;

use super::Game;

/// Player intent, already translated from whatever device produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputEvent {
    Quit,
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
}

/// Presentation layer driven by [`Game::run_frame`].
///
/// The shell owns the display, the input devices and the single clock that
/// measures time since the last gravity step. The game only reads that clock
/// and asks for it to be reset.
pub trait Shell {
    type Error;

    /// Renders the current game state.
    fn draw(&mut self, game: &Game) -> Result<(), Self::Error>;

    /// Returns the next pending input event without blocking.
    ///
    /// `Ok(None)` means the queue is drained for this frame.
    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;

    /// Time elapsed since the last clock reset.
    fn elapsed(&self) -> Duration;

    fn reset_clock(&mut self);

    /// Asks the shell to shut down once the current frame completes.
    fn request_quit(&mut self);
}
