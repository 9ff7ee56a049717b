use std::time::Duration;

use crate::{Board, MoveError, ScreenGeometry};

use super::{
    FallingPiece, GameStats, InputEvent, PieceGenerator, PieceSeed, Shell,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Playing,
    GameOver,
}

/// What a single [`Game::update`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// Gravity interval not reached yet, or the game is over.
    Idle,
    /// The falling piece moved down one row.
    Fell,
    /// The falling piece could not move down and was locked.
    Locked { cleared_lines: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub screen: ScreenGeometry,
    /// Time the falling piece waits before dropping one row.
    pub gravity_interval: Duration,
}

impl GameConfig {
    pub const DEFAULT_GRAVITY_INTERVAL: Duration = Duration::from_millis(700);
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenGeometry::default(),
            gravity_interval: Self::DEFAULT_GRAVITY_INTERVAL,
        }
    }
}

/// A single-player game: the board, the falling piece and what comes next.
///
/// The game is driven one frame at a time by [`Game::run_frame`], which talks
/// to a [`Shell`]. The individual commands and [`Game::update`] are public so
/// headless drivers can step the game without a shell.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use stackfall_engine::{Game, GameConfig, PieceSeed, TickOutcome};
///
/// let mut game = Game::with_seed(GameConfig::default(), PieceSeed::from_bytes([7; 16]));
/// game.try_move_left().ok();
/// assert_eq!(game.update(Duration::from_millis(100)), TickOutcome::Idle);
/// assert_eq!(game.update(Duration::from_millis(701)), TickOutcome::Fell);
///
/// while game.state().is_playing() {
///     game.hard_drop_and_lock().unwrap();
/// }
/// assert!(game.state().is_game_over());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    falling_piece: FallingPiece,
    next_piece: FallingPiece,
    generator: PieceGenerator,
    stats: GameStats,
    config: GameConfig,
}

impl Game {
    /// Starts a game with a random seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a specific seed for a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: PieceSeed) -> Self {
        Self::with_generator(config, PieceGenerator::with_seed(seed))
    }

    fn with_generator(config: GameConfig, mut generator: PieceGenerator) -> Self {
        let (kind, rotation) = generator.pop_next();
        let falling_piece = FallingPiece::spawn(kind, rotation);
        let (kind, rotation) = generator.pop_next();
        let next_piece = FallingPiece::preview(kind, rotation);
        Self {
            board: Board::new(config.screen),
            falling_piece,
            next_piece,
            generator,
            stats: GameStats::new(),
            config,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &FallingPiece {
        &self.falling_piece
    }

    /// Returns the queued piece, placed at the preview position.
    #[must_use]
    pub fn next_piece(&self) -> &FallingPiece {
        &self.next_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// The game ends once row 0 holds a block, or when the falling piece
    /// spawned on top of stored blocks.
    #[must_use]
    pub fn state(&self) -> GameState {
        if self.board.is_game_over() || !self.falling_piece.is_placeable(&self.board) {
            GameState::GameOver
        } else {
            GameState::Playing
        }
    }

    fn set_falling_piece(&mut self, piece: FallingPiece) -> Result<(), MoveError> {
        if self.state().is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !piece.is_placeable(&self.board) {
            return Err(MoveError::Collision);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), MoveError> {
        self.set_falling_piece(self.falling_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), MoveError> {
        self.set_falling_piece(self.falling_piece.right())
    }

    pub fn try_soft_drop(&mut self) -> Result<(), MoveError> {
        self.set_falling_piece(self.falling_piece.down())
    }

    /// Rotates the falling piece clockwise in place, without wall kicks.
    pub fn try_rotate(&mut self) -> Result<(), MoveError> {
        self.set_falling_piece(self.falling_piece.rotated_right())
    }

    /// Moves the falling piece down as far as it goes and locks it there.
    ///
    /// Returns the number of cleared lines.
    pub fn hard_drop_and_lock(&mut self) -> Result<usize, MoveError> {
        if self.state().is_game_over() {
            return Err(MoveError::GameOver);
        }
        self.falling_piece = self.falling_piece.drop_position(&self.board);
        Ok(self.lock_falling_piece())
    }

    /// Applies one input event. [`InputEvent::Quit`] is left to the caller.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), MoveError> {
        match event {
            InputEvent::Quit => Ok(()),
            InputEvent::MoveLeft => self.try_move_left(),
            InputEvent::MoveRight => self.try_move_right(),
            InputEvent::SoftDrop => self.try_soft_drop(),
            InputEvent::Rotate => self.try_rotate(),
            InputEvent::HardDrop => self.hard_drop_and_lock().map(|_| ()),
        }
    }

    /// Advances simulation time.
    ///
    /// Once `elapsed` exceeds the gravity interval the falling piece moves
    /// down one row, or locks if it cannot. The caller resets its clock
    /// whenever the outcome is not [`TickOutcome::Idle`].
    pub fn update(&mut self, elapsed: Duration) -> TickOutcome {
        if self.state().is_game_over() || elapsed <= self.config.gravity_interval {
            return TickOutcome::Idle;
        }
        if self.try_soft_drop().is_ok() {
            return TickOutcome::Fell;
        }
        let cleared_lines = self.lock_falling_piece();
        TickOutcome::Locked { cleared_lines }
    }

    /// Runs one frame: draw, drain input, then apply gravity.
    ///
    /// A quit event asks the shell to shut down and stops input processing
    /// for this frame; events after it stay queued. Gravity still applies.
    pub fn run_frame<S>(&mut self, shell: &mut S) -> Result<(), S::Error>
    where
        S: Shell + ?Sized,
    {
        shell.draw(self)?;

        while let Some(event) = shell.poll_event()? {
            if event.is_quit() {
                shell.request_quit();
                break;
            }
            // Rejected moves are part of normal play.
            self.handle_event(event).ok();
        }

        if !self.update(shell.elapsed()).is_idle() {
            shell.reset_clock();
        }
        Ok(())
    }

    fn lock_falling_piece(&mut self) -> usize {
        let piece = self.falling_piece;
        self.board
            .store_piece(piece.x(), piece.y(), piece.kind(), piece.rotation());
        let cleared_lines = self.board.delete_possible_lines();
        self.stats.complete_piece_drop(cleared_lines);
        if !self.board.is_game_over() {
            self.create_new_piece();
        }
        cleared_lines
    }

    fn create_new_piece(&mut self) {
        self.falling_piece =
            FallingPiece::spawn(self.next_piece.kind(), self.next_piece.rotation());
        let (kind, rotation) = self.generator.pop_next();
        self.next_piece = FallingPiece::preview(kind, rotation);
    }
}
