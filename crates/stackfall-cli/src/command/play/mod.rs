use stackfall_engine::{Game, PieceSeed};

use crate::{command::GameConfigArg, tui::FrameTimer};

use self::shell::TerminalShell;

mod shell;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Frames per second
    #[clap(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,
    #[clap(flatten)]
    game: GameConfigArg,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            fps: 30,
            game: GameConfigArg::default(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, fps, game } = arg;

    let config = game.to_config()?;
    let mut game = match seed {
        Some(seed) => Game::with_seed(config, *seed),
        None => Game::new(config),
    };
    let mut timer = FrameTimer::with_rate(f64::from(*fps));

    ratatui::run(|terminal| -> anyhow::Result<()> {
        let mut shell = TerminalShell::new(terminal);
        while !shell.quit_requested() {
            game.run_frame(&mut shell)?;
            timer.wait();
        }
        Ok(())
    })?;

    println!("Score: {}", game.score());
    println!("Pieces: {}", game.stats().completed_pieces());
    println!("Seed: {}", game.seed());
    Ok(())
}
