use std::{
    convert::Infallible,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use stackfall_engine::{
    Game, GameConfig, GameStats, InputEvent, PieceKind, PieceRotation, PieceSeed, Shell,
};

use crate::command::GameConfigArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to simulate
    #[clap(long, default_value_t = 10)]
    games: usize,
    /// Seed for the whole run (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Give up on a game after this many frames
    #[clap(long, default_value_t = 100_000)]
    max_frames: u64,
    /// Simulated frames per second
    #[clap(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,
    /// Output file for the JSON report (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
    #[clap(flatten)]
    game: GameConfigArg,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    generated_at: DateTime<Utc>,
    seed: PieceSeed,
    fps: u32,
    gravity_ms: u64,
    games: Vec<GameReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GameReport {
    seed: PieceSeed,
    frames: u64,
    game_over: bool,
    /// Falling piece when the game stopped.
    final_piece: PieceKind,
    final_rotation: PieceRotation,
    stats: GameStats,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        seed,
        max_frames,
        fps,
        output,
        game,
    } = arg;

    let config = game.to_config()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(*fps));
    let mut rng = Pcg32::from_seed(seed.to_bytes());

    eprintln!("Simulating {games} games (seed {seed})...");
    let mut reports = Vec::with_capacity(*games);
    for i in 0..*games {
        let report = simulate_game(config, rng.random(), rng.random(), frame_interval, *max_frames);
        eprintln!(
            "Game {}/{games}: score {}, {} pieces, {} frames, {} {}",
            i + 1,
            report.stats.score(),
            report.stats.completed_pieces(),
            report.frames,
            if report.game_over { "topped out on" } else { "frame limit with" },
            report.final_piece.as_char(),
        );
        reports.push(report);
    }

    let total_score: usize = reports.iter().map(|r| r.stats.score()).sum();
    eprintln!("Total score: {total_score}");

    let report = SimulationReport {
        generated_at: Utc::now(),
        seed,
        fps: *fps,
        gravity_ms: game.gravity_ms,
        games: reports,
    };
    save_report(&report, output.as_deref())
}

/// Writes the report as pretty JSON to `path`, or to stdout.
fn save_report(report: &SimulationReport, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file: {}", path.display()))?;
            write_report(BufWriter::new(file), report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report saved to {}", path.display());
        }
        None => {
            write_report(io::stdout().lock(), report).context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}

fn write_report<W: Write>(mut writer: W, report: &SimulationReport) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn simulate_game(
    config: GameConfig,
    game_seed: PieceSeed,
    bot_seed: u64,
    frame_interval: Duration,
    max_frames: u64,
) -> GameReport {
    let mut game = Game::with_seed(config, game_seed);
    let mut shell = BotShell::new(Pcg32::seed_from_u64(bot_seed));

    let mut frames = 0;
    while frames < max_frames && game.state().is_playing() {
        shell.plan_frame();
        let Ok(()) = game.run_frame(&mut shell);
        shell.advance_clock(frame_interval);
        frames += 1;
    }

    let piece = game.falling_piece();
    GameReport {
        seed: game_seed,
        frames,
        game_over: game.state().is_game_over(),
        final_piece: piece.kind(),
        final_rotation: piece.rotation(),
        stats: game.stats().clone(),
    }
}

/// Headless [`Shell`] with a virtual clock, fed by a random-input bot.
#[derive(Debug)]
struct BotShell {
    rng: Pcg32,
    pending: Option<InputEvent>,
    elapsed: Duration,
}

impl BotShell {
    const MOVES: [InputEvent; 5] = [
        InputEvent::MoveLeft,
        InputEvent::MoveRight,
        InputEvent::Rotate,
        InputEvent::SoftDrop,
        InputEvent::HardDrop,
    ];

    fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            pending: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Decides the input for the next frame: usually nothing, sometimes a random move.
    fn plan_frame(&mut self) {
        self.pending = if self.rng.random_bool(0.25) {
            let i = self.rng.random_range(0..Self::MOVES.len());
            Some(Self::MOVES[i])
        } else {
            None
        };
    }

    fn advance_clock(&mut self, interval: Duration) {
        self.elapsed += interval;
    }
}

impl Shell for BotShell {
    type Error = Infallible;

    fn draw(&mut self, _game: &Game) -> Result<(), Self::Error> {
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.pending.take())
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn reset_clock(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn request_quit(&mut self) {}
}
