use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stackfall_engine::{GameConfig, ScreenGeometry};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run headless games driven by random input and report their statistics
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Game rules and virtual screen shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GameConfigArg {
    /// Milliseconds the falling piece waits before dropping one row
    #[clap(long, default_value_t = 700)]
    gravity_ms: u64,
    /// Width of the virtual screen, in pixels
    #[clap(long, default_value_t = ScreenGeometry::DEFAULT_WIDTH)]
    screen_width: u32,
    /// Height of the virtual screen, in pixels
    #[clap(long, default_value_t = ScreenGeometry::DEFAULT_HEIGHT)]
    screen_height: u32,
}

impl Default for GameConfigArg {
    fn default() -> Self {
        Self {
            gravity_ms: 700,
            screen_width: ScreenGeometry::DEFAULT_WIDTH,
            screen_height: ScreenGeometry::DEFAULT_HEIGHT,
        }
    }
}

impl GameConfigArg {
    pub(crate) fn to_config(&self) -> anyhow::Result<GameConfig> {
        let screen = ScreenGeometry::new(self.screen_width, self.screen_height).with_context(
            || {
                format!(
                    "Unsupported screen size {}x{}",
                    self.screen_width, self.screen_height
                )
            },
        )?;
        Ok(GameConfig {
            screen,
            gravity_interval: Duration::from_millis(self.gravity_ms),
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_config_matches_engine_defaults() {
        let config = GameConfigArg::default().to_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_small_screen_is_rejected() {
        let arg = GameConfigArg {
            screen_height: 300,
            ..GameConfigArg::default()
        };
        let err = arg.to_config().unwrap_err();
        assert!(err.to_string().contains("300"));
    }

    #[test]
    fn test_huge_screen_is_rejected() {
        let arg = GameConfigArg {
            screen_width: u32::MAX,
            ..GameConfigArg::default()
        };
        let err = arg.to_config().unwrap_err();
        assert!(err.to_string().contains("4294967295"));
    }

    #[test]
    fn test_play_is_the_default_mode() {
        let args = CommandArgs::try_parse_from(["stackfall"]).unwrap();
        assert!(args.mode.is_none());

        let args =
            CommandArgs::try_parse_from(["stackfall", "play", "--fps", "60", "--gravity-ms", "500"])
                .unwrap();
        assert!(matches!(args.mode, Some(Mode::Play(_))));
    }
}
