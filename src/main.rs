use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal;
use log::info;
use simplelog::{Config, WriteLogger};

use snake::config::{GameConfig, LogLevel};
use snake::game::SnakeGame;
use snake::mode::GameMode;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Difficulty; asks interactively when left out
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Board width, defaults to the terminal width
    #[arg(long)]
    width: Option<u16>,

    /// Board height, defaults to the terminal height
    #[arg(long)]
    height: Option<u16>,

    /// Impassable cells on every edge of the board
    #[arg(long, default_value_t = 1)]
    border: u16,

    /// Seed for target order and spawn direction
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log, the terminal itself is taken by the game
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = GameConfig {
        width: cli.width,
        height: cli.height,
        border: cli.border,
        seed: cli.seed,
        mode: cli.mode,
    };

    let terminal = terminal::size().context("Failed to read terminal size")?;
    let dimension = config.dimension(terminal)?;
    info!("starting snake: {:?} on a {}x{} board", config, dimension.width, dimension.height);

    let mut game = SnakeGame::new(config, dimension)?;
    game.run()
}
