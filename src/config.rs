use clap::ValueEnum;
use log::warn;
use simplelog::LevelFilter;
use thiserror::Error;

use crate::engine::{self, Dimension};
use crate::mode::GameMode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("a {width}x{height} board does not fit in a {term_width}x{term_height} terminal")]
    DoesNotFit { width: u16, height: u16, term_width: u16, term_height: u16 },
    #[error(transparent)]
    Board(#[from] engine::ConfigError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Board and session settings. Unset width/height follow the terminal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub border: u16,
    pub seed: Option<u64>,
    pub mode: Option<GameMode>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { width: None, height: None, border: 1, seed: None, mode: None }
    }
}

impl GameConfig {
    pub fn follows_terminal(&self) -> bool {
        self.width.is_none() || self.height.is_none()
    }

    pub fn size(&self, terminal: (u16, u16)) -> (u16, u16) {
        (self.width.unwrap_or(terminal.0), self.height.unwrap_or(terminal.1))
    }

    /// Resolves the board size against the terminal and checks that it fits
    /// and still has an interior.
    pub fn dimension(&self, terminal: (u16, u16)) -> Result<Dimension, SetupError> {
        let (width, height) = self.size(terminal);

        if width > terminal.0 || height > terminal.1 {
            return Err(SetupError::DoesNotFit {
                width,
                height,
                term_width: terminal.0,
                term_height: terminal.1,
            });
        }

        let dimension = Dimension::new(width as i32, height as i32);
        engine::validate(dimension, self.border as i32)?;
        Ok(dimension)
    }

    /// Board for the next round after the terminal may have been resized.
    /// `None` keeps the current board: the size is pinned, or the new
    /// terminal cannot hold it.
    pub fn restart_dimension(&self, terminal: (u16, u16)) -> Option<Dimension> {
        if !self.follows_terminal() {
            return None;
        }

        match self.dimension(terminal) {
            Ok(dimension) => Some(dimension),
            Err(err) => {
                warn!("keeping the current board: {}", err);
                None
            }
        }
    }
}
