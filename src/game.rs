use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use log::{error, info};

use crate::config::GameConfig;
use crate::engine::{Dimension, SnakeEngine, TickOutcome};
use crate::input::{is_ctrl_c, map_key, KeyAction};
use crate::mode::{GameMode, ModeMenu};
use crate::render::{self, Renderer};
use crate::snake::Direction;
use crate::term::TermManager;

/// How a round or a prompt was left.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Restart,
    Quit,
}

pub struct SnakeGame {
    config: GameConfig,
    paused: bool,
    term: TermManager,
    renderer: Renderer,
    engine: SnakeEngine,
}

impl SnakeGame {
    pub fn new(config: GameConfig, dimension: Dimension) -> Result<Self> {
        let border = config.border as i32;
        let engine = match config.seed {
            Some(seed) => SnakeEngine::with_seed(dimension, border, seed)?,
            None => SnakeEngine::from_entropy(dimension, border)?,
        };

        Ok(SnakeGame {
            config,
            paused: false,
            term: TermManager::new()?,
            renderer: Renderer::new(),
            engine,
        })
    }

    /// Takes over the terminal, plays until the user quits and hands the
    /// terminal back, even when a round failed.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;

        let result = self.run_rounds();

        if let Err(err) = self.term.restore() {
            error!("failed to restore terminal: {:#}", err);
        }

        result
    }

    ///////////////////////////////////////////////////////////////////////////

    fn run_rounds(&mut self) -> Result<()> {
        let mode = match self.config.mode {
            Some(mode) => mode,
            None => match self.choose_mode()? {
                Some(mode) => mode,
                None => return Ok(()),
            },
        };
        info!("playing on {} ({:?} per tick)", mode.label(), mode.tick_interval());

        loop {
            if self.play(mode.tick_interval())? == Flow::Quit {
                return Ok(());
            }

            match self.game_over()? {
                Flow::Restart => self.restart()?,
                _ => return Ok(()),
            }
        }
    }

    fn choose_mode(&mut self) -> Result<Option<GameMode>> {
        let mut menu = ModeMenu::new();

        loop {
            self.term.show_message(&menu.lines())?;

            let key = self.term.read_key_blocking()?;
            if is_ctrl_c(&key) {
                return Ok(None);
            }

            match key.code {
                KeyCode::Up | KeyCode::Char('w') => menu.up(),
                KeyCode::Down | KeyCode::Char('s') => menu.down(),
                KeyCode::Enter => {
                    self.term.hide_message()?;
                    return Ok(Some(menu.selected()));
                }
                KeyCode::Char('q') => return Ok(None),
                _ => {}
            }
        }
    }

    fn play(&mut self, interval: Duration) -> Result<Flow> {
        self.paused = false;
        self.renderer.draw_board(&mut self.term, &self.engine.view())?;

        while !self.engine.game_over() {
            let requested = match self.collect_input(interval)? {
                (Flow::Quit, _) => return Ok(Flow::Quit),
                (_, requested) => requested,
            };

            if self.paused {
                continue;
            }

            if let TickOutcome::Lost(_) | TickOutcome::Won = self.engine.tick(requested) {
                info!("round finished with score {}", self.engine.score());
            }
            self.renderer.draw_update(&mut self.term, &self.engine.view())?;
        }

        Ok(Flow::Continue)
    }

    /// Reads keys until `interval` has passed. The last direction pressed
    /// wins; no direction key means `None`.
    fn collect_input(&mut self, interval: Duration) -> Result<(Flow, Option<Direction>)> {
        let deadline = Instant::now() + interval;
        let mut requested = None;

        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok((Flow::Continue, requested));
            }

            let key = match self.term.poll_key(deadline - now)? {
                Some(key) => key,
                None => continue,
            };

            match map_key(&key) {
                KeyAction::Turn(dir) if !self.paused => requested = Some(dir),
                KeyAction::Pause => self.toggle_pause()?,
                KeyAction::Quit => return Ok((Flow::Quit, None)),
                _ => {}
            }
        }
    }

    fn game_over(&mut self) -> Result<Flow> {
        let lines = render::game_over_lines(&self.engine.view());
        self.term.show_message(&lines)?;

        loop {
            match map_key(&self.term.read_key_blocking()?) {
                KeyAction::Restart => return Ok(Flow::Restart),
                KeyAction::Quit => return Ok(Flow::Quit),
                _ => {}
            }
        }
    }

    fn restart(&mut self) -> Result<()> {
        let terminal = self.term.refresh_size()?;

        match self.config.restart_dimension(terminal) {
            Some(dimension) => self.engine.reset_with(dimension, self.config.border as i32)?,
            None => self.engine.reset(),
        }

        info!("restarted on a {}x{} board", self.engine.dimension().width, self.engine.dimension().height);
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}
