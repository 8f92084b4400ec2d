//! The grid simulation: snake movement, target consumption, growth and
//! win/loss detection. No I/O happens here; the terminal layer only ever sees
//! a [`GameView`] borrowed between ticks.

use std::collections::HashSet;

use log::{debug, info};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use thiserror::Error;

use crate::snake::{Coord, Direction, Segment, DIRECTIONS};

pub const SCORE_INCREMENT: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub fn new(width: i32, height: i32) -> Self {
        Dimension { width, height }
    }

    pub fn center(&self) -> Coord {
        Coord::new(self.height / 2, self.width / 2)
    }
}

/// Rejected board configurations. Everything past construction is total.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },
    #[error("border must not be negative, got {0}")]
    NegativeBorder(i32),
    #[error("a border of {border} leaves no interior on a {width}x{height} board")]
    NoInterior { width: i32, height: i32, border: i32 },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// What a single call to [`SnakeEngine::tick`] did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was already over, nothing changed.
    Idle,
    Moved,
    Ate,
    Lost(Collision),
    Won,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Read-only snapshot of one completed tick, handed to the renderer.
#[derive(Debug, Copy, Clone)]
pub struct GameView<'a> {
    pub snake: &'a [Segment],
    pub target: Coord,
    pub score: u32,
    pub dimension: Dimension,
    pub border: i32,
    pub game_over: bool,
    pub status: GameStatus,
}

pub struct SnakeEngine<R = StdRng> {
    dimension: Dimension,
    border: i32,
    snake: Vec<Segment>,
    targets: Vec<Coord>,
    cursor: usize,
    score: u32,
    game_over: bool,
    rng: R,
}

impl SnakeEngine<StdRng> {
    pub fn with_seed(dimension: Dimension, border: i32, seed: u64) -> Result<Self, ConfigError> {
        Self::new(dimension, border, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(dimension: Dimension, border: i32) -> Result<Self, ConfigError> {
        Self::new(dimension, border, StdRng::from_entropy())
    }
}

impl<R: Rng> SnakeEngine<R> {
    /// Validates the board and spawns the first snake and target.
    pub fn new(dimension: Dimension, border: i32, rng: R) -> Result<Self, ConfigError> {
        validate(dimension, border)?;

        let mut engine = SnakeEngine {
            dimension,
            border,
            snake: Vec::new(),
            targets: Vec::new(),
            cursor: 0,
            score: 0,
            game_over: false,
            rng,
        };
        engine.reset();
        Ok(engine)
    }

    /// Reshuffles the targets and respawns the snake on the current board.
    pub fn reset(&mut self) {
        self.targets = interior_cells(self.dimension, self.border);
        self.targets.shuffle(&mut self.rng);
        self.cursor = 0;

        let direction = DIRECTIONS[self.rng.gen_range(0..DIRECTIONS.len())];
        self.snake.clear();
        self.snake.push(Segment::new(self.dimension.center(), direction));

        self.score = 0;
        self.game_over = false;

        match self.next_free_target(0) {
            Some(index) => self.cursor = index,
            // A one-cell interior is already filled by the spawned head.
            None => self.game_over = true,
        }

        debug!(
            "reset {}x{} board (border {}): head at {:?} facing {:?}, target at {:?}",
            self.dimension.width,
            self.dimension.height,
            self.border,
            self.head().coord,
            direction,
            self.target()
        );
    }

    /// Like [`reset`](Self::reset), but on a board of a new size.
    pub fn reset_with(&mut self, dimension: Dimension, border: i32) -> Result<(), ConfigError> {
        validate(dimension, border)?;
        self.dimension = dimension;
        self.border = border;
        self.reset();
        Ok(())
    }

    /// Advances the game by one step. `None` keeps the current heading.
    pub fn tick(&mut self, requested: Option<Direction>) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Idle;
        }

        self.move_snake(requested);

        if let Some(collision) = self.collision() {
            self.game_over = true;
            info!("game lost ({:?}) with score {}", collision, self.score);
            return TickOutcome::Lost(collision);
        }

        if self.head().coord != self.target() {
            return TickOutcome::Moved;
        }

        self.score += SCORE_INCREMENT;
        self.extend_snake();

        match self.next_free_target(self.cursor) {
            Some(index) => {
                self.cursor = index;
                debug!("target eaten, score {}, next target at {:?}", self.score, self.target());
                TickOutcome::Ate
            }
            None => {
                self.game_over = true;
                info!("game won with score {}", self.score);
                TickOutcome::Won
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn move_snake(&mut self, requested: Option<Direction>) {
        let mut head = *self.head();
        if let Some(direction) = requested {
            head.direction = direction;
        }
        head.coord = head.coord.step(head.direction);

        // Every other segment takes its predecessor's place from before the move
        self.snake.insert(0, head);
        self.snake.pop();
    }

    fn extend_snake(&mut self) {
        if let Some(tail) = self.snake.last().copied() {
            self.snake.push(tail.behind());
        }
    }

    fn collision(&self) -> Option<Collision> {
        let mut seen = HashSet::with_capacity(self.snake.len());
        if !self.snake.iter().all(|seg| seen.insert(seg.coord)) {
            return Some(Collision::SelfCollision);
        }

        if !self.in_interior(self.head().coord) {
            return Some(Collision::Wall);
        }

        None
    }

    /// First target at or after `start` (wrapping) that the snake does not
    /// cover, or `None` when the snake covers them all.
    fn next_free_target(&self, start: usize) -> Option<usize> {
        let occupied = self.occupied();
        let len = self.targets.len();

        (0..len)
            .map(|i| (start + i) % len)
            .find(|&i| !occupied.contains(&self.targets[i]))
    }
}

impl<R> SnakeEngine<R> {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn border(&self) -> i32 {
        self.border
    }

    pub fn target(&self) -> Coord {
        self.targets[self.cursor]
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn snake(&self) -> &[Segment] {
        &self.snake
    }

    pub fn head(&self) -> &Segment {
        &self.snake[0]
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if !self.game_over {
            return GameStatus::Playing;
        }

        let occupied = self.occupied();
        if self.targets.iter().all(|t| occupied.contains(t)) {
            GameStatus::Won
        } else {
            GameStatus::Lost
        }
    }

    pub fn in_interior(&self, coord: Coord) -> bool {
        let rows = self.border..self.dimension.height - self.border;
        let cols = self.border..self.dimension.width - self.border;
        rows.contains(&coord.row) && cols.contains(&coord.col)
    }

    pub fn view(&self) -> GameView<'_> {
        GameView {
            snake: &self.snake,
            target: self.target(),
            score: self.score,
            dimension: self.dimension,
            border: self.border,
            game_over: self.game_over,
            status: self.status(),
        }
    }

    fn occupied(&self) -> HashSet<Coord> {
        self.snake.iter().map(Coord::from).collect()
    }
}

pub fn validate(dimension: Dimension, border: i32) -> Result<(), ConfigError> {
    let Dimension { width, height } = dimension;

    if width <= 0 || height <= 0 {
        return Err(ConfigError::EmptyBoard { width, height });
    }
    if border < 0 {
        return Err(ConfigError::NegativeBorder(border));
    }
    // Same as `2 * border >= width`, without overflowing on huge borders
    if width - border <= border || height - border <= border {
        return Err(ConfigError::NoInterior { width, height, border });
    }

    Ok(())
}

/// Every interior cell in row-major order.
fn interior_cells(dimension: Dimension, border: i32) -> Vec<Coord> {
    (border..dimension.height - border)
        .flat_map(|row| (border..dimension.width - border).map(move |col| Coord::new(row, col)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    fn engine(width: i32, height: i32, border: i32) -> SnakeEngine {
        SnakeEngine::with_seed(Dimension::new(width, height), border, 7).unwrap()
    }

    fn force_target(engine: &mut SnakeEngine, coord: Coord) {
        engine.cursor = engine.targets.iter().position(|t| *t == coord).unwrap();
    }

    #[test]
    fn test_reset_spawns_centered_head() {
        let engine = engine(10, 8, 1);

        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.head().coord, Coord::new(4, 5));
        assert_eq!(engine.score(), 0);
        assert!(!engine.game_over());
        assert_eq!(engine.status(), GameStatus::Playing);
    }

    #[test]
    fn test_targets_cover_interior_once() {
        let engine = engine(7, 6, 1);
        let mut targets = engine.targets.clone();
        targets.sort_by_key(|c| (c.row, c.col));

        assert_eq!(targets, interior_cells(Dimension::new(7, 6), 1));
        assert_eq!(engine.target_count(), 5 * 4);
        assert_ne!(engine.target(), engine.head().coord);
    }

    #[test]
    fn test_rejects_empty_interior() {
        let dim = Dimension::new(4, 10);
        assert_eq!(
            SnakeEngine::with_seed(dim, 2, 0).err(),
            Some(ConfigError::NoInterior { width: 4, height: 10, border: 2 })
        );
        assert_eq!(
            SnakeEngine::with_seed(Dimension::new(0, 5), 0, 0).err(),
            Some(ConfigError::EmptyBoard { width: 0, height: 5 })
        );
        assert_eq!(
            SnakeEngine::with_seed(dim, -1, 0).err(),
            Some(ConfigError::NegativeBorder(-1))
        );
    }

    #[test]
    fn test_rejects_huge_border() {
        let dim = Dimension::new(10, 10);
        assert_eq!(
            validate(dim, i32::MAX),
            Err(ConfigError::NoInterior { width: 10, height: 10, border: i32::MAX })
        );
        assert!(SnakeEngine::with_seed(dim, 1 << 30, 1).is_err());
        assert!(validate(Dimension::new(i32::MAX, i32::MAX), i32::MAX / 2).is_ok());
        assert!(validate(Dimension::new(5, 5), 2).is_ok());
        assert!(validate(Dimension::new(5, 4), 2).is_err());
    }

    #[test]
    fn test_reset_with_validates_new_board() {
        let mut engine = engine(10, 10, 1);
        assert!(engine.reset_with(Dimension::new(2, 2), 1).is_err());
        assert_eq!(engine.dimension(), Dimension::new(10, 10));

        engine.reset_with(Dimension::new(20, 12), 2).unwrap();
        assert_eq!(engine.dimension(), Dimension::new(20, 12));
        assert_eq!(engine.border(), 2);
        assert_eq!(engine.target_count(), 16 * 8);
    }

    #[test]
    fn test_running_into_top_border() {
        let mut engine = engine(10, 10, 1);
        // Keep the target out of the head's path up column 5
        force_target(&mut engine, Coord::new(8, 8));

        let mut ticks = 0;
        while !engine.game_over() {
            engine.tick(Some(Up));
            ticks += 1;
            assert!(ticks <= 5);
        }

        assert_eq!(engine.head().coord, Coord::new(0, 5));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.status(), GameStatus::Lost);
    }

    #[test]
    fn test_eating_grows_behind_old_head() {
        let mut engine = engine(5, 5, 1);
        assert_eq!(engine.head().coord, Coord::new(2, 2));
        force_target(&mut engine, Coord::new(1, 2));

        assert_eq!(engine.tick(Some(Up)), TickOutcome::Ate);

        assert_eq!(engine.score(), 10);
        assert_eq!(
            engine.snake(),
            &[Segment::new(Coord::new(1, 2), Up), Segment::new(Coord::new(2, 2), Up)]
        );
        assert_ne!(engine.target(), Coord::new(1, 2));
        assert_ne!(engine.target(), Coord::new(2, 2));
    }

    #[test]
    fn test_one_cell_interior_is_full_at_spawn() {
        let engine = engine(3, 3, 1);

        assert_eq!(engine.target_count(), 1);
        assert!(engine.game_over());
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_consuming_sole_target_wins() {
        let mut engine = engine(3, 3, 1);
        engine.snake = vec![Segment::new(Coord::new(2, 1), Up)];
        engine.game_over = false;
        engine.cursor = 0;

        assert_eq!(engine.tick(None), TickOutcome::Won);
        assert!(engine.game_over());
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.status(), GameStatus::Won);
    }

    #[test]
    fn test_none_keeps_heading() {
        let mut remembers = engine(20, 20, 1);
        let mut caller = engine(20, 20, 1);
        force_target(&mut remembers, Coord::new(1, 1));
        force_target(&mut caller, Coord::new(1, 1));
        let heading = remembers.head().direction;

        for _ in 0..3 {
            remembers.tick(None);
            caller.tick(Some(heading));
        }

        assert_eq!(remembers.snake(), caller.snake());
        assert_eq!(remembers.head().direction, heading);
    }

    #[test]
    fn test_reversing_into_neck_is_self_collision() {
        let mut engine = engine(10, 10, 1);
        engine.snake = vec![
            Segment::new(Coord::new(5, 5), Right),
            Segment::new(Coord::new(5, 4), Right),
        ];
        force_target(&mut engine, Coord::new(1, 1));

        assert_eq!(engine.tick(Some(Left)), TickOutcome::Lost(Collision::SelfCollision));
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut engine = engine(10, 10, 1);
        engine.snake = vec![Segment::new(Coord::new(1, 1), Up)];
        force_target(&mut engine, Coord::new(5, 5));

        assert_eq!(engine.tick(None), TickOutcome::Lost(Collision::Wall));
        let snake = engine.snake().to_vec();
        let target = engine.target();

        for dir in [None, Some(Down), Some(Right)].iter() {
            assert_eq!(engine.tick(*dir), TickOutcome::Idle);
        }

        assert_eq!(engine.snake(), &snake[..]);
        assert_eq!(engine.target(), target);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_reset_leaves_game_over() {
        let mut engine = engine(10, 10, 1);
        engine.snake = vec![Segment::new(Coord::new(1, 1), Left)];
        force_target(&mut engine, Coord::new(5, 5));
        engine.tick(None);
        assert!(engine.game_over());

        engine.reset();
        assert!(!engine.game_over());
        assert_eq!(engine.snake().len(), 1);
    }

    #[test]
    fn test_view_mirrors_accessors() {
        let engine = engine(12, 9, 1);
        let view = engine.view();

        assert_eq!(view.snake, engine.snake());
        assert_eq!(view.target, engine.target());
        assert_eq!(view.dimension, engine.dimension());
        assert_eq!(view.border, 1);
        assert_eq!(view.status, GameStatus::Playing);
    }
}
