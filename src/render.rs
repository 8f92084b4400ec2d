use std::collections::HashMap;

use anyhow::Result;
use crossterm::style::Color;

use crate::engine::{GameStatus, GameView};
use crate::snake::Coord;
use crate::term::{Cell, TermManager};
use crate::{TermCoords, TermInt};

const SNAKE_BODY_CHAR: char = '+';
const TARGET_CHAR: char = '◆';
const DEAD_SNAKE_CHAR: char = 'X';

/// Draws engine snapshots incrementally: cells that left the board since the
/// previous frame are blanked and only new or changed cells are printed.
#[derive(Default)]
pub struct Renderer {
    drawn: HashMap<TermCoords, Cell>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer::default()
    }

    /// Full redraw: clears the terminal and draws the frame, border and
    /// pieces from scratch.
    pub fn draw_board(&mut self, term: &mut TermManager, view: &GameView) -> Result<()> {
        term.clear()?;
        self.drawn.clear();

        if view.border > 0 {
            let size = (view.dimension.width as TermInt, view.dimension.height as TermInt);
            term.draw_borders(Some(size))?;
        }

        self.draw_update(term, view)
    }

    pub fn draw_update(&mut self, term: &mut TermManager, view: &GameView) -> Result<()> {
        let frame = frame_cells(view);
        let (stale, changed) = frame_diff(&self.drawn, &frame);

        for pos in stale {
            term.print_at(pos, Cell::BLANK)?;
        }

        // Before the pieces, so a head that died on the top wall stays visible
        for (pos, cell) in label_cells(view, &frame) {
            term.print_at(pos, cell)?;
        }

        for (pos, cell) in changed {
            term.print_at(pos, cell)?;
        }

        self.drawn = frame;
        term.flush()
    }
}

/// Board cells keyed by terminal position, dropping anything off screen.
fn frame_cells(view: &GameView) -> HashMap<TermCoords, Cell> {
    board_cells(view)
        .into_iter()
        .filter_map(|(coord, cell)| to_term(coord).map(|pos| (pos, cell)))
        .collect()
}

/// Positions to blank and cells to print to go from `prev` to `next`.
fn frame_diff(
    prev: &HashMap<TermCoords, Cell>,
    next: &HashMap<TermCoords, Cell>,
) -> (Vec<TermCoords>, Vec<(TermCoords, Cell)>) {
    let stale = prev.keys().filter(|pos| !next.contains_key(*pos)).copied().collect();
    let changed = next
        .iter()
        .filter(|(pos, cell)| prev.get(*pos) != Some(*cell))
        .map(|(pos, cell)| (*pos, *cell))
        .collect();

    (stale, changed)
}

/// The score label on the top border, leaving out cells the frame occupies.
fn label_cells(view: &GameView, frame: &HashMap<TermCoords, Cell>) -> Vec<(TermCoords, Cell)> {
    let label = score_label(view.score);
    if view.border <= 0 || label.chars().count() + 4 > view.dimension.width as usize {
        return Vec::new();
    }

    label
        .chars()
        .enumerate()
        .map(|(i, ch)| ((2 + i as TermInt, 0), Cell::colored(ch, Color::Cyan, true)))
        .filter(|(pos, _)| !frame.contains_key(pos))
        .collect()
}

/// The cells occupied by the target and the snake, in drawing order. The
/// head is drawn last so it stays visible on a self collision.
pub fn board_cells(view: &GameView) -> Vec<(Coord, Cell)> {
    let mut cells = Vec::with_capacity(view.snake.len() + 1);
    let dead = view.status == GameStatus::Lost;

    if !view.game_over {
        cells.push((view.target, Cell::colored(TARGET_CHAR, Color::Red, true)));
    }

    for seg in view.snake.iter().skip(1).rev() {
        let ch = if dead { DEAD_SNAKE_CHAR } else { SNAKE_BODY_CHAR };
        cells.push((seg.coord, Cell::colored(ch, Color::Green, false)));
    }

    if let Some(head) = view.snake.first() {
        let ch = if dead { DEAD_SNAKE_CHAR } else { head.direction.head_char() };
        cells.push((head.coord, Cell::colored(ch, Color::Green, true)));
    }

    cells
}

pub fn score_label(score: u32) -> String {
    format!(" Score: {} ", score)
}

pub fn game_over_lines(view: &GameView) -> Vec<String> {
    let title = match view.status {
        GameStatus::Won => "YOU WIN!",
        _ => "GAME OVER",
    };

    vec![
        title.to_string(),
        format!("SCORE: {}", view.score),
        String::new(),
        "Press r to play again,".to_string(),
        "or q to quit.".to_string(),
    ]
}

fn to_term(coord: Coord) -> Option<TermCoords> {
    if coord.row < 0 || coord.col < 0 || coord.row > TermInt::MAX as i32 || coord.col > TermInt::MAX as i32 {
        return None;
    }
    Some((coord.col as TermInt, coord.row as TermInt))
}
