use crate::{TermCoords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{Attribute, Color};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// A single printed character and how it is styled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell::plain(' ');

    pub const fn plain(ch: char) -> Self {
        Cell { ch, color: None, bold: false }
    }

    pub const fn colored(ch: char, color: Color, bold: bool) -> Self {
        Cell { ch, color: Some(color), bold }
    }
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Cell>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermCoords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        let stdout = stdout();
        let screen = vec![Cell::BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)
    }

    pub fn restore(&mut self) -> Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading key")? {
                return Ok(ev);
            }
        }
    }

    /// Waits at most `timeout` for the next key press.
    pub fn poll_key(&self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if !poll(timeout).context("Error polling input")? {
            return Ok(None);
        }

        match read().context("Error reading key")? {
            Event::Key(ev) => Ok(Some(ev)),
            _ => Ok(None),
        }
    }

    /// Re-reads the terminal size, resizing the local screen buffer.
    pub fn refresh_size(&mut self) -> Result<TermCoords> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.screen = vec![Cell::BLANK; width as usize * height as usize];
            self.current_msg = None;
        }
        Ok((width, height))
    }

    pub fn draw_borders(&mut self, size: Option<TermCoords>) -> Result<()> {
        let (width, height) = match size {
            Some((x, y)) => (x, y),
            None => (self.width, self.height)
        };

        if width < 2 || height < 2 {
            return Ok(());
        }

        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == width - 1 {'+'} else {'-'};
            self.print_at((x, 0), Cell::plain(ch))?;
            self.print_at((x, end_y), Cell::plain(ch))?;
        }

        for y in 1..height - 1 {
            self.print_at((0, y), Cell::plain('|'))?;
            self.print_at((end_x, y), Cell::plain('|'))?;
        }

        self.flush()
    }

    pub fn print_str_at(&mut self, pos: TermCoords, text: &str, color: Option<Color>) -> Result<()> {
        for (i, ch) in text.chars().enumerate() {
            let cell = Cell { ch, color, bold: color.is_some() };
            self.print_at((pos.0.saturating_add(i as TermInt), pos.1), cell)?;
        }
        Ok(())
    }

    pub fn show_message<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.as_ref().chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line.as_ref(), width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };
        let top_left = msg.top_left();

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height() {
            for x_diff in 0..msg.width() {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                if let Some(cell) = self.cell_at(pos) {
                    self.queue_cell(pos, cell)?;
                }
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: TermCoords, cell: Cell) -> Result<()> {
        let index = match self.index(pos) {
            Some(index) => index,
            None => return Ok(()),
        };

        self.queue_cell(pos, cell)?;
        self.screen[index] = cell;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![Cell::BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: TermCoords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn cell_at(&self, pos: TermCoords) -> Option<Cell> {
        self.index(pos).map(|i| self.screen[i])
    }

    fn queue_cell(&mut self, pos: TermCoords, cell: Cell) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1)).context("Error moving cursor")?;

        if cell.bold {
            queue!(self.stdout, style::SetAttribute(Attribute::Bold)).context("Error setting bold")?;
        }
        if let Some(color) = cell.color {
            queue!(self.stdout, style::SetForegroundColor(color)).context("Error setting color")?;
        }

        queue!(self.stdout, style::Print(cell.ch)).context("Error printing")?;

        if cell.bold || cell.color.is_some() {
            queue!(self.stdout, style::SetAttribute(Attribute::Reset)).context("Error resetting style")?;
        }
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: TermCoords, ch: char) -> Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        if self.index(pos).is_none() {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).context("Error printing")?;
        Ok(())
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("Error setting raw mode")
    }

    fn set_cursor_blink(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.context("Error setting cursor blink")
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.context("Error setting cursor visibility")
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: TermCoords) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> TermCoords {
        self.top_left
    }
}
