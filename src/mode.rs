use std::time::Duration;

use clap::ValueEnum;

/// Difficulty picked before a game; only decides how long one tick lasts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum GameMode {
    Easy,
    Medium,
    Hard,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Easy, GameMode::Medium, GameMode::Hard];

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Easy => "easy",
            GameMode::Medium => "medium",
            GameMode::Hard => "hard",
        }
    }

    pub fn tick_interval(self) -> Duration {
        let ms = match self {
            GameMode::Easy => 150,
            GameMode::Medium => 100,
            GameMode::Hard => 60,
        };
        Duration::from_millis(ms)
    }
}

/// Cursor over [`GameMode::ALL`] for the difficulty menu. Moving past either
/// end stays put.
#[derive(Debug, Default, Clone)]
pub struct ModeMenu {
    selected: usize,
}

impl ModeMenu {
    pub fn new() -> Self {
        ModeMenu::default()
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.selected = (self.selected + 1).min(GameMode::ALL.len() - 1);
    }

    pub fn selected(&self) -> GameMode {
        GameMode::ALL[self.selected]
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "S N A K E".to_string(),
            String::new(),
            "Choose your difficulty:".to_string(),
            String::new(),
        ];

        for (i, mode) in GameMode::ALL.iter().enumerate() {
            let marker = if i == self.selected { '>' } else { ' ' };
            lines.push(format!("{} {:<6}", marker, mode.label()));
        }

        lines.push(String::new());
        lines.push("Up/Down to choose, Enter to start".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harder_modes_tick_faster() {
        assert!(GameMode::Easy.tick_interval() > GameMode::Medium.tick_interval());
        assert!(GameMode::Medium.tick_interval() > GameMode::Hard.tick_interval());
        assert_eq!(GameMode::Medium.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn menu_clamps_at_ends() {
        let mut menu = ModeMenu::new();
        assert_eq!(menu.selected(), GameMode::Easy);

        menu.up();
        assert_eq!(menu.selected(), GameMode::Easy);

        menu.down();
        menu.down();
        menu.down();
        assert_eq!(menu.selected(), GameMode::Hard);

        menu.up();
        assert_eq!(menu.selected(), GameMode::Medium);
    }

    #[test]
    fn menu_marks_selection() {
        let mut menu = ModeMenu::new();
        menu.down();
        let lines = menu.lines();

        assert!(lines.contains(&"> medium".to_string()));
        assert!(lines.contains(&"  easy  ".to_string()));
    }
}
