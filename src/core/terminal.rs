//! Palette and feedback colours as the terminal shows them
use ratatui::style::{Color, Modifier, Style};

use crate::game::{self, Feedback};

impl From<game::Color> for Color {
    fn from(color: game::Color) -> Self {
        match color {
            game::Color::Red => Color::Red,
            game::Color::Orange => Color::Rgb(255, 140, 0),
            game::Color::Yellow => Color::Yellow,
            game::Color::White => Color::White,
            game::Color::Green => Color::Green,
            game::Color::Blue => Color::Blue,
        }
    }
}

/// A filled peg in its own colour.
pub fn peg_style(color: game::Color) -> Style {
    Style::default().fg(color.into()).add_modifier(Modifier::BOLD)
}

pub fn feedback_style(feedback: Feedback) -> Style {
    match feedback {
        Feedback::Correct => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Feedback::Present => Style::default().fg(Color::Yellow),
        Feedback::Absent => Style::default().fg(Color::DarkGray),
    }
}

/// Single-character marker shown next to each peg in the history.
pub fn feedback_glyph(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::Correct => "●",
        Feedback::Present => "○",
        Feedback::Absent => "·",
    }
}
