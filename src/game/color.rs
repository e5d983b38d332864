use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A peg colour. The default palette uses all six.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Yellow,
    White,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::White,
        Color::Green,
        Color::Blue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::Green => "green",
            Color::Blue => "blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseColorError(wanted.to_string()))
    }
}

/// Parses a comma or whitespace separated list such as `red,blue,green,white`.
pub fn parse_colors(list: &str) -> Result<Vec<Color>, ParseColorError> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Red".parse::<Color>(), Ok(Color::Red));
        assert_eq!(" blue ".parse::<Color>(), Ok(Color::Blue));
        assert_eq!(
            "purple".parse::<Color>(),
            Err(ParseColorError("purple".into()))
        );
    }

    #[test]
    fn parses_lists_with_mixed_separators() {
        assert_eq!(
            parse_colors("red, orange yellow,white").unwrap(),
            vec![Color::Red, Color::Orange, Color::Yellow, Color::White]
        );
        assert!(parse_colors("red,pink").is_err());
    }

    #[test]
    fn serializes_as_lowercase_names() {
        let json = serde_json::to_string(&Color::Green).unwrap();
        assert_eq!(json, "\"green\"");
        let back: Color = serde_json::from_str("\"white\"").unwrap();
        assert_eq!(back, Color::White);
    }
}
