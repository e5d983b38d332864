//! Draws a session with ratatui. Pure presentation: reads state, never changes it
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::core::board::HistoryEntry;
use crate::core::runner::Session;
use crate::core::terminal::{feedback_glyph, feedback_style, peg_style};
use crate::game::{Outcome, SecretCode};

pub fn render(frame: &mut Frame, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(status_bar(session), chunks[0]);
    frame.render_widget(history(session), chunks[1]);
    frame.render_widget(selection(session), chunks[2]);
    frame.render_widget(palette(session), chunks[3]);
    frame.render_widget(footer(session), chunks[4]);
}

fn status_bar(session: &Session) -> Paragraph<'static> {
    let state = session.engine().state();
    let time = match session.engine().remaining_ticks() {
        Some(t) => t.to_string(),
        None => "-".into(),
    };
    let text = format!(
        "Attempt {}/{}    Points {}    Time {}",
        state.attempts, state.max_attempts, state.points, time
    );
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" MASTERMIND · {} ", session.player_name()))
                .borders(Borders::ALL),
        )
}

fn code_spans(code: &SecretCode) -> Vec<Span<'static>> {
    code.colors()
        .iter()
        .map(|&c| Span::styled(format!(" {:<7}", c.name()), peg_style(c)))
        .collect()
}

fn history(session: &Session) -> List<'static> {
    let items: Vec<ListItem> = session
        .board()
        .history()
        .iter()
        .rev()
        .map(|entry| match entry {
            HistoryEntry::Scored(result) => {
                let mut spans = vec![Span::raw(format!("{:>3}. ", result.attempts))];
                for (&color, &verdict) in result.guess.colors().iter().zip(&result.feedback) {
                    spans.push(Span::styled(feedback_glyph(verdict), feedback_style(verdict)));
                    spans.push(Span::styled(format!("{:<7} ", color.name()), peg_style(color)));
                }
                spans.push(Span::raw(format!("  -{}", result.penalty)));
                ListItem::new(Line::from(spans))
            }
            HistoryEntry::TimedOut { attempt } => ListItem::new(Line::from(Span::styled(
                format!("{attempt:>3}. time ran out"),
                Style::default().fg(Color::DarkGray),
            ))),
        })
        .collect();

    List::new(items).block(Block::default().title(" HISTORY ").borders(Borders::ALL))
}

fn selection(session: &Session) -> Paragraph<'static> {
    let board = session.board();
    let spans: Vec<Span> = board
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let label = slot.map(|c| c.name()).unwrap_or("____");
            let text = if i == board.cursor() {
                format!("[{label:^7}]")
            } else {
                format!(" {label:^7} ")
            };
            let style = match slot {
                Some(c) => peg_style(*c),
                None => Style::default().fg(Color::DarkGray),
            };
            Span::styled(text, style)
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().title(" YOUR GUESS ").borders(Borders::ALL))
}

fn palette(session: &Session) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, &color) in session.engine().palette().iter().enumerate() {
        spans.push(Span::raw(format!(" {} ", i + 1)));
        spans.push(Span::styled(color.name(), peg_style(color)));
        spans.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(code) = session.visible_secret() {
        let mut reveal = vec![Span::styled(
            " code:",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        reveal.extend(code_spans(code));
        lines = vec![Line::from(reveal)];
    }

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" PALETTE ").borders(Borders::ALL))
}

fn footer(session: &Session) -> Paragraph<'static> {
    let help = match session.engine().outcome() {
        Outcome::InProgress => {
            "[1-9] Color  [←/→] Move  [↑/↓] Cycle  [Del] Clear  [Enter] Submit  [Esc] Give up"
        }
        _ => "[N] New game  [Q/Esc] Quit",
    };
    Paragraph::new(vec![
        Line::from(session.message().to_string()),
        Line::from(Span::styled(help, Style::default().fg(Color::Cyan))),
    ])
    .alignment(Alignment::Center)
}
