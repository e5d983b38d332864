use crate::game::{Color, Guess, GuessResult};

/// One line of the turn history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    Scored(GuessResult),
    /// The countdown ran out before anything was submitted.
    TimedOut { attempt: u32 },
}

/// The player's pegs for the turn being composed, plus the history of
/// finished turns. The engine keeps no history, so the board records it from
/// what the engine returns.
#[derive(Debug, Clone)]
pub struct Board {
    slots: Vec<Option<Color>>,
    cursor: usize,
    history: Vec<HistoryEntry>,
}

impl Board {
    pub fn new(code_length: usize) -> Self {
        Self {
            slots: vec![None; code_length],
            cursor: 0,
            history: Vec::new(),
        }
    }

    pub fn slots(&self) -> &[Option<Color>] {
        &self.slots
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Newest entry last.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor + 1 < self.slots.len() {
            self.cursor += 1;
        }
    }

    /// Puts `color` under the cursor and steps to the next slot.
    pub fn place(&mut self, color: Color) {
        if let Some(slot) = self.slots.get_mut(self.cursor) {
            *slot = Some(color);
            self.move_right();
        }
    }

    /// Rotates the colour under the cursor through `palette`, the way a mouse
    /// wheel over a peg would. An empty slot takes the first (or last) colour.
    pub fn cycle(&mut self, palette: &[Color], forward: bool) {
        if palette.is_empty() {
            return;
        }
        let Some(slot) = self.slots.get_mut(self.cursor) else {
            return;
        };
        let len = palette.len();
        let next = match slot.and_then(|c| palette.iter().position(|&p| p == c)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        *slot = Some(palette[next]);
    }

    pub fn clear_slot(&mut self) {
        if let Some(slot) = self.slots.get_mut(self.cursor) {
            *slot = None;
        }
    }

    pub fn clear_selection(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.cursor = 0;
    }

    /// The composed guess, or `None` while a slot is still empty.
    pub fn guess(&self) -> Option<Guess> {
        self.slots
            .iter()
            .copied()
            .collect::<Option<Vec<Color>>>()
            .map(Guess::new)
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }

    /// Wipes pegs and history for a new game.
    pub fn reset(&mut self, code_length: usize) {
        *self = Self::new(code_length);
    }
}
