/// Logical countdown for a single turn.
///
/// The count starts at 1 when a turn begins and each tick adds one. The turn
/// expires once the count reaches `max + 1`, so a full turn lasts `max` ticks.
/// Nothing here knows about wall-clock time; the caller decides how long a
/// tick is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnTimer {
    max: u32,
    count: u32,
    running: bool,
}

impl TurnTimer {
    pub fn new(max: u32) -> Self {
        Self {
            max,
            count: 0,
            running: false,
        }
    }

    pub fn restart(&mut self) {
        self.count = 1;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn remaining(&self) -> u32 {
        self.max.saturating_add(1).saturating_sub(self.count)
    }

    /// Advances one tick and reports whether the turn just ran out.
    /// A stopped timer never expires.
    pub fn advance(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.count = self.count.saturating_add(1);
        self.count > self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_turn_lasts_max_ticks() {
        let mut timer = TurnTimer::new(10);
        timer.restart();
        assert_eq!(timer.remaining(), 10);
        for expected in (1..10).rev() {
            assert!(!timer.advance());
            assert_eq!(timer.remaining(), expected);
        }
        assert!(timer.advance());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn restart_returns_to_first_tick() {
        let mut timer = TurnTimer::new(3);
        timer.restart();
        timer.advance();
        timer.advance();
        timer.restart();
        assert_eq!(timer.count(), 1);
        assert_eq!(timer.remaining(), 3);
    }

    #[test]
    fn largest_max_does_not_overflow() {
        let mut timer = TurnTimer::new(u32::MAX);
        timer.restart();
        assert_eq!(timer.remaining(), u32::MAX - 1);
        assert!(!timer.advance());
        assert_eq!(timer.remaining(), u32::MAX - 2);
    }

    #[test]
    fn stopped_timer_does_not_move() {
        let mut timer = TurnTimer::new(2);
        timer.restart();
        timer.stop();
        assert!(!timer.advance());
        assert_eq!(timer.count(), 1);
    }
}
