use std::time::Duration;

use crate::timer::{Interval, Timeout};

pub const SEARCH_PLACEHOLDERS: [&str; 5] = [
    "Search affiliated creators\u{2026}",
    "Search your campaign creators\u{2026}",
    "Search Sire Media verified creators\u{2026}",
    "Search inside your campaign\u{2026}",
    "Search creators assigned to your project\u{2026}",
];

pub const TAGLINE_PHRASES: [&str; 3] = [
    "Creator-first workflows",
    "Data-backed decisions",
    "Deliverables that ship",
];

/// Cycles through placeholder strings on a fixed period.
#[derive(Debug, Clone)]
pub struct PlaceholderRotator {
    items: Vec<String>,
    index: usize,
    interval: Interval,
}

impl PlaceholderRotator {
    pub fn new<I, S>(items: I, period: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            index: 0,
            interval: Interval::new(period),
        }
    }

    pub fn current(&self) -> &str {
        self.items.get(self.index).map(String::as_str).unwrap_or("")
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        let fires = self.interval.advance(dt) as usize;
        if fires == 0 || self.items.is_empty() {
            return false;
        }
        self.index = (self.index + fires) % self.items.len();
        true
    }

    pub fn cancel(&mut self) {
        self.interval.cancel();
    }
}

const SEARCH_READY: &str = "Private network search ready.";
const SEARCH_BUSY: &str = "Searching your exclusive roster...";

/// Search input state: typed query plus a transient status message.
#[derive(Debug, Clone)]
pub struct SearchBox {
    pub query: String,
    message: &'static str,
    busy_for: Duration,
    reset: Option<Timeout>,
}

impl SearchBox {
    pub fn new(busy_for: Duration) -> Self {
        Self {
            query: String::new(),
            message: SEARCH_READY,
            busy_for,
            reset: None,
        }
    }

    pub fn message(&self) -> &str {
        self.message
    }

    pub fn is_busy(&self) -> bool {
        self.reset.as_ref().is_some_and(Timeout::is_pending)
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }

    /// Submitting restarts the busy timeout
    pub fn submit(&mut self) {
        tracing::info!(query = %self.query, "search submitted");
        self.message = SEARCH_BUSY;
        self.reset = Some(Timeout::new(self.busy_for));
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some(reset) = &mut self.reset {
            if reset.advance(dt) {
                self.message = SEARCH_READY;
                self.reset = None;
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(reset) = &mut self.reset {
            reset.cancel();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypingPhase {
    Typing,
    Holding,
}

/// Types phrases one character at a time, holds, then moves on.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase: usize,
    chars: usize,
    phase: TypingPhase,
    keystroke: Interval,
    hold: Timeout,
    hold_for: Duration,
    reduced_motion: bool,
    cancelled: bool,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I, hold_for: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        let keystroke = Interval::new(keystroke_period(phrases.first()));
        Self {
            phrases,
            phrase: 0,
            chars: 0,
            phase: TypingPhase::Typing,
            keystroke,
            hold: Timeout::new(hold_for),
            hold_for,
            reduced_motion: false,
            cancelled: false,
        }
    }

    pub fn reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn text(&self) -> String {
        if self.reduced_motion {
            return self.phrases.join(" \u{2022} ");
        }
        self.phrases
            .get(self.phrase)
            .map(|p| p.chars().take(self.chars).collect())
            .unwrap_or_default()
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.cancelled || self.reduced_motion || self.phrases.is_empty() {
            return;
        }
        match self.phase {
            TypingPhase::Typing => {
                let len = self.phrases[self.phrase].chars().count();
                self.chars = (self.chars + self.keystroke.advance(dt) as usize).min(len);
                if self.chars >= len {
                    self.phase = TypingPhase::Holding;
                    self.hold = Timeout::new(self.hold_for);
                }
            }
            TypingPhase::Holding => {
                if self.hold.advance(dt) {
                    self.phrase = (self.phrase + 1) % self.phrases.len();
                    self.chars = 0;
                    self.phase = TypingPhase::Typing;
                    self.keystroke = Interval::new(keystroke_period(self.phrases.get(self.phrase)));
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.keystroke.cancel();
        self.hold.cancel();
    }
}

/// Longer phrases type faster, never below 12ms per key
fn keystroke_period(phrase: Option<&String>) -> Duration {
    let len = phrase.map_or(1, |p| p.chars().count().max(1)) as u64;
    Duration::from_millis((300 / len).max(12))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_placeholder_rotates_and_wraps() {
        let mut r = PlaceholderRotator::new(["a", "b", "c"], ms(3200));
        assert_eq!(r.current(), "a");
        assert!(!r.tick(ms(3000)));
        assert!(r.tick(ms(200)));
        assert_eq!(r.current(), "b");
        r.tick(ms(6400));
        assert_eq!(r.current(), "a");
    }

    #[test]
    fn test_cancelled_rotator_is_frozen() {
        let mut r = PlaceholderRotator::new(SEARCH_PLACEHOLDERS, ms(3200));
        r.cancel();
        assert!(!r.tick(ms(10_000)));
        assert_eq!(r.current(), SEARCH_PLACEHOLDERS[0]);
    }

    #[test]
    fn test_empty_rotator() {
        let mut r = PlaceholderRotator::new(Vec::<String>::new(), ms(10));
        assert!(!r.tick(ms(100)));
        assert_eq!(r.current(), "");
    }

    #[test]
    fn test_search_message_resets_after_timeout() {
        let mut search = SearchBox::new(ms(1300));
        search.push('x');
        search.submit();
        assert!(search.is_busy());
        assert_eq!(search.message(), SEARCH_BUSY);
        search.tick(ms(1000));
        assert_eq!(search.message(), SEARCH_BUSY);
        search.tick(ms(300));
        assert_eq!(search.message(), SEARCH_READY);
        assert!(!search.is_busy());
    }

    #[test]
    fn test_typewriter_types_holds_and_advances() {
        let mut tw = Typewriter::new(["abc", "de"], ms(1140));
        assert_eq!(tw.text(), "");
        tw.tick(ms(100));
        assert_eq!(tw.text(), "a");
        tw.tick(ms(200));
        assert_eq!(tw.text(), "abc");
        tw.tick(ms(1139));
        assert_eq!(tw.text(), "abc");
        tw.tick(ms(1));
        assert_eq!(tw.text(), "");
        tw.tick(ms(150));
        assert_eq!(tw.text(), "d");
    }

    #[test]
    fn test_typewriter_cancelled_while_holding_stays_put() {
        let mut tw = Typewriter::new(["ab", "cd"], ms(500));
        tw.tick(ms(300));
        assert_eq!(tw.text(), "ab");
        tw.cancel();
        tw.tick(ms(10_000));
        assert_eq!(tw.text(), "ab");
    }

    #[test]
    fn test_typewriter_reduced_motion_shows_everything() {
        let mut tw = Typewriter::new(TAGLINE_PHRASES, ms(1140)).reduced_motion(true);
        tw.tick(ms(5000));
        assert_eq!(
            tw.text(),
            "Creator-first workflows \u{2022} Data-backed decisions \u{2022} Deliverables that ship"
        );
    }

    #[test]
    fn test_keystroke_period_floor() {
        let long = "x".repeat(100);
        assert_eq!(keystroke_period(Some(&long)), ms(12));
        assert_eq!(keystroke_period(None), ms(300));
    }
}
