use crate::card::CardSet;
use crate::geometry::center_index;

/// Focused card in the deck, used for emphasis styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckFocus {
    active: usize,
    count: usize,
}

impl DeckFocus {
    /// Starts on the center card
    pub fn new(count: usize) -> Self {
        Self {
            active: center_index(count),
            count,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.count > 0 && self.active == index
    }

    /// Focus follows the last interacted card; out-of-range indices are ignored
    pub fn focus(&mut self, index: usize) {
        if index < self.count {
            self.active = index;
        }
    }

    pub fn next(&mut self) {
        if self.active + 1 < self.count {
            self.active += 1;
        }
    }

    pub fn prev(&mut self) {
        self.active = self.active.saturating_sub(1);
    }
}

/// Emphasis of a card in the why-us rail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Active,
    Near,
    Inactive,
}

/// Vertically scrolled rail with a single active card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRail {
    active: usize,
    count: usize,
}

impl FocusRail {
    pub fn new(count: usize) -> Self {
        Self { active: 0, count }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn focus(&mut self, index: usize) {
        if index < self.count {
            self.active = index;
        }
    }

    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1).min(self.count.saturating_sub(1));
        self.active
    }

    pub fn prev(&mut self) -> usize {
        self.active = self.active.saturating_sub(1);
        self.active
    }

    pub fn emphasis(&self, index: usize) -> Emphasis {
        match index.abs_diff(self.active) {
            0 => Emphasis::Active,
            1 => Emphasis::Near,
            _ => Emphasis::Inactive,
        }
    }

    pub fn live_message(&self, cards: &CardSet) -> Option<String> {
        let card = cards.get(self.active)?;
        Some(format!(
            "Now showing: {} \u{2014} {} merits, {} why-us points.",
            card.title,
            card.merits.len(),
            card.why_us.len()
        ))
    }
}
