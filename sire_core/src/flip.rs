/// Which face of a card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

/// Keys that can activate a focused card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKey {
    Enter,
    Space,
    Other,
}

/// Where a flip request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Pointer click; `on_nested_control` is set when it landed on a link/button inside the card
    Click { on_nested_control: bool },
    Key(ActivationKey),
}

impl Interaction {
    fn activates_card(&self) -> bool {
        match self {
            Interaction::Click { on_nested_control } => !on_nested_control,
            Interaction::Key(key) => matches!(key, ActivationKey::Enter | ActivationKey::Space),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The card now shows its back
    Flipped,
    /// The card returned to its front
    Unflipped,
    /// Interaction did not target the card itself
    Ignored,
}

/// At most one card shows its back at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlipState {
    flipped: Option<String>,
}

impl FlipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flipped(&self) -> Option<&str> {
        self.flipped.as_deref()
    }

    pub fn is_flipped(&self, id: &str) -> bool {
        self.flipped.as_deref() == Some(id)
    }

    pub fn face(&self, id: &str) -> CardFace {
        if self.is_flipped(id) {
            CardFace::Back
        } else {
            CardFace::Front
        }
    }

    /// Flip `id`, replacing whichever card was flipped before
    pub fn toggle(&mut self, id: &str) -> FlipOutcome {
        if self.is_flipped(id) {
            self.flipped = None;
            tracing::debug!(card = id, "card unflipped");
            FlipOutcome::Unflipped
        } else {
            if let Some(previous) = self.flipped.replace(id.to_string()) {
                tracing::debug!(card = id, previous = %previous, "card flipped, previous closed");
            } else {
                tracing::debug!(card = id, "card flipped");
            }
            FlipOutcome::Flipped
        }
    }

    pub fn activate(&mut self, id: &str, interaction: Interaction) -> FlipOutcome {
        if interaction.activates_card() {
            self.toggle(id)
        } else {
            FlipOutcome::Ignored
        }
    }

    pub fn clear(&mut self) {
        self.flipped = None;
    }
}
