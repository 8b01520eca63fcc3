pub mod card;
pub mod config;
pub mod counter;
pub mod error;
pub mod flip;
pub mod focus;
pub mod geometry;
pub mod layout;
pub mod playback;
pub mod rotator;
pub mod tilt;
pub mod timer;

pub use card::{Card, CardSet};
pub use config::{LandingConfig, Timing};
pub use counter::{AnimatedCounts, HeroStat};
pub use error::{Error, Result};
pub use flip::{ActivationKey, CardFace, FlipOutcome, FlipState, Interaction};
pub use focus::{DeckFocus, Emphasis, FocusRail};
pub use geometry::{center_index, deck_transform, DeckGeometry, DeckTransform};
pub use layout::{LayoutDetector, LayoutMode, LayoutThresholds, Viewport};
pub use playback::Playback;
pub use rotator::{PlaceholderRotator, SearchBox, Typewriter};
pub use tilt::{Tilt, TiltTracker};
pub use timer::{FrameClock, Interval, Timeout};
