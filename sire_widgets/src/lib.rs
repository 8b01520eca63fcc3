pub mod card;
pub mod deck;
pub mod hero;
pub mod rail;
pub mod text;
pub mod theme;

pub use card::{TradingCardWidget, CARD_HEIGHT, CARD_WIDTH};
pub use deck::DeckWidget;
pub use theme::Theme;
