//! Cards and the draw deck.

pub mod card;
pub mod deck;

pub use card::{CardKind, RiskCard, COUNTRY_KINDS};
pub use deck::RiskCardDeck;
