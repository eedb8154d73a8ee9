//! Conquest rules engine library.
//!
//! Exposes the board, cards, turn rules, AI heuristics and the `Game`
//! engine that ties them together, for use by integration tests and the
//! self-play binary.

pub mod ai;
pub mod board;
pub mod cards;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod player;
pub mod rules;
pub mod selfplay;

pub use board::{CountryId, WorldMap};
pub use config::GameConfig;
pub use engine::Game;
pub use error::GameError;
pub use events::GameEvent;
pub use player::PlayerId;
pub use rules::Phase;
