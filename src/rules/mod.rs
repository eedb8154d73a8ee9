//! Game rules that do not need the engine's mutable state.
//!
//! Phase sequencing, army allocation tables and card trade-in valuation.
//! The engine calls into these and applies the results.

pub mod armies;
pub mod phase;
pub mod trade;

pub use armies::{armies_to_allocate, draft_allotment, starting_armies_per_player, MIN_DRAFT};
pub use phase::{Phase, Transition, TurnPhaseMachine};
pub use trade::{is_valid_trade_in, set_value, trade_in_value, OWNED_COUNTRY_BONUS, SET_SIZE};
