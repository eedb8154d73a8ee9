//! AI players.
//!
//! Greedy heuristics over the board that choose a deploy, draft, attack or
//! fortify move for the current player. Choices are plain data; the engine
//! plays them through its public rule operations.

pub mod heuristic;
pub mod policy;

pub use heuristic::{exposure_ranking, fortify_sources, valid_attackers, weakest_enemy_neighbour};
pub use policy::{
    choose_attack, choose_deploy, choose_fortify, draft_candidates, next_draft_target, AttackPlan,
    FortifyPlan,
};
