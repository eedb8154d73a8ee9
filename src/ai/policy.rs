//! Greedy per-phase decisions for AI players.
//!
//! Each function picks a move from the current board and returns it; the
//! engine then plays it through the same operations a human uses. `None`
//! means there is nothing sensible to do and the phase is passed.

use std::collections::BTreeSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::heuristic::{exposure_ranking, fortify_sources, valid_attackers, weakest_enemy_neighbour};
use crate::board::{CountryId, WorldMap};
use crate::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPlan {
    pub origin: CountryId,
    pub target: CountryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FortifyPlan {
    pub origin: CountryId,
    pub destination: CountryId,
    pub count: u32,
}

/// Picks a deploy target: a random unoccupied country while any remain,
/// otherwise a random country the player already holds.
pub fn choose_deploy(
    map: &WorldMap,
    unoccupied: &BTreeSet<CountryId>,
    player: PlayerId,
    rng: &mut impl Rng,
) -> Option<CountryId> {
    if !unoccupied.is_empty() {
        return unoccupied.iter().copied().choose(rng);
    }
    map.owned_by(player).into_iter().choose(rng)
}

/// The up-to-`limit` most exposed countries the player holds.
pub fn draft_candidates(map: &WorldMap, player: PlayerId, limit: usize) -> Vec<CountryId> {
    exposure_ranking(map, player)
        .into_iter()
        .take(limit)
        .map(|(id, _)| id)
        .collect()
}

/// The candidate currently holding the fewest armies.
pub fn next_draft_target(map: &WorldMap, candidates: &[CountryId]) -> Option<CountryId> {
    candidates
        .iter()
        .copied()
        .filter_map(|id| map.country(id).map(|c| (id, c.armies())))
        .min_by_key(|&(_, armies)| armies)
        .map(|(id, _)| id)
}

/// Attacks from the strongest valid attacker into its weakest enemy
/// neighbour.
pub fn choose_attack(map: &WorldMap, player: PlayerId) -> Option<AttackPlan> {
    let origin = valid_attackers(map, player)
        .into_iter()
        .filter_map(|id| map.country(id))
        // Reverse so max_by_key keeps the lowest id among equals.
        .rev()
        .max_by_key(|c| c.armies())?
        .id();
    let target = weakest_enemy_neighbour(map, origin, player)?;
    Some(AttackPlan { origin, target })
}

/// Moves a random share of the safest spare armies toward the most exposed
/// country.
pub fn choose_fortify(map: &WorldMap, player: PlayerId, rng: &mut impl Rng) -> Option<FortifyPlan> {
    let origin = fortify_sources(map, player)
        .into_iter()
        .min_by_key(|&id| map.enemy_neighbours(id, player))?;
    let destination = exposure_ranking(map, player).first()?.0;
    if origin == destination {
        return None;
    }
    let available = map.country(origin)?.armies();
    let count = rng.gen_range(1..=available - 1);
    Some(FortifyPlan {
        origin,
        destination,
        count,
    })
}
