//! Board features the AI ranks countries by.
//!
//! Everything here is a read-only pass over the `WorldMap` from one
//! player's point of view. "Enemy" means any neighbour that player does not
//! hold, including unowned countries. Results are in country-id order
//! unless stated otherwise, so ties always break toward the lowest id.

use crate::board::{CountryId, WorldMap};
use crate::player::PlayerId;

/// The player's countries paired with their enemy-neighbour counts, most
/// exposed first.
pub fn exposure_ranking(map: &WorldMap, player: PlayerId) -> Vec<(CountryId, usize)> {
    let mut ranked: Vec<(CountryId, usize)> = map
        .owned_by(player)
        .into_iter()
        .map(|id| (id, map.enemy_neighbours(id, player)))
        .collect();
    // Stable sort keeps id order within equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Countries that can launch an attack: more than one army and at least one
/// enemy neighbour.
pub fn valid_attackers(map: &WorldMap, player: PlayerId) -> Vec<CountryId> {
    map.countries()
        .filter(|c| c.owner() == Some(player) && c.armies() > 1)
        .filter(|c| map.enemy_neighbours(c.id(), player) > 0)
        .map(|c| c.id())
        .collect()
}

/// Countries with armies to spare for a fortify.
pub fn fortify_sources(map: &WorldMap, player: PlayerId) -> Vec<CountryId> {
    map.countries()
        .filter(|c| c.owner() == Some(player) && c.armies() > 1)
        .map(|c| c.id())
        .collect()
}

/// The enemy neighbour of `country` with the fewest armies.
pub fn weakest_enemy_neighbour(
    map: &WorldMap,
    country: CountryId,
    player: PlayerId,
) -> Option<CountryId> {
    let c = map.country(country)?;
    c.neighbours()
        .filter_map(|n| map.country(n))
        .filter(|n| n.owner() != Some(player))
        .min_by_key(|n| n.armies())
        .map(|n| n.id())
}
