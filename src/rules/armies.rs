//! Army allocation: starting pools and per-turn draft allotments.

use crate::board::WorldMap;
use crate::error::GameError;
use crate::player::PlayerId;

/// Minimum armies granted at the start of any draft.
pub const MIN_DRAFT: u32 = 3;

/// Returns the per-player starting armies for a game of `players`.
pub fn starting_armies_per_player(players: usize) -> Result<u32, GameError> {
    match players {
        3 => Ok(35),
        4 => Ok(30),
        5 => Ok(25),
        n if n >= 6 => Ok(20),
        n => Err(GameError::TooFewPlayers(n)),
    }
}

/// Returns the total shared deploy pool for a game of `players`.
pub fn armies_to_allocate(players: usize) -> Result<u32, GameError> {
    let per_player = starting_armies_per_player(players)?;
    Ok(per_player * players as u32)
}

/// Computes the draft allotment for `player`: one army per three countries
/// held plus every fully held continent's bonus, never less than three.
pub fn draft_allotment(map: &WorldMap, player: PlayerId) -> u32 {
    let territory = map.count_owned_by(player) as u32 / 3;
    let continents: u32 = map
        .continents()
        .filter(|c| map.continent_owner(c) == Some(player))
        .map(|c| c.bonus())
        .sum();
    (territory + continents).max(MIN_DRAFT)
}
