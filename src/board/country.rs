//! Countries: the nodes of the map graph.
//!
//! Adjacency is fixed when the map is built; ownership and army count are
//! the only mutable parts, and only the engine mutates them.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::player::PlayerId;

/// Unique numeric id of a country, as used by the map document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CountryId(pub u32);

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single country on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    id: CountryId,
    name: String,
    owner: Option<PlayerId>,
    armies: u32,
    neighbours: BTreeSet<CountryId>,
}

impl Country {
    /// Creates an unowned, empty country with the given neighbours.
    pub fn new(
        id: CountryId,
        name: impl Into<String>,
        neighbours: impl IntoIterator<Item = CountryId>,
    ) -> Self {
        Country {
            id,
            name: name.into(),
            owner: None,
            armies: 0,
            neighbours: neighbours.into_iter().collect(),
        }
    }

    pub fn id(&self) -> CountryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning player, or None until someone deploys here.
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn armies(&self) -> u32 {
        self.armies
    }

    /// Neighbour ids in ascending order.
    pub fn neighbours(&self) -> impl Iterator<Item = CountryId> + '_ {
        self.neighbours.iter().copied()
    }

    pub fn is_neighbour(&self, other: CountryId) -> bool {
        self.neighbours.contains(&other)
    }

    pub(crate) fn link(&mut self, other: CountryId) {
        self.neighbours.insert(other);
    }

    pub(crate) fn set_owner(&mut self, owner: PlayerId) {
        self.owner = Some(owner);
    }

    pub(crate) fn add_armies(&mut self, count: u32) {
        self.armies += count;
    }

    /// Removes armies, saturating at zero.
    pub(crate) fn remove_armies(&mut self, count: u32) {
        self.armies = self.armies.saturating_sub(count);
    }

    pub(crate) fn set_armies(&mut self, count: u32) {
        self.armies = count;
    }
}
