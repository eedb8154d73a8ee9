//! The world map: every country and continent, owned by id.
//!
//! `WorldMap` is the arena for the board. Countries and continents are
//! stored in `BTreeMap`s so iteration is in id order, which keeps AI choices
//! and deck building reproducible under a fixed seed.

use std::collections::BTreeMap;

use super::continent::{Continent, ContinentId};
use super::country::{Country, CountryId};
use crate::player::PlayerId;

/// Errors that can occur while assembling a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map has no countries")]
    Empty,

    #[error("duplicate country id {0}")]
    DuplicateCountry(CountryId),

    #[error("country {0} lists itself as a neighbour")]
    SelfNeighbour(CountryId),

    #[error("country {country} lists unknown neighbour {neighbour}")]
    UnknownNeighbour {
        country: CountryId,
        neighbour: CountryId,
    },

    #[error("duplicate continent id {0}")]
    DuplicateContinent(ContinentId),

    #[error("{continent} lists unknown country {country}")]
    UnknownMember {
        continent: ContinentId,
        country: CountryId,
    },

    #[error("country {0} belongs to more than one continent")]
    OverlappingContinents(CountryId),

    #[error("failed to parse map document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read map document: {0}")]
    Io(#[from] std::io::Error),
}

/// Static map graph plus the mutable ownership and army state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldMap {
    countries: BTreeMap<CountryId, Country>,
    continents: BTreeMap<ContinentId, Continent>,
}

impl WorldMap {
    /// Builds a map, validating references and making adjacency symmetric.
    pub fn new(countries: Vec<Country>, continents: Vec<Continent>) -> Result<Self, MapError> {
        if countries.is_empty() {
            return Err(MapError::Empty);
        }

        let mut by_id = BTreeMap::new();
        for country in countries {
            let id = country.id();
            if by_id.insert(id, country).is_some() {
                return Err(MapError::DuplicateCountry(id));
            }
        }

        let mut links = Vec::new();
        for country in by_id.values() {
            for neighbour in country.neighbours() {
                if neighbour == country.id() {
                    return Err(MapError::SelfNeighbour(neighbour));
                }
                if !by_id.contains_key(&neighbour) {
                    return Err(MapError::UnknownNeighbour {
                        country: country.id(),
                        neighbour,
                    });
                }
                links.push((neighbour, country.id()));
            }
        }
        for (from, to) in links {
            if let Some(country) = by_id.get_mut(&from) {
                country.link(to);
            }
        }

        let mut continent_map = BTreeMap::new();
        let mut assigned: BTreeMap<CountryId, ContinentId> = BTreeMap::new();
        for continent in continents {
            let id = continent.id();
            for member in continent.members() {
                if !by_id.contains_key(&member) {
                    return Err(MapError::UnknownMember {
                        continent: id,
                        country: member,
                    });
                }
                if assigned.insert(member, id).is_some() {
                    return Err(MapError::OverlappingContinents(member));
                }
            }
            if continent_map.insert(id, continent).is_some() {
                return Err(MapError::DuplicateContinent(id));
            }
        }

        Ok(WorldMap {
            countries: by_id,
            continents: continent_map,
        })
    }

    /// Starts a map description for tests and hand-built boards.
    pub fn builder() -> MapBuilder {
        MapBuilder::default()
    }

    pub fn country(&self, id: CountryId) -> Option<&Country> {
        self.countries.get(&id)
    }

    pub(crate) fn country_mut(&mut self, id: CountryId) -> Option<&mut Country> {
        self.countries.get_mut(&id)
    }

    /// All countries in id order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> + '_ {
        self.countries.values()
    }

    pub fn country_ids(&self) -> impl Iterator<Item = CountryId> + '_ {
        self.countries.keys().copied()
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn continent(&self, id: ContinentId) -> Option<&Continent> {
        self.continents.get(&id)
    }

    /// All continents in id order.
    pub fn continents(&self) -> impl Iterator<Item = &Continent> + '_ {
        self.continents.values()
    }

    /// True if `a` and `b` share a border.
    pub fn are_neighbours(&self, a: CountryId, b: CountryId) -> bool {
        self.countries.get(&a).is_some_and(|c| c.is_neighbour(b))
    }

    /// Countries held by `player`, in id order.
    pub fn owned_by(&self, player: PlayerId) -> Vec<CountryId> {
        self.countries
            .values()
            .filter(|c| c.owner() == Some(player))
            .map(Country::id)
            .collect()
    }

    pub fn count_owned_by(&self, player: PlayerId) -> usize {
        self.countries
            .values()
            .filter(|c| c.owner() == Some(player))
            .count()
    }

    /// Total armies `player` has on the board.
    pub fn armies_of(&self, player: PlayerId) -> u32 {
        self.countries
            .values()
            .filter(|c| c.owner() == Some(player))
            .map(Country::armies)
            .sum()
    }

    /// Counts neighbours of `country` not held by `player`. Unowned
    /// neighbours count as enemies.
    pub fn enemy_neighbours(&self, country: CountryId, player: PlayerId) -> usize {
        let Some(c) = self.countries.get(&country) else {
            return 0;
        };
        c.neighbours()
            .filter(|n| {
                self.countries
                    .get(n)
                    .is_some_and(|nc| nc.owner() != Some(player))
            })
            .count()
    }

    /// Returns the single player holding every member of `continent`, if
    /// there is one. Empty continents have no owner.
    pub fn continent_owner(&self, continent: &Continent) -> Option<PlayerId> {
        let mut owner = None;
        for member in continent.members() {
            let member_owner = self.countries.get(&member)?.owner()?;
            match owner {
                None => owner = Some(member_owner),
                Some(o) if o != member_owner => return None,
                Some(_) => {}
            }
        }
        owner
    }
}

/// Incremental description of a map, finished with `build`.
#[derive(Debug, Default)]
pub struct MapBuilder {
    countries: Vec<Country>,
    continents: Vec<Continent>,
}

impl MapBuilder {
    pub fn country(mut self, id: u32, name: &str, neighbours: &[u32]) -> Self {
        self.countries.push(Country::new(
            CountryId(id),
            name,
            neighbours.iter().map(|&n| CountryId(n)),
        ));
        self
    }

    pub fn continent(mut self, id: u32, name: &str, bonus: u32, members: &[u32]) -> Self {
        self.continents.push(Continent::new(
            ContinentId(id),
            name,
            bonus,
            members.iter().map(|&m| CountryId(m)),
        ));
        self
    }

    pub fn build(self) -> Result<WorldMap, MapError> {
        WorldMap::new(self.countries, self.continents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> WorldMap {
        WorldMap::builder()
            .country(1, "a", &[2])
            .country(2, "b", &[3])
            .country(3, "c", &[])
            .continent(1, "north", 2, &[1, 2])
            .build()
            .unwrap()
    }

    #[test]
    fn adjacency_is_symmetrised() {
        let map = triangle();
        assert!(map.are_neighbours(CountryId(1), CountryId(2)));
        assert!(map.are_neighbours(CountryId(2), CountryId(1)));
        assert!(map.are_neighbours(CountryId(3), CountryId(2)));
        assert!(!map.are_neighbours(CountryId(1), CountryId(3)));
    }

    #[test]
    fn rejects_unknown_neighbour() {
        let err = WorldMap::builder().country(1, "a", &[9]).build().unwrap_err();
        assert!(matches!(err, MapError::UnknownNeighbour { .. }));
    }

    #[test]
    fn rejects_self_neighbour() {
        let err = WorldMap::builder().country(1, "a", &[1]).build().unwrap_err();
        assert!(matches!(err, MapError::SelfNeighbour(CountryId(1))));
    }

    #[test]
    fn rejects_duplicate_country() {
        let err = WorldMap::builder()
            .country(1, "a", &[])
            .country(1, "b", &[])
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::DuplicateCountry(CountryId(1))));
    }

    #[test]
    fn rejects_overlapping_continents() {
        let err = WorldMap::builder()
            .country(1, "a", &[])
            .continent(1, "x", 1, &[1])
            .continent(2, "y", 1, &[1])
            .build()
            .unwrap_err();
        assert!(matches!(err, MapError::OverlappingContinents(CountryId(1))));
    }

    #[test]
    fn rejects_empty_map() {
        assert!(matches!(WorldMap::builder().build(), Err(MapError::Empty)));
    }

    #[test]
    fn continent_owner_requires_every_member() {
        let mut map = triangle();
        let north = map.continent(ContinentId(1)).unwrap().clone();
        assert_eq!(map.continent_owner(&north), None);

        map.country_mut(CountryId(1)).unwrap().set_owner(PlayerId(0));
        assert_eq!(map.continent_owner(&north), None);

        map.country_mut(CountryId(2)).unwrap().set_owner(PlayerId(1));
        assert_eq!(map.continent_owner(&north), None);

        map.country_mut(CountryId(2)).unwrap().set_owner(PlayerId(0));
        assert_eq!(map.continent_owner(&north), Some(PlayerId(0)));
    }

    #[test]
    fn enemy_neighbours_counts_unowned_and_foreign() {
        let mut map = triangle();
        map.country_mut(CountryId(2)).unwrap().set_owner(PlayerId(0));
        assert_eq!(map.enemy_neighbours(CountryId(2), PlayerId(0)), 2);

        map.country_mut(CountryId(1)).unwrap().set_owner(PlayerId(0));
        map.country_mut(CountryId(3)).unwrap().set_owner(PlayerId(1));
        assert_eq!(map.enemy_neighbours(CountryId(2), PlayerId(0)), 1);
        assert_eq!(map.enemy_neighbours(CountryId(99), PlayerId(0)), 0);
    }

    #[test]
    fn ownership_queries() {
        let mut map = triangle();
        for id in [1, 3] {
            let c = map.country_mut(CountryId(id)).unwrap();
            c.set_owner(PlayerId(1));
            c.add_armies(2);
        }
        assert_eq!(map.owned_by(PlayerId(1)), vec![CountryId(1), CountryId(3)]);
        assert_eq!(map.count_owned_by(PlayerId(1)), 2);
        assert_eq!(map.armies_of(PlayerId(1)), 4);
        assert_eq!(map.count_owned_by(PlayerId(0)), 0);
    }
}
