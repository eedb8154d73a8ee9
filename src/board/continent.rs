//! Continents: groups of countries worth a bonus when held together.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::country::CountryId;

/// Unique numeric id of a continent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContinentId(pub u32);

impl fmt::Display for ContinentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "continent {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    id: ContinentId,
    name: String,
    members: BTreeSet<CountryId>,
    bonus: u32,
}

impl Continent {
    pub fn new(
        id: ContinentId,
        name: impl Into<String>,
        bonus: u32,
        members: impl IntoIterator<Item = CountryId>,
    ) -> Self {
        Continent {
            id,
            name: name.into(),
            members: members.into_iter().collect(),
            bonus,
        }
    }

    pub fn id(&self) -> ContinentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Armies granted each draft to a player holding every member.
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn members(&self) -> impl Iterator<Item = CountryId> + '_ {
        self.members.iter().copied()
    }

    pub fn contains(&self, country: CountryId) -> bool {
        self.members.contains(&country)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let c = Continent::new(ContinentId(1), "Boreal", 3, [CountryId(1), CountryId(2)]);
        assert!(c.contains(CountryId(1)));
        assert!(!c.contains(CountryId(3)));
        assert_eq!(c.len(), 2);
        assert_eq!(c.bonus(), 3);
    }
}
