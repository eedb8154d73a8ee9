//! Map document loading.
//!
//! Reads the JSON map format: a `countries` object and a `continents`
//! object, both keyed by integer id.
//!
//! ```json
//! {
//!   "countries": { "1": { "name": "Frostmark", "neighbours": [2, 3] } },
//!   "continents": { "1": { "name": "Boreal", "bonus": 3, "countries": [1] } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::continent::{Continent, ContinentId};
use super::country::{Country, CountryId};
use super::map::{MapError, WorldMap};

/// The bundled twelve-country demo map.
pub const DEMO_MAP_JSON: &str = include_str!("../../maps/demo.json");

/// The full map document parsed from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct MapDocument {
    pub countries: BTreeMap<u32, CountryEntry>,
    #[serde(default)]
    pub continents: BTreeMap<u32, ContinentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub neighbours: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContinentEntry {
    #[serde(default)]
    pub name: String,
    pub bonus: u32,
    pub countries: Vec<u32>,
}

impl MapDocument {
    /// Converts the document into a validated `WorldMap`.
    pub fn into_map(self) -> Result<WorldMap, MapError> {
        let countries = self
            .countries
            .into_iter()
            .map(|(id, entry)| {
                Country::new(
                    CountryId(id),
                    entry.name,
                    entry.neighbours.into_iter().map(CountryId),
                )
            })
            .collect();
        let continents = self
            .continents
            .into_iter()
            .map(|(id, entry)| {
                Continent::new(
                    ContinentId(id),
                    entry.name,
                    entry.bonus,
                    entry.countries.into_iter().map(CountryId),
                )
            })
            .collect();
        WorldMap::new(countries, continents)
    }
}

/// Parses a map from a JSON string.
pub fn load_map_from_str(json: &str) -> Result<WorldMap, MapError> {
    let doc: MapDocument = serde_json::from_str(json)?;
    doc.into_map()
}

/// Loads a map from a JSON file.
pub fn load_map(path: &Path) -> Result<WorldMap, MapError> {
    let data = fs::read_to_string(path)?;
    load_map_from_str(&data)
}

/// Returns the bundled demo map.
pub fn demo_map() -> Result<WorldMap, MapError> {
    load_map_from_str(DEMO_MAP_JSON)
}
