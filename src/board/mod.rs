//! Board representation.
//!
//! Contains the country graph, continents, the `WorldMap` arena that owns
//! them, and the JSON map loader.

pub mod continent;
pub mod country;
pub mod loader;
pub mod map;

pub use continent::{Continent, ContinentId};
pub use country::{Country, CountryId};
pub use loader::{demo_map, load_map, load_map_from_str, MapDocument, DEMO_MAP_JSON};
pub use map::{MapBuilder, MapError, WorldMap};
