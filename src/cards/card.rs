//! Risk cards.

use serde::Serialize;

use crate::board::CountryId;

/// The symbol printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CardKind {
    Infantry,
    Cavalry,
    Artillery,
    Wild,
}

/// The three non-wild kinds, in the order they are dealt onto countries.
pub const COUNTRY_KINDS: [CardKind; 3] = [CardKind::Infantry, CardKind::Cavalry, CardKind::Artillery];

/// A single card. Country cards name a country; wild cards name none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RiskCard {
    pub country: Option<CountryId>,
    pub kind: CardKind,
}

impl RiskCard {
    pub const fn new(country: Option<CountryId>, kind: CardKind) -> Self {
        RiskCard { country, kind }
    }

    /// A wild card with no country.
    pub const fn wild() -> Self {
        RiskCard {
            country: None,
            kind: CardKind::Wild,
        }
    }

    pub const fn is_wild(&self) -> bool {
        matches!(self.kind, CardKind::Wild)
    }
}
