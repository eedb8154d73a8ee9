//! The shuffled draw pile.
//!
//! Cards leave the deck for good: drawn cards go to a hand and traded
//! cards are discarded, so the deck only ever shrinks. Drawing from an
//! empty deck is an error; callers decide whether that matters.

use rand::seq::SliceRandom;
use rand::Rng;

use super::card::{RiskCard, COUNTRY_KINDS};
use crate::board::WorldMap;
use crate::error::GameError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskCardDeck {
    cards: Vec<RiskCard>,
}

impl RiskCardDeck {
    /// Builds a deck from an explicit card list, top card last.
    pub fn from_cards(cards: Vec<RiskCard>) -> Self {
        RiskCardDeck { cards }
    }

    /// Builds and shuffles a full deck: one card per country, kinds cycling
    /// infantry, cavalry, artillery in country-id order, plus `wild_cards`
    /// wilds.
    pub fn build(map: &WorldMap, wild_cards: usize, rng: &mut impl Rng) -> Self {
        let mut cards: Vec<RiskCard> = map
            .country_ids()
            .zip(COUNTRY_KINDS.iter().cycle())
            .map(|(id, &kind)| RiskCard::new(Some(id), kind))
            .collect();
        cards.extend(std::iter::repeat(RiskCard::wild()).take(wild_cards));
        cards.shuffle(rng);
        RiskCardDeck { cards }
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Result<RiskCard, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
