//! Card trade-in rules.
//!
//! A set is exactly three cards that are all the same kind, all different
//! kinds, or include at least one wild. The value of a set grows with the
//! number of sets already traded in this game.

use crate::board::WorldMap;
use crate::cards::{CardKind, RiskCard};
use crate::player::PlayerId;

/// Cards in a trade-in set.
pub const SET_SIZE: usize = 3;

/// Bonus per traded card naming a country the trader holds.
pub const OWNED_COUNTRY_BONUS: u32 = 2;

/// Returns true if `cards` form a tradeable set.
pub fn is_valid_trade_in(cards: &[RiskCard]) -> bool {
    if cards.len() != SET_SIZE {
        return false;
    }
    if cards.iter().any(RiskCard::is_wild) {
        return true;
    }
    let kinds: Vec<CardKind> = cards.iter().map(|c| c.kind).collect();
    let all_same = kinds.iter().all(|k| *k == kinds[0]);
    let all_distinct = kinds[0] != kinds[1] && kinds[0] != kinds[2] && kinds[1] != kinds[2];
    all_same || all_distinct
}

/// Base armies for the next set, given how many sets were traded before.
pub fn set_value(sets_traded_in: u32) -> u32 {
    if sets_traded_in < 5 {
        2 * sets_traded_in + 4
    } else {
        (sets_traded_in - 2) * 5
    }
}

/// Total armies for trading `cards` as `player`: the set value plus a bonus
/// for each card naming a country `player` currently holds.
pub fn trade_in_value(
    cards: &[RiskCard],
    sets_traded_in: u32,
    map: &WorldMap,
    player: PlayerId,
) -> u32 {
    let owned = cards
        .iter()
        .filter_map(|c| c.country)
        .filter(|id| map.country(*id).and_then(|c| c.owner()) == Some(player))
        .count() as u32;
    set_value(sets_traded_in) + owned * OWNED_COUNTRY_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{demo_map, CountryId};

    fn card(country: u32, kind: CardKind) -> RiskCard {
        RiskCard::new(Some(CountryId(country)), kind)
    }

    #[test]
    fn three_of_a_kind_is_valid() {
        let cards = [
            card(1, CardKind::Cavalry),
            card(2, CardKind::Cavalry),
            card(3, CardKind::Cavalry),
        ];
        assert!(is_valid_trade_in(&cards));
    }

    #[test]
    fn one_of_each_is_valid() {
        let cards = [
            card(1, CardKind::Infantry),
            card(2, CardKind::Cavalry),
            card(3, CardKind::Artillery),
        ];
        assert!(is_valid_trade_in(&cards));
    }

    #[test]
    fn any_wild_is_valid() {
        let cards = [card(1, CardKind::Infantry), card(2, CardKind::Infantry), RiskCard::wild()];
        assert!(is_valid_trade_in(&cards));
    }

    #[test]
    fn pair_plus_odd_card_is_invalid() {
        let cards = [
            card(1, CardKind::Infantry),
            card(2, CardKind::Infantry),
            card(3, CardKind::Artillery),
        ];
        assert!(!is_valid_trade_in(&cards));
    }

    #[test]
    fn wrong_card_count_is_invalid() {
        assert!(!is_valid_trade_in(&[]));
        assert!(!is_valid_trade_in(&[RiskCard::wild(), RiskCard::wild()]));
        assert!(!is_valid_trade_in(&[RiskCard::wild(); 4]));
    }

    #[test]
    fn set_value_progression() {
        let values: Vec<u32> = (0..8).map(set_value).collect();
        assert_eq!(values, vec![4, 6, 8, 10, 12, 15, 20, 25]);
    }

    #[test]
    fn owned_country_cards_add_bonus() {
        let mut map = demo_map().unwrap();
        map.country_mut(CountryId(1)).unwrap().set_owner(PlayerId(0));
        map.country_mut(CountryId(2)).unwrap().set_owner(PlayerId(1));

        let cards = [card(1, CardKind::Infantry), card(2, CardKind::Cavalry), RiskCard::wild()];
        assert_eq!(trade_in_value(&cards, 0, &map, PlayerId(0)), 4 + 2);
        assert_eq!(trade_in_value(&cards, 5, &map, PlayerId(1)), 15 + 2);
        assert_eq!(trade_in_value(&cards, 1, &map, PlayerId(2)), 6);
    }
}
