//! Players and their hands of cards.
//!
//! Players live in an arena owned by the engine and are referenced
//! everywhere else by `PlayerId`, so two players with the same name are
//! still distinct.

use std::fmt;

use serde::Serialize;

use crate::cards::RiskCard;

/// Stable index of a player in the engine's player arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Display color assigned to a player in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

/// All player colors, in assignment order.
pub const ALL_COLORS: [Color; 6] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Purple,
    Color::Orange,
];

impl Color {
    /// Returns the palette color for the player created at `index`.
    pub const fn for_index(index: usize) -> Color {
        ALL_COLORS[index % ALL_COLORS.len()]
    }
}

/// A participant in the game, human or AI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: Color,
    is_ai: bool,
    hand: Vec<RiskCard>,
}

impl Player {
    /// Creates a player with an empty hand.
    pub fn new(id: PlayerId, name: impl Into<String>, is_ai: bool) -> Self {
        Player {
            id,
            name: name.into(),
            color: Color::for_index(id.0),
            is_ai,
            hand: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// True when the engine plays this player's turns.
    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    pub fn hand(&self) -> &[RiskCard] {
        &self.hand
    }

    pub(crate) fn add_card(&mut self, card: RiskCard) {
        self.hand.push(card);
    }

    /// Returns true if every card in `cards` can be matched against a
    /// distinct card in the hand.
    pub fn holds(&self, cards: &[RiskCard]) -> bool {
        let mut remaining = self.hand.clone();
        for card in cards {
            match remaining.iter().position(|c| c == card) {
                Some(idx) => {
                    remaining.swap_remove(idx);
                }
                None => return false,
            }
        }
        true
    }

    /// Removes `cards` from the hand. Removes nothing and returns false if
    /// any card is missing.
    pub(crate) fn remove_cards(&mut self, cards: &[RiskCard]) -> bool {
        if !self.holds(cards) {
            return false;
        }
        for card in cards {
            if let Some(idx) = self.hand.iter().position(|c| c == card) {
                self.hand.remove(idx);
            }
        }
        true
    }
}
