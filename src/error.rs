//! Rule violations reported by the engine.
//!
//! These are the hard failures: the call is rejected and nothing changes.
//! Expected, recoverable rejections (bad player count at start, illegal
//! fortify) are reported as `Ok(false)` instead.

use crate::board::CountryId;
use crate::player::PlayerId;
use crate::rules::Phase;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("not in {expected} phase (current phase is {actual})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("game has not been started")]
    NotStarted,

    #[error("game has already been started")]
    AlreadyStarted,

    #[error("initial deployment ends on its own once every army is placed")]
    DeployInProgress,

    #[error("no players have been created")]
    NoPlayers,

    #[error("unknown country {0}")]
    UnknownCountry(CountryId),

    #[error("unknown {0}")]
    UnknownPlayer(PlayerId),

    #[error("it is not {0}'s turn")]
    NotCurrentPlayer(PlayerId),

    #[error("can't deploy to occupied country {0} while unoccupied countries remain")]
    CountryOccupied(CountryId),

    #[error("country {country} is not owned by {player}")]
    NotOwner { player: PlayerId, country: CountryId },

    #[error("can't draft {requested} armies, only {available} available")]
    ExceedsDraftPool { requested: u32, available: u32 },

    #[error("invalid card trade-in")]
    InvalidTradeIn,

    #[error("traded cards are not all in the current player's hand")]
    CardsNotInHand,

    #[error("card deck is empty")]
    EmptyDeck,

    #[error("must have at least 3 players to allocate armies, got {0}")]
    TooFewPlayers(usize),

    #[error("no combat resolver installed")]
    NoCombatResolver,

    #[error("country {origin} does not border {target}")]
    NotAdjacent { origin: CountryId, target: CountryId },

    #[error("country {0} is already held by the attacker")]
    FriendlyTarget(CountryId),

    #[error("country {country} has {armies} armies, an attack needs at least 2")]
    TooFewArmies { country: CountryId, armies: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_subject() {
        let e = GameError::WrongPhase {
            expected: Phase::Draft,
            actual: Phase::Attack,
        };
        assert_eq!(e.to_string(), "not in draft phase (current phase is attack)");

        let e = GameError::NotOwner {
            player: PlayerId(2),
            country: CountryId(7),
        };
        assert_eq!(e.to_string(), "country #7 is not owned by player 2");
    }
}
