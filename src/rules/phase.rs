//! Turn phase sequencing.
//!
//! Phase flow:
//! - Deploy (pre-game, entered once by starting the game) -> Draft
//! - Draft   -> Attack
//! - Attack  -> Fortify
//! - Fortify -> Draft, ending the turn
//!
//! The machine itself holds no players; it reports what happened and the
//! engine runs the bookkeeping and notifications.

use std::fmt;

use serde::Serialize;

/// The phase within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Deploy,
    Draft,
    Attack,
    Fortify,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Deploy => "deploy",
            Phase::Draft => "draft",
            Phase::Attack => "attack",
            Phase::Fortify => "fortify",
        };
        f.write_str(name)
    }
}

/// Result of a single `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Set when Fortify wrapped around to Draft. Turn-end bookkeeping must
    /// run before the new phase is announced.
    pub turn_ended: bool,
    /// The phase now active.
    pub phase: Phase,
}

/// Finite-state controller over the four phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPhaseMachine {
    phase: Phase,
    started: bool,
}

impl Default for TurnPhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnPhaseMachine {
    /// Creates a machine sitting in Deploy, not yet entered.
    pub fn new() -> Self {
        TurnPhaseMachine {
            phase: Phase::Deploy,
            started: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once Deploy has been entered.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Moves to the next phase. The first call enters Deploy; Deploy is
    /// never re-entered afterwards.
    pub fn advance(&mut self) -> Transition {
        if !self.started {
            self.started = true;
            return Transition {
                turn_ended: false,
                phase: Phase::Deploy,
            };
        }

        let (next, turn_ended) = match self.phase {
            Phase::Deploy => (Phase::Draft, false),
            Phase::Draft => (Phase::Attack, false),
            Phase::Attack => (Phase::Fortify, false),
            Phase::Fortify => (Phase::Draft, true),
        };
        self.phase = next;
        Transition {
            turn_ended,
            phase: next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_unentered_deploy() {
        let m = TurnPhaseMachine::new();
        assert_eq!(m.phase(), Phase::Deploy);
        assert!(!m.is_started());
    }

    #[test]
    fn first_advance_enters_deploy() {
        let mut m = TurnPhaseMachine::new();
        let t = m.advance();
        assert_eq!(t, Transition { turn_ended: false, phase: Phase::Deploy });
        assert!(m.is_started());
        assert_eq!(m.phase(), Phase::Deploy);
    }

    #[test]
    fn deploy_exits_to_draft() {
        let mut m = TurnPhaseMachine::new();
        m.advance();
        let t = m.advance();
        assert_eq!(t.phase, Phase::Draft);
        assert!(!t.turn_ended);
    }

    #[test]
    fn full_turn_cycle() {
        let mut m = TurnPhaseMachine::new();
        m.advance();
        m.advance();

        assert_eq!(m.advance(), Transition { turn_ended: false, phase: Phase::Attack });
        assert_eq!(m.advance(), Transition { turn_ended: false, phase: Phase::Fortify });
        assert_eq!(m.advance(), Transition { turn_ended: true, phase: Phase::Draft });
        assert_eq!(m.advance(), Transition { turn_ended: false, phase: Phase::Attack });
    }

    #[test]
    fn deploy_is_never_reentered() {
        let mut m = TurnPhaseMachine::new();
        m.advance();
        m.advance();
        for _ in 0..30 {
            assert_ne!(m.advance().phase, Phase::Deploy);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Phase::Fortify.to_string(), "fortify");
        assert_eq!(Phase::Deploy.to_string(), "deploy");
    }
}
