//! Combat resolution seam.
//!
//! The engine decides who may attack whom and applies the result; how a
//! battle turns out is left to an injected `CombatResolver`. Without one,
//! `attack` is rejected and AI attack phases pass.

/// Armies committed to one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Battle {
    pub attackers: u32,
    pub defenders: u32,
}

/// Losses reported by a resolver. The engine clamps both to the armies
/// actually committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BattleOutcome {
    pub attacker_losses: u32,
    pub defender_losses: u32,
}

/// Result of an `attack` call after losses were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackOutcome {
    pub battle: Battle,
    pub losses: BattleOutcome,
    /// True if the target changed hands.
    pub captured: bool,
}

/// Most armies an attacker may commit to one battle.
pub const MAX_ATTACKERS: u32 = 3;

/// Most armies a defender may commit to one battle.
pub const MAX_DEFENDERS: u32 = 2;

/// Decides the losses of a single battle.
pub trait CombatResolver {
    fn resolve(&mut self, battle: Battle) -> BattleOutcome;
}

impl<F> CombatResolver for F
where
    F: FnMut(Battle) -> BattleOutcome,
{
    fn resolve(&mut self, battle: Battle) -> BattleOutcome {
        self(battle)
    }
}

impl Battle {
    /// Sizes a battle from the armies on both countries. The attacker always
    /// leaves one army behind.
    pub fn between(origin_armies: u32, target_armies: u32) -> Battle {
        Battle {
            attackers: origin_armies.saturating_sub(1).min(MAX_ATTACKERS),
            defenders: target_armies.min(MAX_DEFENDERS),
        }
    }

    /// Clamps reported losses to the armies committed to this battle.
    pub fn clamp(&self, outcome: BattleOutcome) -> BattleOutcome {
        BattleOutcome {
            attacker_losses: outcome.attacker_losses.min(self.attackers),
            defender_losses: outcome.defender_losses.min(self.defenders),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_sizes_are_capped() {
        assert_eq!(Battle::between(10, 10), Battle { attackers: 3, defenders: 2 });
        assert_eq!(Battle::between(2, 1), Battle { attackers: 1, defenders: 1 });
        assert_eq!(Battle::between(3, 0), Battle { attackers: 2, defenders: 0 });
    }

    #[test]
    fn clamp_limits_losses() {
        let battle = Battle { attackers: 2, defenders: 1 };
        let out = battle.clamp(BattleOutcome { attacker_losses: 5, defender_losses: 0 });
        assert_eq!(out, BattleOutcome { attacker_losses: 2, defender_losses: 0 });
    }

    #[test]
    fn closures_are_resolvers() {
        let mut r = |b: Battle| BattleOutcome { attacker_losses: 0, defender_losses: b.defenders };
        let out = r.resolve(Battle { attackers: 3, defenders: 2 });
        assert_eq!(out.defender_losses, 2);
    }
}
