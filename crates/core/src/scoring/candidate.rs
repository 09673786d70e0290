//! Action candidates and the derived ranking score.
//!
//! One [`ActionCandidate`] is a single hypothesized action compared against
//! all others in a decision cycle. Candidates live for one scoring pass;
//! only the winner is converted into something executable.
//!
//! The ranking score has three lanes with distinct jobs:
//!
//! - the **geometric mean** of the consideration set carries baseline
//!   viability, scaled by [`TuningConfig::utility_scale`];
//! - `bonus_score` carries one-off additive opportunity value (kill
//!   potential, AoE multi-hit, flanking) that must not be squashed by the
//!   multiplicative averaging;
//! - `priority_boost` is a hard override lane reserved for emergencies,
//!   added last so it can surface an otherwise low-utility action above
//!   every alternative.

use crate::ability::AbilityId;
use crate::combatant::{CombatantId, Position};
use crate::config::TuningConfig;
use crate::scoring::consideration::ConsiderationSet;

/// Sentinel ranking score for vetoed candidates; compares below every
/// finite score, so a vetoed candidate can never win selection.
pub const UNSELECTABLE: f64 = f64::NEG_INFINITY;

/// What kind of action a candidate hypothesizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    AbilityAttack,
    BasicAttack,
    Buff,
    Heal,
    Debuff,
    Move,
    EndTurn,
}

impl ActionKind {
    pub fn is_attack(self) -> bool {
        matches!(self, ActionKind::AbilityAttack | ActionKind::BasicAttack)
    }

    /// Buffs and heals: the actions a support role is weighted toward.
    pub fn is_supportive(self) -> bool {
        matches!(self, ActionKind::Buff | ActionKind::Heal)
    }
}

/// Identity of a choice for hysteresis comparison: repeating the same
/// (kind, ability, target) across consecutive cycles earns the bonus.
pub type ChoiceSignature = (ActionKind, Option<AbilityId>, Option<CombatantId>);

/// One hypothesized action with its scoring state.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionCandidate {
    pub kind: ActionKind,
    pub ability: Option<AbilityId>,
    pub target: Option<CombatantId>,
    pub destination: Option<Position>,
    pub considerations: ConsiderationSet,
    /// Additive opportunity lane; unbounded above.
    pub bonus_score: f64,
    /// Emergency override lane, applied after everything else.
    pub priority_boost: f64,
    /// Post-hoc multiplier on the utility portion (role→action-type
    /// adjustment from the selector); 1.0 means untouched.
    pub utility_multiplier: f64,
}

impl ActionCandidate {
    fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            ability: None,
            target: None,
            destination: None,
            considerations: ConsiderationSet::new(),
            bonus_score: 0.0,
            priority_boost: 0.0,
            utility_multiplier: 1.0,
        }
    }

    pub fn ability_attack(ability: AbilityId, target: CombatantId) -> Self {
        Self {
            ability: Some(ability),
            target: Some(target),
            ..Self::new(ActionKind::AbilityAttack)
        }
    }

    pub fn basic_attack(target: CombatantId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(ActionKind::BasicAttack)
        }
    }

    pub fn heal(ability: AbilityId, target: CombatantId) -> Self {
        Self {
            ability: Some(ability),
            target: Some(target),
            ..Self::new(ActionKind::Heal)
        }
    }

    pub fn buff(ability: AbilityId, target: CombatantId) -> Self {
        Self {
            ability: Some(ability),
            target: Some(target),
            ..Self::new(ActionKind::Buff)
        }
    }

    pub fn debuff(ability: AbilityId, target: CombatantId) -> Self {
        Self {
            ability: Some(ability),
            target: Some(target),
            ..Self::new(ActionKind::Debuff)
        }
    }

    pub fn move_to(destination: Position) -> Self {
        Self {
            destination: Some(destination),
            ..Self::new(ActionKind::Move)
        }
    }

    /// The designed fallback: always present, never vetoed, and scored low
    /// enough that any viable alternative outranks it.
    pub fn end_turn() -> Self {
        let mut candidate = Self::new(ActionKind::EndTurn);
        candidate.considerations.add("fallback", 0.01);
        candidate
    }

    /// Hysteresis identity of this candidate.
    pub fn signature(&self) -> ChoiceSignature {
        (self.kind, self.ability, self.target)
    }

    /// Whether the candidate survived its hard-feasibility gates.
    pub fn is_selectable(&self) -> bool {
        !self.considerations.is_empty() && !self.considerations.is_vetoed()
    }

    /// Derived ranking score.
    ///
    /// Vetoed (or never-scored) candidates collapse to [`UNSELECTABLE`];
    /// everything else blends the three lanes:
    /// `gm × scale × multiplier + bonus + priority`.
    pub fn ranking_score(&self, cfg: &TuningConfig) -> f64 {
        if !self.is_selectable() {
            return UNSELECTABLE;
        }
        let mean = self.considerations.aggregate(&cfg.aggregation);
        mean * cfg.utility_scale * self.utility_multiplier + self.bonus_score + self.priority_boost
    }
}
