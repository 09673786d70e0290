//! Individual turn-plan steps.

use crate::ability::AbilityId;
use crate::combatant::{CombatantId, Position};
use crate::scoring::candidate::ActionKind;

/// Which action-economy slot a step spends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StepCost {
    Standard,
    Move,
    Swift,
    Free,
}

/// Lifecycle of one step: `Pending → Executing → {Completed | Failed | Skipped}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Executing,
    Completed,
    Failed,
    Skipped,
}

impl StepStatus {
    /// True once the step can no longer run.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped)
    }
}

/// One intended action inside a turn plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanStep {
    pub kind: ActionKind,
    pub ability: Option<AbilityId>,
    pub target: Option<CombatantId>,
    pub destination: Option<Position>,
    pub cost: StepCost,
    pub status: StepStatus,
    /// Execution attempts so far; bounded by the step-attempt budget.
    pub attempts: u32,
}

impl PlanStep {
    fn new(kind: ActionKind, cost: StepCost) -> Self {
        Self {
            kind,
            ability: None,
            target: None,
            destination: None,
            cost,
            status: StepStatus::Pending,
            attempts: 0,
        }
    }

    pub fn attack(ability: Option<AbilityId>, target: CombatantId) -> Self {
        Self {
            kind: if ability.is_some() {
                ActionKind::AbilityAttack
            } else {
                ActionKind::BasicAttack
            },
            ability,
            target: Some(target),
            ..Self::new(ActionKind::BasicAttack, StepCost::Standard)
        }
    }

    pub fn debuff(ability: AbilityId, target: CombatantId) -> Self {
        Self {
            ability: Some(ability),
            target: Some(target),
            ..Self::new(ActionKind::Debuff, StepCost::Standard)
        }
    }

    pub fn heal(ability: AbilityId, target: CombatantId) -> Self {
        Self {
            ability: Some(ability),
            target: Some(target),
            ..Self::new(ActionKind::Heal, StepCost::Standard)
        }
    }

    pub fn swift_buff(ability: AbilityId, target: CombatantId) -> Self {
        Self {
            ability: Some(ability),
            target: Some(target),
            ..Self::new(ActionKind::Buff, StepCost::Swift)
        }
    }

    pub fn move_to(destination: Position) -> Self {
        Self {
            destination: Some(destination),
            ..Self::new(ActionKind::Move, StepCost::Move)
        }
    }

    pub fn end_turn() -> Self {
        Self::new(ActionKind::EndTurn, StepCost::Free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_step_kind_follows_ability_presence() {
        let basic = PlanStep::attack(None, CombatantId(1));
        assert_eq!(basic.kind, ActionKind::BasicAttack);
        let ability = PlanStep::attack(Some(AbilityId(3)), CombatantId(1));
        assert_eq!(ability.kind, ActionKind::AbilityAttack);
        assert_eq!(ability.cost, StepCost::Standard);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!StepStatus::Pending.is_terminal());
        assert!(!StepStatus::Executing.is_terminal());
        assert!(StepStatus::Completed.is_terminal());
        assert!(StepStatus::Failed.is_terminal());
        assert!(StepStatus::Skipped.is_terminal());
    }
}
