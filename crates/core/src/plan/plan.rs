//! Turn plans and their build-time snapshots.
//!
//! A [`TurnPlan`] is created once per combatant per combat turn, mutated
//! step by step as the controller executes it, replaced wholesale on
//! replan, and discarded at turn end or round change. The embedded
//! [`PlanSnapshot`] freezes the facts the plan was built against so the
//! validator can detect drift; it is used for nothing else.

use crate::combatant::{CombatantId, Position};
use crate::plan::step::{PlanStep, StepStatus};
use crate::situation::Situation;

/// Replanning failures surfaced to the orchestration layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("replan budget exhausted after {count} replans")]
    ReplanBudgetExhausted { count: u32 },
}

/// Lifecycle of a whole plan:
/// `Building → Active → {Complete | Replanned | Abandoned}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlanState {
    Building,
    Active,
    Complete,
    Replanned,
    Abandoned,
}

/// Point-in-time facts captured when a plan is built, for drift detection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanSnapshot {
    pub own_hp_fraction: f64,
    /// Primary target and its HP fraction at build time.
    pub target: Option<(CombatantId, f64)>,
    pub own_position: Position,
    pub enemy_count: u32,
    pub engaged_count: u32,
}

impl PlanSnapshot {
    pub fn capture(situation: &Situation) -> Self {
        Self {
            own_hp_fraction: situation.me.hp_fraction(),
            target: situation
                .best_target_info()
                .map(|e| (e.id, e.hp_fraction)),
            own_position: situation.me.position,
            enemy_count: situation.living_enemy_count() as u32,
            engaged_count: situation.engaged_enemy_count() as u32,
        }
    }
}

/// An ordered, mutable sequence of intended actions for one turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnPlan {
    pub combatant: CombatantId,
    steps: Vec<PlanStep>,
    /// Index of the step being worked; only ever advances.
    cursor: usize,
    pub snapshot: PlanSnapshot,
    /// Replans consumed across this plan's lineage this turn.
    pub replan_count: u32,
    /// Cleared when drift is detected; a plan past its replan budget
    /// keeps executing with this unset.
    pub valid: bool,
    pub state: PlanState,
}

impl TurnPlan {
    pub fn new(combatant: CombatantId, steps: Vec<PlanStep>, snapshot: PlanSnapshot) -> Self {
        Self {
            combatant,
            steps,
            cursor: 0,
            snapshot,
            replan_count: 0,
            valid: true,
            state: PlanState::Active,
        }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_step(&self) -> Option<&PlanStep> {
        self.steps.get(self.cursor)
    }

    pub fn current_step_mut(&mut self) -> Option<&mut PlanStep> {
        self.steps.get_mut(self.cursor)
    }

    /// Advances past the current step. The cursor never regresses; once
    /// the last step is passed the plan is complete.
    pub fn advance(&mut self) {
        if self.cursor < self.steps.len() {
            self.cursor += 1;
        }
        if self.cursor >= self.steps.len() {
            self.state = PlanState::Complete;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == PlanState::Complete || self.cursor >= self.steps.len()
    }

    /// True when the only remaining intent is ending the turn.
    pub fn is_ending_turn(&self) -> bool {
        match self.current_step() {
            Some(step) => step.kind == crate::scoring::candidate::ActionKind::EndTurn,
            None => true,
        }
    }

    pub fn mark_invalid(&mut self) {
        self.valid = false;
    }

    /// Retires this plan in favor of a rebuilt one, carrying the replan
    /// count forward so the lineage-wide budget holds. Refuses once the
    /// lineage has spent `max_replans`, leaving this plan in place.
    pub fn succeed_with(
        &mut self,
        mut replacement: TurnPlan,
        max_replans: u32,
    ) -> Result<TurnPlan, PlanError> {
        if self.replan_count >= max_replans {
            return Err(PlanError::ReplanBudgetExhausted {
                count: self.replan_count,
            });
        }
        self.state = PlanState::Replanned;
        replacement.replan_count = self.replan_count + 1;
        Ok(replacement)
    }

    /// Abandons the plan outright (round change, combat end).
    pub fn abandon(&mut self) {
        self.state = PlanState::Abandoned;
    }

    /// Count of steps already executed to completion.
    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count()
    }
}
