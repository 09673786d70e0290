//! Per-encounter orchestration state.
//!
//! [`EncounterContext`] is the explicit owner of everything that outlives a
//! single decision cycle: active plans, hysteresis memory, and per-turn
//! controller state, all keyed by combatant id. One context exists per
//! encounter and is dropped (or [`end_combat`](EncounterContext::end_combat)
//! is called) when the fight ends, so no decision state can leak across
//! combats. Single-threaded and poll-driven by the host scheduler.

use std::collections::HashMap;

use skirmish_core::scoring::generator;
use skirmish_core::{
    ActionCandidate, CombatantId, HysteresisMemory, PlanBuilder, TuningConfig, TurnPlan,
    UtilityScorer,
};

use crate::api::errors::{Result, RuntimeError};
use crate::api::providers::{ActionExecutor, SituationProvider};
use crate::controller::{EndTurnReason, TickOutcome, TurnController, TurnState};

pub struct EncounterContext {
    cfg: TuningConfig,
    plans: HashMap<CombatantId, TurnPlan>,
    memory: HysteresisMemory,
    turn_states: HashMap<CombatantId, TurnState>,
}

impl EncounterContext {
    pub fn new(cfg: TuningConfig) -> Self {
        Self {
            cfg,
            plans: HashMap::new(),
            memory: HysteresisMemory::new(),
            turn_states: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TuningConfig {
        &self.cfg
    }

    /// Single-action mode: score the current situation and return the best
    /// candidate, without any turn plan. Degrades to EndTurn when the
    /// provider has nothing for this combatant.
    pub fn choose_action(
        &mut self,
        provider: &dyn SituationProvider,
        combatant: CombatantId,
    ) -> ActionCandidate {
        let Some(situation) = provider.situation(combatant) else {
            tracing::warn!("combatant {combatant}: no situation available, ending turn");
            return ActionCandidate::end_turn();
        };

        let mut candidates = generator::generate(&situation);
        UtilityScorer::score_all(&situation, &mut candidates);
        UtilityScorer::select_best(&situation, candidates, &mut self.memory, &self.cfg)
    }

    /// Turn-based mode: advance the combatant's turn by one tick, building
    /// a plan on the first tick of the turn.
    pub fn tick(
        &mut self,
        provider: &dyn SituationProvider,
        executor: &mut dyn ActionExecutor,
        combatant: CombatantId,
    ) -> TickOutcome {
        let Some(situation) = provider.situation(combatant) else {
            tracing::warn!("combatant {combatant}: no situation available, ending turn");
            self.finish_turn(combatant);
            return TickOutcome::EndTurn(EndTurnReason::NoViableAction);
        };

        let plan = self
            .plans
            .entry(combatant)
            .or_insert_with(|| PlanBuilder::build(&situation));
        let state = self.turn_states.entry(combatant).or_default();

        let outcome = TurnController::tick(plan, state, &situation, executor, &self.cfg);
        if let TickOutcome::EndTurn(reason) = outcome {
            tracing::debug!("combatant {combatant}: turn over ({reason})");
            self.finish_turn(combatant);
        }
        outcome
    }

    /// Host-initiated replan, for events the drift validator cannot see
    /// from a snapshot diff (a scripted reinforcement wave, say). Counts
    /// against the same per-turn budget as drift-driven rebuilds.
    pub fn force_replan(
        &mut self,
        provider: &dyn SituationProvider,
        combatant: CombatantId,
    ) -> Result<()> {
        let situation = provider
            .situation(combatant)
            .ok_or(RuntimeError::SituationUnavailable(combatant))?;
        let plan = self
            .plans
            .get_mut(&combatant)
            .ok_or(RuntimeError::NoActivePlan(combatant))?;

        plan.mark_invalid();
        let rebuilt = PlanBuilder::build(&situation);
        *plan = plan.succeed_with(rebuilt, self.cfg.max_replans)?;
        tracing::debug!("combatant {combatant}: plan rebuilt on host request");
        Ok(())
    }

    /// Debug surface: every candidate with its ranking score, best first.
    /// Reads the situation but touches no encounter state.
    pub fn decision_trace(
        &self,
        provider: &dyn SituationProvider,
        combatant: CombatantId,
    ) -> Vec<(ActionCandidate, f64)> {
        provider
            .situation(combatant)
            .map(|situation| UtilityScorer::evaluate_all(&situation, &self.cfg))
            .unwrap_or_default()
    }

    /// Discards every combatant's plan and turn state. Hysteresis memory
    /// survives round boundaries; only combat end clears it.
    pub fn begin_round(&mut self) {
        for plan in self.plans.values_mut() {
            plan.abandon();
        }
        self.plans.clear();
        self.turn_states.clear();
    }

    /// Drops all per-combatant state atomically.
    pub fn end_combat(&mut self) {
        self.begin_round();
        self.memory.clear();
    }

    pub fn active_plan(&self, combatant: CombatantId) -> Option<&TurnPlan> {
        self.plans.get(&combatant)
    }

    fn finish_turn(&mut self, combatant: CombatantId) {
        if let Some(mut plan) = self.plans.remove(&combatant) {
            tracing::debug!(
                "combatant {combatant}: retiring plan with {} completed steps",
                plan.completed_steps(),
            );
            if !plan.is_complete() {
                plan.abandon();
            }
        }
        self.turn_states.remove(&combatant);
    }
}
