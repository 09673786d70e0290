//! Turn-based plan execution, one step per decision tick.
//!
//! The controller is deliberately stateless: per-turn bookkeeping lives in
//! [`TurnState`] and the plan itself, both owned by the encounter context.
//! Each tick it either waits on the executor, revalidates and possibly
//! rebuilds the plan, or issues exactly one step. Every budget here exists
//! to guarantee the turn terminates no matter what the world does.

use skirmish_core::{
    PlanBuilder, PlanValidator, Situation, StepStatus, TuningConfig, TurnPlan,
};

use crate::api::providers::{ActionExecutor, ExecutionResult};

/// Why the controller decided the turn is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EndTurnReason {
    /// The plan ran out of steps.
    PlanComplete,
    /// The per-turn step budget was exhausted.
    StepBudget,
    /// Too many consecutive step failures.
    FailureBudget,
    /// The executor stayed busy past the wait-tick budget.
    WaitTimeout,
    /// The host ended the turn from its side.
    HostEnded,
    /// No situation or plan could be produced at all.
    NoViableAction,
}

/// Result of one controller tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A step was issued, skipped, or retried.
    Acted,
    /// The executor is busy; nothing was issued.
    Waiting,
    /// The plan drifted and was rebuilt.
    Replanned,
    /// The turn is over.
    EndTurn(EndTurnReason),
}

/// Per-turn controller bookkeeping, reset when a combatant's turn begins.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnState {
    pub waiting_ticks: u32,
    pub steps_executed: u32,
    pub consecutive_failures: u32,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct TurnController;

impl TurnController {
    /// Advances one combatant's turn by at most one issued step.
    pub fn tick(
        plan: &mut TurnPlan,
        state: &mut TurnState,
        situation: &Situation,
        executor: &mut dyn ActionExecutor,
        cfg: &TuningConfig,
    ) -> TickOutcome {
        let me = plan.combatant;

        if executor.is_busy() {
            state.waiting_ticks += 1;
            if state.waiting_ticks >= cfg.max_wait_ticks {
                tracing::warn!("combatant {me}: executor busy for {} ticks, ending turn", state.waiting_ticks);
                return TickOutcome::EndTurn(EndTurnReason::WaitTimeout);
            }
            return TickOutcome::Waiting;
        }
        state.waiting_ticks = 0;

        if state.steps_executed >= cfg.max_steps_per_turn {
            return TickOutcome::EndTurn(EndTurnReason::StepBudget);
        }
        if state.consecutive_failures >= cfg.max_consecutive_failures {
            return TickOutcome::EndTurn(EndTurnReason::FailureBudget);
        }

        // A plan already marked stale ran out of replans on an earlier
        // tick; it just runs to exhaustion without another look.
        if plan.valid {
            if let Some(reason) = PlanValidator::validate_plan(plan, situation, cfg) {
                plan.mark_invalid();
                let rebuilt = PlanBuilder::build(situation);
                match plan.succeed_with(rebuilt, cfg.max_replans) {
                    Ok(next) => {
                        tracing::debug!("combatant {me}: plan drifted ({reason}), rebuilding");
                        *plan = next;
                        return TickOutcome::Replanned;
                    }
                    Err(err) => {
                        tracing::debug!("combatant {me}: plan drifted ({reason}) but {err}");
                    }
                }
            }
        }

        let Some(step) = plan.current_step_mut() else {
            return TickOutcome::EndTurn(EndTurnReason::PlanComplete);
        };

        if step.kind == skirmish_core::ActionKind::EndTurn {
            step.status = StepStatus::Completed;
            plan.advance();
            return TickOutcome::EndTurn(EndTurnReason::PlanComplete);
        }

        if let Err(rejection) = PlanValidator::validate_step(step, situation) {
            tracing::debug!("combatant {me}: skipping step ({rejection})");
            step.status = StepStatus::Skipped;
            plan.advance();
            return TickOutcome::Acted;
        }

        step.status = StepStatus::Executing;
        step.attempts += 1;
        let attempts = step.attempts;
        let step_snapshot = step.clone();

        match executor.execute(me, &step_snapshot) {
            ExecutionResult::Success => {
                if let Some(step) = plan.current_step_mut() {
                    step.status = StepStatus::Completed;
                }
                plan.advance();
                state.steps_executed += 1;
                state.consecutive_failures = 0;
                TickOutcome::Acted
            }
            ExecutionResult::Failure => {
                state.consecutive_failures += 1;
                if attempts >= cfg.max_step_attempts {
                    tracing::debug!("combatant {me}: step failed {attempts} times, skipping past it");
                    if let Some(step) = plan.current_step_mut() {
                        step.status = StepStatus::Failed;
                    }
                    plan.advance();
                } else if let Some(step) = plan.current_step_mut() {
                    step.status = StepStatus::Pending;
                }
                TickOutcome::Acted
            }
            ExecutionResult::EndTurn => {
                plan.abandon();
                TickOutcome::EndTurn(EndTurnReason::HostEnded)
            }
        }
    }
}
