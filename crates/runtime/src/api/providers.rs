//! Synchronous abstractions over the host's combat services.
//!
//! The encounter context plugs into the host through two traits: a
//! [`SituationProvider`] that snapshots the world per combatant per tick,
//! and an [`ActionExecutor`] that issues steps into the game and reports
//! how they went. Implementations can wrap a live engine, scripted
//! fixtures, or test doubles; everything is poll-driven and
//! single-threaded, so no `Send`/`Sync` bounds are imposed.

use skirmish_core::{CombatantId, PlanStep, Situation};

/// How an issued plan step resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The step ran to completion.
    Success,
    /// The step could not run (interrupted, blocked, resource gone).
    Failure,
    /// The host ended the combatant's turn out from under us.
    EndTurn,
}

/// Builds the per-decision snapshot for one combatant.
///
/// The provider owns all geometry, line-of-sight, and ability
/// classification; by the time a [`Situation`] reaches the core it contains
/// only resolved scalars. Returning `None` means the combatant cannot act
/// this tick (dead, stunned, not yet spawned) and reads as an end-turn.
pub trait SituationProvider {
    fn situation(&self, combatant: CombatantId) -> Option<Situation>;
}

/// Issues plan steps into the host and reports progress.
pub trait ActionExecutor {
    /// Issues one step. Called only while [`is_busy`](Self::is_busy)
    /// reports idle.
    fn execute(&mut self, combatant: CombatantId, step: &PlanStep) -> ExecutionResult;

    /// True while a previously issued action is still animating or
    /// resolving; the controller waits instead of issuing.
    fn is_busy(&self) -> bool;
}
