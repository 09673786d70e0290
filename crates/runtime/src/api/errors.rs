//! Unified error types surfaced by the runtime API.
//!
//! The poll path never propagates faults: the encounter context logs a
//! missing situation and degrades the affected combatant to an end-turn
//! outcome. Host-initiated calls such as
//! [`force_replan`](crate::EncounterContext::force_replan) return these
//! errors instead, so the host can tell a provider gap from a spent
//! replan budget.
use thiserror::Error;

use skirmish_core::{CombatantId, PlanError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("situation provider returned no snapshot for combatant {0}")]
    SituationUnavailable(CombatantId),

    #[error("no active plan for combatant {0}")]
    NoActivePlan(CombatantId),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
