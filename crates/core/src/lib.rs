//! Deterministic combat decision logic shared across hosts.
//!
//! `skirmish-core` defines the data model (combatants, abilities, per-cycle
//! situations), the consideration-based utility scorer, and the turn
//! planning layer. Everything here is pure: no I/O, no globals, no interior
//! mutability. State that outlives a single decision (hysteresis memory,
//! active plans) is owned explicitly by the caller, which is what
//! `skirmish-runtime` does for a live encounter.
pub mod ability;
pub mod combatant;
pub mod config;
pub mod plan;
pub mod scoring;
pub mod situation;
pub use ability::{
    Ability, AbilityId, AbilityTags, BuffEffect, CcKind, ChargeProfile, SaveKind, TimingKind,
};
pub use combatant::{ActionEconomy, Combatant, CombatantId, Faction, HealthMeter, Position, Role};
pub use config::TuningConfig;
pub use plan::{
    DriftReason, PlanBuilder, PlanError, PlanSnapshot, PlanState, PlanStep, PlanValidator,
    RoleStrategy, StepCost, StepRejection, StepStatus, TurnPlan,
};
pub use scoring::{
    ActionCandidate, ActionKind, Aggregation, ChoiceSignature, Consideration, ConsiderationSet,
    HysteresisMemory, PhaseRoleWeights, UNSELECTABLE, UtilityScorer, VETO_EPSILON,
};
pub use situation::{
    AllyInfo, BuffState, CombatPhase, EnemyInfo, MoveOption, MovePurpose, RangePreference,
    Situation, TeamSignals,
};
