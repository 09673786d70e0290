//! Turn planning: multi-step plans, greedy construction, drift validation.
//!
//! Planning sits above single-action scoring: instead of picking one action
//! per decision cycle, a combatant lays out a whole turn (swift buff, move,
//! standard action, end turn) and executes it step by step. Plans are cheap
//! and disposable; the validator invalidates them on drift and the
//! controller rebuilds within a bounded replan budget.

pub mod builder;
pub mod plan;
pub mod step;
pub mod validator;

pub use builder::{PlanBuilder, RoleStrategy};
pub use plan::{PlanError, PlanSnapshot, PlanState, TurnPlan};
pub use step::{PlanStep, StepCost, StepStatus};
pub use validator::{DriftReason, PlanValidator, StepRejection};
