//! Encounter orchestration for the combat decision core.
//!
//! This crate wires the pure decision logic of `skirmish-core` into a live
//! encounter: hosts implement the [`SituationProvider`] and
//! [`ActionExecutor`] traits, embed an [`EncounterContext`], and poll it
//! from their scheduler. Two consumption modes are supported:
//!
//! - **single-action**: [`EncounterContext::choose_action`] scores the
//!   current situation and returns the one best candidate;
//! - **turn-based**: [`EncounterContext::tick`] drives a multi-step turn
//!   plan one step per tick through the [`controller`].
//!
//! All fault handling happens at this boundary: inside the poll path,
//! collaborator failures are logged and degrade to end-turn outcomes
//! rather than propagating out. Host-initiated calls such as
//! [`EncounterContext::force_replan`] return a [`RuntimeError`] instead.
pub mod api;
pub mod controller;
pub mod encounter;

pub use api::{ActionExecutor, ExecutionResult, Result, RuntimeError, SituationProvider};
pub use controller::{EndTurnReason, TickOutcome, TurnController, TurnState};
pub use encounter::EncounterContext;
