//! Public runtime API surface.
//!
//! Gathers the traits and error types hosts implement or consume, so the
//! controller and encounter modules can stay focused on orchestration.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{ActionExecutor, ExecutionResult, SituationProvider};
