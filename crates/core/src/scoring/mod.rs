//! Consideration-based utility scoring.
//!
//! The scoring pipeline for one decision cycle:
//!
//! 1. **Generation** ([`generator`]): hypothesize every candidate action
//!    from the situation (abilities × targets, move options, EndTurn).
//! 2. **Type scoring** ([`scorers`]): each candidate's type scorer gates on
//!    hard-feasibility vetoes, then populates [0, 1] considerations and the
//!    additive bonus lane.
//! 3. **Aggregation** ([`consideration`]): the geometric mean folds the
//!    considerations so any severely unfavorable factor dominates.
//! 4. **Selection** ([`selector`]): hysteresis, veto filtering, ranking,
//!    and the EndTurn fallback.
//!
//! [`normalize`] holds the pure curves shared by the scorers, and
//! [`weights`] the tuned phase×role matrix.

pub mod candidate;
pub mod consideration;
pub mod generator;
pub mod normalize;
pub mod scorers;
pub mod selector;
pub mod weights;

pub use candidate::{ActionCandidate, ActionKind, ChoiceSignature, UNSELECTABLE};
pub use consideration::{Aggregation, Consideration, ConsiderationSet, VETO_EPSILON};
pub use selector::{HysteresisMemory, UtilityScorer};
pub use weights::PhaseRoleWeights;
