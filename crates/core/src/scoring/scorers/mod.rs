//! Type scorers: populate a candidate's considerations from a situation.
//!
//! One scorer per action type. Every scorer follows the same pattern the
//! selection layer relies on:
//!
//! 1. Gate on hard-feasibility vetoes first (missing target, immunity,
//!    out of range). A vetoed candidate short-circuits to an unselectable
//!    ranking score, so soft factors never resurrect an infeasible action.
//! 2. Add the soft [0, 1] considerations (target value, phase fit, role
//!    fit, resources, ...).
//! 3. Route circumstantial opportunity value (kill potential, AoE
//!    multi-hit, caster sniping) into the additive bonus lane, never into
//!    the considerations.

pub mod attack;
pub mod buff;
pub mod debuff;
pub mod heal;
pub mod movement;

use crate::combatant::Role;
use crate::scoring::candidate::{ActionCandidate, ActionKind};
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::Situation;

/// Baseline role fit per action type, used as the RoleFit consideration.
///
/// These are archetype priors; the phase×role weight matrix layers the
/// phase-specific tuning on top.
pub(crate) fn role_fit(role: Role, kind: ActionKind) -> f64 {
    match (role, kind) {
        (Role::Dps, k) if k.is_attack() => 1.0,
        (Role::Dps, ActionKind::Debuff) => 0.7,
        (Role::Dps, ActionKind::Buff) => 0.5,
        (Role::Dps, ActionKind::Heal) => 0.4,
        (Role::Dps, ActionKind::Move) => 0.7,

        (Role::Tank, k) if k.is_attack() => 0.8,
        (Role::Tank, ActionKind::Debuff) => 0.8,
        (Role::Tank, ActionKind::Buff) => 0.6,
        (Role::Tank, ActionKind::Heal) => 0.5,
        (Role::Tank, ActionKind::Move) => 0.8,

        (Role::Support, k) if k.is_attack() => 0.5,
        (Role::Support, ActionKind::Debuff) => 0.9,
        (Role::Support, ActionKind::Buff) => 1.0,
        (Role::Support, ActionKind::Heal) => 1.0,
        (Role::Support, ActionKind::Move) => 0.6,

        _ => 1.0,
    }
}

/// Dispatches a candidate to its type scorer.
///
/// EndTurn candidates carry their fixed fallback consideration from
/// construction and are not rescored.
pub fn score_candidate(
    candidate: &mut ActionCandidate,
    situation: &Situation,
    weights: &PhaseRoleWeights,
) {
    match candidate.kind {
        ActionKind::AbilityAttack | ActionKind::BasicAttack => {
            attack::score(candidate, situation, weights)
        }
        ActionKind::Heal => heal::score(candidate, situation, weights),
        ActionKind::Buff => buff::score(candidate, situation, weights),
        ActionKind::Debuff => debuff::score(candidate, situation, weights),
        ActionKind::Move => movement::score(candidate, situation, weights),
        ActionKind::EndTurn => {}
    }
}
