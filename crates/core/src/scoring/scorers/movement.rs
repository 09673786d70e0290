//! Movement scoring.
//!
//! Candidates are drawn from host-resolved [`MoveOption`]s, so walkability
//! and post-move facts are already settled; this scorer only grades them.
//! Movement need is high when no target is reachable from where the
//! combatant stands, ranged combatants veto destinations that land them
//! point-blank, and the safety curve inverts between melee and ranged.

use crate::scoring::candidate::{ActionCandidate, ActionKind};
use crate::scoring::normalize;
use crate::scoring::scorers::role_fit;
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::{MovePurpose, RangePreference, Situation};

/// Ranged combatants refuse destinations closer than this to the target.
const RANGED_MIN_SPACING: f32 = 2.0;
/// Ranged comfort distance used for the improvement curve.
const RANGED_PREFERRED_DISTANCE: f32 = 8.0;
/// Below this HP fraction a safety move becomes an emergency and rides the
/// priority override lane above every ordinary action.
const EMERGENCY_RETREAT_HP: f64 = 0.15;
const EMERGENCY_RETREAT_BOOST: f64 = 50.0;

pub fn score(candidate: &mut ActionCandidate, situation: &Situation, weights: &PhaseRoleWeights) {
    let set = &mut candidate.considerations;
    set.clear();

    let option = candidate
        .destination
        .and_then(|dest| situation.move_options.iter().find(|m| m.destination == dest));
    set.add_veto("destination_known", option.is_none());
    let Some(option) = option else {
        return;
    };

    let economy = situation.me.economy;
    set.add_veto("not_moved_yet", economy.moved_this_turn || !economy.move_action);

    let melee = situation.range_preference == RangePreference::Melee;

    // Movement matters most when nothing is reachable from here; a safety
    // retreat also rises with how wounded we are.
    let need = if !situation.has_reachable_target() {
        1.0
    } else {
        match option.purpose {
            MovePurpose::ToSafety => {
                normalize::clamp01(1.0 - situation.me.hp_fraction() + 0.2)
            }
            MovePurpose::ToAttack | MovePurpose::ToEngage => 0.3,
        }
    };
    set.add("movement_need", need);

    set.add_veto(
        "ranged_spacing",
        !melee && option.distance_to_target_after < RANGED_MIN_SPACING,
    );

    match situation.best_target_info() {
        Some(target) => {
            set.add(
                "distance_improvement",
                normalize::distance_improvement(
                    target.distance,
                    option.distance_to_target_after,
                    RANGED_PREFERRED_DISTANCE,
                    melee,
                ),
            );
        }
        // No target to improve against; stay neutral.
        None => set.add("distance_improvement", 0.5),
    }

    set.add(
        "safety",
        normalize::position_safety(option.nearby_enemies_after, melee),
    );
    set.add("phase_fit", weights.move_fit);
    set.add("role_fit", role_fit(situation.me.role, ActionKind::Move));

    if option.purpose == MovePurpose::ToSafety
        && situation.me.hp_fraction() < EMERGENCY_RETREAT_HP
    {
        candidate.priority_boost += EMERGENCY_RETREAT_BOOST;
    }
}
