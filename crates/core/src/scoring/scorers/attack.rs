//! Attack scoring: ability attacks and basic attacks.
//!
//! Hard gates: a living, hittable target, ability availability, range for
//! ranged abilities, and the minimum run-up for charge attacks. Soft
//! factors grade target value, phase/role fit, resources, and range
//! preference. Kill potential, AoE multi-hit, caster sniping, and the
//! team focus target all land in the bonus lane: they are circumstantial
//! opportunity, not baseline viability.

use crate::ability::AbilityTags;
use crate::scoring::candidate::{ActionCandidate, ActionKind};
use crate::scoring::normalize;
use crate::scoring::scorers::role_fit;
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::{RangePreference, Situation};

/// Bonus per extra enemy caught in an AoE around the target.
const AOE_PER_EXTRA_TARGET: f64 = 5.0;
/// Bonus for taking an enemy caster off the board.
const CASTER_TARGET_BONUS: f64 = 4.0;
/// Bonus for honoring the team's shared focus target.
const FOCUS_TARGET_BONUS: f64 = 3.0;

/// Tag profile used for basic (weapon) attacks, which carry no
/// classification of their own: melee reach, always free.
fn basic_attack_tags() -> AbilityTags {
    let mut tags = AbilityTags::new(crate::ability::TimingKind::Attack);
    tags.free_to_use = true;
    tags
}

pub fn score(candidate: &mut ActionCandidate, situation: &Situation, weights: &PhaseRoleWeights) {
    let set = &mut candidate.considerations;
    set.clear();

    let target = candidate
        .target
        .and_then(|id| situation.enemy(id))
        .filter(|e| e.is_alive());
    set.add_veto("has_target", target.is_none());
    let Some(target) = target else {
        return;
    };

    set.add_veto("hittable", !target.hittable);

    let tags = match candidate.kind {
        ActionKind::AbilityAttack => {
            let ability = candidate.ability.and_then(|id| situation.ability(id));
            set.add_veto("ability_available", ability.is_none());
            match ability {
                Some(a) => a.tags.clone(),
                None => return,
            }
        }
        _ => basic_attack_tags(),
    };

    // Range gate: melee grades the gap, ranged vetoes past max range.
    if tags.is_melee() {
        set.add("melee_distance", normalize::melee_distance(target.distance));
    } else {
        set.add_veto("in_range", target.distance > tags.range);
    }

    if let Some(profile) = tags.charge {
        let fit = normalize::charge_fit(target.distance, profile);
        set.add_veto("charge_min_distance", fit <= 0.0);
        if fit > 0.0 {
            set.add("charge_distance", fit);
        }
    }

    set.add(
        "target_value",
        normalize::target_value(target.hp_fraction, target.threat),
    );
    set.add(
        "hit_chance",
        normalize::hit_chance(tags.attack_bonus, target.defense),
    );
    set.add("role_fit", role_fit(situation.me.role, candidate.kind));
    set.add("phase_fit", weights.attack_fit);
    set.add(
        "resource",
        normalize::resource_score(
            tags.spell_level,
            weights.resource_conservation,
            tags.free_to_use,
        ),
    );
    set.add(
        "range_preference",
        range_preference_fit(situation.range_preference, &tags),
    );

    // ===== bonus lane =====
    candidate.bonus_score +=
        normalize::kill_potential(tags.expected_damage, target.remaining_hp())
            * weights.kill_bonus_weight;

    if tags.is_aoe() {
        let hit = situation.enemies_within(target.id, tags.aoe_radius);
        if hit > 1 {
            candidate.bonus_score += (hit - 1) as f64 * AOE_PER_EXTRA_TARGET;
        }
    }

    if target.is_caster {
        candidate.bonus_score += CASTER_TARGET_BONUS;
    }

    if situation.team.focus_target == Some(target.id) {
        candidate.bonus_score += FOCUS_TARGET_BONUS;
    }
}

/// Fit between the combatant's preferred fighting range and the ability's.
fn range_preference_fit(preference: RangePreference, tags: &AbilityTags) -> f64 {
    match (preference, tags.is_melee()) {
        (RangePreference::Melee, true) | (RangePreference::Ranged, false) => 1.0,
        (RangePreference::Ranged, true) => 0.6,
        (RangePreference::Melee, false) => 0.7,
    }
}
