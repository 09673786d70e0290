//! Buff scoring.
//!
//! The one hard gate is duplication: re-applying a permanent buff that is
//! already active is vetoed outright. Everything else is graded, most
//! importantly the classifier's combat value, so a pure utility enchantment
//! never crowds out real actions even at the combat opening, where the
//! phase fit for buffing peaks.

use crate::ability::TimingKind;
use crate::scoring::candidate::{ActionCandidate, ActionKind};
use crate::scoring::normalize;
use crate::scoring::scorers::role_fit;
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::{BuffState, Situation};

/// Combat value below which the phase fit is suppressed: low-value buffs
/// should not ride the opening-phase buff window.
const LOW_VALUE_THRESHOLD: f64 = 0.3;
const LOW_VALUE_PHASE_SUPPRESSION: f64 = 0.5;

pub fn score(candidate: &mut ActionCandidate, situation: &Situation, weights: &PhaseRoleWeights) {
    let set = &mut candidate.considerations;
    set.clear();

    // Resolve the target among self and living allies.
    let target: Option<(f64, &BuffState)> = candidate.target.and_then(|id| {
        if id == situation.me.id {
            Some((situation.me.hp_fraction(), &situation.my_buffs))
        } else {
            situation
                .ally(id)
                .filter(|a| a.is_alive())
                .map(|a| (a.hp_fraction, &a.buffs))
        }
    });
    set.add_veto("has_target", target.is_none());
    let Some((hp_fraction, buff_state)) = target else {
        return;
    };

    let ability = candidate
        .ability
        .and_then(|id| situation.buffs.iter().find(|a| a.id == id));
    set.add_veto("ability_available", ability.is_none());
    let Some(ability) = ability else {
        return;
    };
    let tags = &ability.tags;

    let duplicate_permanent =
        tags.timing == TimingKind::PermanentBuff && buff_state.has(ability.id);
    set.add_veto("not_already_buffed", duplicate_permanent);

    // Combat value from the classifier's effect descriptor; an unclassified
    // buff is treated as pure utility, not vetoed.
    let combat_value = tags
        .buff
        .map(|b| (b.combat_value * b.magnitude.max(1.0).min(1.5)).clamp(0.05, 1.0))
        .unwrap_or(0.1);
    set.add("combat_value", combat_value);

    let phase_fit = if combat_value < LOW_VALUE_THRESHOLD {
        weights.buff_fit * LOW_VALUE_PHASE_SUPPRESSION
    } else {
        weights.buff_fit
    };
    set.add("phase_fit", phase_fit);

    set.add("role_fit", role_fit(situation.me.role, ActionKind::Buff));
    set.add("stack_value", normalize::buff_stack_value(buff_state.stacks));

    // A buff on a nearly dead target is likely wasted.
    set.add("target_hp", normalize::clamp01(hp_fraction * 1.5).max(0.1));

    set.add(
        "resource",
        normalize::resource_score(
            tags.spell_level,
            weights.resource_conservation,
            tags.free_to_use,
        ),
    );

    // Buffing is cheapest as the very first action of the fight.
    set.add("first_action", if situation.round <= 1 { 1.0 } else { 0.6 });
}
