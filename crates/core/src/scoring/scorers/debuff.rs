//! Debuff and crowd-control scoring.
//!
//! Immunity is a hard veto: a mind-affecting effect against an immune
//! target can never be selected, no matter how favorable everything else
//! looks. An already-applied debuff is merely down-weighted, since
//! refreshing control can still be the right call. Hard CC earns a bonus-lane reward
//! scaled by the target's threat.

use crate::ability::CcKind;
use crate::scoring::candidate::{ActionCandidate, ActionKind};
use crate::scoring::normalize;
use crate::scoring::scorers::role_fit;
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::Situation;

/// Down-weight (not veto) for re-applying an active debuff.
const DUPLICATE_WEIGHT: f64 = 0.3;
/// Bonus-lane reward for removing a turn outright.
const HARD_CC_BASE_BONUS: f64 = 6.0;
const HARD_CC_THREAT_BONUS: f64 = 4.0;

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

    let ability = candidate
        .ability
        .and_then(|id| situation.debuffs.iter().find(|a| a.id == id));
    set.add_veto("ability_available", ability.is_none());
    let Some(ability) = ability else {
        return;
    };
    let tags = &ability.tags;

    set.add_veto(
        "not_immune",
        tags.mind_affecting && target.immune_mind_affecting,
    );

    set.add(
        "not_duplicate",
        if target.has_debuff(ability.id) {
            DUPLICATE_WEIGHT
        } else {
            1.0
        },
    );

    set.add("target_threat", normalize::clamp01(target.threat));
    // Control spent on a nearly dead target is wasted; damage finishes it.
    set.add(
        "target_hp",
        normalize::clamp01(target.hp_fraction * 1.25).max(0.1),
    );
    set.add("phase_fit", weights.debuff_fit);
    set.add("role_fit", role_fit(situation.me.role, ActionKind::Debuff));
    set.add(
        "resource",
        normalize::resource_score(
            tags.spell_level,
            weights.resource_conservation,
            tags.free_to_use,
        ),
    );
    set.add(
        "save_match",
        normalize::save_match(tags.save, target.weakest_save),
    );

    if tags.cc == CcKind::Hard {
        candidate.bonus_score +=
            HARD_CC_BASE_BONUS + HARD_CC_THREAT_BONUS * normalize::clamp01(target.threat);
    }
}
