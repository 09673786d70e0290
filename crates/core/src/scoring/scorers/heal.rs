//! Heal scoring.
//!
//! Heal need follows the piecewise HP curve with a 0.05 floor, so overheal
//! never vetoes on its own; the no-overheal consideration discounts wasted
//! healing instead. Resource conservation is relaxed once the target drops
//! below the phase/role emergency threshold.

use crate::scoring::candidate::{ActionCandidate, ActionKind};
use crate::scoring::normalize;
use crate::scoring::scorers::role_fit;
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::Situation;

/// Conservation multiplier once a heal qualifies as an emergency.
const EMERGENCY_CONSERVATION_RELIEF: f64 = 0.25;

/// How much each friendly archetype is worth keeping standing.
fn target_importance(role: crate::combatant::Role) -> f64 {
    match role {
        crate::combatant::Role::Support => 1.0,
        crate::combatant::Role::Tank => 0.8,
        crate::combatant::Role::Dps => 0.6,
    }
}

pub fn score(candidate: &mut ActionCandidate, situation: &Situation, weights: &PhaseRoleWeights) {
    let set = &mut candidate.considerations;
    set.clear();

    // Resolve the target among self and living allies.
    let target = candidate.target.and_then(|id| {
        if id == situation.me.id {
            Some((situation.me.hp_fraction(), situation.me.health.maximum, situation.me.role))
        } else {
            situation
                .ally(id)
                .filter(|a| a.is_alive())
                .map(|a| (a.hp_fraction, a.max_hp, a.role))
        }
    });
    set.add_veto("has_target", target.is_none());
    let Some((hp_fraction, max_hp, target_role)) = target else {
        return;
    };

    let ability = candidate
        .ability
        .and_then(|id| situation.heals.iter().find(|a| a.id == id));
    set.add_veto("ability_available", ability.is_none());
    let Some(ability) = ability else {
        return;
    };
    let tags = &ability.tags;

    set.add("heal_need", normalize::heal_need(hp_fraction));
    set.add("phase_fit", weights.heal_fit);
    set.add("role_fit", role_fit(situation.me.role, ActionKind::Heal));
    set.add("target_importance", target_importance(target_role));

    let emergency = hp_fraction <= weights.emergency_heal_threshold;
    let conservation = if emergency {
        weights.resource_conservation * EMERGENCY_CONSERVATION_RELIEF
    } else {
        weights.resource_conservation
    };
    set.add(
        "resource",
        normalize::resource_score(tags.spell_level, conservation, tags.free_to_use),
    );

    let missing_hp = (1.0 - hp_fraction.clamp(0.0, 1.0)) * max_hp;
    set.add(
        "no_overheal",
        normalize::overheal_efficiency(tags.expected_damage, missing_hp),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{Ability, AbilityId, AbilityTags, TimingKind};
    use crate::combatant::{ActionEconomy, Combatant, CombatantId, Faction, HealthMeter, Position, Role};
    use crate::config::TuningConfig;
    use crate::situation::{AllyInfo, BuffState, CombatPhase, RangePreference, TeamSignals};

    fn ally(id: u32, hp_fraction: f64, role: Role) -> AllyInfo {
        AllyInfo {
            id: CombatantId(id),
            hp_fraction,
            max_hp: 100.0,
            distance: 3.0,
            role,
            buffs: BuffState::default(),
        }
    }

    fn heal_ability(level: u8, amount: f64) -> Ability {
        let mut tags = AbilityTags::new(TimingKind::Heal);
        tags.spell_level = level;
        tags.expected_damage = amount;
        tags.range = 10.0;
        Ability::new(AbilityId(30), tags)
    }

    fn situation(allies: Vec<AllyInfo>) -> Situation {
        Situation {
            me: Combatant {
                id: CombatantId(0),
                health: HealthMeter::new(90.0, 100.0),
                position: Position::ORIGIN,
                faction: Faction::Player,
                role: Role::Support,
                economy: ActionEconomy::fresh(),
            },
            phase: CombatPhase::Midgame,
            range_preference: RangePreference::Ranged,
            round: 3,
            enemies: Vec::new(),
            allies,
            best_target: None,
            attacks: Vec::new(),
            heals: vec![heal_ability(2, 25.0)],
            buffs: Vec::new(),
            debuffs: Vec::new(),
            move_options: Vec::new(),
            my_buffs: BuffState::default(),
            team: TeamSignals::default(),
        }
    }

    fn weights() -> PhaseRoleWeights {
        PhaseRoleWeights::resolve(CombatPhase::Midgame, Role::Support)
    }

    #[test]
    fn wounded_ally_outranks_healthy_ally() {
        let cfg = TuningConfig::default();
        let sit = situation(vec![ally(1, 0.2, Role::Dps), ally(2, 0.9, Role::Dps)]);

        let mut wounded = ActionCandidate::heal(AbilityId(30), CombatantId(1));
        let mut healthy = ActionCandidate::heal(AbilityId(30), CombatantId(2));
        score(&mut wounded, &sit, &weights());
        score(&mut healthy, &sit, &weights());

        assert!(wounded.ranking_score(&cfg) > healthy.ranking_score(&cfg));
    }

    #[test]
    fn overheal_never_vetoes() {
        let sit = situation(vec![ally(1, 1.0, Role::Dps)]);
        let mut candidate = ActionCandidate::heal(AbilityId(30), CombatantId(1));
        score(&mut candidate, &sit, &weights());
        assert!(candidate.is_selectable());
    }

    #[test]
    fn dead_ally_vetoes() {
        let sit = situation(vec![ally(1, 0.0, Role::Dps)]);
        let mut candidate = ActionCandidate::heal(AbilityId(30), CombatantId(1));
        score(&mut candidate, &sit, &weights());
        assert!(!candidate.is_selectable());
    }

    #[test]
    fn self_heal_resolves_own_facts() {
        let mut sit = situation(vec![]);
        sit.me.health = HealthMeter::new(15.0, 100.0);
        let mut candidate = ActionCandidate::heal(AbilityId(30), CombatantId(0));
        score(&mut candidate, &sit, &weights());
        assert!(candidate.is_selectable());
        let need = candidate
            .considerations
            .entries()
            .iter()
            .find(|c| c.name == "heal_need")
            .unwrap();
        assert_eq!(need.score, 1.0);
    }

    #[test]
    fn emergency_relaxes_conservation() {
        let cfg = TuningConfig::default();
        // Same leveled heal; only the target HP differs across the
        // emergency threshold, so the resource consideration diverges.
        let sit_emergency = situation(vec![ally(1, 0.1, Role::Tank)]);
        let sit_routine = situation(vec![ally(1, 0.45, Role::Tank)]);

        let resource_of = |sit: &Situation| {
            let mut c = ActionCandidate::heal(AbilityId(30), CombatantId(1));
            score(&mut c, sit, &weights());
            c.considerations
                .entries()
                .iter()
                .find(|e| e.name == "resource")
                .unwrap()
                .score
        };

        assert!(resource_of(&sit_emergency) > resource_of(&sit_routine));
        // And the emergency heal ranks higher overall.
        let mut a = ActionCandidate::heal(AbilityId(30), CombatantId(1));
        score(&mut a, &sit_emergency, &weights());
        let mut b = ActionCandidate::heal(AbilityId(30), CombatantId(1));
        score(&mut b, &sit_routine, &weights());
        assert!(a.ranking_score(&cfg) > b.ranking_score(&cfg));
    }

    #[test]
    fn healer_targets_outrank_dps_targets_at_equal_hp() {
        let cfg = TuningConfig::default();
        let sit = situation(vec![ally(1, 0.4, Role::Support), ally(2, 0.4, Role::Dps)]);
        let mut healer = ActionCandidate::heal(AbilityId(30), CombatantId(1));
        let mut dps = ActionCandidate::heal(AbilityId(30), CombatantId(2));
        score(&mut healer, &sit, &weights());
        score(&mut dps, &sit, &weights());
        assert!(healer.ranking_score(&cfg) > dps.ranking_score(&cfg));
    }
}
