//! Greedy per-role plan construction.
//!
//! The builder is deliberately simpler than the utility scorer: a plan is a
//! cheap forecast that the validator will happily throw away, so step choice
//! runs on a flat heuristic instead of the full consideration pipeline.
//! Every plan terminates with an EndTurn step, and a situation with no
//! living enemies, or no action slots left to spend, collapses to an
//! EndTurn-only plan.

use crate::ability::{Ability, SaveKind};
use crate::combatant::{CombatantId, Role};
use crate::plan::plan::{PlanSnapshot, TurnPlan};
use crate::plan::step::PlanStep;
use crate::scoring::normalize;
use crate::scoring::weights::PhaseRoleWeights;
use crate::situation::{EnemyInfo, MoveOption, MovePurpose, RangePreference, Situation};

/// Tuned weights for the offensive step heuristic.
const SPELL_LEVEL_WEIGHT: f64 = 1.5;
const DAMAGE_FLAG_BONUS: f64 = 1.0;
const AOE_FLAG_BONUS: f64 = 2.0;
const HIT_CHANCE_WEIGHT: f64 = 4.0;
const LOW_HP_TARGET_BONUS: f64 = 2.0;
const LOW_HP_TARGET_THRESHOLD: f64 = 0.35;
const WEAK_SAVE_BONUS: f64 = 1.5;
const CANTRIP_PENALTY: f64 = 1.0;

/// HP fraction below which a strategy schedules a retreat step.
const RETREAT_HP_THRESHOLD: f64 = 0.3;

/// Concrete strategy, resolved from role and range preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RoleStrategy {
    Tank,
    Support,
    RangedDps,
    MeleeDps,
}

impl RoleStrategy {
    pub fn resolve(role: Role, preference: RangePreference) -> Self {
        match (role, preference) {
            (Role::Tank, _) => RoleStrategy::Tank,
            (Role::Support, _) => RoleStrategy::Support,
            (Role::Dps, RangePreference::Ranged) => RoleStrategy::RangedDps,
            (Role::Dps, RangePreference::Melee) => RoleStrategy::MeleeDps,
        }
    }
}

/// Builds turn plans from situations.
pub struct PlanBuilder;

impl PlanBuilder {
    /// Builds a full plan for the situation's combatant.
    pub fn build(situation: &Situation) -> TurnPlan {
        let snapshot = PlanSnapshot::capture(situation);
        let me = situation.me.id;

        if situation.living_enemy_count() == 0 || situation.me.economy.exhausted() {
            return TurnPlan::new(me, vec![PlanStep::end_turn()], snapshot);
        }

        let strategy = RoleStrategy::resolve(situation.me.role, situation.range_preference);
        let mut steps = Vec::new();

        if let Some(step) = swift_buff_step(situation) {
            steps.push(step);
        }
        if let Some(step) = move_step(situation, strategy) {
            steps.push(step);
        }
        if let Some(step) = standard_step(situation, strategy) {
            steps.push(step);
        }
        steps.push(PlanStep::end_turn());

        let plan = TurnPlan::new(me, steps, snapshot);
        tracing::debug!(
            "combatant {me}: built {strategy} plan with {} steps",
            plan.steps().len(),
        );
        plan
    }
}

/// A swift-castable buff not already active on the combatant, if the swift
/// slot is still free.
fn swift_buff_step(situation: &Situation) -> Option<PlanStep> {
    if !situation.me.economy.swift {
        return None;
    }
    situation
        .buffs
        .iter()
        .find(|a| a.tags.swift_action && !situation.my_buffs.has(a.id))
        .map(|a| PlanStep::swift_buff(a.id, situation.me.id))
}

/// Strategy-dependent movement step.
fn move_step(situation: &Situation, strategy: RoleStrategy) -> Option<PlanStep> {
    if !situation.me.economy.move_action || situation.me.economy.moved_this_turn {
        return None;
    }

    let hurting = situation.me.hp_fraction() < RETREAT_HP_THRESHOLD;
    let reachable = situation.has_reachable_target();

    let wanted: &[MovePurpose] = match strategy {
        // Tanks and melee close distance whenever nothing is in reach.
        RoleStrategy::Tank | RoleStrategy::MeleeDps if !reachable => {
            &[MovePurpose::ToAttack, MovePurpose::ToEngage]
        }
        // Ranged combatants back out of melee, or reposition for a shot.
        RoleStrategy::RangedDps if situation.engaged_enemy_count() > 0 && hurting => {
            &[MovePurpose::ToSafety, MovePurpose::ToAttack]
        }
        RoleStrategy::RangedDps if !reachable => {
            &[MovePurpose::ToAttack, MovePurpose::ToEngage]
        }
        // Support retreats when wounded, otherwise stays put.
        RoleStrategy::Support if hurting => &[MovePurpose::ToSafety],
        _ => return None,
    };

    wanted
        .iter()
        .find_map(|purpose| best_move_option(situation, *purpose))
        .map(|option| PlanStep::move_to(option.destination))
}

/// Picks the most promising move option for a purpose: options that leave
/// the best target reachable win, then fewer adjacent enemies.
fn best_move_option(situation: &Situation, purpose: MovePurpose) -> Option<&MoveOption> {
    situation
        .move_options
        .iter()
        .filter(|o| o.purpose == purpose)
        .min_by(|a, b| {
            let rank =
                |o: &MoveOption| (!o.target_reachable_after as u32, o.nearby_enemies_after);
            rank(a).cmp(&rank(b))
        })
}

/// Strategy-dependent standard-action step.
fn standard_step(situation: &Situation, strategy: RoleStrategy) -> Option<PlanStep> {
    if !situation.me.economy.standard {
        return None;
    }

    if strategy == RoleStrategy::Support {
        if let Some(step) = support_step(situation) {
            return Some(step);
        }
    }

    offensive_step(situation)
}

/// Support priority: heal the most wounded friendly below the emergency
/// threshold, else hand out a missing buff, else fall through to offense.
fn support_step(situation: &Situation) -> Option<PlanStep> {
    let weights = PhaseRoleWeights::resolve(situation.phase, situation.me.role);

    if let Some(heal) = situation.heals.first() {
        let own = (situation.me.id, situation.me.hp_fraction());
        let most_wounded = situation
            .allies
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| (a.id, a.hp_fraction))
            .chain(std::iter::once(own))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((target, fraction)) = most_wounded {
            if fraction < weights.emergency_heal_threshold {
                return Some(PlanStep::heal(heal.id, target));
            }
        }
    }

    let unbuffed_ally = situation
        .allies
        .iter()
        .filter(|a| a.is_alive())
        .find_map(|ally| {
            situation
                .buffs
                .iter()
                .find(|b| !b.tags.swift_action && !ally.buffs.has(b.id))
                .map(|b| (b.id, ally.id))
        });
    unbuffed_ally.map(|(ability, target)| PlanStep::swift_buff(ability, target).standard_cast())
}

/// Best (ability, enemy) pair under the flat offensive heuristic, with the
/// basic attack on the best target as the floor.
fn offensive_step(situation: &Situation) -> Option<PlanStep> {
    let mut best: Option<(f64, PlanStep)> = None;
    let mut consider = |score: f64, step: PlanStep| {
        if best.as_ref().is_none_or(|(s, _)| score > *s) {
            best = Some((score, step));
        }
    };

    for enemy in situation.living_enemies() {
        if enemy.hittable {
            consider(0.0, PlanStep::attack(None, enemy.id));
        }
        for ability in situation.attacks.iter().chain(&situation.debuffs) {
            if let Some(score) = offensive_score(ability, enemy, situation) {
                let step = match ability.tags.timing {
                    crate::ability::TimingKind::Debuff => PlanStep::debuff(ability.id, enemy.id),
                    _ => PlanStep::attack(Some(ability.id), enemy.id),
                };
                consider(score, step);
            }
        }
    }

    best.map(|(_, step)| step)
}

/// Flat heuristic grading one offensive ability against one enemy.
/// Returns `None` when the pairing is outright invalid.
fn offensive_score(ability: &Ability, enemy: &EnemyInfo, situation: &Situation) -> Option<f64> {
    if !enemy.hittable {
        return None;
    }
    if ability.tags.mind_affecting && enemy.immune_mind_affecting {
        return None;
    }

    let tags = &ability.tags;
    let mut score = f64::from(tags.spell_level) * SPELL_LEVEL_WEIGHT;
    if tags.expected_damage > 0.0 {
        score += DAMAGE_FLAG_BONUS;
    }
    if tags.is_aoe() && situation.enemies_within(enemy.id, tags.aoe_radius) > 1 {
        score += AOE_FLAG_BONUS;
    }
    score += normalize::hit_chance(tags.attack_bonus, enemy.defense) * HIT_CHANCE_WEIGHT;
    if enemy.hp_fraction < LOW_HP_TARGET_THRESHOLD {
        score += LOW_HP_TARGET_BONUS;
    }
    if tags.save != SaveKind::None && tags.save == enemy.weakest_save {
        score += WEAK_SAVE_BONUS;
    }
    if tags.is_cantrip() && !tags.free_to_use {
        score -= CANTRIP_PENALTY;
    }

    // Team focus pulls the choice toward the agreed target.
    if situation.team.focus_target == Some(enemy.id) {
        score += 1.0;
    }

    Some(score)
}

impl PlanStep {
    /// Reissues a swift-slotted buff step as a standard action.
    fn standard_cast(mut self) -> Self {
        self.cost = crate::plan::step::StepCost::Standard;
        self
    }
}
