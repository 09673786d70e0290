//! Plan and step validation against a fresh situation.
//!
//! Plans are forecasts; the world moves underneath them. Each tick the
//! controller revalidates the active plan against the newest snapshot and
//! asks for a bounded replan when the drift is large enough to change the
//! right answer. Thresholds come from [`TuningConfig`].

use crate::config::TuningConfig;
use crate::plan::plan::TurnPlan;
use crate::plan::step::{PlanStep, StepCost};
use crate::scoring::candidate::ActionKind;
use crate::situation::Situation;

/// Why a plan no longer matches reality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DriftReason {
    /// The plan's primary target died.
    TargetDead,
    /// Every enemy died while the plan still intended to act.
    AllEnemiesDead,
    /// Own HP dropped past the configured threshold since planning.
    OwnHpDropped,
    /// The living-enemy count shifted past the configured delta.
    EnemyCountChanged,
    /// The combatant was displaced from its planning position.
    PositionDrifted,
    /// The current step's ability is no longer available.
    AbilityUnavailable,
}

/// Why the current step, specifically, cannot run right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StepRejection {
    /// The step's action-economy slot is already spent this turn.
    SlotSpent,
    /// The step's target is dead or gone.
    TargetGone,
    /// The step's ability is not in the available set.
    AbilityUnavailable,
}

pub struct PlanValidator;

impl PlanValidator {
    /// Checks the whole plan against the current situation. Returns the
    /// first drift reason found, or `None` when the plan still holds.
    pub fn validate_plan(
        plan: &TurnPlan,
        situation: &Situation,
        cfg: &TuningConfig,
    ) -> Option<DriftReason> {
        let snapshot = &plan.snapshot;

        if let Some((target, _)) = snapshot.target {
            let alive = situation.enemy(target).is_some_and(|e| e.is_alive());
            if !alive {
                return Some(DriftReason::TargetDead);
            }
        }

        if situation.living_enemy_count() == 0 && !plan.is_ending_turn() {
            return Some(DriftReason::AllEnemiesDead);
        }

        let hp_drop = snapshot.own_hp_fraction - situation.me.hp_fraction();
        if hp_drop >= cfg.hp_drop_drift {
            return Some(DriftReason::OwnHpDropped);
        }

        let enemy_delta = (situation.living_enemy_count() as i64
            - i64::from(snapshot.enemy_count))
        .unsigned_abs() as u32;
        if enemy_delta >= cfg.enemy_count_drift {
            return Some(DriftReason::EnemyCountChanged);
        }

        let displacement = situation.me.position.distance_to(snapshot.own_position);
        if displacement >= cfg.position_drift {
            return Some(DriftReason::PositionDrifted);
        }

        if let Some(step) = plan.current_step() {
            if let Some(ability) = step.ability {
                if situation.ability(ability).is_none() {
                    return Some(DriftReason::AbilityUnavailable);
                }
            }
        }

        None
    }

    /// Checks the single step about to execute. A rejected step is skipped
    /// rather than triggering a full replan.
    pub fn validate_step(step: &PlanStep, situation: &Situation) -> Result<(), StepRejection> {
        let economy = situation.me.economy;
        let slot_free = match step.cost {
            StepCost::Standard => economy.standard,
            StepCost::Move => economy.move_action,
            StepCost::Swift => economy.swift,
            StepCost::Free => true,
        };
        if !slot_free {
            return Err(StepRejection::SlotSpent);
        }

        if let Some(target) = step.target {
            let alive = if step.kind == ActionKind::Heal || step.kind == ActionKind::Buff {
                target == situation.me.id
                    || situation.ally(target).is_some_and(|a| a.is_alive())
            } else {
                situation.enemy(target).is_some_and(|e| e.is_alive())
            };
            if !alive {
                return Err(StepRejection::TargetGone);
            }
        }

        if let Some(ability) = step.ability {
            if situation.ability(ability).is_none() {
                return Err(StepRejection::AbilityUnavailable);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityId, SaveKind};
    use crate::combatant::{
        ActionEconomy, Combatant, CombatantId, Faction, HealthMeter, Position, Role,
    };
    use crate::plan::plan::PlanSnapshot;
    use crate::situation::{
        BuffState, CombatPhase, EnemyInfo, RangePreference, TeamSignals,
    };

    fn enemy(id: u32, hp: f64) -> EnemyInfo {
        EnemyInfo {
            id: CombatantId(id),
            hp_fraction: hp,
            max_hp: 100.0,
            position: Position::new(3.0, 0.0),
            distance: 3.0,
            threat: 0.5,
            defense: 10.0,
            weakest_save: SaveKind::Will,
            immune_mind_affecting: false,
            active_debuffs: Vec::new(),
            engaged: false,
            is_caster: false,
            hittable: true,
        }
    }

    fn situation(own_hp: f64) -> Situation {
        Situation {
            me: Combatant {
                id: CombatantId(0),
                health: HealthMeter::new(own_hp * 100.0, 100.0),
                position: Position::ORIGIN,
                faction: Faction::Player,
                role: Role::Dps,
                economy: ActionEconomy::fresh(),
            },
            phase: CombatPhase::Midgame,
            range_preference: RangePreference::Melee,
            round: 2,
            enemies: vec![enemy(1, 0.8)],
            allies: Vec::new(),
            best_target: Some(CombatantId(1)),
            attacks: Vec::new(),
            heals: Vec::new(),
            buffs: Vec::new(),
            debuffs: Vec::new(),
            move_options: Vec::new(),
            my_buffs: BuffState::default(),
            team: TeamSignals::default(),
        }
    }

    fn plan_against(sit: &Situation) -> TurnPlan {
        TurnPlan::new(
            sit.me.id,
            vec![
                PlanStep::attack(None, CombatantId(1)),
                PlanStep::end_turn(),
            ],
            PlanSnapshot::capture(sit),
        )
    }

    #[test]
    fn steady_state_passes_validation() {
        let sit = situation(0.8);
        let plan = plan_against(&sit);
        let cfg = TuningConfig::default();
        assert_eq!(PlanValidator::validate_plan(&plan, &sit, &cfg), None);
    }

    #[test]
    fn twenty_five_point_hp_drop_reads_as_drift() {
        let sit = situation(0.80);
        let plan = plan_against(&sit);
        let cfg = TuningConfig::default();
        let after = situation(0.55);
        assert_eq!(
            PlanValidator::validate_plan(&plan, &after, &cfg),
            Some(DriftReason::OwnHpDropped),
        );
    }

    #[test]
    fn dead_target_reads_as_drift() {
        let sit = situation(0.8);
        let plan = plan_against(&sit);
        let cfg = TuningConfig::default();
        let mut after = situation(0.8);
        after.enemies[0].hp_fraction = 0.0;
        assert_eq!(
            PlanValidator::validate_plan(&plan, &after, &cfg),
            Some(DriftReason::TargetDead),
        );
    }

    #[test]
    fn displacement_past_threshold_reads_as_drift() {
        let sit = situation(0.8);
        let plan = plan_against(&sit);
        let cfg = TuningConfig::default();
        let mut after = situation(0.8);
        after.me.position = Position::new(6.0, 0.0);
        assert_eq!(
            PlanValidator::validate_plan(&plan, &after, &cfg),
            Some(DriftReason::PositionDrifted),
        );
    }

    #[test]
    fn spent_slot_rejects_the_step() {
        let mut sit = situation(0.8);
        sit.me.economy.standard = false;
        let step = PlanStep::attack(None, CombatantId(1));
        assert_eq!(
            PlanValidator::validate_step(&step, &sit),
            Err(StepRejection::SlotSpent),
        );
    }
}
