//! Read-only per-decision snapshot of the combat state.
//!
//! A [`Situation`] is rebuilt by the host's situation provider every decision
//! cycle and discarded afterwards. All spatial queries (distances, reachable
//! destinations, line of sight) and semantic classification (ability tags,
//! immunities, weakest saves) are already resolved by the time a situation
//! reaches the core; scorers consume only scalars and booleans from it.
//!
//! The core never mutates a situation and owns no cache over it: "compute
//! enemy/ally facts at most once per tick" is the provider's job.

use crate::ability::{Ability, AbilityId, SaveKind};
use crate::combatant::{Combatant, CombatantId, Position, Role};

/// Coarse classification of combat progress, resolved externally from round
/// number, HP, and enemy count. Each phase retunes the weight matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatPhase {
    Opening,
    Midgame,
    Cleanup,
    Desperate,
}

/// Whether the deciding combatant prefers to fight at reach or at range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RangePreference {
    Melee,
    Ranged,
}

/// Host-resolved facts about one enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyInfo {
    pub id: CombatantId,
    /// Current HP as a fraction of maximum.
    pub hp_fraction: f64,
    pub max_hp: f64,
    pub position: Position,
    /// Distance from the deciding combatant, in engine units.
    pub distance: f32,
    /// Normalized [0, 1] threat estimate (damage output, priority).
    pub threat: f64,
    /// Abstract defense score compared against ability attack bonuses.
    pub defense: f64,
    pub weakest_save: SaveKind,
    pub immune_mind_affecting: bool,
    /// Debuffs currently active on this enemy, by ability id.
    pub active_debuffs: Vec<AbilityId>,
    /// True when this enemy is locked in melee with one of our allies.
    pub engaged: bool,
    pub is_caster: bool,
    /// Line of sight / targetability already resolved by the host.
    pub hittable: bool,
}

impl EnemyInfo {
    pub fn is_alive(&self) -> bool {
        self.hp_fraction > 0.0
    }

    pub fn has_debuff(&self, ability: AbilityId) -> bool {
        self.active_debuffs.contains(&ability)
    }

    /// Absolute remaining HP, for damage-ratio math.
    pub fn remaining_hp(&self) -> f64 {
        self.hp_fraction.clamp(0.0, 1.0) * self.max_hp
    }
}

/// Buffs currently active on a friendly combatant.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffState {
    pub active: Vec<AbilityId>,
    /// Total stacked buff count, for diminishing-returns scoring.
    pub stacks: u32,
}

impl BuffState {
    pub fn has(&self, ability: AbilityId) -> bool {
        self.active.contains(&ability)
    }
}

/// Host-resolved facts about one ally.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllyInfo {
    pub id: CombatantId,
    pub hp_fraction: f64,
    pub max_hp: f64,
    pub distance: f32,
    pub role: Role,
    pub buffs: BuffState,
}

impl AllyInfo {
    pub fn is_alive(&self) -> bool {
        self.hp_fraction > 0.0
    }
}

/// Why a movement destination was proposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MovePurpose {
    /// Close to (or open up) attack range on the best target.
    ToAttack,
    /// Disengage toward a safer position.
    ToSafety,
    /// Close the gap when no target is currently reachable.
    ToEngage,
}

/// One host-resolved movement destination.
///
/// The geometry/targeting service has already checked walkability and
/// computed the post-move facts the movement scorer needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOption {
    pub destination: Position,
    pub purpose: MovePurpose,
    /// Distance to the best target after moving here.
    pub distance_to_target_after: f32,
    /// Enemies within melee reach of the destination.
    pub nearby_enemies_after: u32,
    /// True if the best target would be attackable from the destination.
    pub target_reachable_after: bool,
}

/// Team-level signals aggregated by the shared blackboard.
///
/// The blackboard is external and never written by this core; its outputs
/// feed back in here as additional situation inputs.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamSignals {
    /// Target the team has agreed to focus, if any.
    pub focus_target: Option<CombatantId>,
}

/// Read-only per-decision snapshot for one combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Situation {
    pub me: Combatant,
    pub phase: CombatPhase,
    pub range_preference: RangePreference,
    pub round: u32,
    pub enemies: Vec<EnemyInfo>,
    pub allies: Vec<AllyInfo>,
    /// Host-suggested primary target, if one stands out.
    pub best_target: Option<CombatantId>,
    /// Available abilities, already categorized by the classifier.
    pub attacks: Vec<Ability>,
    pub heals: Vec<Ability>,
    pub buffs: Vec<Ability>,
    pub debuffs: Vec<Ability>,
    /// Candidate movement destinations resolved by the geometry service.
    pub move_options: Vec<MoveOption>,
    pub my_buffs: BuffState,
    pub team: TeamSignals,
}

impl Situation {
    pub fn enemy(&self, id: CombatantId) -> Option<&EnemyInfo> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn ally(&self, id: CombatantId) -> Option<&AllyInfo> {
        self.allies.iter().find(|a| a.id == id)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &EnemyInfo> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    pub fn living_enemy_count(&self) -> usize {
        self.living_enemies().count()
    }

    /// Enemies currently locked in melee with allies.
    pub fn engaged_enemy_count(&self) -> usize {
        self.living_enemies().filter(|e| e.engaged).count()
    }

    /// The best target's resolved facts, when one is set and still alive.
    pub fn best_target_info(&self) -> Option<&EnemyInfo> {
        self.best_target
            .and_then(|id| self.enemy(id))
            .filter(|e| e.is_alive())
    }

    /// Looks an ability up across every category list.
    pub fn ability(&self, id: AbilityId) -> Option<&Ability> {
        self.attacks
            .iter()
            .chain(&self.heals)
            .chain(&self.buffs)
            .chain(&self.debuffs)
            .find(|a| a.id == id)
    }

    /// True when at least one living enemy is attackable from where the
    /// combatant stands, with any available attack.
    pub fn has_reachable_target(&self) -> bool {
        self.living_enemies().any(|enemy| {
            enemy.hittable
                && self
                    .attacks
                    .iter()
                    .any(|a| f64::from(enemy.distance) <= f64::from(a.tags.range))
        })
    }

    /// Counts living enemies within `radius` of the given enemy, including
    /// that enemy itself. Used for AoE opportunity bonuses.
    pub fn enemies_within(&self, center: CombatantId, radius: f32) -> usize {
        let Some(center_info) = self.enemy(center) else {
            return 0;
        };
        self.living_enemies()
            .filter(|e| e.position.distance_to(center_info.position) <= radius)
            .count()
    }
}
