//! Phase × role weight matrix.
//!
//! Each (combat phase, role) pair defines per-action-type fit values used
//! as the PhaseFit consideration, a kill-bonus weight, a resource
//! conservation factor, and an emergency-heal threshold. The values are
//! tuned table data, not derived; treat them as content.

use crate::combatant::Role;
use crate::situation::CombatPhase;

/// Weight bundle for one (phase, role) combination.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseRoleWeights {
    /// Per-type phase-fit values in (0, 1], consumed as considerations.
    pub attack_fit: f64,
    pub buff_fit: f64,
    pub heal_fit: f64,
    pub debuff_fit: f64,
    pub move_fit: f64,
    /// Multiplier on the kill-potential bonus lane.
    pub kill_bonus_weight: f64,
    /// Resource conservation in [0, 1]; 1.0 hoards slots, 0.0 spends freely.
    pub resource_conservation: f64,
    /// Ally HP fraction below which healing counts as an emergency and
    /// conservation is relaxed.
    pub emergency_heal_threshold: f64,
}

/// Fallback for combinations missing from the table: midgame DPS.
const MIDGAME_DPS: PhaseRoleWeights = PhaseRoleWeights {
    attack_fit: 0.9,
    buff_fit: 0.4,
    heal_fit: 0.4,
    debuff_fit: 0.6,
    move_fit: 0.5,
    kill_bonus_weight: 1.0,
    resource_conservation: 0.5,
    emergency_heal_threshold: 0.25,
};

/// The full tuned table. Rows are (phase, role) → weights.
const TABLE: &[((CombatPhase, Role), PhaseRoleWeights)] = &[
    // ===== Opening: set up, conserve, land control early =====
    (
        (CombatPhase::Opening, Role::Dps),
        PhaseRoleWeights {
            attack_fit: 0.8,
            buff_fit: 0.7,
            heal_fit: 0.3,
            debuff_fit: 0.7,
            move_fit: 0.6,
            kill_bonus_weight: 0.8,
            resource_conservation: 0.7,
            emergency_heal_threshold: 0.2,
        },
    ),
    (
        (CombatPhase::Opening, Role::Tank),
        PhaseRoleWeights {
            attack_fit: 0.6,
            buff_fit: 0.7,
            heal_fit: 0.3,
            debuff_fit: 0.6,
            move_fit: 0.8,
            kill_bonus_weight: 0.5,
            resource_conservation: 0.7,
            emergency_heal_threshold: 0.2,
        },
    ),
    (
        (CombatPhase::Opening, Role::Support),
        PhaseRoleWeights {
            attack_fit: 0.4,
            buff_fit: 0.9,
            heal_fit: 0.5,
            debuff_fit: 0.8,
            move_fit: 0.5,
            kill_bonus_weight: 0.4,
            resource_conservation: 0.6,
            emergency_heal_threshold: 0.3,
        },
    ),
    // ===== Midgame: sustained trading =====
    ((CombatPhase::Midgame, Role::Dps), MIDGAME_DPS),
    (
        (CombatPhase::Midgame, Role::Tank),
        PhaseRoleWeights {
            attack_fit: 0.7,
            buff_fit: 0.4,
            heal_fit: 0.4,
            debuff_fit: 0.6,
            move_fit: 0.6,
            kill_bonus_weight: 0.7,
            resource_conservation: 0.5,
            emergency_heal_threshold: 0.25,
        },
    ),
    (
        (CombatPhase::Midgame, Role::Support),
        PhaseRoleWeights {
            attack_fit: 0.5,
            buff_fit: 0.7,
            heal_fit: 0.9,
            debuff_fit: 0.7,
            move_fit: 0.5,
            kill_bonus_weight: 0.5,
            resource_conservation: 0.5,
            emergency_heal_threshold: 0.35,
        },
    ),
    // ===== Cleanup: fight is won, finish cheaply =====
    (
        (CombatPhase::Cleanup, Role::Dps),
        PhaseRoleWeights {
            attack_fit: 1.0,
            buff_fit: 0.2,
            heal_fit: 0.3,
            debuff_fit: 0.3,
            move_fit: 0.5,
            kill_bonus_weight: 1.2,
            resource_conservation: 0.9,
            emergency_heal_threshold: 0.15,
        },
    ),
    (
        (CombatPhase::Cleanup, Role::Tank),
        PhaseRoleWeights {
            attack_fit: 0.9,
            buff_fit: 0.2,
            heal_fit: 0.3,
            debuff_fit: 0.3,
            move_fit: 0.5,
            kill_bonus_weight: 1.0,
            resource_conservation: 0.9,
            emergency_heal_threshold: 0.15,
        },
    ),
    (
        (CombatPhase::Cleanup, Role::Support),
        PhaseRoleWeights {
            attack_fit: 0.7,
            buff_fit: 0.2,
            heal_fit: 0.6,
            debuff_fit: 0.3,
            move_fit: 0.4,
            kill_bonus_weight: 0.8,
            resource_conservation: 0.9,
            emergency_heal_threshold: 0.2,
        },
    ),
    // ===== Desperate: spend everything, stop the bleeding =====
    (
        (CombatPhase::Desperate, Role::Dps),
        PhaseRoleWeights {
            attack_fit: 0.9,
            buff_fit: 0.3,
            heal_fit: 0.7,
            debuff_fit: 0.8,
            move_fit: 0.7,
            kill_bonus_weight: 1.3,
            resource_conservation: 0.1,
            emergency_heal_threshold: 0.4,
        },
    ),
    (
        (CombatPhase::Desperate, Role::Tank),
        PhaseRoleWeights {
            attack_fit: 0.7,
            buff_fit: 0.3,
            heal_fit: 0.8,
            debuff_fit: 0.8,
            move_fit: 0.6,
            kill_bonus_weight: 1.0,
            resource_conservation: 0.1,
            emergency_heal_threshold: 0.4,
        },
    ),
    (
        (CombatPhase::Desperate, Role::Support),
        PhaseRoleWeights {
            attack_fit: 0.4,
            buff_fit: 0.3,
            heal_fit: 1.0,
            debuff_fit: 0.9,
            move_fit: 0.6,
            kill_bonus_weight: 0.6,
            resource_conservation: 0.1,
            emergency_heal_threshold: 0.5,
        },
    ),
];

impl PhaseRoleWeights {
    /// Resolves the weight bundle for a (phase, role) pair, falling back to
    /// midgame DPS for any combination missing from the table.
    pub fn resolve(phase: CombatPhase, role: Role) -> PhaseRoleWeights {
        TABLE
            .iter()
            .find(|((p, r), _)| *p == phase && *r == role)
            .map(|(_, w)| *w)
            .unwrap_or(MIDGAME_DPS)
    }
}
