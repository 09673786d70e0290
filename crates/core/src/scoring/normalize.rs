//! Normalization library: pure functions mapping raw combat facts into
//! [0, 1] consideration scores or unbounded bonus values.
//!
//! Everything here is a total function over plain scalars so curves can be
//! unit-tested in isolation and reused across scorers. Functions returning
//! consideration inputs stay inside [0, 1]; the bonus-lane curves
//! ([`kill_potential`]) are deliberately unbounded above.

use crate::ability::{ChargeProfile, SaveKind};

/// Clamps into the unit interval.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// How badly a target needs healing, from its HP fraction.
///
/// Piecewise: full urgency at or below 25% HP, a steep ramp through the
/// midrange, and a gentle tail above 50%. Floored at 0.05 so overheal
/// never vetoes a heal candidate outright; the separate no-overheal
/// consideration handles waste instead.
pub fn heal_need(hp_fraction: f64) -> f64 {
    let hp = clamp01(hp_fraction);
    let need = if hp <= 0.25 {
        1.0
    } else if hp <= 0.5 {
        // 1.0 at 25%, 0.5 at 50%
        1.0 - (hp - 0.25) * 2.0
    } else {
        // 0.5 at 50%, tapering toward the floor at full HP
        0.5 - (hp - 0.5) * 0.9
    };
    need.max(0.05)
}

/// How wasteful a heal would be: expected healing versus missing HP.
///
/// Fully efficient heals score 1.0; a heal that would mostly overshoot is
/// down-weighted but floored so it stays selectable in a pinch.
pub fn overheal_efficiency(expected_heal: f64, missing_hp: f64) -> f64 {
    if expected_heal <= 0.0 {
        return 1.0;
    }
    clamp01(missing_hp / expected_heal).max(0.2)
}

/// Value of attacking a target, combining remaining HP and threat.
///
/// Wounded, dangerous targets score highest: finishing them removes the
/// most incoming damage per point of our damage spent.
pub fn target_value(hp_fraction: f64, threat: f64) -> f64 {
    let wounded = 1.0 - clamp01(hp_fraction) * 0.6;
    clamp01(wounded * 0.5 + clamp01(threat) * 0.5)
}

/// Graded closeness for melee attacks: 1.0 in reach, falling off with the
/// gap that still has to be closed.
pub fn melee_distance(distance: f32) -> f64 {
    let d = f64::from(distance.max(0.0));
    if d <= 1.5 {
        1.0
    } else {
        clamp01(1.0 - (d - 1.5) / 8.0).max(0.1)
    }
}

/// Resource conservation score for casting a leveled ability.
///
/// Free and at-will abilities always score 1.0. Otherwise the cost rises
/// with spell level, scaled by the phase/role conservation factor, floored
/// so resource pressure alone never vetoes.
pub fn resource_score(spell_level: u8, conservation: f64, free_to_use: bool) -> f64 {
    if free_to_use || spell_level == 0 {
        return 1.0;
    }
    let cost = f64::from(spell_level) / 9.0;
    clamp01(1.0 - clamp01(conservation) * cost).max(0.1)
}

/// Estimated chance to hit from attack bonus versus target defense,
/// clamped into [0.05, 0.95] (a natural 1/20 always exists).
pub fn hit_chance(attack_bonus: f64, defense: f64) -> f64 {
    (0.5 + (attack_bonus - defense) / 20.0).clamp(0.05, 0.95)
}

/// Kill-potential bonus from the damage / remaining-HP ratio.
///
/// Non-linear by design: no bonus below a 0.5 ratio, a linear ramp to 10
/// between 0.5 and 0.75, a quadratic ramp to 40 between 0.75 and 1.0 (a
/// likely kill is worth far more than a probable chunk), and a small linear
/// excess above 1.0 so modest overkill still breaks ties toward the kill.
pub fn kill_potential(expected_damage: f64, remaining_hp: f64) -> f64 {
    if remaining_hp <= 0.0 || expected_damage <= 0.0 {
        return 0.0;
    }
    let ratio = expected_damage / remaining_hp;
    if ratio < 0.5 {
        0.0
    } else if ratio < 0.75 {
        (ratio - 0.5) / 0.25 * 10.0
    } else if ratio < 1.0 {
        let t = (ratio - 0.75) / 0.25;
        10.0 + t * t * 30.0
    } else {
        40.0 + (ratio - 1.0) * 2.0
    }
}

/// Charge viability: zero below the minimum run-up, grading up to 1.0 at
/// the optimal distance and decaying gently past it.
pub fn charge_fit(distance: f32, profile: ChargeProfile) -> f64 {
    let d = f64::from(distance);
    let min = f64::from(profile.min_distance);
    let optimal = f64::from(profile.optimal_distance.max(profile.min_distance));
    if d < min {
        return 0.0;
    }
    if d <= optimal {
        if optimal <= min {
            return 1.0;
        }
        // Ramp from 0.5 at the minimum to 1.0 at the optimum
        0.5 + 0.5 * (d - min) / (optimal - min)
    } else {
        clamp01(1.0 - (d - optimal) / (optimal * 2.0)).max(0.3)
    }
}

/// Diminishing returns on stacking buffs, floored at 0.25.
pub fn buff_stack_value(active_stacks: u32) -> f64 {
    (1.0 / f64::from(active_stacks + 1)).max(0.25)
}

/// Safety of a destination from the number of enemies in reach of it.
///
/// Ranged combatants want zero; melee combatants fight in reach of
/// something, so for them the curve peaks at one adjacent enemy and only
/// degrades when they would be swarmed.
pub fn position_safety(nearby_enemies: u32, melee: bool) -> f64 {
    if melee {
        match nearby_enemies {
            0 => 0.6,
            1 => 1.0,
            2 => 0.8,
            3 => 0.5,
            _ => 0.3,
        }
    } else {
        match nearby_enemies {
            0 => 1.0,
            1 => 0.5,
            2 => 0.25,
            _ => 0.1,
        }
    }
}

/// How much a move improves distance to the best target, given a range
/// preference. Melee wants the gap closed; ranged wants a comfortable band
/// around `preferred`, neither point-blank nor out of reach.
pub fn distance_improvement(current: f32, after: f32, preferred: f32, melee: bool) -> f64 {
    let current = f64::from(current);
    let after = f64::from(after);
    if melee {
        if after >= current {
            return if after <= 1.5 { 1.0 } else { 0.1 };
        }
        // Fraction of the gap closed
        clamp01((current - after) / current.max(1.0)).max(0.2)
    } else {
        let preferred = f64::from(preferred.max(1.0));
        let error = (after - preferred).abs() / preferred;
        clamp01(1.0 - error)
    }
}

/// Reward for aiming an effect at the target's weakest save.
///
/// A saveless ability is neutral; matching the weak save is ideal; forcing
/// a strong save is still usable but discounted.
pub fn save_match(ability_save: SaveKind, weakest_save: SaveKind) -> f64 {
    match (ability_save, weakest_save) {
        (SaveKind::None, _) => 0.7,
        (a, w) if a == w => 1.0,
        _ => 0.4,
    }
}
