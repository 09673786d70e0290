use crate::scoring::consideration::Aggregation;

/// Tunable decision parameters.
///
/// Every value here is an empirically tuned constant, not an invariant:
/// the blend scale between the geometric mean and the additive bonus lane,
/// the drift thresholds, and the retry budgets were all hand-tuned in play
/// testing and are exposed as configuration so hosts can retune them from
/// data files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TuningConfig {
    /// Scale applied to the geometric mean before the additive lanes are
    /// mixed in: `gm * utility_scale + bonus + priority`.
    pub utility_scale: f64,
    /// Flat bonus for repeating the previous (kind, ability, target) choice,
    /// suppressing oscillation between near-tied candidates.
    pub hysteresis_bonus: f64,
    /// How consideration sets fold their factors. Geometric by default.
    pub aggregation: Aggregation,

    // ===== drift thresholds (plan invalidation) =====
    /// Own-HP drop, in fraction-of-max points, that invalidates a plan.
    pub hp_drop_drift: f64,
    /// Own-position displacement, in distance units, that invalidates a plan.
    pub position_drift: f32,
    /// Absolute change in living-enemy count that invalidates a plan.
    pub enemy_count_drift: u32,

    // ===== budgets =====
    /// Replans allowed per plan; beyond this the plan runs to exhaustion
    /// even if stale.
    pub max_replans: u32,
    /// Attempts per step before it is marked failed and skipped over.
    pub max_step_attempts: u32,
    /// Steps executed per turn before the turn is forcibly ended.
    pub max_steps_per_turn: u32,
    /// Consecutive step failures before the turn is forcibly ended.
    pub max_consecutive_failures: u32,
    /// Decision ticks spent waiting on action issuance before giving up.
    pub max_wait_ticks: u32,
}

impl TuningConfig {
    pub const DEFAULT_UTILITY_SCALE: f64 = 100.0;
    pub const DEFAULT_HYSTERESIS_BONUS: f64 = 5.0;
    pub const DEFAULT_HP_DROP_DRIFT: f64 = 0.20;
    pub const DEFAULT_POSITION_DRIFT: f32 = 5.0;
    pub const DEFAULT_ENEMY_COUNT_DRIFT: u32 = 2;
    pub const DEFAULT_MAX_REPLANS: u32 = 3;
    pub const DEFAULT_MAX_STEP_ATTEMPTS: u32 = 3;
    pub const DEFAULT_MAX_STEPS_PER_TURN: u32 = 10;
    pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 5;
    pub const DEFAULT_MAX_WAIT_TICKS: u32 = 20;

    pub fn new() -> Self {
        Self {
            utility_scale: Self::DEFAULT_UTILITY_SCALE,
            hysteresis_bonus: Self::DEFAULT_HYSTERESIS_BONUS,
            aggregation: Aggregation::Geometric,
            hp_drop_drift: Self::DEFAULT_HP_DROP_DRIFT,
            position_drift: Self::DEFAULT_POSITION_DRIFT,
            enemy_count_drift: Self::DEFAULT_ENEMY_COUNT_DRIFT,
            max_replans: Self::DEFAULT_MAX_REPLANS,
            max_step_attempts: Self::DEFAULT_MAX_STEP_ATTEMPTS,
            max_steps_per_turn: Self::DEFAULT_MAX_STEPS_PER_TURN,
            max_consecutive_failures: Self::DEFAULT_MAX_CONSECUTIVE_FAILURES,
            max_wait_ticks: Self::DEFAULT_MAX_WAIT_TICKS,
        }
    }
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self::new()
    }
}
