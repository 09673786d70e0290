//! Ability facts as resolved by the external classifier.
//!
//! The core never inspects raw ability internals: the host's ability/effect
//! classifier maps each raw ability into an [`AbilityTags`] value up front,
//! and every scorer works purely from those tags. In particular, mechanical
//! subtypes such as charge attacks arrive as explicit tags
//! ([`ChargeProfile`]) rather than being sniffed out of display text.

use std::fmt;

/// Unique identifier for a classified ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u32);

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability#{}", self.0)
    }
}

/// Timing category the classifier assigns to an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TimingKind {
    Attack,
    Buff,
    Heal,
    Debuff,
    /// A buff that stays active until dispelled; duplicates are vetoed.
    PermanentBuff,
}

/// Saving throw an ability forces, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SaveKind {
    #[default]
    None,
    Fortitude,
    Reflex,
    Will,
}

/// Crowd-control class of a debuff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CcKind {
    #[default]
    None,
    /// Slows, weakens, or hampers without removing the target's turn.
    Soft,
    /// Removes the target's turn entirely (stun, paralysis, sleep).
    Hard,
}

/// Explicit mechanical tag for charge-style attacks.
///
/// Below `min_distance` the charge cannot be performed at all; scoring
/// grades distance toward `optimal_distance`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeProfile {
    pub min_distance: f32,
    pub optimal_distance: f32,
}

/// Classifier-supplied descriptor of what a buff mechanically does.
///
/// `combat_value` is the classifier's [0, 1] estimate of direct combat
/// usefulness: AC/attack/damage bonuses sit near 1.0, pure utility effects
/// near 0.1, enchantments scale with `magnitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffEffect {
    pub combat_value: f64,
    pub magnitude: f64,
}

/// Full classification of one ability, as the core consumes it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityTags {
    pub timing: TimingKind,
    pub save: SaveKind,
    pub cc: CcKind,
    /// Area radius in distance units; 0 means single target.
    pub aoe_radius: f32,
    /// Spell slot level; 0 means cantrip / at-will.
    pub spell_level: u8,
    /// True for abilities with no resource cost at all.
    pub free_to_use: bool,
    /// True for abilities castable as a swift action.
    pub swift_action: bool,
    /// Maximum usable range in distance units.
    pub range: f32,
    pub mind_affecting: bool,
    pub charge: Option<ChargeProfile>,
    pub buff: Option<BuffEffect>,
    /// Classifier's expected damage (or healing, for heals) per use.
    pub expected_damage: f64,
    /// Flat to-hit bonus, compared against target defense for hit estimates.
    pub attack_bonus: f64,
}

impl AbilityTags {
    /// A neutral tag set useful as a starting point when building situations.
    pub fn new(timing: TimingKind) -> Self {
        Self {
            timing,
            save: SaveKind::None,
            cc: CcKind::None,
            aoe_radius: 0.0,
            spell_level: 0,
            free_to_use: false,
            swift_action: false,
            range: 1.5,
            mind_affecting: false,
            charge: None,
            buff: None,
            expected_damage: 0.0,
            attack_bonus: 0.0,
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.spell_level == 0
    }

    pub fn is_aoe(&self) -> bool {
        self.aoe_radius > 0.0
    }

    /// Melee-reach abilities are scored on closing distance rather than
    /// hard range vetoes.
    pub fn is_melee(&self) -> bool {
        self.range <= 2.0
    }
}

/// One classified ability available to the deciding combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub tags: AbilityTags,
}

impl Ability {
    pub fn new(id: AbilityId, tags: AbilityTags) -> Self {
        Self { id, tags }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melee_threshold() {
        let mut tags = AbilityTags::new(TimingKind::Attack);
        tags.range = 1.5;
        assert!(tags.is_melee());
        tags.range = 18.0;
        assert!(!tags.is_melee());
    }

    #[test]
    fn cantrip_and_aoe_flags() {
        let mut tags = AbilityTags::new(TimingKind::Attack);
        assert!(tags.is_cantrip());
        assert!(!tags.is_aoe());
        tags.spell_level = 3;
        tags.aoe_radius = 4.0;
        assert!(!tags.is_cantrip());
        assert!(tags.is_aoe());
    }
}
