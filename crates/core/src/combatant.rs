use std::fmt;

/// Unique identifier for any combatant tracked during an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Continuous world position expressed in engine distance units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Tactical archetype assigned to a combatant.
///
/// The role retunes which action types are favored: the phase×role weight
/// matrix and the per-type role-fit considerations both key off this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Dps,
    Tank,
    Support,
}

/// Which side a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Faction {
    Player,
    Hostile,
    Neutral,
}

/// Per-turn action-economy flags.
///
/// The host resolves the actual action system (standard/move/swift slots);
/// the core only needs to know which slots are still free this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEconomy {
    pub standard: bool,
    pub move_action: bool,
    pub swift: bool,
    pub moved_this_turn: bool,
}

impl ActionEconomy {
    /// A fresh turn with every slot still available.
    pub fn fresh() -> Self {
        Self {
            standard: true,
            move_action: true,
            swift: true,
            moved_this_turn: false,
        }
    }

    /// True once every slot this turn is spent.
    pub fn exhausted(&self) -> bool {
        !self.standard && !self.move_action && !self.swift
    }
}

impl Default for ActionEconomy {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Health meter tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthMeter {
    pub current: f64,
    pub maximum: f64,
}

impl HealthMeter {
    pub fn new(current: f64, maximum: f64) -> Self {
        Self { current, maximum }
    }

    /// Current HP as a fraction of maximum, clamped to [0, 1].
    ///
    /// A zero-maximum meter reads as empty rather than dividing by zero.
    pub fn fraction(&self) -> f64 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        (self.current / self.maximum).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}

/// The deciding combatant's own facts, as resolved by the host.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub health: HealthMeter,
    pub position: Position,
    pub faction: Faction,
    pub role: Role,
    pub economy: ActionEconomy,
}

impl Combatant {
    pub fn hp_fraction(&self) -> f64 {
        self.health.fraction()
    }
}
