use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the 18 elemental types.
///
/// Types are serialized in lowercase (`"fire"`, `"water"`, ...), which is the form
/// catalog files use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

/// Error returned when parsing an unknown type name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown element type: {name}")]
pub struct ParseElementTypeError {
    name: String,
}

impl ElementType {
    /// Number of elemental types.
    pub const LEN: usize = 18;

    /// All types in chart order.
    pub const ALL: [Self; Self::LEN] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Position of this type in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Electric => "electric",
            Self::Grass => "grass",
            Self::Ice => "ice",
            Self::Fighting => "fighting",
            Self::Poison => "poison",
            Self::Ground => "ground",
            Self::Flying => "flying",
            Self::Psychic => "psychic",
            Self::Bug => "bug",
            Self::Rock => "rock",
            Self::Ghost => "ghost",
            Self::Dragon => "dragon",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
        }
    }

    /// Damage multiplier of an attack of this type against a single defending type.
    ///
    /// Returns `2.0` (super effective), `0.5` (not very effective), `0.0` (no effect)
    /// or `1.0`.
    #[must_use]
    pub fn effectiveness_against(self, defender: Self) -> f64 {
        use ElementType::{
            Bug, Dark, Dragon, Electric, Fairy, Fighting, Fire, Flying, Ghost, Grass, Ground,
            Ice, Normal, Poison, Psychic, Rock, Steel, Water,
        };

        match (self, defender) {
            (Normal, Ghost)
            | (Electric, Ground)
            | (Fighting, Ghost)
            | (Poison, Steel)
            | (Ground, Flying)
            | (Psychic, Dark)
            | (Ghost, Normal)
            | (Dragon, Fairy) => 0.0,

            (Fire, Grass | Ice | Bug | Steel)
            | (Water, Fire | Ground | Rock)
            | (Electric, Water | Flying)
            | (Grass, Water | Ground | Rock)
            | (Ice, Grass | Ground | Flying | Dragon)
            | (Fighting, Normal | Ice | Rock | Dark | Steel)
            | (Poison, Grass | Fairy)
            | (Ground, Fire | Electric | Poison | Rock | Steel)
            | (Flying, Grass | Fighting | Bug)
            | (Psychic, Fighting | Poison)
            | (Bug, Grass | Psychic | Dark)
            | (Rock, Fire | Ice | Flying | Bug)
            | (Ghost, Psychic | Ghost)
            | (Dragon, Dragon)
            | (Dark, Psychic | Ghost)
            | (Steel, Ice | Rock | Fairy)
            | (Fairy, Fighting | Dragon | Dark) => 2.0,

            (Normal, Rock | Steel)
            | (Fire, Fire | Water | Rock | Dragon)
            | (Water, Water | Grass | Dragon)
            | (Electric, Electric | Grass | Dragon)
            | (Grass, Fire | Grass | Poison | Flying | Bug | Dragon | Steel)
            | (Ice, Fire | Water | Ice | Steel)
            | (Fighting, Poison | Flying | Psychic | Bug | Fairy)
            | (Poison, Poison | Ground | Rock | Ghost)
            | (Ground, Grass | Bug)
            | (Flying, Electric | Rock | Steel)
            | (Psychic, Psychic | Steel)
            | (Bug, Fire | Fighting | Poison | Flying | Ghost | Steel | Fairy)
            | (Rock, Fighting | Ground | Steel)
            | (Ghost, Dark)
            | (Dragon, Steel)
            | (Dark, Fighting | Dark | Fairy)
            | (Steel, Fire | Water | Electric | Steel)
            | (Fairy, Fire | Poison | Steel) => 0.5,

            _ => 1.0,
        }
    }

    /// Defensive multipliers of a (possibly dual-typed) defender against every attacking type.
    ///
    /// Entry `i` is the product of the chart entries for attacking type `ALL[i]` against
    /// each of `defending`.
    #[must_use]
    pub fn defensive_profile(defending: &[Self]) -> [f64; Self::LEN] {
        Self::ALL.map(|attacker| {
            defending
                .iter()
                .map(|&defender| attacker.effectiveness_against(defender))
                .product()
        })
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = ParseElementTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseElementTypeError { name: s.to_owned() })
    }
}
