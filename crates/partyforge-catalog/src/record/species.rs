use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DamageClass, ElementType, Move};

/// One of the six base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

/// Base stats of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    #[must_use]
    pub const fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    /// Sum of all six stats.
    #[must_use]
    pub fn total(&self) -> u32 {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .into_iter()
        .map(u32::from)
        .sum()
    }

    /// Offensive stat used by a move of the given damage class.
    ///
    /// Physical moves use attack, everything else uses special attack.
    #[must_use]
    pub const fn offensive_stat(&self, class: DamageClass) -> u16 {
        match class {
            DamageClass::Physical => self.attack,
            DamageClass::Special | DamageClass::Status => self.special_attack,
        }
    }
}

/// The one or two types of a species.
///
/// Serialized as a JSON array of one or two type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<ElementType>", into = "Vec<ElementType>")]
pub struct SpeciesTypes {
    primary: ElementType,
    secondary: Option<ElementType>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("a species must have one or two distinct types, got {count}")]
pub struct InvalidSpeciesTypes {
    count: usize,
}

impl SpeciesTypes {
    #[must_use]
    pub const fn single(primary: ElementType) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Creates a dual type. Passing the same type twice yields a single type.
    #[must_use]
    pub fn dual(primary: ElementType, secondary: ElementType) -> Self {
        Self {
            primary,
            secondary: (primary != secondary).then_some(secondary),
        }
    }

    #[must_use]
    pub const fn primary(&self) -> ElementType {
        self.primary
    }

    #[must_use]
    pub const fn secondary(&self) -> Option<ElementType> {
        self.secondary
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementType> + '_ {
        std::iter::once(self.primary).chain(self.secondary)
    }

    #[must_use]
    pub fn contains(&self, ty: ElementType) -> bool {
        self.primary == ty || self.secondary == Some(ty)
    }

    /// Multipliers this type combination takes from each attacking type.
    #[must_use]
    pub fn defensive_profile(&self) -> [f64; ElementType::LEN] {
        match self.secondary {
            Some(secondary) => ElementType::defensive_profile(&[self.primary, secondary]),
            None => ElementType::defensive_profile(&[self.primary]),
        }
    }
}

impl TryFrom<Vec<ElementType>> for SpeciesTypes {
    type Error = InvalidSpeciesTypes;

    fn try_from(types: Vec<ElementType>) -> Result<Self, Self::Error> {
        match types.as_slice() {
            [primary] => Ok(Self::single(*primary)),
            [primary, secondary] if primary != secondary => Ok(Self::dual(*primary, *secondary)),
            _ => Err(InvalidSpeciesTypes { count: types.len() }),
        }
    }
}

impl From<SpeciesTypes> for Vec<ElementType> {
    fn from(types: SpeciesTypes) -> Self {
        types.iter().collect()
    }
}

impl fmt::Display for SpeciesTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(secondary) => write!(f, "{}/{}", self.primary, secondary),
            None => write!(f, "{}", self.primary),
        }
    }
}

/// A species as handed to the optimizer by the filtering pipeline.
///
/// `learnable_moves` is already pruned to representative candidates; move indices used
/// elsewhere in the workspace refer to positions in this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: u32,
    pub name: String,
    pub stats: BaseStats,
    pub types: SpeciesTypes,
    #[serde(default)]
    pub legendary: bool,
    #[serde(default)]
    pub mythical: bool,
    #[serde(default)]
    pub battle_only: bool,
    #[serde(default)]
    pub mega: bool,
    #[serde(default)]
    pub games: Vec<String>,
    #[serde(default)]
    pub learnable_moves: Vec<Move>,
}

impl Species {
    /// Returns `true` if `mv` gets the same-type attack bonus on this species.
    #[must_use]
    pub fn has_stab(&self, mv: &Move) -> bool {
        self.types.contains(mv.ty)
    }

    #[must_use]
    pub fn learnable_move(&self, index: usize) -> Option<&Move> {
        self.learnable_moves.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_and_offensive_stat() {
        let stats = BaseStats {
            hp: 78,
            attack: 84,
            defense: 78,
            special_attack: 109,
            special_defense: 85,
            speed: 100,
        };
        assert_eq!(stats.total(), 534);
        assert_eq!(stats.offensive_stat(DamageClass::Physical), 84);
        assert_eq!(stats.offensive_stat(DamageClass::Special), 109);
        assert_eq!(stats.get(Stat::Speed), 100);
    }

    #[test]
    fn test_types_serde() {
        let types: SpeciesTypes = serde_json::from_str(r#"["fire", "flying"]"#).unwrap();
        assert_eq!(types.primary(), ElementType::Fire);
        assert_eq!(types.secondary(), Some(ElementType::Flying));
        assert_eq!(types.to_string(), "fire/flying");
        assert_eq!(
            serde_json::to_string(&types).unwrap(),
            r#"["fire","flying"]"#
        );

        assert!(serde_json::from_str::<SpeciesTypes>("[]").is_err());
        assert!(serde_json::from_str::<SpeciesTypes>(r#"["fire","fire"]"#).is_err());
        assert!(serde_json::from_str::<SpeciesTypes>(r#"["a","b","c"]"#).is_err());
    }

    #[test]
    fn test_dual_with_same_type_collapses() {
        let types = SpeciesTypes::dual(ElementType::Rock, ElementType::Rock);
        assert_eq!(types, SpeciesTypes::single(ElementType::Rock));
        assert_eq!(types.iter().count(), 1);
    }

    #[test]
    fn test_species_deserialize_minimal() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "stats": {
                "hp": 35, "attack": 55, "defense": 40,
                "specialAttack": 50, "specialDefense": 50, "speed": 90
            },
            "types": ["electric"],
            "learnableMoves": [
                {
                    "id": 85, "name": "thunderbolt", "type": "electric", "damageClass": "special",
                    "power": 90, "accuracy": 1.0, "pp": 15, "priority": 0
                }
            ]
        }"#;
        let species: Species = serde_json::from_str(json).unwrap();
        assert!(!species.legendary);
        assert!(species.games.is_empty());
        let thunderbolt = species.learnable_move(0).unwrap();
        assert!(species.has_stab(thunderbolt));
        assert!(species.learnable_move(1).is_none());
    }
}
