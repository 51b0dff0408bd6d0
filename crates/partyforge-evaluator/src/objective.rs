//! The closed set of objectives a colony can optimize.
//!
//! Objectives are parsed from and printed as short names:
//!
//! | Name             | Objective                       |
//! |------------------|---------------------------------|
//! | `attack`         | [`Objective::Attack`]           |
//! | `team-coverage`  | [`Objective::TeamCoverage`]     |
//! | `self-coverage`  | [`Objective::SelfCoverage`]     |
//! | `role:<role>`    | [`Objective::Role`]             |
//!
//! Every objective is a pure function of the candidate list and a roster and returns a
//! non-negative score (higher is better). Rosters with unset move positions are valid input.

use std::{fmt, str::FromStr};

use partyforge_catalog::{Move, Roster, Species};
use serde::{Deserialize, Serialize};

use crate::{
    attack::team_attack,
    coverage::{self_coverage, team_coverage},
    role::{ParseRoleError, Role},
};

const ROLE_PREFIX: &str = "role:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Objective {
    /// Raw offensive output, see [`crate::attack`].
    Attack,
    /// Members covering each other's weaknesses, see [`crate::coverage`].
    TeamCoverage,
    /// Members hitting many types super effectively, see [`crate::coverage`].
    SelfCoverage,
    /// Best member's fit for a role, plus one.
    Role(Role),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseObjectiveError {
    #[display("unknown objective: {name} (expected attack, team-coverage, self-coverage, role:*)")]
    Unknown { name: String },
    #[display("invalid role objective")]
    Role(ParseRoleError),
}

impl Objective {
    /// Scores `roster` against this objective.
    #[must_use]
    pub fn evaluate(&self, candidates: &[Species], roster: &Roster) -> f64 {
        match self {
            Self::Attack => team_attack(candidates, roster),
            Self::TeamCoverage => team_coverage(candidates, roster),
            Self::SelfCoverage => self_coverage(candidates, roster),
            Self::Role(role) => {
                let best = roster
                    .loadouts(candidates)
                    .map(|loadout| role.score_loadout(&loadout))
                    .fold(0.0, f64::max);
                best + 1.0
            }
        }
    }

    /// Static desirability of a move under this objective.
    ///
    /// `1.0` for every move, except for role objectives where moves contributing to the
    /// role get `2.0`.
    #[must_use]
    pub fn move_heuristic(&self, mv: &Move) -> f64 {
        match self {
            Self::Role(role) => 1.0 + role.move_affinity(mv),
            Self::Attack | Self::TeamCoverage | Self::SelfCoverage => 1.0,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => f.write_str("attack"),
            Self::TeamCoverage => f.write_str("team-coverage"),
            Self::SelfCoverage => f.write_str("self-coverage"),
            Self::Role(role) => write!(f, "{ROLE_PREFIX}{role}"),
        }
    }
}

impl FromStr for Objective {
    type Err = ParseObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if let Some(role) = normalized.strip_prefix(ROLE_PREFIX) {
            return role.parse().map(Self::Role).map_err(ParseObjectiveError::Role);
        }
        match normalized.replace('_', "-").as_str() {
            "attack" => Ok(Self::Attack),
            "team-coverage" => Ok(Self::TeamCoverage),
            "self-coverage" => Ok(Self::SelfCoverage),
            _ => Err(ParseObjectiveError::Unknown { name: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for Objective {
    type Error = ParseObjectiveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Objective> for String {
    fn from(objective: Objective) -> Self {
        objective.to_string()
    }
}

#[cfg(test)]
mod tests {
    use partyforge_catalog::{BaseStats, DamageClass, ElementType, Slot, SpeciesTypes};

    use super::*;

    fn mv(name: &str, ty: ElementType, class: DamageClass, power: u32) -> Move {
        Move {
            id: 0,
            name: name.to_owned(),
            ty,
            damage_class: class,
            power,
            accuracy: 1.0,
            pp: 10,
            priority: 0,
        }
    }

    fn species(id: u32, moves: Vec<Move>) -> Species {
        Species {
            id,
            name: format!("species-{id}"),
            stats: BaseStats {
                hp: 80,
                attack: 100,
                defense: 80,
                special_attack: 80,
                special_defense: 80,
                speed: 80,
            },
            types: SpeciesTypes::single(ElementType::Water),
            legendary: false,
            mythical: false,
            battle_only: false,
            mega: false,
            games: vec![],
            learnable_moves: moves,
        }
    }

    #[test]
    fn test_parse_and_display() {
        for (name, objective) in [
            ("attack", Objective::Attack),
            ("team-coverage", Objective::TeamCoverage),
            ("self-coverage", Objective::SelfCoverage),
            ("role:spinner", Objective::Role(Role::Spinner)),
            ("role:hazard-setter", Objective::Role(Role::HazardSetter)),
        ] {
            assert_eq!(name.parse::<Objective>(), Ok(objective));
            assert_eq!(objective.to_string(), name);
        }
        assert_eq!("Team_Coverage".parse::<Objective>(), Ok(Objective::TeamCoverage));
        assert!(matches!(
            "defense".parse::<Objective>(),
            Err(ParseObjectiveError::Unknown { .. })
        ));
        assert!(matches!(
            "role:kingmaker".parse::<Objective>(),
            Err(ParseObjectiveError::Role(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Objective::Role(Role::Cleric)).unwrap();
        assert_eq!(json, r#""role:cleric""#);
        let objective: Objective = serde_json::from_str(r#""self-coverage""#).unwrap();
        assert_eq!(objective, Objective::SelfCoverage);
    }

    #[test]
    fn test_role_objective_takes_best_member() {
        let candidates = vec![
            species(1, vec![mv("rapid-spin", ElementType::Normal, DamageClass::Physical, 50)]),
            species(2, vec![mv("surf", ElementType::Water, DamageClass::Special, 90)]),
        ];
        let objective = Objective::Role(Role::Spinner);
        let with_spinner: Roster = [Slot::new(0, [0]), Slot::new(1, [0])].into_iter().collect();
        let without: Roster = [Slot::new(0, []), Slot::new(1, [0])].into_iter().collect();
        assert!((objective.evaluate(&candidates, &with_spinner) - 2.0).abs() < 1e-12);
        assert!((objective.evaluate(&candidates, &without) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scores_are_non_negative() {
        let candidates = vec![species(1, vec![]), species(2, vec![])];
        let roster: Roster = [Slot::new(0, []), Slot::new(1, [])].into_iter().collect();
        for objective in [
            Objective::Attack,
            Objective::TeamCoverage,
            Objective::SelfCoverage,
            Objective::Role(Role::Wall),
        ] {
            assert!(objective.evaluate(&candidates, &roster) >= 0.0);
        }
    }

    #[test]
    fn test_move_heuristic() {
        let spin = mv("rapid-spin", ElementType::Normal, DamageClass::Physical, 50);
        let surf = mv("surf", ElementType::Water, DamageClass::Special, 90);
        assert!((Objective::Attack.move_heuristic(&spin) - 1.0).abs() < 1e-12);
        assert!((Objective::Role(Role::Spinner).move_heuristic(&spin) - 2.0).abs() < 1e-12);
        assert!((Objective::Role(Role::Spinner).move_heuristic(&surf) - 1.0).abs() < 1e-12);
    }
}
