use serde::{Deserialize, Serialize};

use crate::{BaseStats, Move, Species, SpeciesTypes};

/// A team member in output form: species summary plus its chosen moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub stats: BaseStats,
    pub types: SpeciesTypes,
    pub moves: Vec<Move>,
}

impl TeamMember {
    pub fn new<'a, I>(species: &Species, moves: I) -> Self
    where
        I: IntoIterator<Item = &'a Move>,
    {
        Self {
            id: species.id,
            name: species.name.clone(),
            stats: species.stats,
            types: species.types,
            moves: moves.into_iter().cloned().collect(),
        }
    }
}

/// A resolved team.
///
/// Serializes as a JSON array of members, in slot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    members: Vec<TeamMember>,
}

impl Team {
    #[must_use]
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn species_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.members.iter().map(|m| m.id)
    }
}
