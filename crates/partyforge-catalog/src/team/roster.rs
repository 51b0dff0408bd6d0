use arrayvec::ArrayVec;

use crate::{Move, Species};

/// Number of slots in a team.
pub const TEAM_SIZE: usize = 6;

/// Maximum number of moves a slot can hold.
pub const MAX_MOVES: usize = 4;

/// One team slot: a species index and up to [`MAX_MOVES`] move indices.
///
/// Move indices point into the species' `learnable_moves`. Positions past
/// [`Slot::moves`]'s length are unset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    species: usize,
    moves: ArrayVec<usize, MAX_MOVES>,
}

impl Slot {
    /// Creates a slot. Moves beyond [`MAX_MOVES`] are ignored.
    pub fn new<I>(species: usize, moves: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            species,
            moves: moves.into_iter().take(MAX_MOVES).collect(),
        }
    }

    #[must_use]
    pub fn species(&self) -> usize {
        self.species
    }

    /// Chosen move indices, in slot order.
    #[must_use]
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Move index at `position`, or `None` if that position is unset.
    #[must_use]
    pub fn move_at(&self, position: usize) -> Option<usize> {
        self.moves.get(position).copied()
    }

    /// Borrows the records this slot points to.
    ///
    /// Returns `None` if the species index is out of range. Out-of-range move indices
    /// are skipped.
    #[must_use]
    pub fn loadout<'a>(&self, candidates: &'a [Species]) -> Option<Loadout<'a>> {
        let species = candidates.get(self.species)?;
        let moves = self
            .moves
            .iter()
            .filter_map(|&m| species.learnable_move(m))
            .collect();
        Some(Loadout { species, moves })
    }
}

/// A species together with the moves chosen for it.
#[derive(Debug, Clone)]
pub struct Loadout<'a> {
    pub species: &'a Species,
    pub moves: ArrayVec<&'a Move, MAX_MOVES>,
}

/// A candidate team in index form.
///
/// A roster produced by the optimizer always has exactly [`TEAM_SIZE`] slots with
/// pairwise-distinct species; rosters built by hand may be shorter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Roster {
    slots: ArrayVec<Slot, TEAM_SIZE>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RosterIndexError {
    #[display("slot {slot} refers to species #{species}, which is not a candidate")]
    Species { slot: usize, species: usize },
    #[display("slot {slot} refers to move #{index}, which species #{species} cannot learn")]
    Move {
        slot: usize,
        species: usize,
        index: usize,
    },
}

impl Roster {
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if all [`TEAM_SIZE`] slots are filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Species indices in slot order.
    pub fn species(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map(Slot::species)
    }

    /// Returns `true` if no species appears twice.
    #[must_use]
    pub fn has_distinct_species(&self) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, a)| self.slots[..i].iter().all(|b| a.species != b.species))
    }

    /// Loadouts of every slot whose species index is valid.
    pub fn loadouts<'a>(&'a self, candidates: &'a [Species]) -> impl Iterator<Item = Loadout<'a>> {
        self.slots.iter().filter_map(|slot| slot.loadout(candidates))
    }

    /// Converts the roster into an owned [`Team`](crate::Team).
    ///
    /// Unset move positions are omitted from the result.
    pub fn resolve(&self, candidates: &[Species]) -> Result<crate::Team, RosterIndexError> {
        let mut members = Vec::with_capacity(self.slots.len());
        for (slot_index, slot) in self.slots.iter().enumerate() {
            let species =
                candidates
                    .get(slot.species)
                    .ok_or(RosterIndexError::Species {
                        slot: slot_index,
                        species: slot.species,
                    })?;
            let moves = slot
                .moves
                .iter()
                .map(|&index| {
                    species
                        .learnable_move(index)
                        .ok_or(RosterIndexError::Move {
                            slot: slot_index,
                            species: slot.species,
                            index,
                        })
                })
                .collect::<Result<ArrayVec<_, MAX_MOVES>, _>>()?;
            members.push(crate::TeamMember::new(species, moves));
        }
        Ok(crate::Team::new(members))
    }
}

impl FromIterator<Slot> for Roster {
    /// Collects up to [`TEAM_SIZE`] slots; extra slots are dropped.
    fn from_iter<T: IntoIterator<Item = Slot>>(iter: T) -> Self {
        Self {
            slots: iter.into_iter().take(TEAM_SIZE).collect(),
        }
    }
}
