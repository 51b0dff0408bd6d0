//! Tuning parameters and slot pre-selection.
//!
//! [`ColonyParams`] carries the numeric knobs of one colony. [`Preselection`] carries the
//! caller's constraints on individual slots: locked species, pre-chosen moves and soft role
//! biases. Both are validated against the candidate list before any colony state is built.

use arrayvec::ArrayVec;
use partyforge_catalog::{MAX_MOVES, Species, TEAM_SIZE};
use partyforge_evaluator::role::Role;
use serde::{Deserialize, Serialize};

use crate::error::InvalidParameter;

pub const DEFAULT_POPULATION_SIZE: usize = 400;
pub const DEFAULT_ITERATIONS: usize = 25;
pub const DEFAULT_ALPHA: f64 = 1.0;
pub const DEFAULT_BETA: f64 = 1.0;
pub const DEFAULT_DEPOSIT_CONSTANT: f64 = 1.0;
pub const DEFAULT_EVAPORATION_RATE: f64 = 0.1;

/// Numeric parameters of a single colony.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColonyParams {
    /// Number of teams built per round.
    pub population_size: usize,
    /// Exponent applied to pheromone values.
    pub alpha: f64,
    /// Exponent applied to heuristic values.
    pub beta: f64,
    /// Pheromone deposited per unit of fitness.
    pub q: f64,
    /// Fraction of pheromone lost per round.
    pub rho: f64,
}

impl Default for ColonyParams {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            q: DEFAULT_DEPOSIT_CONSTANT,
            rho: DEFAULT_EVAPORATION_RATE,
        }
    }
}

impl ColonyParams {
    pub fn validate(&self) -> Result<(), InvalidParameter> {
        if self.population_size == 0 {
            return Err(InvalidParameter::PopulationSize);
        }
        if !is_non_negative(self.alpha) {
            return Err(InvalidParameter::Alpha { value: self.alpha });
        }
        if !is_non_negative(self.beta) {
            return Err(InvalidParameter::Beta { value: self.beta });
        }
        if !(self.q.is_finite() && self.q > 0.0) {
            return Err(InvalidParameter::DepositConstant { value: self.q });
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(InvalidParameter::EvaporationRate { value: self.rho });
        }
        Ok(())
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Fixes the species and, optionally, some moves of one slot.
///
/// Indices refer to the candidate list and to the species' learnable moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotLock {
    pub slot: usize,
    pub species: Option<usize>,
    pub moves: Vec<usize>,
}

/// Nudges sampling for one slot towards species and moves that fit `role`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotBias {
    pub slot: usize,
    pub role: Role,
    pub weight: f64,
}

/// Caller-supplied constraints on individual slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preselection {
    pub locks: Vec<SlotLock>,
    pub biases: Vec<SlotBias>,
}

impl Preselection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks `species` into `slot` with the given pre-chosen moves.
    #[must_use]
    pub fn lock<I>(mut self, slot: usize, species: usize, moves: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.locks.push(SlotLock {
            slot,
            species: Some(species),
            moves: moves.into_iter().collect(),
        });
        self
    }

    #[must_use]
    pub fn bias(mut self, slot: usize, role: Role, weight: f64) -> Self {
        self.biases.push(SlotBias { slot, role, weight });
        self
    }

    /// Checks every lock and bias against `candidates`.
    pub(crate) fn validate(&self, candidates: &[Species]) -> Result<SlotPlan, InvalidParameter> {
        let mut plan = SlotPlan::default();

        for lock in &self.locks {
            let slot = lock.slot;
            let Some(planned) = plan.slots.get_mut(slot) else {
                return Err(InvalidParameter::Slot { slot });
            };
            if planned.locked {
                return Err(InvalidParameter::DuplicateSlot { slot });
            }
            planned.locked = true;

            let Some(species_index) = lock.species else {
                if lock.moves.is_empty() {
                    continue;
                }
                return Err(InvalidParameter::MovesWithoutSpecies { slot });
            };
            let Some(species) = candidates.get(species_index) else {
                return Err(InvalidParameter::Species {
                    slot,
                    species: species_index,
                });
            };
            if lock.moves.len() > MAX_MOVES {
                return Err(InvalidParameter::TooManyMoves {
                    slot,
                    count: lock.moves.len(),
                });
            }
            for (i, &index) in lock.moves.iter().enumerate() {
                if species.learnable_move(index).is_none() {
                    return Err(InvalidParameter::Move { slot, index });
                }
                if lock.moves[..i].contains(&index) {
                    return Err(InvalidParameter::DuplicateMove { slot, index });
                }
            }
            planned.species = Some(species_index);
            planned.moves = lock.moves.iter().copied().collect();
        }

        for (i, a) in plan.slots.iter().enumerate() {
            if let Some(species) = a.species
                && plan.slots[..i].iter().any(|b| b.species == Some(species))
            {
                return Err(InvalidParameter::DuplicateSpecies { species });
            }
        }

        for bias in &self.biases {
            let slot = bias.slot;
            let Some(planned) = plan.slots.get_mut(slot) else {
                return Err(InvalidParameter::Slot { slot });
            };
            if !is_non_negative(bias.weight) {
                return Err(InvalidParameter::BiasWeight {
                    slot,
                    weight: bias.weight,
                });
            }
            if planned.bias.is_some() {
                return Err(InvalidParameter::DuplicateBias { slot });
            }
            planned.bias = Some((bias.role, bias.weight));
        }

        Ok(plan)
    }
}

/// Validated per-slot constraints, indexed by slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct SlotPlan {
    pub(crate) slots: [PlannedSlot; TEAM_SIZE],
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PlannedSlot {
    locked: bool,
    pub(crate) species: Option<usize>,
    pub(crate) moves: ArrayVec<usize, MAX_MOVES>,
    pub(crate) bias: Option<(Role, f64)>,
}
