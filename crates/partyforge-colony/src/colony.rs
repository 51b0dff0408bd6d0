//! Single-objective ant colony.
//!
//! A [`Colony`] owns the learning state for one objective and rebuilds its whole population
//! of teams every round. There is no mutation or crossover: all information flows through
//! pheromone trails.
//!
//! # Learning State
//!
//! For the species dimension and for each species' learnable moves, the colony keeps:
//!
//! - **Pheromone** (`Ph`) - starts at zero, evaporates every round, reinforced by elite teams
//! - **Heuristic** (`H`) - static desirability, computed once at construction
//! - **Probability** (`Prob`) - sampling distribution, starts uniform
//!
//! ```text
//! Prob[i] = Ph[i]^alpha × H[i]^beta / Σ_j Ph[j]^alpha × H[j]^beta
//! ```
//!
//! If the denominator is zero (for instance before any deposit) the distribution falls back to
//! uniform.
//!
//! Species heuristic is the species' base stat total divided by the largest total among the
//! candidates. Move heuristic comes from [`Objective::move_heuristic`].
//!
//! # Round Structure
//!
//! 1. [`Colony::construct`] - sample a fresh population
//! 2. Evaluate fitness (own objective, or a combined fitness supplied by the caller)
//! 3. [`Colony::select_elite`] - keep the top decile
//! 4. [`Colony::evaporate`] - `Ph ← (1 - rho) × Ph`
//! 5. [`Colony::deposit`] - `Ph += Q × fitness` on every species and move an elite team used
//! 6. [`Colony::update_probabilities`]
//!
//! [`Colony::iterate`] runs all six steps against the colony's own objective.
//!
//! # Construction
//!
//! Locked slots are placed first. Every other slot draws a species by roulette wheel; a draw
//! that repeats a species already on the team is rejected and redrawn. After
//! [`MAX_REJECTIONS`] rejections the draw is repeated with used species masked out, and if no
//! weight is left a species is picked uniformly among the unused ones.
//!
//! Moves are drawn without replacement from the species' move distribution until four are
//! chosen or the learnable list runs out. Pre-chosen moves of a locked slot occupy the first
//! positions. When the remaining move weight is zero, an unchosen move is picked uniformly.
//!
//! Every team is built from its own [`Pcg64`] seeded by the colony's master generator, so
//! construction runs on worker threads and stays reproducible for a fixed seed.

use arrayvec::ArrayVec;
use partyforge_catalog::{MAX_MOVES, Roster, Slot, Species, TEAM_SIZE};
use partyforge_evaluator::Objective;
use rand::{Rng, SeedableRng, seq::IndexedRandom};
use rand_pcg::Pcg64;

use crate::{
    error::{EmptyCandidateSet, OptimizeError},
    params::{ColonyParams, Preselection, SlotPlan},
    parallel, weights,
};

/// Rejected species draws before switching to a masked draw.
pub const MAX_REJECTIONS: usize = 64;

/// A team together with the fitness it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRoster {
    pub roster: Roster,
    pub fitness: f64,
}

/// Per-slot sampling boosts derived from a role bias.
#[derive(Debug, Clone)]
struct SlotBoost {
    species: Vec<f64>,
    moves: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct Colony<'a> {
    candidates: &'a [Species],
    objective: Objective,
    params: ColonyParams,
    plan: SlotPlan,
    boosts: [Option<SlotBoost>; TEAM_SIZE],
    species_heuristic: Vec<f64>,
    move_heuristic: Vec<Vec<f64>>,
    species_pheromone: Vec<f64>,
    move_pheromone: Vec<Vec<f64>>,
    species_probability: Vec<f64>,
    move_probability: Vec<Vec<f64>>,
    population: Vec<Roster>,
    rng: Pcg64,
}

impl<'a> Colony<'a> {
    /// Creates a colony with zero pheromone and uniform probabilities.
    ///
    /// Fails if there are fewer than six candidates or if `params` or `preselection` are
    /// invalid. The population is empty until [`Colony::construct`] is called.
    pub fn new(
        candidates: &'a [Species],
        objective: Objective,
        params: ColonyParams,
        preselection: &Preselection,
        seed: u64,
    ) -> Result<Self, OptimizeError> {
        if candidates.len() < TEAM_SIZE {
            return Err(EmptyCandidateSet::TooFewSpecies {
                available: candidates.len(),
            }
            .into());
        }
        params.validate()?;
        let plan = preselection.validate(candidates)?;

        let boosts = plan.slots.each_ref().map(|slot| {
            slot.bias.map(|(role, weight)| SlotBoost {
                species: candidates
                    .iter()
                    .map(|species| 1.0 + weight * role.species_affinity(species))
                    .collect(),
                moves: candidates
                    .iter()
                    .map(|species| {
                        species
                            .learnable_moves
                            .iter()
                            .map(|mv| 1.0 + weight * role.move_affinity(mv))
                            .collect()
                    })
                    .collect(),
            })
        });

        let max_total = candidates
            .iter()
            .map(|species| species.stats.total())
            .max()
            .unwrap_or(0);
        let species_heuristic: Vec<f64> = candidates
            .iter()
            .map(|species| {
                if max_total == 0 {
                    1.0
                } else {
                    f64::from(species.stats.total()) / f64::from(max_total)
                }
            })
            .collect();
        let move_heuristic: Vec<Vec<f64>> = candidates
            .iter()
            .map(|species| {
                species
                    .learnable_moves
                    .iter()
                    .map(|mv| objective.move_heuristic(mv))
                    .collect()
            })
            .collect();

        let zeros_like = |len: usize| vec![0.0; len];
        let uniform_like = |len: usize| {
            let mut w = vec![0.0; len];
            weights::normalize_l1(&mut w);
            w
        };
        let move_counts = candidates
            .iter()
            .map(|species| species.learnable_moves.len())
            .collect::<Vec<_>>();

        Ok(Self {
            candidates,
            objective,
            params,
            plan,
            boosts,
            species_heuristic,
            move_heuristic,
            species_pheromone: zeros_like(candidates.len()),
            move_pheromone: move_counts.iter().map(|&n| zeros_like(n)).collect(),
            species_probability: uniform_like(candidates.len()),
            move_probability: move_counts.iter().map(|&n| uniform_like(n)).collect(),
            population: vec![],
            rng: Pcg64::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn candidates(&self) -> &'a [Species] {
        self.candidates
    }

    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    #[must_use]
    pub fn params(&self) -> &ColonyParams {
        &self.params
    }

    /// Teams built by the last [`Colony::construct`] call.
    #[must_use]
    pub fn population(&self) -> &[Roster] {
        &self.population
    }

    #[must_use]
    pub fn species_probabilities(&self) -> &[f64] {
        &self.species_probability
    }

    /// Move distribution of the species at candidate index `species`.
    #[must_use]
    pub fn move_probabilities(&self, species: usize) -> &[f64] {
        &self.move_probability[species]
    }

    #[must_use]
    pub fn species_pheromones(&self) -> &[f64] {
        &self.species_pheromone
    }

    #[must_use]
    pub fn move_pheromones(&self, species: usize) -> &[f64] {
        &self.move_pheromone[species]
    }

    #[must_use]
    pub fn species_heuristics(&self) -> &[f64] {
        &self.species_heuristic
    }

    /// Scores a team against this colony's own objective.
    #[must_use]
    pub fn fitness(&self, roster: &Roster) -> f64 {
        self.objective.evaluate(self.candidates, roster)
    }

    /// Scores the current population against this colony's own objective, in parallel.
    #[must_use]
    pub fn evaluate_population(&self) -> Vec<f64> {
        parallel::map(&self.population, |roster| self.fitness(roster))
    }

    /// Replaces the population with `population_size` freshly sampled teams.
    ///
    /// On error the previous population is kept.
    pub fn construct(&mut self) -> Result<(), OptimizeError> {
        let seeds = (0..self.params.population_size)
            .map(|_| self.rng.random::<u64>())
            .collect::<Vec<_>>();
        let teams = parallel::map(&seeds, |&seed| self.build_team(seed));
        self.population = teams.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }

    fn build_team(&self, seed: u64) -> Result<Roster, OptimizeError> {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut species_of_slot = [None; TEAM_SIZE];
        for (slot, planned) in self.plan.slots.iter().enumerate() {
            species_of_slot[slot] = planned.species;
        }

        for slot in 0..TEAM_SIZE {
            if species_of_slot[slot].is_none() {
                let species = self.draw_species(&mut rng, slot, &species_of_slot)?;
                species_of_slot[slot] = Some(species);
            }
        }

        let mut slots = ArrayVec::<Slot, TEAM_SIZE>::new();
        for (slot, species) in species_of_slot.into_iter().enumerate() {
            let Some(species) = species else {
                return Err(EmptyCandidateSet::ConstructionStall { slot }.into());
            };
            let moves = self.draw_moves(&mut rng, slot, species);
            slots.push(Slot::new(species, moves));
        }
        Ok(slots.into_iter().collect())
    }

    fn draw_species(
        &self,
        rng: &mut Pcg64,
        slot: usize,
        taken: &[Option<usize>; TEAM_SIZE],
    ) -> Result<usize, OptimizeError> {
        let is_taken = |species: usize| taken.contains(&Some(species));
        let mut weights: Vec<f64> = match &self.boosts[slot] {
            Some(boost) => self
                .species_probability
                .iter()
                .zip(&boost.species)
                .map(|(p, b)| p * b)
                .collect(),
            None => self.species_probability.clone(),
        };

        for _ in 0..MAX_REJECTIONS {
            match weights::roulette(rng, &weights) {
                Some(species) if !is_taken(species) => return Ok(species),
                Some(_) => {}
                None => break,
            }
        }

        for (species, w) in weights.iter_mut().enumerate() {
            if is_taken(species) {
                *w = 0.0;
            }
        }
        if let Some(species) = weights::roulette(rng, &weights) {
            return Ok(species);
        }

        let unused = (0..self.candidates.len())
            .filter(|&species| !is_taken(species))
            .collect::<Vec<_>>();
        unused
            .choose(rng)
            .copied()
            .ok_or_else(|| EmptyCandidateSet::ConstructionStall { slot }.into())
    }

    fn draw_moves(
        &self,
        rng: &mut Pcg64,
        slot: usize,
        species: usize,
    ) -> ArrayVec<usize, MAX_MOVES> {
        let planned = &self.plan.slots[slot];
        let mut chosen = if planned.species == Some(species) {
            planned.moves.clone()
        } else {
            ArrayVec::new()
        };

        let move_count = self.move_probability[species].len();
        let mut weights = match &self.boosts[slot] {
            Some(boost) => self.move_probability[species]
                .iter()
                .zip(&boost.moves[species])
                .map(|(p, b)| p * b)
                .collect::<Vec<_>>(),
            None => self.move_probability[species].clone(),
        };

        while !chosen.is_full() && chosen.len() < move_count {
            for &index in &chosen {
                weights[index] = 0.0;
            }
            let next = weights::roulette(rng, &weights).or_else(|| {
                let unchosen = (0..move_count)
                    .filter(|index| !chosen.contains(index))
                    .collect::<Vec<_>>();
                unchosen.choose(rng).copied()
            });
            match next {
                Some(index) => chosen.push(index),
                None => break,
            }
        }
        chosen
    }

    /// Indices of the top decile of the population by `fitness`, in ascending fitness order.
    ///
    /// Keeps `population_size / 10` teams, and at least one.
    #[must_use]
    pub fn select_elite(&self, fitness: &[f64]) -> Vec<usize> {
        assert_eq!(fitness.len(), self.population.len());
        let mut order = (0..self.population.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));
        let keep = (order.len() / 10).max(1).min(order.len());
        order.split_off(order.len() - keep)
    }

    /// Multiplies every pheromone value by `1 - rho`.
    pub fn evaporate(&mut self) {
        let retain = 1.0 - self.params.rho;
        for ph in self
            .species_pheromone
            .iter_mut()
            .chain(self.move_pheromone.iter_mut().flatten())
        {
            *ph *= retain;
        }
    }

    /// Reinforces the species and moves used by each elite team by `Q × fitness`.
    ///
    /// Teams with negative or non-finite fitness deposit nothing.
    pub fn deposit(&mut self, elite: &[usize], fitness: &[f64]) {
        for &team in elite {
            let delta = self.params.q * fitness[team];
            if !(delta.is_finite() && delta > 0.0) {
                continue;
            }
            for slot in self.population[team].slots() {
                let species = slot.species();
                self.species_pheromone[species] += delta;
                for &index in slot.moves() {
                    self.move_pheromone[species][index] += delta;
                }
            }
        }
    }

    /// Recomputes every probability vector from pheromone and heuristic values.
    pub fn update_probabilities(&mut self) {
        let ColonyParams { alpha, beta, .. } = self.params;
        let attractiveness = |ph: f64, h: f64| ph.powf(alpha) * h.powf(beta);

        for ((prob, &ph), &h) in self
            .species_probability
            .iter_mut()
            .zip(&self.species_pheromone)
            .zip(&self.species_heuristic)
        {
            *prob = attractiveness(ph, h);
        }
        weights::normalize_l1(&mut self.species_probability);

        for ((probs, phs), hs) in self
            .move_probability
            .iter_mut()
            .zip(&self.move_pheromone)
            .zip(&self.move_heuristic)
        {
            for ((prob, &ph), &h) in probs.iter_mut().zip(phs).zip(hs) {
                *prob = attractiveness(ph, h);
            }
            weights::normalize_l1(probs);
        }
    }

    /// Runs one standalone round against the colony's own objective.
    ///
    /// Returns the best team of the round.
    pub fn iterate(&mut self) -> Result<ScoredRoster, OptimizeError> {
        self.construct()?;
        let fitness = self.evaluate_population();
        let elite = self.select_elite(&fitness);
        let best = elite
            .last()
            .map(|&team| ScoredRoster {
                roster: self.population[team].clone(),
                fitness: fitness[team],
            })
            .ok_or(EmptyCandidateSet::ConstructionStall { slot: 0 })?;
        self.evaporate();
        self.deposit(&elite, &fitness);
        self.update_probabilities();
        Ok(best)
    }
}
