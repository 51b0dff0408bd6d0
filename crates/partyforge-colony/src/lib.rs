//! Multi-objective ant colony optimization for team recommendation.
//!
//! This crate searches the space of six-member teams (species plus up to four moves each) for
//! teams that score well under several objectives at once. It runs one ant colony per
//! objective and lets them share a combined fitness.
//!
//! # How the Search Works
//!
//! 1. **Construction** - Each colony samples a population of teams from its probability
//!    vectors (roulette wheel, distinct species per team)
//! 2. **Cross-evaluation** - Every team is scored under every objective
//! 3. **Aggregation** - Scores are combined into one fitness (weighted sum by default)
//! 4. **Elite selection** - The top decile of each colony's population is kept
//! 5. **Pheromone update** - Trails evaporate, elite teams deposit `Q × fitness`
//! 6. **Probability update** - `Prob ∝ Ph^alpha × H^beta`
//! 7. **Repeat** - Until the round limit or time limit is reached
//!
//! # Architecture
//!
//! ```text
//! Moaco (orchestrator)
//!     ↓ owns one per objective
//! Colony (pheromone, heuristic, probability vectors)
//!     ↓ samples
//! Roster (six slots, index form)
//!     ↓ scored by
//! Objective (partyforge-evaluator)
//!     ↓ combined by
//! AggregateFitness
//!     ↓ guides
//! Elite Selection & Pheromone Deposit
//! ```
//!
//! # Parameters
//!
//! - **Population size** - Teams built per colony per round (default 400)
//! - **alpha / beta** - Exponents of pheromone and heuristic (default 1.0 each)
//! - **Q** - Deposit constant per objective, also its aggregation weight (default 1.0)
//! - **rho** - Evaporation rate per objective (default 0.1)
//!
//! See [`params`] for validation rules and slot pre-selection.
//!
//! # Example
//!
//! ```rust,no_run
//! use partyforge_catalog::Species;
//! use partyforge_colony::{Moaco, MoacoConfig, ObjectiveSpec, Preselection};
//! use partyforge_evaluator::Objective;
//! # let candidates: Vec<Species> = todo!();
//!
//! let objectives = [
//!     ObjectiveSpec::new(Objective::Attack, 1.0, 0.1),
//!     ObjectiveSpec::new(Objective::TeamCoverage, 1.0, 0.1),
//! ];
//! let preselection = Preselection::new().lock(0, 24, [0, 3]);
//! let mut moaco = Moaco::new(&candidates, &objectives, &preselection, MoacoConfig::default())?;
//!
//! let solution = moaco.optimize(25, None)?;
//! for member in solution.team.members() {
//!     println!("{}: {} moves", member.name, member.moves.len());
//! }
//! # Ok::<(), partyforge_colony::OptimizeError>(())
//! ```
//!
//! # Design Principles
//!
//! ## No Shared Mutable State
//!
//! Candidates are borrowed immutably for the lifetime of a [`Moaco`]. Each call site builds its
//! own orchestrator, so concurrent requests never share learning state. Within a round,
//! construction and evaluation fan out over scoped threads that only read shared vectors.
//!
//! ## Reproducibility
//!
//! All randomness derives from one master seed. Each team is built from its own generator
//! seeded by its colony, so results do not depend on thread scheduling.
//!
//! # Current Limitations
//!
//! - **Scalarized objectives**: Objectives are reduced to one number before ranking, so the
//!   search finds one compromise rather than a Pareto front
//! - **Fast convergence**: Pheromone starts at zero, so species that never reach an elite team
//!   lose all probability after the first deposit
//! - **No cancellation**: The time limit is only checked between rounds

pub use self::{aggregation::*, colony::*, error::*, moaco::*, params::*};

pub mod aggregation;
pub mod colony;
pub mod error;
pub mod moaco;
mod parallel;
pub mod params;
pub mod weights;
