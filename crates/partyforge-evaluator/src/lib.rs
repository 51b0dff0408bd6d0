//! Objective functions for scoring candidate teams.
//!
//! Every objective maps `(candidates, roster)` to a non-negative score, higher is better.
//! The optimizer runs one colony per [`Objective`] and combines the scores of all objectives
//! into a single fitness value.
//!
//! # Objectives
//!
//! - [`attack`] - raw offensive output (power × accuracy × STAB × offensive stat)
//! - [`coverage`] - defensive team coverage and offensive self coverage
//! - [`role`] - role archetypes (tank, spinner, sweeper, ...) built from small predicates
//!
//! # Design Principles
//!
//! ## Pure Scoring
//!
//! Objectives read the candidate list and the roster and nothing else. They hold no state,
//! so they are cheap to copy and safe to call from any number of threads at once.
//!
//! ## Tolerating Partial Teams
//!
//! Unset move positions are skipped and slots pointing at unknown indices are ignored, so
//! every objective is defined for every roster the optimizer can produce.
//!
//! ## Soft Roles
//!
//! Roles are scored, never enforced. A team that lacks a role still gets a valid score, it is
//! just lower. Roles also expose static affinities used to bias sampling towards species and
//! moves that fit.
//!
//! # Example
//!
//! ```rust
//! use partyforge_catalog::{BaseStats, ElementType, Roster, Slot, Species, SpeciesTypes};
//! use partyforge_evaluator::Objective;
//!
//! let candidates = vec![Species {
//!     id: 131,
//!     name: "lapras".to_owned(),
//!     stats: BaseStats::default(),
//!     types: SpeciesTypes::dual(ElementType::Water, ElementType::Ice),
//!     legendary: false,
//!     mythical: false,
//!     battle_only: false,
//!     mega: false,
//!     games: vec![],
//!     learnable_moves: vec![],
//! }];
//! let roster: Roster = [Slot::new(0, [])].into_iter().collect();
//!
//! let objective: Objective = "team-coverage".parse().unwrap();
//! assert_eq!(objective.evaluate(&candidates, &roster), 1.0);
//! ```

pub use self::objective::*;

pub mod attack;
pub mod coverage;
mod objective;
pub mod role;
