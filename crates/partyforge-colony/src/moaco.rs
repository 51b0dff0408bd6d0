//! Multi-objective orchestrator.
//!
//! [`Moaco`] runs one [`Colony`] per objective over the same candidates and constraints. The
//! colonies learn independently but are ranked by a shared combined fitness:
//!
//! 1. Every colony constructs its own population
//! 2. Every team of every colony is scored under *every* objective (cross-evaluation)
//! 3. Scores are reduced to one combined fitness with an [`AggregateFitness`] strategy
//! 4. Each colony selects its elite, evaporates, deposits and updates its probabilities using
//!    the combined fitness
//! 5. The round's best team replaces the incumbent only if it is strictly better
//!
//! The incumbent survives across [`Moaco::optimize`] calls, so its value never decreases.
//!
//! # Stopping
//!
//! [`Moaco::optimize`] stops after the requested number of rounds or once the optional time
//! limit has passed, whichever comes first. The limit is only checked between rounds, so a slow
//! round can overrun it. At least one round always runs.

use std::time::{Duration, Instant};

use log::{debug, info};
use partyforge_catalog::{Roster, Species, TEAM_SIZE, Team};
use partyforge_evaluator::Objective;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{AggregateFitness, BoxedAggregateFitness, WeightedSum},
    colony::{Colony, ScoredRoster},
    error::{EmptyCandidateSet, InvalidParameter, OptimizeError},
    params::{
        ColonyParams, DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_POPULATION_SIZE, Preselection,
    },
    parallel,
};

/// One objective together with the parameters of its colony.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    pub objective: Objective,
    /// Deposit constant of the colony, also the objective's aggregation weight.
    pub q: f64,
    /// Evaporation rate of the colony.
    pub rho: f64,
}

impl ObjectiveSpec {
    #[must_use]
    pub fn new(objective: Objective, q: f64, rho: f64) -> Self {
        Self { objective, q, rho }
    }
}

/// Parameters shared by every colony of a [`Moaco`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoacoConfig {
    pub population_size: usize,
    pub alpha: f64,
    pub beta: f64,
    /// Master seed. `None` draws one from the thread-local generator.
    pub seed: Option<u64>,
}

impl Default for MoacoConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    IterationLimit,
    TimeLimit,
}

/// Score of the incumbent under one objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveScore {
    pub objective: Objective,
    pub weight: f64,
    pub score: f64,
}

/// Statistics of one round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStats {
    pub round: usize,
    /// Best combined fitness among all teams built this round.
    pub best: f64,
    /// Mean combined fitness over all teams built this round.
    pub mean: f64,
    /// Incumbent value after the round.
    pub incumbent: f64,
}

/// Result of one [`Moaco::optimize`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub team: Team,
    pub value: f64,
    pub breakdown: Vec<ObjectiveScore>,
    pub rounds: usize,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
struct Incumbent {
    roster: Roster,
    team: Team,
    value: f64,
    scores: Vec<f64>,
}

#[derive(Debug)]
pub struct Moaco<'a> {
    candidates: &'a [Species],
    objectives: Vec<ObjectiveSpec>,
    weights: Vec<f64>,
    colonies: Vec<Colony<'a>>,
    aggregation: BoxedAggregateFitness,
    incumbent: Option<Incumbent>,
    history: Vec<RoundStats>,
}

impl<'a> Moaco<'a> {
    /// Builds one colony per objective.
    ///
    /// Fails with [`EmptyCandidateSet`] before building anything if no objective is given or
    /// there are fewer than six candidates.
    pub fn new(
        candidates: &'a [Species],
        objectives: &[ObjectiveSpec],
        preselection: &Preselection,
        config: MoacoConfig,
    ) -> Result<Self, OptimizeError> {
        if objectives.is_empty() {
            return Err(EmptyCandidateSet::NoObjectives.into());
        }
        if candidates.len() < TEAM_SIZE {
            return Err(EmptyCandidateSet::TooFewSpecies {
                available: candidates.len(),
            }
            .into());
        }

        let mut master = match config.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_rng(&mut rand::rng()),
        };
        let colonies = objectives
            .iter()
            .map(|spec| {
                let params = ColonyParams {
                    population_size: config.population_size,
                    alpha: config.alpha,
                    beta: config.beta,
                    q: spec.q,
                    rho: spec.rho,
                };
                Colony::new(candidates, spec.objective, params, preselection, master.random())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            candidates,
            objectives: objectives.to_vec(),
            weights: objectives.iter().map(|spec| spec.q).collect(),
            colonies,
            aggregation: Box::new(WeightedSum),
            incumbent: None,
            history: vec![],
        })
    }

    /// Replaces the aggregation strategy (default [`WeightedSum`]).
    #[must_use]
    pub fn with_aggregation<A>(mut self, aggregation: A) -> Self
    where
        A: AggregateFitness + 'static,
    {
        self.aggregation = Box::new(aggregation);
        self
    }

    #[must_use]
    pub fn objectives(&self) -> &[ObjectiveSpec] {
        &self.objectives
    }

    #[must_use]
    pub fn colonies(&self) -> &[Colony<'a>] {
        &self.colonies
    }

    /// Runs up to `iterations` rounds, stopping early once `time_limit` has elapsed.
    pub fn optimize(
        &mut self,
        iterations: usize,
        time_limit: Option<Duration>,
    ) -> Result<Solution, OptimizeError> {
        if iterations == 0 {
            return Err(InvalidParameter::Iterations.into());
        }
        let start = Instant::now();
        let mut rounds = 0;
        let (incumbent, stop_reason) = loop {
            let incumbent = self.round()?;
            rounds += 1;
            if time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break (incumbent, StopReason::TimeLimit);
            }
            if rounds == iterations {
                break (incumbent, StopReason::IterationLimit);
            }
        };

        let elapsed = start.elapsed();
        info!(
            "optimized in {rounds} rounds ({:.2}s, {stop_reason:?}): value {:.3}",
            elapsed.as_secs_f64(),
            incumbent.value,
        );
        Ok(Solution {
            breakdown: self.score_breakdown(&incumbent.scores),
            team: incumbent.team,
            value: incumbent.value,
            rounds,
            stop_reason,
            elapsed,
        })
    }

    /// Runs one round and returns the incumbent after it.
    fn round(&mut self) -> Result<Incumbent, OptimizeError> {
        for colony in &mut self.colonies {
            colony.construct()?;
        }

        let mut round_best: Option<(ScoredRoster, Vec<f64>)> = None;
        let mut sum = 0.0;
        let mut count = 0_usize;

        for colony in &mut self.colonies {
            let scored = parallel::map(colony.population(), |roster| {
                let scores = self
                    .objectives
                    .iter()
                    .map(|spec| spec.objective.evaluate(self.candidates, roster))
                    .collect::<Vec<_>>();
                let combined = self.aggregation.aggregate(&scores, &self.weights);
                (combined, scores)
            });
            let fitness = scored.iter().map(|(combined, _)| *combined).collect::<Vec<_>>();

            sum += fitness.iter().sum::<f64>();
            count += fitness.len();
            let best = fitness
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(i, _)| i);
            if let Some(i) = best
                && round_best
                    .as_ref()
                    .is_none_or(|(current, _)| fitness[i] > current.fitness)
            {
                round_best = Some((
                    ScoredRoster {
                        roster: colony.population()[i].clone(),
                        fitness: fitness[i],
                    },
                    scored[i].1.clone(),
                ));
            }

            let elite = colony.select_elite(&fitness);
            colony.evaporate();
            colony.deposit(&elite, &fitness);
            colony.update_probabilities();
        }

        let Some((best, scores)) = round_best else {
            return Err(EmptyCandidateSet::ConstructionStall { slot: 0 }.into());
        };
        let incumbent = match &self.incumbent {
            Some(current) if best.fitness <= current.value || best.fitness.is_nan() => {
                current.clone()
            }
            _ => Incumbent {
                team: best.roster.resolve(self.candidates)?,
                roster: best.roster,
                value: best.fitness,
                scores,
            },
        };

        #[expect(clippy::cast_precision_loss)]
        let mean = if count == 0 { 0.0 } else { sum / count as f64 };
        let stats = RoundStats {
            round: self.history.len() + 1,
            best: best.fitness,
            mean,
            incumbent: incumbent.value,
        };
        debug!(
            "round {}: best {:.3}, mean {:.3}, incumbent {:.3}",
            stats.round, stats.best, stats.mean, stats.incumbent
        );
        self.history.push(stats);
        self.incumbent = Some(incumbent.clone());
        Ok(incumbent)
    }

    fn score_breakdown(&self, scores: &[f64]) -> Vec<ObjectiveScore> {
        self.objectives
            .iter()
            .zip(scores)
            .map(|(spec, &score)| ObjectiveScore {
                objective: spec.objective,
                weight: spec.q,
                score,
            })
            .collect()
    }

    /// The incumbent as an owned team. Unset move positions are omitted.
    ///
    /// `None` until the first round has run.
    #[must_use]
    pub fn solution(&self) -> Option<Team> {
        self.incumbent.as_ref().map(|incumbent| incumbent.team.clone())
    }

    /// The incumbent in index form.
    #[must_use]
    pub fn incumbent_roster(&self) -> Option<&Roster> {
        self.incumbent.as_ref().map(|incumbent| &incumbent.roster)
    }

    /// Combined fitness of the incumbent.
    #[must_use]
    pub fn objective_value(&self) -> Option<f64> {
        self.incumbent.as_ref().map(|incumbent| incumbent.value)
    }

    /// Per-objective scores of the incumbent, in objective order.
    #[must_use]
    pub fn breakdown(&self) -> Option<Vec<ObjectiveScore>> {
        let incumbent = self.incumbent.as_ref()?;
        Some(self.score_breakdown(&incumbent.scores))
    }

    /// Statistics of every round run so far.
    #[must_use]
    pub fn history(&self) -> &[RoundStats] {
        &self.history
    }
}
