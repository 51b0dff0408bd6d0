use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, bail};
use chrono::Utc;
use log::info;
use partyforge_catalog::Species;
use partyforge_colony::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_DEPOSIT_CONSTANT, DEFAULT_EVAPORATION_RATE,
    DEFAULT_ITERATIONS, DEFAULT_POPULATION_SIZE, Moaco, MoacoConfig, ObjectiveSpec, Preselection,
    WeightedProduct, WeightedSum,
};
use partyforge_evaluator::{Objective, role::Role};

use crate::{
    model::recommendation::{Aggregation, Recommendation, SearchParams},
    util::{self, Output},
};

/// `KIND[=WEIGHT]`, e.g. `attack=2` or `role:spinner`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ObjectiveArg {
    pub(crate) objective: Objective,
    pub(crate) weight: f64,
}

impl FromStr for ObjectiveArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, weight) = match s.split_once('=') {
            Some((kind, weight)) => (kind, parse_weight(weight)?),
            None => (s, 1.0),
        };
        let objective = kind.parse()?;
        Ok(Self { objective, weight })
    }
}

/// `SLOT:SPECIES_ID[:MOVE_ID,...]`, e.g. `0:121:57,105`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LockArg {
    pub(crate) slot: usize,
    pub(crate) species_id: u32,
    pub(crate) move_ids: Vec<u32>,
}

impl FromStr for LockArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(slot), Some(species_id)) = (parts.next(), parts.next()) else {
            bail!("expected SLOT:SPECIES_ID[:MOVE_ID,...], got `{s}`");
        };
        let slot = slot
            .trim()
            .parse()
            .with_context(|| format!("invalid slot `{slot}`"))?;
        let species_id = species_id
            .trim()
            .parse()
            .with_context(|| format!("invalid species id `{species_id}`"))?;
        let move_ids = match parts.next() {
            Some(moves) if !moves.trim().is_empty() => moves
                .split(',')
                .map(|id| {
                    id.trim()
                        .parse()
                        .with_context(|| format!("invalid move id `{id}`"))
                })
                .collect::<anyhow::Result<Vec<_>>>()?,
            _ => vec![],
        };
        Ok(Self {
            slot,
            species_id,
            move_ids,
        })
    }
}

/// `SLOT:ROLE=WEIGHT`, e.g. `5:spinner=2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BiasArg {
    pub(crate) slot: usize,
    pub(crate) role: Role,
    pub(crate) weight: f64,
}

impl FromStr for BiasArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((slot, rest)) = s.split_once(':') else {
            bail!("expected SLOT:ROLE=WEIGHT, got `{s}`");
        };
        let (role, weight) = match rest.split_once('=') {
            Some((role, weight)) => (role, parse_weight(weight)?),
            None => (rest, 1.0),
        };
        let slot = slot
            .trim()
            .parse()
            .with_context(|| format!("invalid slot `{slot}`"))?;
        let role = role.parse()?;
        Ok(Self { slot, role, weight })
    }
}

fn parse_weight(s: &str) -> anyhow::Result<f64> {
    s.trim()
        .parse()
        .with_context(|| format!("invalid weight `{s}`"))
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// JSON file holding the already-filtered candidate species
    #[arg(long)]
    catalog: PathBuf,
    /// Objective as KIND[=WEIGHT] (attack, team-coverage, self-coverage, role:<name>).
    /// Defaults to attack=1 and team-coverage=1
    #[arg(long = "objective", value_name = "KIND=WEIGHT")]
    pub(crate) objectives: Vec<ObjectiveArg>,
    /// Locks a species (and optionally moves) into a slot (0-5), by catalog ids
    #[arg(long = "lock", value_name = "SLOT:SPECIES_ID[:MOVE_ID,...]")]
    pub(crate) locks: Vec<LockArg>,
    /// Favours species and moves that fit a role in an open slot
    #[arg(long = "role-bias", value_name = "SLOT:ROLE=WEIGHT")]
    pub(crate) biases: Vec<BiasArg>,
    /// Teams built per colony per round
    #[arg(long, default_value_t = DEFAULT_POPULATION_SIZE)]
    population: usize,
    /// Maximum number of rounds
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub(crate) iterations: usize,
    /// Pheromone exponent
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,
    /// Heuristic exponent
    #[arg(long, default_value_t = DEFAULT_BETA)]
    beta: f64,
    /// Base deposit constant, multiplied by each objective's weight
    #[arg(long, default_value_t = DEFAULT_DEPOSIT_CONSTANT)]
    q: f64,
    /// Evaporation rate
    #[arg(long, default_value_t = DEFAULT_EVAPORATION_RATE)]
    rho: f64,
    /// Stop after this many seconds even if rounds remain
    #[arg(long, value_name = "SECS")]
    time_limit: Option<f64>,
    /// Master seed. A random one is drawn and recorded when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// How per-objective scores are combined
    #[arg(long, value_enum, default_value_t = Aggregation::WeightedSum)]
    aggregation: Aggregation,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl SuggestArg {
    fn objective_specs(&self) -> Vec<ObjectiveSpec> {
        let default_objectives = [
            ObjectiveArg {
                objective: Objective::Attack,
                weight: 1.0,
            },
            ObjectiveArg {
                objective: Objective::TeamCoverage,
                weight: 1.0,
            },
        ];
        let objectives = if self.objectives.is_empty() {
            &default_objectives[..]
        } else {
            &self.objectives
        };
        objectives
            .iter()
            .map(|arg| ObjectiveSpec::new(arg.objective, self.q * arg.weight, self.rho))
            .collect()
    }

    fn time_limit(&self) -> anyhow::Result<Option<Duration>> {
        self.time_limit
            .map(|secs| {
                Duration::try_from_secs_f64(secs)
                    .with_context(|| format!("invalid time limit: {secs}"))
            })
            .transpose()
    }
}

/// Maps catalog ids in locks to candidate and learnable-move indices.
pub(crate) fn build_preselection(
    candidates: &[Species],
    locks: &[LockArg],
    biases: &[BiasArg],
) -> anyhow::Result<Preselection> {
    let mut preselection = Preselection::new();
    for lock in locks {
        let index = candidates
            .iter()
            .position(|species| species.id == lock.species_id)
            .with_context(|| format!("Species {} is not in the catalog", lock.species_id))?;
        let species = &candidates[index];
        let moves = lock
            .move_ids
            .iter()
            .map(|&move_id| {
                species
                    .learnable_moves
                    .iter()
                    .position(|mv| mv.id == move_id)
                    .with_context(|| format!("Move {move_id} is not learnable by {}", species.name))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        preselection = preselection.lock(lock.slot, index, moves);
    }
    for bias in biases {
        preselection = preselection.bias(bias.slot, bias.role, bias.weight);
    }
    Ok(preselection)
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let candidates: Vec<Species> = util::read_json_file("catalog", &arg.catalog)?;
    info!(
        "loaded {} candidate species from {}",
        candidates.len(),
        arg.catalog.display()
    );

    let objectives = arg.objective_specs();
    let preselection = build_preselection(&candidates, &arg.locks, &arg.biases)?;
    let time_limit = arg.time_limit()?;
    let seed = arg.seed.unwrap_or_else(rand::random);
    let config = MoacoConfig {
        population_size: arg.population,
        alpha: arg.alpha,
        beta: arg.beta,
        seed: Some(seed),
    };

    let moaco = Moaco::new(&candidates, &objectives, &preselection, config)
        .context("Failed to set up the optimizer")?;
    let mut moaco = match arg.aggregation {
        Aggregation::WeightedSum => moaco.with_aggregation(WeightedSum),
        Aggregation::WeightedProduct => moaco.with_aggregation(WeightedProduct),
    };
    let solution = moaco
        .optimize(arg.iterations, time_limit)
        .context("Failed to optimize team")?;

    let recommendation = Recommendation {
        generated_at: Utc::now(),
        catalog: arg.catalog.display().to_string(),
        candidates: candidates.len(),
        params: SearchParams {
            objectives,
            population_size: arg.population,
            alpha: arg.alpha,
            beta: arg.beta,
            iterations: arg.iterations,
            time_limit_secs: arg.time_limit,
            seed,
            aggregation: arg.aggregation,
        },
        value: solution.value,
        breakdown: solution.breakdown,
        rounds: solution.rounds,
        stop_reason: solution.stop_reason,
        elapsed_secs: solution.elapsed.as_secs_f64(),
        history: moaco.history().to_vec(),
        team: solution.team,
    };
    Output::save_json(&recommendation, arg.output.clone())?;
    Ok(())
}
