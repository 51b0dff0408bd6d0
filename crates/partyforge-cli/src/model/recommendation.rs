use chrono::{DateTime, Utc};
use partyforge_catalog::Team;
use partyforge_colony::{ObjectiveScore, ObjectiveSpec, RoundStats, StopReason};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    /// Sum of scores weighted by each objective's deposit constant
    WeightedSum,
    /// Weighted geometric mean of scores
    WeightedProduct,
}

/// Settings a recommendation was produced with, enough to rerun it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub objectives: Vec<ObjectiveSpec>,
    pub population_size: usize,
    pub alpha: f64,
    pub beta: f64,
    pub iterations: usize,
    pub time_limit_secs: Option<f64>,
    pub seed: u64,
    pub aggregation: Aggregation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub generated_at: DateTime<Utc>,
    pub catalog: String,
    pub candidates: usize,
    pub params: SearchParams,
    pub value: f64,
    pub breakdown: Vec<ObjectiveScore>,
    pub rounds: usize,
    pub stop_reason: StopReason,
    pub elapsed_secs: f64,
    pub history: Vec<RoundStats>,
    pub team: Team,
}
