use partyforge_catalog::RosterIndexError;

/// Errors reported by [`Colony`](crate::Colony) and [`Moaco`](crate::Moaco).
///
/// Errors are raised before any state is changed, or abort the current round without
/// touching the incumbent. No partial team is ever returned.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum OptimizeError {
    #[display("not enough candidates to build a team")]
    EmptyCandidateSet(EmptyCandidateSet),
    #[display("invalid optimizer parameter")]
    InvalidParameter(InvalidParameter),
    #[display("best team refers to a species or move outside the candidates")]
    InvalidRoster(RosterIndexError),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EmptyCandidateSet {
    #[display("{available} candidate species cannot fill a team of six")]
    TooFewSpecies { available: usize },
    #[display("no objective selected")]
    NoObjectives,
    #[display("no unused species left for slot {slot}")]
    ConstructionStall { slot: usize },
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidParameter {
    #[display("population size must be positive")]
    PopulationSize,
    #[display("iteration count must be positive")]
    Iterations,
    #[display("alpha must be finite and non-negative, got {value}")]
    Alpha { value: f64 },
    #[display("beta must be finite and non-negative, got {value}")]
    Beta { value: f64 },
    #[display("deposit constant must be finite and positive, got {value}")]
    DepositConstant { value: f64 },
    #[display("evaporation rate must be within [0, 1], got {value}")]
    EvaporationRate { value: f64 },
    #[display("slot {slot} is out of range (a team has six slots)")]
    Slot { slot: usize },
    #[display("slot {slot} is locked more than once")]
    DuplicateSlot { slot: usize },
    #[display("slot {slot} locks species #{species}, which is not a candidate")]
    Species { slot: usize, species: usize },
    #[display("species #{species} is locked in more than one slot")]
    DuplicateSpecies { species: usize },
    #[display("slot {slot} pre-selects {count} moves (at most 4 allowed)")]
    TooManyMoves { slot: usize, count: usize },
    #[display("slot {slot} pre-selects move #{index}, which its species cannot learn")]
    Move { slot: usize, index: usize },
    #[display("slot {slot} pre-selects move #{index} twice")]
    DuplicateMove { slot: usize, index: usize },
    #[display("slot {slot} pre-selects moves without a species")]
    MovesWithoutSpecies { slot: usize },
    #[display("slot {slot} has more than one role bias")]
    DuplicateBias { slot: usize },
    #[display("role bias weight of slot {slot} must be finite and non-negative, got {weight}")]
    BiasWeight { slot: usize, weight: f64 },
}

impl From<EmptyCandidateSet> for OptimizeError {
    fn from(err: EmptyCandidateSet) -> Self {
        Self::EmptyCandidateSet(err)
    }
}

impl From<RosterIndexError> for OptimizeError {
    fn from(err: RosterIndexError) -> Self {
        Self::InvalidRoster(err)
    }
}

impl From<InvalidParameter> for OptimizeError {
    fn from(err: InvalidParameter) -> Self {
        Self::InvalidParameter(err)
    }
}
