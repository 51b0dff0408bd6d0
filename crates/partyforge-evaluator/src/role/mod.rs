//! Team role archetypes.
//!
//! A [`Role`] scores how well one species with a given moveset fills a competitive role
//! (tank, sweeper, spinner, hazard setter, ...). Scores are non-negative; `0.0` means the
//! member does not fill the role at all. Roles are built from the predicates in
//! [`predicate`], composed by multiplication ("needs all of") or maximum ("any of").
//!
//! Besides scoring a loadout, each role exposes two static affinities used as heuristic
//! boosts by the optimizer:
//!
//! - [`Role::species_affinity`] - score against the species' whole learnable list
//! - [`Role::move_affinity`] - whether a single move contributes to the role

use std::{fmt, str::FromStr};

use partyforge_catalog::{DamageClass, ElementType, Loadout, Move, Species, Stat};
use serde::{Deserialize, Serialize};

use self::predicate::{
    damaging_move_count, has_move_in, has_priority_move, has_type_in, stat_score,
};

pub mod predicate;

const CLERIC_MOVES: &[&str] = &[
    "heal-bell",
    "aromatherapy",
    "wish",
    "soft-boiled",
    "roost",
    "recover",
    "morning-sun",
    "moonlight",
    "synthesis",
    "shore-up",
    "slack-off",
    "rest",
];
const SCREEN_MOVES: &[&str] = &["light-screen", "reflect"];
const WISH: &[&str] = &["wish"];
const PHAZING_MOVES: &[&str] = &[
    "roar",
    "whirlwind",
    "dragon-tail",
    "circle-throw",
    "haze",
    "perish-song",
];
const STALLBREAKING_MOVES: &[&str] = &[
    "taunt",
    "toxic",
    "will-o-wisp",
    "encore",
    "disable",
    "trick",
    "knock-off",
];
const PIVOT_MOVES: &[&str] = &[
    "u-turn",
    "volt-switch",
    "baton-pass",
    "parting-shot",
    "flip-turn",
    "chilly-reception",
    "teleport",
];
const SPINNING_MOVES: &[&str] = &["rapid-spin", "defog"];
const HAZARD_MOVES: &[&str] = &[
    "stealth-rock",
    "spikes",
    "toxic-spikes",
    "sticky-web",
    "ceaseless-edge",
];
const LEAD_HAZARD_MOVES: &[&str] = &["stealth-rock", "spikes", "toxic-spikes", "sticky-web"];
const TAUNT: &[&str] = &["taunt"];
const SLEEP_ABSORBING_MOVES: &[&str] = &["rest", "sleep-talk"];
const RECOVERY_MOVES: &[&str] = &[
    "recover",
    "roost",
    "soft-boiled",
    "synthesis",
    "moonlight",
    "morning-sun",
    "shore-up",
    "slack-off",
];

/// Sweepers score a quarter per matching damaging move.
const SWEEPER_MOVE_WEIGHT: f64 = 0.25;

/// A competitive role archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Knows a healing or team-curing move.
    Cleric,
    /// Knows a screen (Light Screen or Reflect) and Wish.
    DualScreener,
    /// Can force the opponent out.
    Phazer,
    /// Has tools to break defensive cores.
    Stallbreaker,
    /// Attacks and switches out in one move.
    OffensivePivot,
    /// High attack with physical damaging moves.
    PhysicalSweeper,
    /// High special attack with special damaging moves.
    SpecialSweeper,
    /// Removes entry hazards.
    Spinner,
    /// Has a priority move. Zero speed disqualifies.
    RevengeKiller,
    /// Sets entry hazards.
    HazardSetter,
    /// Ghost type, so hazard removal by spinning fails against it.
    SpinBlocker,
    SleepAbsorber,
    PoisonAbsorber,
    BurnAbsorber,
    FreezeAbsorber,
    ParalysisAbsorber,
    /// Fast hazard setter with Taunt.
    SuicideLead,
    /// High defense or special defense.
    Tank,
    ReliableRecovery,
    /// Tank with reliable recovery and high HP.
    Wall,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown role: {name}")]
pub struct ParseRoleError {
    name: String,
}

impl Role {
    pub const ALL: [Self; 20] = [
        Self::Cleric,
        Self::DualScreener,
        Self::Phazer,
        Self::Stallbreaker,
        Self::OffensivePivot,
        Self::PhysicalSweeper,
        Self::SpecialSweeper,
        Self::Spinner,
        Self::RevengeKiller,
        Self::HazardSetter,
        Self::SpinBlocker,
        Self::SleepAbsorber,
        Self::PoisonAbsorber,
        Self::BurnAbsorber,
        Self::FreezeAbsorber,
        Self::ParalysisAbsorber,
        Self::SuicideLead,
        Self::Tank,
        Self::ReliableRecovery,
        Self::Wall,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cleric => "cleric",
            Self::DualScreener => "dual-screener",
            Self::Phazer => "phazer",
            Self::Stallbreaker => "stallbreaker",
            Self::OffensivePivot => "offensive-pivot",
            Self::PhysicalSweeper => "physical-sweeper",
            Self::SpecialSweeper => "special-sweeper",
            Self::Spinner => "spinner",
            Self::RevengeKiller => "revenge-killer",
            Self::HazardSetter => "hazard-setter",
            Self::SpinBlocker => "spin-blocker",
            Self::SleepAbsorber => "sleep-absorber",
            Self::PoisonAbsorber => "poison-absorber",
            Self::BurnAbsorber => "burn-absorber",
            Self::FreezeAbsorber => "freeze-absorber",
            Self::ParalysisAbsorber => "paralysis-absorber",
            Self::SuicideLead => "suicide-lead",
            Self::Tank => "tank",
            Self::ReliableRecovery => "reliable-recovery",
            Self::Wall => "wall",
        }
    }

    /// Scores `species` carrying `moves` for this role.
    #[must_use]
    pub fn score(self, species: &Species, moves: &[&Move]) -> f64 {
        match self {
            Self::Cleric => has_move_in(moves, CLERIC_MOVES),
            Self::DualScreener => has_move_in(moves, SCREEN_MOVES) * has_move_in(moves, WISH),
            Self::Phazer => has_move_in(moves, PHAZING_MOVES),
            Self::Stallbreaker => has_move_in(moves, STALLBREAKING_MOVES),
            Self::OffensivePivot => has_move_in(moves, PIVOT_MOVES),
            Self::PhysicalSweeper => {
                stat_score(species, &[Stat::Attack])
                    * f64::from(damaging_move_count(moves, DamageClass::Physical))
                    * SWEEPER_MOVE_WEIGHT
            }
            Self::SpecialSweeper => {
                stat_score(species, &[Stat::SpecialAttack])
                    * f64::from(damaging_move_count(moves, DamageClass::Special))
                    * SWEEPER_MOVE_WEIGHT
            }
            Self::Spinner => has_move_in(moves, SPINNING_MOVES),
            Self::RevengeKiller => {
                if stat_score(species, &[Stat::Speed]) > 0.0 {
                    has_priority_move(moves)
                } else {
                    0.0
                }
            }
            Self::HazardSetter => has_move_in(moves, HAZARD_MOVES),
            Self::SpinBlocker => has_type_in(species, &[ElementType::Ghost]),
            Self::SleepAbsorber => has_move_in(moves, SLEEP_ABSORBING_MOVES),
            Self::PoisonAbsorber => {
                has_type_in(species, &[ElementType::Poison, ElementType::Steel])
            }
            Self::BurnAbsorber => has_type_in(species, &[ElementType::Fire]),
            Self::FreezeAbsorber => has_type_in(species, &[ElementType::Ice]),
            Self::ParalysisAbsorber => has_type_in(species, &[ElementType::Electric]),
            Self::SuicideLead => {
                has_move_in(moves, LEAD_HAZARD_MOVES)
                    * has_move_in(moves, TAUNT)
                    * stat_score(species, &[Stat::Speed])
            }
            Self::Tank => f64::max(
                stat_score(species, &[Stat::Defense]),
                stat_score(species, &[Stat::SpecialDefense]),
            ),
            Self::ReliableRecovery => has_move_in(moves, RECOVERY_MOVES),
            Self::Wall => {
                Self::Tank.score(species, moves)
                    * Self::ReliableRecovery.score(species, moves)
                    * stat_score(species, &[Stat::Hp])
            }
        }
    }

    /// Scores a slot's loadout for this role.
    #[must_use]
    pub fn score_loadout(self, loadout: &Loadout<'_>) -> f64 {
        self.score(loadout.species, &loadout.moves)
    }

    /// Scores the species as if it knew its whole learnable list.
    #[must_use]
    pub fn species_affinity(self, species: &Species) -> f64 {
        let moves = species.learnable_moves.iter().collect::<Vec<_>>();
        self.score(species, &moves)
    }

    /// `1.0` if learning `mv` contributes to this role, `0.0` otherwise.
    ///
    /// Roles decided by type or stats alone never favour a particular move.
    #[must_use]
    pub fn move_affinity(self, mv: &Move) -> f64 {
        let in_set = |names: &[&str]| names.contains(&mv.name.as_str());
        let contributes = match self {
            Self::Cleric => in_set(CLERIC_MOVES),
            Self::DualScreener => in_set(SCREEN_MOVES) || in_set(WISH),
            Self::Phazer => in_set(PHAZING_MOVES),
            Self::Stallbreaker => in_set(STALLBREAKING_MOVES),
            Self::OffensivePivot => in_set(PIVOT_MOVES),
            Self::PhysicalSweeper => mv.damage_class == DamageClass::Physical && mv.is_damaging(),
            Self::SpecialSweeper => mv.damage_class == DamageClass::Special && mv.is_damaging(),
            Self::Spinner => in_set(SPINNING_MOVES),
            Self::RevengeKiller => mv.priority > 0,
            Self::HazardSetter => in_set(HAZARD_MOVES),
            Self::SleepAbsorber => in_set(SLEEP_ABSORBING_MOVES),
            Self::SuicideLead => in_set(LEAD_HAZARD_MOVES) || in_set(TAUNT),
            Self::ReliableRecovery | Self::Wall => in_set(RECOVERY_MOVES),
            Self::SpinBlocker
            | Self::PoisonAbsorber
            | Self::BurnAbsorber
            | Self::FreezeAbsorber
            | Self::ParalysisAbsorber
            | Self::Tank => false,
        };
        if contributes { 1.0 } else { 0.0 }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|role| role.name() == normalized)
            .ok_or_else(|| ParseRoleError { name: s.to_owned() })
    }
}
