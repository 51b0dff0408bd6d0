//! Type coverage objectives.
//!
//! # Team Coverage (defensive)
//!
//! Rewards teams whose members cover each other's weaknesses:
//!
//! ```text
//! team_coverage = covered_weaknesses × distinct_types + 1
//!
//! where:
//!   covered_weaknesses = Σ_members Σ_t weak_m(t) × (resisters(t) - resists_m(t))
//!   weak_m(t)    = 1 if member m takes more than neutral damage from type t
//!   resists_m(t) = 1 if member m takes less than neutral damage from type t (immunity included)
//!   resisters(t) = Σ_m resists_m(t)
//! ```
//!
//! Multiplying by the number of distinct types on the team favours type diversity.
//!
//! # Self Coverage (offensive)
//!
//! Rewards members whose own moves hit many types super effectively:
//!
//! ```text
//! self_coverage = mean over slots of (|{d : some damaging move hits d for > 1×}| / 18) + 1
//! ```
//!
//! Both scores are shifted by `+1` so they stay strictly positive and usable in a weighted
//! product.

use partyforge_catalog::{ElementType, Loadout, Roster, Species};

const TYPE_COUNT: f64 = 18.0;

/// Defensive coverage score of `roster`.
#[must_use]
pub fn team_coverage(candidates: &[Species], roster: &Roster) -> f64 {
    let profiles = roster
        .loadouts(candidates)
        .map(|loadout| loadout.species.types.defensive_profile())
        .collect::<Vec<_>>();

    let mut resisters = [0_u32; ElementType::LEN];
    for profile in &profiles {
        for (count, &multiplier) in resisters.iter_mut().zip(profile) {
            *count += u32::from(multiplier < 1.0);
        }
    }

    let covered_weaknesses: u32 = profiles
        .iter()
        .map(|profile| {
            profile
                .iter()
                .zip(&resisters)
                .filter(|&(&multiplier, _)| multiplier > 1.0)
                .map(|(&multiplier, &count)| count - u32::from(multiplier < 1.0))
                .sum::<u32>()
        })
        .sum();

    f64::from(covered_weaknesses) * f64::from(distinct_types(candidates, roster)) + 1.0
}

/// Number of distinct element types among the roster's species.
#[must_use]
pub fn distinct_types(candidates: &[Species], roster: &Roster) -> u32 {
    let mut seen = [false; ElementType::LEN];
    for loadout in roster.loadouts(candidates) {
        for ty in loadout.species.types.iter() {
            seen[ty.index()] = true;
        }
    }
    seen.into_iter().map(u32::from).sum()
}

/// Offensive coverage score of `roster`.
#[must_use]
pub fn self_coverage(candidates: &[Species], roster: &Roster) -> f64 {
    let fractions = roster
        .loadouts(candidates)
        .map(|loadout| loadout_coverage(&loadout))
        .collect::<Vec<_>>();
    if fractions.is_empty() {
        return 1.0;
    }
    #[expect(clippy::cast_precision_loss)]
    let len = fractions.len() as f64;
    fractions.iter().sum::<f64>() / len + 1.0
}

/// Fraction of the defending types a slot's damaging moves hit super effectively.
#[must_use]
pub fn loadout_coverage(loadout: &Loadout<'_>) -> f64 {
    #[expect(clippy::cast_precision_loss)]
    let hit = ElementType::ALL
        .into_iter()
        .filter(|&defender| {
            loadout
                .moves
                .iter()
                .filter(|mv| mv.is_damaging())
                .any(|mv| mv.ty.effectiveness_against(defender) > 1.0)
        })
        .count() as f64;
    hit / TYPE_COUNT
}
