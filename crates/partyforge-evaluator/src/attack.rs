//! Raw offensive output of a team.
//!
//! ```text
//! attack = Σ_slots Σ_moves power × accuracy × stab × offensive_stat
//!
//! where:
//!   stab = 1.5 if the move's type is one of the species' types, 1.0 otherwise
//!   offensive_stat = attack for physical moves, special attack otherwise
//! ```
//!
//! Status moves have zero power and contribute nothing. Unset move positions are skipped.
//! The score is not shifted, so a team without damaging moves scores exactly `0.0`.

use partyforge_catalog::{Loadout, Roster, Species};

/// Damage multiplier for moves that share a type with their user.
pub const STAB_MULTIPLIER: f64 = 1.5;

/// Sums [`loadout_attack`] over every slot of `roster`.
#[must_use]
pub fn team_attack(candidates: &[Species], roster: &Roster) -> f64 {
    roster
        .loadouts(candidates)
        .map(|loadout| loadout_attack(&loadout))
        .sum()
}

/// Attack contribution of a single slot.
#[must_use]
pub fn loadout_attack(loadout: &Loadout<'_>) -> f64 {
    let species = loadout.species;
    loadout
        .moves
        .iter()
        .map(|mv| {
            let stab = if species.has_stab(mv) {
                STAB_MULTIPLIER
            } else {
                1.0
            };
            let stat = f64::from(species.stats.offensive_stat(mv.damage_class));
            mv.expected_power() * stab * stat
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use partyforge_catalog::{BaseStats, DamageClass, ElementType, Move, Slot, SpeciesTypes};

    use super::*;

    fn mv(ty: ElementType, class: DamageClass, power: u32, accuracy: f64) -> Move {
        Move {
            id: 0,
            name: "test".to_owned(),
            ty,
            damage_class: class,
            power,
            accuracy,
            pp: 10,
            priority: 0,
        }
    }

    fn charizard() -> Species {
        Species {
            id: 6,
            name: "charizard".to_owned(),
            stats: BaseStats {
                hp: 78,
                attack: 84,
                defense: 78,
                special_attack: 109,
                special_defense: 85,
                speed: 100,
            },
            types: SpeciesTypes::dual(ElementType::Fire, ElementType::Flying),
            legendary: false,
            mythical: false,
            battle_only: false,
            mega: false,
            games: vec![],
            learnable_moves: vec![
                mv(ElementType::Fire, DamageClass::Special, 90, 1.0),
                mv(ElementType::Ground, DamageClass::Physical, 100, 1.0),
                mv(ElementType::Normal, DamageClass::Status, 0, 1.0),
                mv(ElementType::Rock, DamageClass::Physical, 75, 0.9),
            ],
        }
    }

    #[test]
    fn test_stab_and_stat_selection() {
        let candidates = vec![charizard()];
        let roster: Roster = [Slot::new(0, [0, 1, 2, 3])].into_iter().collect();
        let expected = 90.0 * 1.5 * 109.0 + 100.0 * 84.0 + 0.0 + 75.0 * 0.9 * 84.0;
        assert!((team_attack(&candidates, &roster) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_no_moves_scores_zero() {
        let candidates = vec![charizard()];
        let roster: Roster = [Slot::new(0, [])].into_iter().collect();
        assert!(team_attack(&candidates, &roster).abs() < 1e-12);
        assert!(team_attack(&candidates, &Roster::default()).abs() < 1e-12);
    }
}
