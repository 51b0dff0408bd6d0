//! Per-species building blocks for role scores.
//!
//! Each predicate returns `1.0`/`0.0` for boolean checks or a non-negative continuous value,
//! so roles can be composed by multiplying (all of) or taking the maximum (any of).

use partyforge_catalog::{DamageClass, ElementType, Move, Species, Stat};

/// Scale that maps a base stat to a role score (a stat of 100 scores `1.0`).
pub const STAT_SCALE: f64 = 100.0;

/// `1.0` if any of `moves` is named in `names`.
#[must_use]
pub fn has_move_in(moves: &[&Move], names: &[&str]) -> f64 {
    bool_score(moves.iter().any(|mv| names.contains(&mv.name.as_str())))
}

/// `1.0` if the species has any of `types`.
#[must_use]
pub fn has_type_in(species: &Species, types: &[ElementType]) -> f64 {
    bool_score(types.iter().any(|&ty| species.types.contains(ty)))
}

/// Mean of the given stats divided by [`STAT_SCALE`].
///
/// Values above `1.0` mean the species is above the threshold.
#[must_use]
pub fn stat_score(species: &Species, stats: &[Stat]) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    let sum: f64 = stats
        .iter()
        .map(|&stat| f64::from(species.stats.get(stat)) / STAT_SCALE)
        .sum();
    #[expect(clippy::cast_precision_loss)]
    let len = stats.len() as f64;
    sum / len
}

/// Number of damaging moves of `class`, capped at four.
#[must_use]
pub fn damaging_move_count(moves: &[&Move], class: DamageClass) -> u32 {
    let count = moves
        .iter()
        .filter(|mv| mv.damage_class == class && mv.is_damaging())
        .take(4)
        .count();
    u32::try_from(count).unwrap_or(4)
}

/// `1.0` if any move has positive priority.
#[must_use]
pub fn has_priority_move(moves: &[&Move]) -> f64 {
    bool_score(moves.iter().any(|mv| mv.priority > 0))
}

fn bool_score(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use partyforge_catalog::{BaseStats, SpeciesTypes};

    use super::*;

    fn mv(name: &str, class: DamageClass, power: u32, priority: i8) -> Move {
        Move {
            id: 0,
            name: name.to_owned(),
            ty: ElementType::Normal,
            damage_class: class,
            power,
            accuracy: 1.0,
            pp: 10,
            priority,
        }
    }

    fn species() -> Species {
        Species {
            id: 143,
            name: "snorlax".to_owned(),
            stats: BaseStats {
                hp: 160,
                attack: 110,
                defense: 65,
                special_attack: 65,
                special_defense: 110,
                speed: 30,
            },
            types: SpeciesTypes::single(ElementType::Normal),
            legendary: false,
            mythical: false,
            battle_only: false,
            mega: false,
            games: vec![],
            learnable_moves: vec![],
        }
    }

    #[test]
    fn test_has_move_in() {
        let rest = mv("rest", DamageClass::Status, 0, 0);
        let body_slam = mv("body-slam", DamageClass::Physical, 85, 0);
        assert!((has_move_in(&[&rest, &body_slam], &["rest", "sleep-talk"]) - 1.0).abs() < 1e-12);
        assert!(has_move_in(&[&body_slam], &["rest"]).abs() < 1e-12);
        assert!(has_move_in(&[], &["rest"]).abs() < 1e-12);
    }

    #[test]
    fn test_has_type_in() {
        let snorlax = species();
        let ghost_or_normal = has_type_in(&snorlax, &[ElementType::Ghost, ElementType::Normal]);
        assert!((ghost_or_normal - 1.0).abs() < 1e-12);
        assert!(has_type_in(&snorlax, &[ElementType::Ghost]).abs() < 1e-12);
    }

    #[test]
    fn test_stat_score() {
        let snorlax = species();
        assert!((stat_score(&snorlax, &[Stat::Hp]) - 1.6).abs() < 1e-12);
        let bulk = stat_score(&snorlax, &[Stat::Defense, Stat::SpecialDefense]);
        assert!((bulk - 0.875).abs() < 1e-12);
        assert!(stat_score(&snorlax, &[]).abs() < 1e-12);
    }

    #[test]
    fn test_damaging_move_count_ignores_status() {
        let a = mv("a", DamageClass::Physical, 80, 0);
        let b = mv("b", DamageClass::Physical, 0, 0);
        let c = mv("c", DamageClass::Special, 90, 0);
        assert_eq!(damaging_move_count(&[&a, &b, &c], DamageClass::Physical), 1);
        assert_eq!(damaging_move_count(&[&a, &a, &a, &a, &a], DamageClass::Physical), 4);
    }

    #[test]
    fn test_has_priority_move() {
        let quick = mv("quick-attack", DamageClass::Physical, 40, 1);
        let slow = mv("tackle", DamageClass::Physical, 40, 0);
        assert!((has_priority_move(&[&slow, &quick]) - 1.0).abs() < 1e-12);
        assert!(has_priority_move(&[&slow]).abs() < 1e-12);
    }
}
