//! End-to-end runs over the 151 Generation-1 species.
//!
//! The fixture carries real base stats and types with a small representative move pool per
//! species.

use std::collections::HashSet;

use partyforge_catalog::{Species, Team};
use partyforge_colony::{
    EmptyCandidateSet, Moaco, MoacoConfig, ObjectiveSpec, OptimizeError, Preselection,
    StopReason,
};
use partyforge_evaluator::{Objective, role::Role};

fn gen1() -> Vec<Species> {
    serde_json::from_str(include_str!("data/gen1.json")).unwrap()
}

fn index_of(candidates: &[Species], name: &str) -> usize {
    candidates
        .iter()
        .position(|species| species.name == name)
        .unwrap_or_else(|| panic!("{name} missing from fixture"))
}

fn config(population_size: usize, seed: u64) -> MoacoConfig {
    MoacoConfig {
        population_size,
        seed: Some(seed),
        ..MoacoConfig::default()
    }
}

fn attack_and_coverage() -> Vec<ObjectiveSpec> {
    vec![
        ObjectiveSpec::new(Objective::Attack, 1.0, 0.1),
        ObjectiveSpec::new(Objective::TeamCoverage, 1.0, 0.1),
    ]
}

#[test]
fn test_fixture_loads() {
    let candidates = gen1();
    assert_eq!(candidates.len(), 151);
    assert_eq!(candidates[0].name, "bulbasaur");
    assert!(candidates.iter().all(|species| !species.learnable_moves.is_empty()));
}

#[test]
fn test_attack_and_coverage_over_gen1() {
    let candidates = gen1();
    let mut moaco = Moaco::new(
        &candidates,
        &attack_and_coverage(),
        &Preselection::new(),
        config(50, 2024),
    )
    .unwrap();
    let solution = moaco.optimize(5, None).unwrap();

    assert_eq!(solution.rounds, 5);
    assert_eq!(solution.stop_reason, StopReason::IterationLimit);
    let members = solution.team.members();
    assert_eq!(members.len(), 6);
    let ids = members.iter().map(|member| member.id).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 6);
    assert!(members.iter().all(|member| member.moves.len() <= 4));
    assert!(solution.value > 0.0);
    assert_eq!(solution.breakdown.len(), 2);
    assert_eq!(solution.breakdown[0].objective, Objective::Attack);
}

#[test]
fn test_every_round_keeps_invariants() {
    let candidates = gen1();
    let snorlax = index_of(&candidates, "snorlax");
    let preselection = Preselection::new().lock(3, snorlax, []);
    let mut moaco = Moaco::new(
        &candidates,
        &attack_and_coverage(),
        &preselection,
        config(40, 7),
    )
    .unwrap();

    for _ in 0..4 {
        moaco.optimize(1, None).unwrap();
        for colony in moaco.colonies() {
            let sum: f64 = colony.species_probabilities().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(colony.species_pheromones().iter().all(|&ph| ph >= 0.0));
            for species in 0..candidates.len() {
                assert!(colony.move_pheromones(species).iter().all(|&ph| ph >= 0.0));
            }
            for roster in colony.population() {
                assert!(roster.is_full());
                assert!(roster.has_distinct_species());
                assert_eq!(roster.slots()[3].species(), snorlax);
            }
        }
    }
}

#[test]
fn test_too_few_candidates() {
    let candidates = gen1().into_iter().take(5).collect::<Vec<_>>();
    let err = Moaco::new(
        &candidates,
        &attack_and_coverage(),
        &Preselection::new(),
        config(50, 0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        OptimizeError::EmptyCandidateSet(EmptyCandidateSet::TooFewSpecies { available: 5 })
    );
}

#[test]
fn test_locked_slot_keeps_pre_chosen_moves() {
    let candidates = gen1();
    let starmie = index_of(&candidates, "starmie");
    let learnable = &candidates[starmie].learnable_moves;
    let recover = learnable.iter().position(|mv| mv.name == "recover").unwrap();
    let surf = learnable.iter().position(|mv| mv.name == "surf").unwrap();

    let preselection = Preselection::new().lock(0, starmie, [recover, surf]);
    let mut moaco = Moaco::new(
        &candidates,
        &attack_and_coverage(),
        &preselection,
        config(30, 11),
    )
    .unwrap();
    let solution = moaco.optimize(3, None).unwrap();

    let lead = &solution.team.members()[0];
    assert_eq!(lead.id, candidates[starmie].id);
    assert_eq!(lead.moves.len(), 4);
    assert_eq!(lead.moves[0].name, "recover");
    assert_eq!(lead.moves[1].name, "surf");
}

#[test]
fn test_incumbent_is_monotonic_across_calls() {
    let candidates = gen1();
    let mut moaco = Moaco::new(
        &candidates,
        &attack_and_coverage(),
        &Preselection::new(),
        config(30, 99),
    )
    .unwrap();
    let mut previous = 0.0;
    for _ in 0..4 {
        let solution = moaco.optimize(2, None).unwrap();
        assert!(solution.value >= previous);
        previous = solution.value;
    }
    assert_eq!(moaco.history().len(), 8);
}

#[test]
fn test_role_objective_finds_spinner() {
    let candidates = gen1();
    let objectives = [ObjectiveSpec::new(Objective::Role(Role::Spinner), 1.0, 0.1)];
    let mut moaco = Moaco::new(
        &candidates,
        &objectives,
        &Preselection::new().bias(5, Role::Spinner, 4.0),
        config(50, 5),
    )
    .unwrap();
    let solution = moaco.optimize(5, None).unwrap();
    assert!((solution.value - 2.0).abs() < 1e-12);
    assert!(
        solution
            .team
            .members()
            .iter()
            .any(|member| member.moves.iter().any(|mv| mv.name == "rapid-spin"))
    );
}

#[test]
fn test_team_json_roundtrip() {
    let candidates = gen1();
    let mut moaco = Moaco::new(
        &candidates,
        &attack_and_coverage(),
        &Preselection::new(),
        config(20, 3),
    )
    .unwrap();
    let team = moaco.optimize(2, None).unwrap().team;

    let json = serde_json::to_string(&team).unwrap();
    let parsed: Team = serde_json::from_str(&json).unwrap();
    assert_eq!(
        parsed.species_ids().collect::<Vec<_>>(),
        team.species_ids().collect::<Vec<_>>()
    );
    for (a, b) in parsed.members().iter().zip(team.members()) {
        assert_eq!(
            a.moves.iter().map(|mv| mv.id).collect::<Vec<_>>(),
            b.moves.iter().map(|mv| mv.id).collect::<Vec<_>>()
        );
    }
}
