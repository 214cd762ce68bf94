//! Integration tests for the BallStars planner
//!
//! Tests the full stack: core schedule model, search operators, drivers,
//! and the companion team balancer.

use ballstars_core::{
    round_robin_matchups, CategoryCaps, MatchPool, Schedule, ScheduleParams,
};
use ballstars_evolve::{
    anneal, granular_mutate, AnnealingConfig, OffspringStrategy, Planner, PlannerConfig,
    SelectionStrategy,
};
use ballstars_teams::{build_teams, parse_roster_str, teams_to_csv, TeamBuilderConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn planner_config(population: usize, generations: usize) -> PlannerConfig {
    PlannerConfig {
        population_size: population,
        max_generations: generations,
        offspring_strategy: OffspringStrategy::Crossover,
        selection: SelectionStrategy::Naive,
        ..Default::default()
    }
}

// ============================================================================
// FULL-STACK SCHEDULE SEARCH
// ============================================================================

#[test]
fn test_planner_improves_over_random_start() {
    let params = ScheduleParams::new(6, 5, 8).unwrap();
    let pool = MatchPool::default();
    let caps = CategoryCaps::default();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    let mut baseline = Schedule::random(&params, &pool, &caps, None, &mut rng).unwrap();
    let baseline_fitness = baseline.evaluate(params.avg_players_per_team);

    let planner = Planner::new(params, pool, caps, planner_config(32, 20));
    let result = planner.run(&mut rng).unwrap();

    assert!(result.best_fitness <= baseline_fitness);
    assert_eq!(result.best_fitness_history.len(), result.generations_run + 1);
}

#[test]
fn test_search_result_statistics_are_consistent() {
    let params = ScheduleParams::new(4, 3, 6).unwrap();
    let planner = Planner::new(
        params,
        MatchPool::default(),
        CategoryCaps::default(),
        planner_config(16, 10),
    );
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let result = planner.run(&mut rng).unwrap();
    let mut rebuilt = result.best.clone();
    rebuilt.rebuild_statistics();
    assert_eq!(rebuilt.evaluate(6), result.best_fitness);
}

#[test]
fn test_annealing_after_mutation_storm_keeps_invariants() {
    let params = ScheduleParams::new(5, 4, 8).unwrap();
    let pool = MatchPool::default();
    let caps = CategoryCaps::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let mut start = Schedule::random(&params, &pool, &caps, None, &mut rng).unwrap();
    for _ in 0..50 {
        granular_mutate(&mut start, &caps, &mut rng);
    }
    start.evaluate(params.avg_players_per_team);

    let config = AnnealingConfig {
        iterations: 1_000,
        ..Default::default()
    };
    let refined = anneal(start, &pool, &caps, params.avg_players_per_team, &config, &mut rng);

    // Every round still carries exactly one break for the odd team count.
    for round in &refined.rounds {
        let breaks = round.events.iter().filter(|e| e.is_break()).count();
        assert_eq!(breaks, 1);
    }
}

#[test]
fn test_round_robin_feeds_full_coverage() {
    let team_count = 8;
    let matchups = round_robin_matchups(team_count);
    let params = ScheduleParams::new(team_count, team_count - 1, 8).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let schedule = Schedule::random(
        &params,
        &MatchPool::default(),
        &CategoryCaps::default(),
        Some(&matchups),
        &mut rng,
    )
    .unwrap();

    for stats in &schedule.team_stats {
        assert_eq!(stats.team_coverage_penalty(), 0);
    }
}

// ============================================================================
// TEAM BALANCER PIPELINE
// ============================================================================

#[test]
fn test_roster_to_teams_pipeline() {
    let mut roster = String::from("First name,Last name,Gender,Sport\n");
    let sports = [
        "Badminton",
        "Basketball",
        "Floorball",
        "Korfball",
        "Squash",
        "TableTennis",
        "Volleyball",
    ];
    for i in 0..28 {
        let gender = if i % 2 == 0 { "Male" } else { "Female" };
        roster.push_str(&format!("P{i},Test,{gender},{}\n", sports[i % sports.len()]));
    }

    let players = parse_roster_str(&roster).unwrap();
    assert_eq!(players.len(), 28);

    let config = TeamBuilderConfig {
        population_size: 32,
        max_generations: 20,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let best = build_teams(&players, 7, &config, &mut rng).unwrap();
    assert_eq!(best.teams.len(), 4);
    assert_eq!(best.player_count(), 28);

    let csv = teams_to_csv(&best);
    assert!(csv.starts_with("Name,Gender,Sport,TeamId\n"));
    assert_eq!(csv.lines().count(), 29);
}
