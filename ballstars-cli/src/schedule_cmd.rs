//! Schedule command - search for a tournament schedule and dump it as CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ballstars_core::{
    CategoryCaps, Event, MatchPool, PoolConfig, Schedule, ScheduleParams, SportsMatch,
};
use ballstars_evolve::{
    anneal, AnnealingConfig, OffspringStrategy, Planner, PlannerConfig, SelectionStrategy,
};

/// Placeholder cell for an absent match or a break opponent.
const EMPTY_CELL: &str = "None";

#[derive(Args)]
pub struct ScheduleArgs {
    /// Number of rounds
    pub rounds: usize,

    /// Number of teams
    pub teams: usize,

    /// Average number of players per team
    pub players_per_team: i32,

    /// Output CSV file
    #[arg(default_value = "ballstars_schedule.csv")]
    pub output: PathBuf,

    /// Population size
    #[arg(long, default_value = "4096")]
    pub population: usize,

    /// Number of generations to run
    #[arg(long, default_value = "100")]
    pub generations: usize,

    /// Offspring by cloning the best individual instead of crossover
    #[arg(long)]
    pub clone_best: bool,

    /// Tournament selection with the given bracket size (naive when absent)
    #[arg(long, value_name = "K")]
    pub tournament: Option<usize>,

    /// Refine with simulated annealing instead of the generational loop
    #[arg(long)]
    pub annealing: bool,

    /// Annealing iteration budget
    #[arg(long, default_value = "200000")]
    pub iterations: usize,

    /// Match pool and capacity configuration JSON (built-in defaults when absent)
    #[arg(long, value_name = "FILE")]
    pub pool: Option<PathBuf>,
}

/// Run the schedule command: configure, search, save.
pub fn run(args: ScheduleArgs, seed: Option<u64>) -> Result<()> {
    let params = ScheduleParams::new(args.teams, args.rounds, args.players_per_team)
        .context("invalid schedule parameters")?;
    let (pool, caps) = load_pool(&args)?;
    let mut rng = create_rng(seed);

    tracing::info!(
        "Scheduling {} teams over {} rounds ({} pool entries)",
        args.teams,
        args.rounds,
        pool.len()
    );

    let best = if args.annealing {
        run_annealing(&args, &params, &pool, &caps, &mut rng)?
    } else {
        run_planner(&args, &params, &pool, &caps, &mut rng)?
    };

    std::fs::write(&args.output, schedule_to_csv(&best))
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "Best schedule found with fitness {}. Saved to {}.",
        best.fitness,
        args.output.display()
    );
    Ok(())
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn load_pool(args: &ScheduleArgs) -> Result<(MatchPool, CategoryCaps)> {
    match &args.pool {
        Some(path) => {
            let config = PoolConfig::load(path)
                .with_context(|| format!("failed to load pool config {}", path.display()))?;
            Ok(config.into_parts()?)
        }
        None => Ok((MatchPool::default(), CategoryCaps::default())),
    }
}

fn run_planner(
    args: &ScheduleArgs,
    params: &ScheduleParams,
    pool: &MatchPool,
    caps: &CategoryCaps,
    rng: &mut ChaCha8Rng,
) -> Result<Schedule> {
    let config = PlannerConfig {
        population_size: args.population,
        max_generations: args.generations,
        offspring_strategy: if args.clone_best {
            OffspringStrategy::CloneBest
        } else {
            OffspringStrategy::Crossover
        },
        selection: match args.tournament {
            Some(k) => SelectionStrategy::Tournament { k },
            None => SelectionStrategy::Naive,
        },
        ..Default::default()
    };

    let planner = Planner::new(*params, pool.clone(), caps.clone(), config);
    let result = planner.run(rng)?;
    Ok(result.best)
}

fn run_annealing(
    args: &ScheduleArgs,
    params: &ScheduleParams,
    pool: &MatchPool,
    caps: &CategoryCaps,
    rng: &mut ChaCha8Rng,
) -> Result<Schedule> {
    let start = Schedule::random(params, pool, caps, None, rng)?;
    let config = AnnealingConfig {
        iterations: args.iterations,
        ..Default::default()
    };
    Ok(anneal(
        start,
        pool,
        caps,
        params.avg_players_per_team,
        &config,
        rng,
    ))
}

// ============================================================================
// CSV OUTPUT
// ============================================================================

fn match_cell(m: &SportsMatch) -> String {
    format!("{}({})", m.category, m.players_per_team)
}

/// Render a schedule as CSV, one row per event.
pub fn schedule_to_csv(schedule: &Schedule) -> String {
    let mut out = String::from("Team 1,Team 2,Match 1,Match 2,Match 3,RoundNr\n");

    for (round_no, round) in schedule.rounds.iter().enumerate() {
        for event in &round.events {
            match event {
                Event::Break(b) => {
                    out.push_str(&format!(
                        "{},{EMPTY_CELL},{EMPTY_CELL},{EMPTY_CELL},{EMPTY_CELL},{round_no}\n",
                        b.team
                    ));
                }
                Event::Regular(e) => {
                    let mut cells = [EMPTY_CELL.to_string(), EMPTY_CELL.to_string(), EMPTY_CELL.to_string()];
                    for (slot, m) in e.matches().iter().take(cells.len()).enumerate() {
                        cells[slot] = match_cell(m);
                    }
                    out.push_str(&format!(
                        "{},{},{},{},{},{round_no}\n",
                        e.team_one, e.team_two, cells[0], cells[1], cells[2]
                    ));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballstars_core::SportCategory;
    use rand::SeedableRng;

    #[test]
    fn test_csv_has_one_row_per_event() {
        let params = ScheduleParams::new(3, 2, 6).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let schedule = Schedule::random(
            &params,
            &MatchPool::default(),
            &CategoryCaps::default(),
            None,
            &mut rng,
        )
        .unwrap();

        let csv = schedule_to_csv(&schedule);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Team 1,Team 2,Match 1,Match 2,Match 3,RoundNr");

        let events: usize = schedule.rounds.iter().map(|r| r.events.len()).sum();
        assert_eq!(lines.len(), events + 1);
        // One break row per round for the odd team count.
        let breaks = lines[1..].iter().filter(|l| l.contains(",None,None,None,None,")).count();
        assert_eq!(breaks, 2);
    }

    #[test]
    fn test_match_cell_rendering() {
        let m = SportsMatch::new(SportCategory::Badminton, 2, 1, 4, false);
        assert_eq!(match_cell(&m), "Badminton(2)");
    }
}
