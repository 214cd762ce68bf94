//! Teams command - balance a roster CSV into teams.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ballstars_teams::{build_teams, parse_roster, save_teams, TeamBuilderConfig};

#[derive(Args)]
pub struct TeamsArgs {
    /// Roster CSV (first name, last name, gender, sport; with header)
    pub roster: PathBuf,

    /// Desired team size
    pub team_size: usize,

    /// Output CSV file
    #[arg(default_value = "ballstars_teams.csv")]
    pub output: PathBuf,

    /// Population size
    #[arg(long, default_value = "8192")]
    pub population: usize,

    /// Number of generations to run
    #[arg(long, default_value = "100")]
    pub generations: usize,
}

pub fn run(args: TeamsArgs, seed: Option<u64>) -> Result<()> {
    let players = parse_roster(&args.roster)
        .with_context(|| format!("failed to read roster {}", args.roster.display()))?;
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let config = TeamBuilderConfig {
        population_size: args.population,
        max_generations: args.generations,
    };
    let best = build_teams(&players, args.team_size, &config, &mut rng)?;

    save_teams(&best, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "Balanced {} players into {} teams with fitness {}. Saved to {}.",
        players.len(),
        best.teams.len(),
        best.fitness,
        args.output.display()
    );
    Ok(())
}
