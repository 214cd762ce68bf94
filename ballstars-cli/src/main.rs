//! BallStars CLI - Command-line interface
//!
//! Commands:
//! - schedule: Search for a tournament schedule
//! - teams: Balance a player roster into teams

use clap::{Parser, Subcommand};

mod schedule_cmd;
mod teams_cmd;

#[derive(Parser)]
#[command(name = "ballstars")]
#[command(about = "BallStars evolutionary tournament planner")]
struct Cli {
    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a tournament schedule
    Schedule(schedule_cmd::ScheduleArgs),
    /// Balance a player roster into teams
    Teams(teams_cmd::TeamsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule(args) => schedule_cmd::run(args, cli.seed),
        Commands::Teams(args) => teams_cmd::run(args, cli.seed),
    }
}
