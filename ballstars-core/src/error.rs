//! Error types for schedule construction and configuration

use crate::category::SportCategory;
use thiserror::Error;

/// Fatal configuration errors. Constraint violations during the search are
/// never errors; operators silently no-op instead.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("match pool is empty")]
    EmptyMatchPool,

    #[error("invalid pool entry: {category} with {players} players per team")]
    InvalidPoolEntry {
        category: SportCategory,
        players: i32,
    },

    #[error("schedule needs at least 2 teams, got {0}")]
    TooFewTeams(usize),

    #[error("schedule needs at least 1 round, got {0}")]
    NoRounds(usize),

    #[error("average players per team must be positive, got {0}")]
    InvalidPlayerBudget(i32),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
