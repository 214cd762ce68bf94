//! Roster-side error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("unknown gender '{0}' in roster")]
    UnknownGender(String),

    #[error("unknown sport '{0}' in roster")]
    UnknownSport(String),

    #[error("roster line {0} has {1} fields, expected at least 4")]
    MalformedLine(usize, usize),

    #[error("roster is empty")]
    EmptyRoster,

    #[error("team size must be at least 1")]
    InvalidTeamSize,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
