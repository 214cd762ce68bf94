//! Evolutionary team balancer for BallStars rosters
//!
//! Partitions a roster of players into teams of a requested size so that
//! gender and sport representation within each team is as even as
//! possible. The search is a clone-mutate-select loop over random
//! partitions; see `builder::build_teams`.

pub mod builder;
pub mod error;
pub mod player;
pub mod roster;
pub mod team;
pub mod team_set;

pub use builder::{build_teams, TeamBuilderConfig};
pub use error::RosterError;
pub use player::{Gender, Player, Sport};
pub use roster::{parse_roster, parse_roster_str, save_teams, teams_to_csv};
pub use team::Team;
pub use team_set::TeamSet;
