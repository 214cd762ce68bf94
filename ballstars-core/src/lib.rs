//! BallStars Core - Schedule representation and bookkeeping
//!
//! This crate provides the data model for the tournament scheduler:
//! - Sport categories and per-category capacity tables
//! - SportsMatch values and the immutable match pool
//! - Events (team meetings) with incremental variety/referee counters
//! - Round planning with the per-round capacity ledger
//! - Per-team statistics kept consistent under incremental updates
//! - The schedule individual with its weighted fitness evaluation
//! - The circle-method round-robin matchup generator

pub mod category;
pub mod error;
pub mod event;
pub mod round;
pub mod round_robin;
pub mod schedule;
pub mod sports_match;
pub mod stats;

// Re-exports for convenient access
pub use category::{
    CategoryCaps, CategoryCounts, SportCategory, ALL_CATEGORIES, CATEGORY_COUNT,
    PLAYABLE_CATEGORIES, PLAYABLE_COUNT,
};
pub use error::ScheduleError;
pub use event::{BreakEvent, Event, EventSide, MatchEvent, TeamId};
pub use round::RoundPlanning;
pub use round_robin::round_robin_matchups;
pub use schedule::{Schedule, ScheduleParams, PLAYER_LIMIT_WEIGHT, VARIETY_WEIGHT};
pub use sports_match::{CapEntry, MatchPool, PoolConfig, SportsMatch};
pub use stats::ScheduleTeamStatistics;
