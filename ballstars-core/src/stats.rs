//! Per-team statistics, kept consistent incrementally
//!
//! Every mutation operator updates exactly the counters it invalidates; the
//! only full recomputation happens when a schedule is assembled (random
//! construction and crossover). Sport-imbalance tracking keeps cached
//! max/min category counts and falls back to an explicit bounded rescan over
//! the closed category set when the currently-extremal count moves away from
//! the extreme.

use crate::category::{CategoryCounts, SportCategory, PLAYABLE_CATEGORIES, PLAYABLE_COUNT};
use crate::event::TeamId;

/// Rollup of one team's standing across the whole schedule.
#[derive(Clone, Debug)]
pub struct ScheduleTeamStatistics {
    team: TeamId,
    team_count: usize,
    /// Players this team commits to each round.
    pub round_player_counts: Vec<i32>,
    /// Events this team participates in per round (byes excluded).
    pub events_per_round: Vec<i32>,
    matchup_counts: Vec<i32>,
    category_counts: CategoryCounts,
    teams_played: i32,
    sports_played: i32,
    max_category_count: i32,
    min_category_count: i32,
}

impl ScheduleTeamStatistics {
    pub fn new(team: TeamId, team_count: usize, round_count: usize) -> Self {
        Self {
            team,
            team_count,
            round_player_counts: vec![0; round_count],
            events_per_round: vec![0; round_count],
            matchup_counts: vec![0; team_count],
            category_counts: CategoryCounts::new(),
            teams_played: 0,
            sports_played: 0,
            max_category_count: 0,
            min_category_count: 0,
        }
    }

    /// Clear all counters, for a full rebuild.
    pub fn reset(&mut self) {
        self.round_player_counts.iter_mut().for_each(|c| *c = 0);
        self.events_per_round.iter_mut().for_each(|c| *c = 0);
        self.matchup_counts.iter_mut().for_each(|c| *c = 0);
        self.category_counts = CategoryCounts::new();
        self.teams_played = 0;
        self.sports_played = 0;
        self.max_category_count = 0;
        self.min_category_count = 0;
    }

    // ------------------------------------------------------------------
    // Incremental updates
    // ------------------------------------------------------------------

    /// Record a match of `category` with `players` per team in `round`.
    pub fn add_match(&mut self, category: SportCategory, players: i32, round: usize) {
        self.round_player_counts[round] += players;
        if category.is_playable() {
            self.add_category_played(category);
        }
    }

    /// Undo a match recording.
    pub fn remove_match(&mut self, category: SportCategory, players: i32, round: usize) {
        self.round_player_counts[round] -= players;
        if category.is_playable() {
            self.remove_category_played(category);
        }
    }

    /// Record participation in one event in `round`.
    pub fn add_event(&mut self, round: usize) {
        self.events_per_round[round] += 1;
    }

    pub fn remove_event(&mut self, round: usize) {
        self.events_per_round[round] -= 1;
    }

    /// Record a meeting with `opponent`. Self-pairings earn no credit.
    pub fn add_opponent(&mut self, opponent: TeamId) {
        if opponent == self.team {
            return;
        }
        if self.matchup_counts[opponent] == 0 {
            self.teams_played += 1;
        }
        self.matchup_counts[opponent] += 1;
    }

    pub fn remove_opponent(&mut self, opponent: TeamId) {
        if opponent == self.team {
            return;
        }
        self.matchup_counts[opponent] -= 1;
        if self.matchup_counts[opponent] == 0 {
            self.teams_played -= 1;
        }
    }

    fn add_category_played(&mut self, category: SportCategory) {
        let old = self.category_counts.get(category);
        if old == 0 {
            self.sports_played += 1;
        }
        self.category_counts.add(category, 1);
        let new = old + 1;

        if new > self.max_category_count {
            self.max_category_count = new;
        }
        if old == self.min_category_count {
            // The count may have been the only one at the minimum.
            self.rescan_min();
        }
    }

    fn remove_category_played(&mut self, category: SportCategory) {
        let old = self.category_counts.get(category);
        self.category_counts.sub(category, 1);
        let new = old - 1;
        if new == 0 {
            self.sports_played -= 1;
        }

        if new < self.min_category_count {
            self.min_category_count = new;
        }
        if old == self.max_category_count {
            self.rescan_max();
        }
    }

    /// Bounded rescan over the closed playable-category set.
    fn rescan_min(&mut self) {
        self.min_category_count = PLAYABLE_CATEGORIES
            .iter()
            .map(|&c| self.category_counts.get(c))
            .min()
            .unwrap_or(0);
    }

    fn rescan_max(&mut self) {
        self.max_category_count = PLAYABLE_CATEGORIES
            .iter()
            .map(|&c| self.category_counts.get(c))
            .max()
            .unwrap_or(0);
    }

    // ------------------------------------------------------------------
    // Accessors and derived penalties
    // ------------------------------------------------------------------

    pub fn matchup_count(&self, opponent: TeamId) -> i32 {
        self.matchup_counts[opponent]
    }

    pub fn teams_played(&self) -> i32 {
        self.teams_played
    }

    pub fn sports_played(&self) -> i32 {
        self.sports_played
    }

    pub fn category_count(&self, category: SportCategory) -> i32 {
        self.category_counts.get(category)
    }

    /// Opponents not yet met at least once.
    pub fn team_coverage_penalty(&self) -> i32 {
        (self.team_count as i32 - 1) - self.teams_played
    }

    /// Playable categories not yet played at least once.
    pub fn sports_coverage_penalty(&self) -> i32 {
        PLAYABLE_COUNT as i32 - self.sports_played
    }

    /// Spread between the most-played and least-played category.
    pub fn sport_imbalance(&self) -> i32 {
        self.max_category_count - self.min_category_count
    }

    /// Distance from the one-event-per-round target, summed over rounds.
    pub fn event_limit_penalty(&self) -> i32 {
        self.events_per_round.iter().map(|&e| (e - 1).abs()).sum()
    }

    /// Players committed beyond the per-round budget, summed over rounds.
    pub fn round_player_limit_penalty(&self, avg_players_per_team: i32) -> i32 {
        self.round_player_counts
            .iter()
            .map(|&c| (c - avg_players_per_team).max(0))
            .sum()
    }
}
