//! SportsMatch values and the match pool catalogue
//!
//! The pool is the read-only catalogue of legal category/player-count
//! combinations. Drawing from it hands out an owned copy, so a drawn match
//! can be mutated (player-count operators) without corrupting the pool.

use crate::category::{CategoryCaps, SportCategory, CATEGORY_COUNT};
use crate::error::ScheduleError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scheduled activity within an event: a category plus a player count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportsMatch {
    pub category: SportCategory,
    pub players_per_team: i32,
    pub min_players: i32,
    pub max_players: i32,
    pub referee_required: bool,
}

impl SportsMatch {
    pub fn new(
        category: SportCategory,
        players_per_team: i32,
        min_players: i32,
        max_players: i32,
        referee_required: bool,
    ) -> Self {
        debug_assert!(min_players <= players_per_team && players_per_team <= max_players);
        Self {
            category,
            players_per_team,
            min_players,
            max_players,
            referee_required,
        }
    }

    /// Whether the player count can move by `delta` without leaving the
    /// match's own min/max bounds.
    pub fn can_shift_players(&self, delta: i32) -> bool {
        let new_count = self.players_per_team + delta;
        self.min_players <= new_count && new_count <= self.max_players
    }
}

/// Per-category cap entry for the JSON configuration format.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapEntry {
    pub category: SportCategory,
    pub max_players: i32,
}

/// On-disk configuration: the match catalogue plus facility limits.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolConfig {
    pub pool: Vec<SportsMatch>,
    pub capacities: Vec<CapEntry>,
}

impl PoolConfig {
    /// Load a hand-authored pool configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let content = std::fs::read_to_string(path)?;
        let config: PoolConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ScheduleError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn into_parts(self) -> Result<(MatchPool, CategoryCaps), ScheduleError> {
        let pool = MatchPool::new(self.pool)?;
        let mut caps = CategoryCaps::new([0; CATEGORY_COUNT]);
        for entry in self.capacities {
            caps.set(entry.category, entry.max_players);
        }
        Ok((pool, caps))
    }
}

/// Immutable catalogue of legal matches.
#[derive(Clone, Debug)]
pub struct MatchPool {
    entries: Vec<SportsMatch>,
}

impl MatchPool {
    /// Build a pool, rejecting empty or malformed catalogues.
    pub fn new(entries: Vec<SportsMatch>) -> Result<Self, ScheduleError> {
        if entries.is_empty() {
            return Err(ScheduleError::EmptyMatchPool);
        }
        for entry in &entries {
            if entry.min_players > entry.players_per_team
                || entry.players_per_team > entry.max_players
            {
                return Err(ScheduleError::InvalidPoolEntry {
                    category: entry.category,
                    players: entry.players_per_team,
                });
            }
            if entry.category.is_doubles() && entry.players_per_team % 2 != 0 {
                return Err(ScheduleError::InvalidPoolEntry {
                    category: entry.category,
                    players: entry.players_per_team,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Draw a random entry as an owned copy. The pool itself never changes.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> SportsMatch {
        self.entries[rng.gen_range(0..self.entries.len())].clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SportsMatch] {
        &self.entries
    }
}

impl Default for MatchPool {
    /// Hand-authored default catalogue matching the default facility caps.
    fn default() -> Self {
        use SportCategory::*;
        let entries = vec![
            SportsMatch::new(Badminton, 2, 1, 4, false),
            SportsMatch::new(BadmintonDoubles, 2, 2, 4, false),
            SportsMatch::new(Basketball, 5, 4, 6, true),
            SportsMatch::new(Floorball, 4, 3, 5, true),
            SportsMatch::new(Korfball, 4, 3, 8, true),
            SportsMatch::new(Squash, 1, 1, 2, false),
            SportsMatch::new(TableTennis, 2, 1, 4, false),
            SportsMatch::new(TableTennisDoubles, 2, 2, 4, false),
            SportsMatch::new(Volleyball, 6, 4, 6, true),
            SportsMatch::new(Referee, 1, 1, 2, false),
        ];
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_pool_rejected() {
        assert!(matches!(
            MatchPool::new(Vec::new()),
            Err(ScheduleError::EmptyMatchPool)
        ));
    }

    #[test]
    fn test_malformed_entry_rejected() {
        let entries = vec![SportsMatch {
            category: SportCategory::Squash,
            players_per_team: 5,
            min_players: 1,
            max_players: 2,
            referee_required: false,
        }];
        assert!(MatchPool::new(entries).is_err());
    }

    #[test]
    fn test_odd_doubles_entry_rejected() {
        let entries = vec![SportsMatch {
            category: SportCategory::BadmintonDoubles,
            players_per_team: 3,
            min_players: 2,
            max_players: 4,
            referee_required: false,
        }];
        assert!(MatchPool::new(entries).is_err());
    }

    #[test]
    fn test_draw_returns_owned_copy() {
        let pool = MatchPool::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut drawn = pool.draw(&mut rng);
        let original_players = pool
            .entries()
            .iter()
            .find(|m| m.category == drawn.category)
            .map(|m| m.players_per_team)
            .unwrap();

        // Mutating the drawn match must not touch the pool entry.
        drawn.players_per_team += 1;
        let after = pool
            .entries()
            .iter()
            .find(|m| m.category == drawn.category)
            .map(|m| m.players_per_team)
            .unwrap();
        assert_eq!(original_players, after);
    }

    #[test]
    fn test_can_shift_players_respects_bounds() {
        let m = SportsMatch::new(SportCategory::Squash, 1, 1, 2, false);
        assert!(m.can_shift_players(1));
        assert!(!m.can_shift_players(-1));
        assert!(!m.can_shift_players(2));
    }

    #[test]
    fn test_default_pool_entries_valid() {
        let pool = MatchPool::default();
        assert!(MatchPool::new(pool.entries().to_vec()).is_ok());
    }
}
