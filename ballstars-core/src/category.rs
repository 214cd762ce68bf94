//! Sport categories and per-category tables
//!
//! The category set is closed: every counter in the scheduler is a fixed-size
//! array indexed by `SportCategory`, so updates are O(1) and rescans are
//! bounded linear scans over a small set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of categories, including the Referee and Break pseudo-categories.
pub const CATEGORY_COUNT: usize = 11;

/// Number of playable categories (everything except Referee and Break).
pub const PLAYABLE_COUNT: usize = 9;

/// A sport category that a match within an event can belong to.
///
/// `Referee` entries allocate players as referees for the round; `Break`
/// marks the bye pseudo-event used when the team count is odd.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SportCategory {
    Badminton,
    BadmintonDoubles,
    Basketball,
    Floorball,
    Korfball,
    Squash,
    TableTennis,
    TableTennisDoubles,
    Volleyball,
    Referee,
    Break,
}

/// All categories, in index order.
pub const ALL_CATEGORIES: [SportCategory; CATEGORY_COUNT] = [
    SportCategory::Badminton,
    SportCategory::BadmintonDoubles,
    SportCategory::Basketball,
    SportCategory::Floorball,
    SportCategory::Korfball,
    SportCategory::Squash,
    SportCategory::TableTennis,
    SportCategory::TableTennisDoubles,
    SportCategory::Volleyball,
    SportCategory::Referee,
    SportCategory::Break,
];

/// The categories that count as sports played by a team.
pub const PLAYABLE_CATEGORIES: [SportCategory; PLAYABLE_COUNT] = [
    SportCategory::Badminton,
    SportCategory::BadmintonDoubles,
    SportCategory::Basketball,
    SportCategory::Floorball,
    SportCategory::Korfball,
    SportCategory::Squash,
    SportCategory::TableTennis,
    SportCategory::TableTennisDoubles,
    SportCategory::Volleyball,
];

impl SportCategory {
    /// Index into category-keyed arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The paired singles/doubles variant, if any.
    ///
    /// Paired categories share a variety-penalty family: a Badminton match
    /// and a BadmintonDoubles match in the same event count as duplicates.
    pub fn partner(self) -> Option<SportCategory> {
        match self {
            SportCategory::Badminton => Some(SportCategory::BadmintonDoubles),
            SportCategory::BadmintonDoubles => Some(SportCategory::Badminton),
            SportCategory::TableTennis => Some(SportCategory::TableTennisDoubles),
            SportCategory::TableTennisDoubles => Some(SportCategory::TableTennis),
            _ => None,
        }
    }

    /// Doubles categories must keep an even player count.
    pub fn is_doubles(self) -> bool {
        matches!(
            self,
            SportCategory::BadmintonDoubles | SportCategory::TableTennisDoubles
        )
    }

    /// Whether this category counts towards a team's sports played.
    pub fn is_playable(self) -> bool {
        !matches!(self, SportCategory::Referee | SportCategory::Break)
    }

    /// Step size for player-count mutations: 2 for doubles, 1 otherwise.
    pub fn player_step(self) -> i32 {
        if self.is_doubles() {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for SportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SportCategory::Badminton => "Badminton",
            SportCategory::BadmintonDoubles => "BadmintonDoubles",
            SportCategory::Basketball => "Basketball",
            SportCategory::Floorball => "Floorball",
            SportCategory::Korfball => "Korfball",
            SportCategory::Squash => "Squash",
            SportCategory::TableTennis => "TableTennis",
            SportCategory::TableTennisDoubles => "TableTennisDoubles",
            SportCategory::Volleyball => "Volleyball",
            SportCategory::Referee => "Referee",
            SportCategory::Break => "Break",
        };
        write!(f, "{}", name)
    }
}

/// Fixed-size per-category counter array.
///
/// Shared by the round capacity ledger, per-event duplicate tracking and the
/// per-team sport counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts([i32; CATEGORY_COUNT]);

impl CategoryCounts {
    pub fn new() -> Self {
        Self([0; CATEGORY_COUNT])
    }

    pub fn get(&self, category: SportCategory) -> i32 {
        self.0[category.index()]
    }

    pub fn add(&mut self, category: SportCategory, amount: i32) {
        self.0[category.index()] += amount;
    }

    pub fn sub(&mut self, category: SportCategory, amount: i32) {
        self.0[category.index()] -= amount;
        debug_assert!(self.0[category.index()] >= 0, "counter went negative");
    }

    /// Iterate over all (category, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SportCategory, i32)> + '_ {
        ALL_CATEGORIES.iter().map(move |&c| (c, self.0[c.index()]))
    }
}

/// Per-category facility limit: maximum players per team per round.
#[derive(Clone, Debug)]
pub struct CategoryCaps([i32; CATEGORY_COUNT]);

impl CategoryCaps {
    pub fn new(caps: [i32; CATEGORY_COUNT]) -> Self {
        Self(caps)
    }

    pub fn get(&self, category: SportCategory) -> i32 {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: SportCategory, cap: i32) {
        self.0[category.index()] = cap;
    }
}

impl Default for CategoryCaps {
    /// Hand-authored facility limits for one sports hall.
    fn default() -> Self {
        let mut caps = Self([0; CATEGORY_COUNT]);
        caps.set(SportCategory::Badminton, 4);
        caps.set(SportCategory::BadmintonDoubles, 4);
        caps.set(SportCategory::Basketball, 6);
        caps.set(SportCategory::Floorball, 5);
        caps.set(SportCategory::Korfball, 8);
        caps.set(SportCategory::Squash, 2);
        caps.set(SportCategory::TableTennis, 4);
        caps.set(SportCategory::TableTennisDoubles, 4);
        caps.set(SportCategory::Volleyball, 6);
        caps.set(SportCategory::Referee, 2);
        caps
    }
}
