//! Events: a meeting between two teams within one round
//!
//! An event owns its matches and keeps two derived counters current on every
//! insertion and removal: the variety penalty (duplicate categories within
//! the event, where paired singles/doubles categories count as one family)
//! and the number of referees required.

use crate::category::{CategoryCounts, SportCategory};
use crate::sports_match::SportsMatch;

/// Index of a team in the schedule.
pub type TeamId = usize;

/// Which side of an event a team occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSide {
    Home,
    Away,
}

/// One slot in a round: either a regular two-team meeting or a bye.
#[derive(Clone, Debug)]
pub enum Event {
    Regular(MatchEvent),
    Break(BreakEvent),
}

impl Event {
    pub fn as_regular(&self) -> Option<&MatchEvent> {
        match self {
            Event::Regular(ev) => Some(ev),
            Event::Break(_) => None,
        }
    }

    pub fn as_regular_mut(&mut self) -> Option<&mut MatchEvent> {
        match self {
            Event::Regular(ev) => Some(ev),
            Event::Break(_) => None,
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Event::Break(_))
    }

    /// Referees this event needs; a bye needs none.
    pub fn referees_required(&self) -> i32 {
        match self {
            Event::Regular(ev) => ev.referees_required(),
            Event::Break(_) => 0,
        }
    }

    pub fn variety_penalty(&self) -> i32 {
        match self {
            Event::Regular(ev) => ev.variety_penalty(),
            Event::Break(_) => 0,
        }
    }
}

/// A bye for one team in a round with an odd team count.
#[derive(Clone, Debug)]
pub struct BreakEvent {
    pub team: TeamId,
}

/// A regular meeting between two teams.
#[derive(Clone, Debug)]
pub struct MatchEvent {
    pub team_one: TeamId,
    pub team_two: TeamId,
    matches: Vec<SportsMatch>,
    category_counts: CategoryCounts,
    variety_penalty: i32,
    referees_required: i32,
}

impl MatchEvent {
    pub fn new(team_one: TeamId, team_two: TeamId) -> Self {
        Self {
            team_one,
            team_two,
            matches: Vec::with_capacity(3),
            category_counts: CategoryCounts::new(),
            variety_penalty: 0,
            referees_required: 0,
        }
    }

    pub fn matches(&self) -> &[SportsMatch] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn variety_penalty(&self) -> i32 {
        self.variety_penalty
    }

    pub fn referees_required(&self) -> i32 {
        self.referees_required
    }

    /// Total players per team committed to this event.
    pub fn player_total(&self) -> i32 {
        self.matches.iter().map(|m| m.players_per_team).sum()
    }

    pub fn team(&self, side: EventSide) -> TeamId {
        match side {
            EventSide::Home => self.team_one,
            EventSide::Away => self.team_two,
        }
    }

    /// Replace the team on the given side, returning the previous id.
    pub fn replace_team(&mut self, side: EventSide, new_team: TeamId) -> TeamId {
        let slot = match side {
            EventSide::Home => &mut self.team_one,
            EventSide::Away => &mut self.team_two,
        };
        std::mem::replace(slot, new_team)
    }

    /// Matches of this category or its paired variant already in the event.
    fn family_count(&self, category: SportCategory) -> i32 {
        let mut count = self.category_counts.get(category);
        if let Some(partner) = category.partner() {
            count += self.category_counts.get(partner);
        }
        count
    }

    /// Append a match, updating the variety and referee counters.
    pub fn add_match(&mut self, m: SportsMatch) {
        if self.family_count(m.category) > 0 {
            self.variety_penalty += 1;
        }
        if m.referee_required {
            self.referees_required += 1;
        }
        self.category_counts.add(m.category, 1);
        self.matches.push(m);
    }

    /// Remove the match at `index`, updating the counters.
    pub fn remove_match(&mut self, index: usize) -> SportsMatch {
        let m = self.matches.remove(index);
        self.category_counts.sub(m.category, 1);
        if self.family_count(m.category) > 0 {
            self.variety_penalty -= 1;
        }
        if m.referee_required {
            self.referees_required -= 1;
        }
        m
    }

    /// Replace the match at `index` in place, returning the old match.
    pub fn replace_match(&mut self, index: usize, new: SportsMatch) -> SportsMatch {
        let old = self.remove_match(index);
        // Keep the slot position stable for the swap operators.
        if self.family_count(new.category) > 0 {
            self.variety_penalty += 1;
        }
        if new.referee_required {
            self.referees_required += 1;
        }
        self.category_counts.add(new.category, 1);
        self.matches.insert(index, new);
        old
    }

    /// Shift the player count of the match at `index` by `delta`.
    ///
    /// The caller is responsible for the min/max and capacity checks; the
    /// counters tracked here do not depend on player counts.
    pub fn shift_players(&mut self, index: usize, delta: i32) {
        self.matches[index].players_per_team += delta;
    }
}
