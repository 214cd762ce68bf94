//! Round planning: parallel events plus the per-round capacity ledger
//!
//! The ledger maps each sport category to the players already allocated in
//! this round across all events. Every match insertion or removal goes
//! through the round so the ledger can never drift from the events; the
//! facility limits in `CategoryCaps` are enforced against it.

use crate::category::{CategoryCaps, CategoryCounts, SportCategory};
use crate::event::{BreakEvent, Event, MatchEvent, TeamId};
use crate::sports_match::{MatchPool, SportsMatch};
use rand::Rng;

/// Maximum matches drawn per event during random construction.
const MAX_MATCHES_PER_EVENT: usize = 3;

/// One time slot of the schedule.
#[derive(Clone, Debug)]
pub struct RoundPlanning {
    pub events: Vec<Event>,
    players_per_category: CategoryCounts,
}

/// Sum a single event's player allocation per category.
pub fn event_category_totals(event: &Event) -> CategoryCounts {
    let mut totals = CategoryCounts::new();
    if let Some(ev) = event.as_regular() {
        for m in ev.matches() {
            totals.add(m.category, m.players_per_team);
        }
    }
    totals
}

impl RoundPlanning {
    pub fn new(events: Vec<Event>) -> Self {
        let mut round = Self {
            events,
            players_per_category: CategoryCounts::new(),
        };
        let mut ledger = CategoryCounts::new();
        for event in &round.events {
            for (cat, players) in event_category_totals(event).iter() {
                ledger.add(cat, players);
            }
        }
        round.players_per_category = ledger;
        round
    }

    /// Players already allocated to a category this round.
    pub fn players_in(&self, category: SportCategory) -> i32 {
        self.players_per_category.get(category)
    }

    /// Whether `players` more can join `category` without breaking the cap.
    pub fn fits(&self, caps: &CategoryCaps, category: SportCategory, players: i32) -> bool {
        self.players_per_category.get(category) + players <= caps.get(category)
    }

    /// Referees needed across all events of this round.
    pub fn referees_required(&self) -> i32 {
        self.events.iter().map(|e| e.referees_required()).sum()
    }

    /// Gap between referees needed and referee players allocated.
    pub fn referee_penalty(&self) -> i32 {
        (self.referees_required() - self.players_in(SportCategory::Referee)).abs()
    }

    /// Append a match to an event, keeping the ledger in sync.
    pub fn push_match(&mut self, event_index: usize, m: SportsMatch) {
        self.players_per_category.add(m.category, m.players_per_team);
        self.events[event_index]
            .as_regular_mut()
            .expect("cannot add a match to a break event")
            .add_match(m);
    }

    /// Remove a match from an event, keeping the ledger in sync.
    pub fn take_match(&mut self, event_index: usize, match_index: usize) -> SportsMatch {
        let m = self.events[event_index]
            .as_regular_mut()
            .expect("cannot remove a match from a break event")
            .remove_match(match_index);
        self.players_per_category.sub(m.category, m.players_per_team);
        m
    }

    /// Swap in a different match at a fixed slot, keeping the ledger in sync.
    pub fn replace_match(
        &mut self,
        event_index: usize,
        match_index: usize,
        new: SportsMatch,
    ) -> SportsMatch {
        self.players_per_category.add(new.category, new.players_per_team);
        let old = self.events[event_index]
            .as_regular_mut()
            .expect("cannot replace a match in a break event")
            .replace_match(match_index, new);
        self.players_per_category.sub(old.category, old.players_per_team);
        old
    }

    /// Shift a match's player count, keeping the ledger in sync.
    pub fn shift_match_players(&mut self, event_index: usize, match_index: usize, delta: i32) {
        let ev = self.events[event_index]
            .as_regular_mut()
            .expect("cannot shift players in a break event");
        let category = ev.matches()[match_index].category;
        ev.shift_players(match_index, delta);
        self.players_per_category.add(category, delta);
    }

    /// Whether replacing `outgoing` with `incoming` keeps all caps intact.
    pub fn fits_after_event_swap(
        &self,
        caps: &CategoryCaps,
        outgoing: &Event,
        incoming: &Event,
    ) -> bool {
        let out_totals = event_category_totals(outgoing);
        let in_totals = event_category_totals(incoming);
        let fits = in_totals.iter().all(|(cat, players)| {
            self.players_per_category.get(cat) - out_totals.get(cat) + players <= caps.get(cat)
        });
        fits
    }

    /// Move an event's allocation out of the ledger (for event swaps).
    pub fn release_event(&mut self, event: &Event) {
        for (cat, players) in event_category_totals(event).iter() {
            self.players_per_category.sub(cat, players);
        }
    }

    /// Add an event's allocation to the ledger (for event swaps).
    pub fn absorb_event(&mut self, event: &Event) {
        for (cat, players) in event_category_totals(event).iter() {
            self.players_per_category.add(cat, players);
        }
    }

    /// Generate a random round.
    ///
    /// Pairings come from `matchups` when present (one chunk of a
    /// precomputed round-robin plan), otherwise teams are drawn uniformly;
    /// repeats and self-pairings are tolerated and left to the fitness
    /// function. Each event draws 1-3 matches from the pool. A draw that
    /// would overflow a category cap is skipped, and the event stops filling
    /// once the per-team player budget would be exceeded.
    #[allow(clippy::too_many_arguments)]
    pub fn random<R: Rng>(
        team_count: usize,
        events_per_round: usize,
        regular_events_per_round: usize,
        pool: &MatchPool,
        caps: &CategoryCaps,
        break_round: bool,
        avg_players_per_team: i32,
        matchups: Option<&[(TeamId, TeamId)]>,
        rng: &mut R,
    ) -> Self {
        let mut round = Self {
            events: Vec::with_capacity(events_per_round),
            players_per_category: CategoryCounts::new(),
        };

        for i in 0..regular_events_per_round {
            let (t0, t1) = match matchups {
                Some(pairs) => pairs[i],
                None => (rng.gen_range(0..team_count), rng.gen_range(0..team_count)),
            };
            let mut event = MatchEvent::new(t0, t1);

            let draws = rng.gen_range(1..=MAX_MATCHES_PER_EVENT);
            for _ in 0..draws {
                let candidate = pool.draw(rng);
                if !round.fits(caps, candidate.category, candidate.players_per_team) {
                    continue;
                }
                if event.player_total() + candidate.players_per_team > avg_players_per_team {
                    break;
                }
                round
                    .players_per_category
                    .add(candidate.category, candidate.players_per_team);
                event.add_match(candidate);
            }

            round.events.push(Event::Regular(event));
        }

        if break_round {
            let team = rng.gen_range(0..team_count);
            round.events.push(Event::Break(BreakEvent { team }));
        }

        round
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn squash() -> SportsMatch {
        SportsMatch::new(SportCategory::Squash, 1, 1, 2, false)
    }

    fn basketball() -> SportsMatch {
        SportsMatch::new(SportCategory::Basketball, 5, 4, 6, true)
    }

    fn ledger_matches_events(round: &RoundPlanning) -> bool {
        let mut expected = CategoryCounts::new();
        for event in &round.events {
            for (cat, players) in event_category_totals(event).iter() {
                expected.add(cat, players);
            }
        }
        let matches = expected
            .iter()
            .all(|(cat, players)| round.players_in(cat) == players);
        matches
    }

    #[test]
    fn test_push_and_take_keep_ledger_consistent() {
        let events = vec![
            Event::Regular(MatchEvent::new(0, 1)),
            Event::Regular(MatchEvent::new(2, 3)),
        ];
        let mut round = RoundPlanning::new(events);

        round.push_match(0, squash());
        round.push_match(0, basketball());
        round.push_match(1, squash());
        assert_eq!(round.players_in(SportCategory::Squash), 2);
        assert_eq!(round.players_in(SportCategory::Basketball), 5);
        assert!(ledger_matches_events(&round));

        let taken = round.take_match(0, 1);
        assert_eq!(taken.category, SportCategory::Basketball);
        assert_eq!(round.players_in(SportCategory::Basketball), 0);
        assert!(ledger_matches_events(&round));
    }

    #[test]
    fn test_fits_respects_caps() {
        let mut round = RoundPlanning::new(vec![Event::Regular(MatchEvent::new(0, 1))]);
        let caps = CategoryCaps::default();

        round.push_match(0, squash());
        round.push_match(0, squash());
        // Default squash cap is 2 players per round.
        assert!(!round.fits(&caps, SportCategory::Squash, 1));
        assert!(round.fits(&caps, SportCategory::Badminton, 4));
    }

    #[test]
    fn test_referee_penalty() {
        let mut round = RoundPlanning::new(vec![Event::Regular(MatchEvent::new(0, 1))]);
        round.push_match(0, basketball());
        // One referee needed, none allocated.
        assert_eq!(round.referee_penalty(), 1);

        round.push_match(
            0,
            SportsMatch::new(SportCategory::Referee, 1, 1, 2, false),
        );
        assert_eq!(round.referee_penalty(), 0);
    }

    #[test]
    fn test_shift_match_players_updates_ledger() {
        let mut round = RoundPlanning::new(vec![Event::Regular(MatchEvent::new(0, 1))]);
        round.push_match(0, squash());
        round.shift_match_players(0, 0, 1);
        assert_eq!(round.players_in(SportCategory::Squash), 2);
        assert!(ledger_matches_events(&round));
    }

    #[test]
    fn test_random_round_respects_caps_and_budget() {
        let pool = MatchPool::default();
        let caps = CategoryCaps::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..50 {
            let round =
                RoundPlanning::random(6, 3, 3, &pool, &caps, false, 8, None, &mut rng);
            assert_eq!(round.events.len(), 3);
            assert!(ledger_matches_events(&round));
            for (cat, players) in round.players_per_category.iter() {
                assert!(players <= caps.get(cat), "{} over cap", cat);
            }
            for event in &round.events {
                let ev = event.as_regular().unwrap();
                assert!(ev.player_total() <= 8);
            }
        }
    }

    #[test]
    fn test_random_round_with_break() {
        let pool = MatchPool::default();
        let caps = CategoryCaps::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let round = RoundPlanning::random(5, 3, 2, &pool, &caps, true, 6, None, &mut rng);
        assert_eq!(round.events.len(), 3);
        assert!(round.events[2].is_break());
    }

    #[test]
    fn test_random_round_uses_predefined_matchups() {
        let pool = MatchPool::default();
        let caps = CategoryCaps::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let matchups = [(0, 3), (1, 2)];

        let round =
            RoundPlanning::random(4, 2, 2, &pool, &caps, false, 6, Some(&matchups), &mut rng);
        let ev0 = round.events[0].as_regular().unwrap();
        let ev1 = round.events[1].as_regular().unwrap();
        assert_eq!((ev0.team_one, ev0.team_two), (0, 3));
        assert_eq!((ev1.team_one, ev1.team_two), (1, 2));
    }
}
