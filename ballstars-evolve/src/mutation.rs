//! Mutation operators for schedule evolution
//!
//! Provides the statistics-preserving transformations:
//! - Swap matches between events
//! - Swap event positions across rounds
//! - Remove a match
//! - Shift a match's player count
//! - Replace one team of an event
//!
//! Every operator is all-or-nothing: when a capacity or bound check fails it
//! leaves the schedule untouched, and when it applies it updates exactly the
//! statistics its change invalidates. Each operator has a deterministic core
//! taking explicit positions (used directly by the tests) and a random
//! wrapper that samples the positions.

use ballstars_core::{CategoryCaps, Event, EventSide, MatchPool, Schedule, TeamId};
use rand::Rng;

/// The closed set of mutation operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    SwapMatches,
    SwapEvents,
    RemoveMatch,
    IncrementPlayers,
    DecrementPlayers,
    ReplaceEventTeam,
}

/// Fixed ordered operator table: each entry is an independent Bernoulli
/// trial in `mutate`, and a uniform candidate in `granular_mutate`.
pub const MUTATION_RATES: [(MutationKind, f64); 6] = [
    (MutationKind::SwapMatches, 0.6),
    (MutationKind::SwapEvents, 0.4),
    (MutationKind::RemoveMatch, 0.2),
    (MutationKind::IncrementPlayers, 0.3),
    (MutationKind::DecrementPlayers, 0.3),
    (MutationKind::ReplaceEventTeam, 0.3),
];

/// Position of an event within a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventPos {
    pub round: usize,
    pub event: usize,
}

/// Position of a match within a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchPos {
    pub round: usize,
    pub event: usize,
    pub index: usize,
}

/// Apply every operator independently with its table probability.
pub fn mutate<R: Rng>(schedule: &mut Schedule, caps: &CategoryCaps, rng: &mut R) {
    for &(kind, probability) in MUTATION_RATES.iter() {
        if rng.gen_bool(probability) {
            apply(schedule, kind, caps, rng);
        }
    }
}

/// Apply exactly one operator, chosen uniformly.
pub fn granular_mutate<R: Rng>(schedule: &mut Schedule, caps: &CategoryCaps, rng: &mut R) {
    let (kind, _) = MUTATION_RATES[rng.gen_range(0..MUTATION_RATES.len())];
    apply(schedule, kind, caps, rng);
}

/// Dispatch one operator kind with randomly sampled positions.
pub fn apply<R: Rng>(
    schedule: &mut Schedule,
    kind: MutationKind,
    caps: &CategoryCaps,
    rng: &mut R,
) -> bool {
    match kind {
        MutationKind::SwapMatches => {
            let (Some(a), Some(b)) = (sample_match(schedule, rng), sample_match(schedule, rng))
            else {
                return false;
            };
            swap_matches_at(schedule, a, b, caps)
        }
        MutationKind::SwapEvents => {
            let a = sample_event(schedule, rng);
            let b = sample_event(schedule, rng);
            swap_events_at(schedule, a, b, caps)
        }
        MutationKind::RemoveMatch => match sample_match(schedule, rng) {
            Some(pos) => remove_match_at(schedule, pos),
            None => false,
        },
        MutationKind::IncrementPlayers => match sample_match(schedule, rng) {
            Some(pos) => shift_players_at(schedule, pos, 1, caps),
            None => false,
        },
        MutationKind::DecrementPlayers => match sample_match(schedule, rng) {
            Some(pos) => shift_players_at(schedule, pos, -1, caps),
            None => false,
        },
        MutationKind::ReplaceEventTeam => {
            let pos = sample_event(schedule, rng);
            let side = if rng.gen_bool(0.5) {
                EventSide::Home
            } else {
                EventSide::Away
            };
            let new_team = rng.gen_range(0..schedule.team_count());
            replace_team_at(schedule, pos, side, new_team)
        }
    }
}

/// Inject a pool-drawn match into a random event. Driven by the planner,
/// not part of the `mutate` operator table.
pub fn add_match_from_pool<R: Rng>(
    schedule: &mut Schedule,
    pool: &MatchPool,
    caps: &CategoryCaps,
    rng: &mut R,
) -> bool {
    let pos = sample_event(schedule, rng);
    let candidate = pool.draw(rng);

    let round = &schedule.rounds[pos.round];
    let Some(ev) = round.events[pos.event].as_regular() else {
        return false;
    };
    if !round.fits(caps, candidate.category, candidate.players_per_team) {
        return false;
    }

    let (t0, t1) = (ev.team_one, ev.team_two);
    let (category, players) = (candidate.category, candidate.players_per_team);
    schedule.rounds[pos.round].push_match(pos.event, candidate);
    schedule.team_stats[t0].add_match(category, players, pos.round);
    schedule.team_stats[t1].add_match(category, players, pos.round);
    true
}

// ============================================================================
// Deterministic operator cores
// ============================================================================

/// Exchange the matches at two positions.
///
/// Legal only when the player counts are equal and both rounds' ledgers stay
/// within their caps afterwards; otherwise leaves the schedule untouched.
pub fn swap_matches_at(
    schedule: &mut Schedule,
    a: MatchPos,
    b: MatchPos,
    caps: &CategoryCaps,
) -> bool {
    if a == b {
        return false;
    }
    let Some(ma) = match_at(schedule, a).cloned() else {
        return false;
    };
    let Some(mb) = match_at(schedule, b).cloned() else {
        return false;
    };

    if ma.players_per_team != mb.players_per_team {
        return false;
    }
    // Cross-round swaps shift each round's ledger between the two
    // categories; same-round swaps are net zero.
    if a.round != b.round && ma.category != mb.category {
        let players = ma.players_per_team;
        if !schedule.rounds[a.round].fits(caps, mb.category, players)
            || !schedule.rounds[b.round].fits(caps, ma.category, players)
        {
            return false;
        }
    }

    let players = ma.players_per_team;
    let (ta0, ta1) = event_teams(schedule, a.round, a.event);
    let (tb0, tb1) = event_teams(schedule, b.round, b.event);

    schedule.rounds[a.round].replace_match(a.event, a.index, mb.clone());
    schedule.rounds[b.round].replace_match(b.event, b.index, ma.clone());

    for team in [ta0, ta1] {
        schedule.team_stats[team].remove_match(ma.category, players, a.round);
        schedule.team_stats[team].add_match(mb.category, players, a.round);
    }
    for team in [tb0, tb1] {
        schedule.team_stats[team].remove_match(mb.category, players, b.round);
        schedule.team_stats[team].add_match(ma.category, players, b.round);
    }
    true
}

/// Exchange the positions of two events, possibly across rounds.
///
/// A cross-round swap migrates both rounds' ledgers and the participating
/// teams' per-round counters; it is declined when a destination ledger
/// would exceed a cap.
pub fn swap_events_at(
    schedule: &mut Schedule,
    a: EventPos,
    b: EventPos,
    caps: &CategoryCaps,
) -> bool {
    if a == b {
        return false;
    }
    if a.round == b.round {
        schedule.rounds[a.round].events.swap(a.event, b.event);
        return true;
    }

    let ev_a = schedule.rounds[a.round].events[a.event].clone();
    let ev_b = schedule.rounds[b.round].events[b.event].clone();

    // A cross-round swap of a break with a regular event would leave one
    // round with two byes and the other with none.
    if ev_a.is_break() != ev_b.is_break() {
        return false;
    }
    if !schedule.rounds[a.round].fits_after_event_swap(caps, &ev_a, &ev_b)
        || !schedule.rounds[b.round].fits_after_event_swap(caps, &ev_b, &ev_a)
    {
        return false;
    }

    detach_event_stats(schedule, &ev_a, a.round);
    detach_event_stats(schedule, &ev_b, b.round);
    attach_event_stats(schedule, &ev_a, b.round);
    attach_event_stats(schedule, &ev_b, a.round);

    schedule.rounds[a.round].release_event(&ev_a);
    schedule.rounds[a.round].absorb_event(&ev_b);
    schedule.rounds[b.round].release_event(&ev_b);
    schedule.rounds[b.round].absorb_event(&ev_a);

    schedule.rounds[a.round].events[a.event] = ev_b;
    schedule.rounds[b.round].events[b.event] = ev_a;
    true
}

/// Remove the match at a position.
pub fn remove_match_at(schedule: &mut Schedule, pos: MatchPos) -> bool {
    if match_at(schedule, pos).is_none() {
        return false;
    }
    let (t0, t1) = event_teams(schedule, pos.round, pos.event);
    let removed = schedule.rounds[pos.round].take_match(pos.event, pos.index);
    for team in [t0, t1] {
        schedule.team_stats[team].remove_match(removed.category, removed.players_per_team, pos.round);
    }
    true
}

/// Shift a match's player count one step in `direction` (+1 or -1); doubles
/// categories move in steps of two.
pub fn shift_players_at(
    schedule: &mut Schedule,
    pos: MatchPos,
    direction: i32,
    caps: &CategoryCaps,
) -> bool {
    let Some(m) = match_at(schedule, pos) else {
        return false;
    };
    let delta = direction * m.category.player_step();
    let category = m.category;
    if !m.can_shift_players(delta) {
        return false;
    }
    if delta > 0 && !schedule.rounds[pos.round].fits(caps, category, delta) {
        return false;
    }

    let (t0, t1) = event_teams(schedule, pos.round, pos.event);
    schedule.rounds[pos.round].shift_match_players(pos.event, pos.index, delta);
    schedule.team_stats[t0].round_player_counts[pos.round] += delta;
    schedule.team_stats[t1].round_player_counts[pos.round] += delta;
    true
}

/// Replace one side of an event with a different team.
pub fn replace_team_at(
    schedule: &mut Schedule,
    pos: EventPos,
    side: EventSide,
    new_team: TeamId,
) -> bool {
    let Some(ev) = schedule.rounds[pos.round].events[pos.event].as_regular() else {
        return false;
    };
    if ev.team(side) == new_team {
        return false;
    }

    let ev = schedule.rounds[pos.round].events[pos.event]
        .as_regular_mut()
        .expect("checked above");
    let old_team = ev.replace_team(side, new_team);
    let opponent = match side {
        EventSide::Home => ev.team_two,
        EventSide::Away => ev.team_one,
    };
    let matches: Vec<_> = ev
        .matches()
        .iter()
        .map(|m| (m.category, m.players_per_team))
        .collect();

    let r = pos.round;
    schedule.team_stats[old_team].remove_event(r);
    schedule.team_stats[old_team].remove_opponent(opponent);
    schedule.team_stats[new_team].add_event(r);
    schedule.team_stats[new_team].add_opponent(opponent);
    for &(category, players) in &matches {
        schedule.team_stats[old_team].remove_match(category, players, r);
        schedule.team_stats[new_team].add_match(category, players, r);
    }
    schedule.team_stats[opponent].remove_opponent(old_team);
    schedule.team_stats[opponent].add_opponent(new_team);
    true
}

// ============================================================================
// Helpers
// ============================================================================

/// Remove an event's contribution to its teams' per-round counters.
fn detach_event_stats(schedule: &mut Schedule, event: &Event, round: usize) {
    let Some(ev) = event.as_regular() else { return };
    for team in [ev.team_one, ev.team_two] {
        schedule.team_stats[team].remove_event(round);
        for m in ev.matches() {
            schedule.team_stats[team].remove_match(m.category, m.players_per_team, round);
        }
    }
}

/// Record an event's contribution to its teams' per-round counters.
fn attach_event_stats(schedule: &mut Schedule, event: &Event, round: usize) {
    let Some(ev) = event.as_regular() else { return };
    for team in [ev.team_one, ev.team_two] {
        schedule.team_stats[team].add_event(round);
        for m in ev.matches() {
            schedule.team_stats[team].add_match(m.category, m.players_per_team, round);
        }
    }
}

fn event_teams(schedule: &Schedule, round: usize, event: usize) -> (TeamId, TeamId) {
    let ev = schedule.rounds[round].events[event]
        .as_regular()
        .expect("position points at a break event");
    (ev.team_one, ev.team_two)
}

fn match_at(schedule: &Schedule, pos: MatchPos) -> Option<&ballstars_core::SportsMatch> {
    schedule.rounds[pos.round].events[pos.event]
        .as_regular()
        .and_then(|ev| ev.matches().get(pos.index))
}

fn sample_event<R: Rng>(schedule: &Schedule, rng: &mut R) -> EventPos {
    let round = rng.gen_range(0..schedule.rounds.len());
    let event = rng.gen_range(0..schedule.rounds[round].events.len());
    EventPos { round, event }
}

/// Sample a match position, or None when the sampled event has no matches.
fn sample_match<R: Rng>(schedule: &Schedule, rng: &mut R) -> Option<MatchPos> {
    let pos = sample_event(schedule, rng);
    let ev = schedule.rounds[pos.round].events[pos.event].as_regular()?;
    if ev.match_count() == 0 {
        return None;
    }
    let index = rng.gen_range(0..ev.match_count());
    Some(MatchPos {
        round: pos.round,
        event: pos.event,
        index,
    })
}
