//! The schedule individual: rounds plus per-team statistics
//!
//! A schedule owns its rounds and one statistics rollup per team. The
//! statistics are rebuilt from scratch only at assembly time (random
//! construction and crossover); every search operator afterwards keeps them
//! consistent incrementally.

use crate::category::CategoryCaps;
use crate::error::ScheduleError;
use crate::event::TeamId;
use crate::round::RoundPlanning;
use crate::sports_match::MatchPool;
use crate::stats::ScheduleTeamStatistics;
use rand::Rng;

/// Weight of the per-round player-budget penalty.
pub const PLAYER_LIMIT_WEIGHT: i32 = 9;

/// Weight of the per-event variety penalty. Facility and variety violations
/// must dominate the soft balance penalties.
pub const VARIETY_WEIGHT: i32 = 300;

/// Shape parameters shared by every individual in one search run.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleParams {
    pub team_count: usize,
    pub round_count: usize,
    /// Event slots per round, including the break slot for odd team counts.
    pub events_per_round: usize,
    pub regular_events_per_round: usize,
    pub has_break: bool,
    pub avg_players_per_team: i32,
}

impl ScheduleParams {
    pub fn new(
        team_count: usize,
        round_count: usize,
        avg_players_per_team: i32,
    ) -> Result<Self, ScheduleError> {
        if team_count < 2 {
            return Err(ScheduleError::TooFewTeams(team_count));
        }
        if round_count == 0 {
            return Err(ScheduleError::NoRounds(round_count));
        }
        if avg_players_per_team <= 0 {
            return Err(ScheduleError::InvalidPlayerBudget(avg_players_per_team));
        }

        let regular = team_count / 2;
        let has_break = team_count % 2 != 0;
        Ok(Self {
            team_count,
            round_count,
            events_per_round: if has_break { regular + 1 } else { regular },
            regular_events_per_round: regular,
            has_break,
            avg_players_per_team,
        })
    }
}

/// One candidate schedule in the evolving population.
#[derive(Clone, Debug)]
pub struct Schedule {
    pub rounds: Vec<RoundPlanning>,
    pub team_stats: Vec<ScheduleTeamStatistics>,
    pub fitness: u32,
    team_count: usize,
}

impl Schedule {
    /// Construct a random schedule.
    ///
    /// Pairings come from `matchups` when given (a flattened round-robin
    /// plan, consumed in round-sized chunks, cycled when the schedule has
    /// more rounds than the plan) or are drawn uniformly at random.
    pub fn random<R: Rng>(
        params: &ScheduleParams,
        pool: &MatchPool,
        caps: &CategoryCaps,
        matchups: Option<&[(TeamId, TeamId)]>,
        rng: &mut R,
    ) -> Result<Self, ScheduleError> {
        if pool.is_empty() {
            return Err(ScheduleError::EmptyMatchPool);
        }

        let half = params.regular_events_per_round;
        let mut rounds = Vec::with_capacity(params.round_count);
        for r in 0..params.round_count {
            let chunk = matchups.map(|pairs| {
                let plan_rounds = pairs.len() / half;
                let start = (r % plan_rounds) * half;
                &pairs[start..start + half]
            });
            rounds.push(RoundPlanning::random(
                params.team_count,
                params.events_per_round,
                params.regular_events_per_round,
                pool,
                caps,
                params.has_break,
                params.avg_players_per_team,
                chunk,
                rng,
            ));
        }

        Ok(Self::from_rounds(rounds, params.team_count))
    }

    /// Assemble a schedule from rounds, rebuilding all statistics.
    ///
    /// Used by random construction and crossover; the only moment where a
    /// full O(rounds x events x matches) pass is the right tool.
    pub fn from_rounds(rounds: Vec<RoundPlanning>, team_count: usize) -> Self {
        let round_count = rounds.len();
        let team_stats = (0..team_count)
            .map(|t| ScheduleTeamStatistics::new(t, team_count, round_count))
            .collect();
        let mut schedule = Self {
            rounds,
            team_stats,
            fitness: 0,
            team_count,
        };
        schedule.rebuild_statistics();
        schedule
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Recompute every team's statistics by one pass over all rounds.
    pub fn rebuild_statistics(&mut self) {
        for stats in &mut self.team_stats {
            stats.reset();
        }
        for (r, round) in self.rounds.iter().enumerate() {
            for event in &round.events {
                let Some(ev) = event.as_regular() else { continue };
                let (t0, t1) = (ev.team_one, ev.team_two);

                self.team_stats[t0].add_event(r);
                self.team_stats[t0].add_opponent(t1);
                self.team_stats[t1].add_event(r);
                self.team_stats[t1].add_opponent(t0);

                for m in ev.matches() {
                    self.team_stats[t0].add_match(m.category, m.players_per_team, r);
                    self.team_stats[t1].add_match(m.category, m.players_per_team, r);
                }
            }
        }
    }

    /// Evaluate and cache this schedule's fitness (lower is better, 0 is a
    /// fully feasible and balanced schedule). Deterministic for a given
    /// state.
    pub fn evaluate(&mut self, avg_players_per_team: i32) -> u32 {
        let mut total: i32 = 0;

        for stats in &self.team_stats {
            total += stats.team_coverage_penalty()
                + stats.sport_imbalance()
                + stats.sports_coverage_penalty()
                + stats.event_limit_penalty()
                + PLAYER_LIMIT_WEIGHT * stats.round_player_limit_penalty(avg_players_per_team);
        }

        for round in &self.rounds {
            total += round.referee_penalty();
            for event in &round.events {
                total += VARIETY_WEIGHT * event.variety_penalty();
            }
        }

        self.fitness = total.max(0) as u32;
        self.fitness
    }
}
