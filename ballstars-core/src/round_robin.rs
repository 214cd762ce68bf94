//! Round-robin matchup plan (circle method)
//!
//! For an even team count, produces `team_count - 1` rounds of
//! `team_count / 2` pairs in which every team meets every other exactly
//! once: one team stays fixed while the rest rotate by one position each
//! round, pairing the first half of the arrangement against the reversed
//! second half.

use crate::event::TeamId;

/// Generate the full matchup sequence, flattened round by round.
///
/// The result has `(team_count - 1) * team_count / 2` pairs; consume it in
/// chunks of `team_count / 2` to get per-round pairings. `team_count` must
/// be even and at least 2.
pub fn round_robin_matchups(team_count: usize) -> Vec<(TeamId, TeamId)> {
    assert!(team_count >= 2 && team_count % 2 == 0, "need an even team count");

    let rounds = team_count - 1;
    let half = team_count / 2;
    let mut arrangement: Vec<TeamId> = (0..team_count).collect();
    let mut matchups = Vec::with_capacity(rounds * half);

    for _ in 0..rounds {
        for i in 0..half {
            matchups.push((arrangement[i], arrangement[team_count - 1 - i]));
        }
        // Rotate everything except the fixed first team by one position.
        arrangement[1..].rotate_right(1);
    }

    matchups
}
