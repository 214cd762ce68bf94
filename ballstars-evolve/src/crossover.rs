//! Crossover operator for schedule evolution
//!
//! Single-point recombination at round granularity: the offspring inherit
//! whole rounds from their parents, and their statistics are rebuilt from
//! scratch because per-round provenance, not incremental deltas, determines
//! correctness after reassembly.

use ballstars_core::Schedule;
use rand::Rng;

/// Recombine two parents at a given cutoff round.
///
/// Offspring A takes rounds `[0, cutoff)` from `a` and `[cutoff, end)` from
/// `b`; offspring B is the complement.
pub fn crossover_at(a: &Schedule, b: &Schedule, cutoff: usize) -> (Schedule, Schedule) {
    debug_assert_eq!(a.round_count(), b.round_count());
    debug_assert!(cutoff <= a.round_count());

    let mut rounds_a = Vec::with_capacity(a.round_count());
    let mut rounds_b = Vec::with_capacity(a.round_count());

    rounds_a.extend(a.rounds[..cutoff].iter().cloned());
    rounds_a.extend(b.rounds[cutoff..].iter().cloned());
    rounds_b.extend(b.rounds[..cutoff].iter().cloned());
    rounds_b.extend(a.rounds[cutoff..].iter().cloned());

    (
        Schedule::from_rounds(rounds_a, a.team_count()),
        Schedule::from_rounds(rounds_b, a.team_count()),
    )
}

/// Recombine two parents at a uniformly drawn interior cutoff.
pub fn crossover<R: Rng>(a: &Schedule, b: &Schedule, rng: &mut R) -> (Schedule, Schedule) {
    let rounds = a.round_count();
    if rounds < 2 {
        return (a.clone(), b.clone());
    }
    crossover_at(a, b, rng.gen_range(1..rounds))
}
