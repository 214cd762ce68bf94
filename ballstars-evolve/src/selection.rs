//! Selection strategies for the generational loop
//!
//! Both strategies consume the combined population and offspring (size 2N)
//! and produce the next generation (size N). Fitness is minimized: lower
//! is better, zero is fully feasible.

use ballstars_core::Schedule;
use rand::Rng;

/// Which survivor-selection strategy the planner uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Strict elitism: sort ascending by fitness and keep the best N.
    Naive,
    /// N tournaments of size `k`, sampled with replacement, each keeping
    /// its lowest-fitness member.
    Tournament { k: usize },
}

/// Keep the best `survivors` individuals by fitness.
pub fn naive_selection(mut candidates: Vec<Schedule>, survivors: usize) -> Vec<Schedule> {
    candidates.sort_by_key(|s| s.fitness);
    candidates.truncate(survivors);
    candidates
}

/// Run `survivors` tournaments of size `k` over the candidates.
///
/// # Panics
/// Panics if `candidates` is empty or `k` is 0.
pub fn tournament_selection<R: Rng>(
    candidates: Vec<Schedule>,
    survivors: usize,
    k: usize,
    rng: &mut R,
) -> Vec<Schedule> {
    assert!(!candidates.is_empty(), "candidate pool cannot be empty");
    assert!(k > 0, "tournament size must be > 0");

    let mut next = Vec::with_capacity(survivors);
    for _ in 0..survivors {
        let mut best = rng.gen_range(0..candidates.len());
        for _ in 1..k {
            let idx = rng.gen_range(0..candidates.len());
            if candidates[idx].fitness < candidates[best].fitness {
                best = idx;
            }
        }
        next.push(candidates[best].clone());
    }
    next
}

/// Apply the configured strategy.
pub fn select<R: Rng>(
    strategy: SelectionStrategy,
    candidates: Vec<Schedule>,
    survivors: usize,
    rng: &mut R,
) -> Vec<Schedule> {
    match strategy {
        SelectionStrategy::Naive => naive_selection(candidates, survivors),
        SelectionStrategy::Tournament { k } => {
            tournament_selection(candidates, survivors, k, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballstars_core::{CategoryCaps, MatchPool, Schedule, ScheduleParams};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn candidates_with_fitness(values: &[u32]) -> Vec<Schedule> {
        let params = ScheduleParams::new(4, 1, 4).unwrap();
        let pool = MatchPool::default();
        let caps = CategoryCaps::default();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        values
            .iter()
            .map(|&f| {
                let mut s = Schedule::random(&params, &pool, &caps, None, &mut rng).unwrap();
                s.fitness = f;
                s
            })
            .collect()
    }

    #[test]
    fn test_naive_selection_keeps_best() {
        let pop = candidates_with_fitness(&[40, 10, 30, 20]);
        let next = naive_selection(pop, 2);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].fitness, 10);
        assert_eq!(next[1].fitness, 20);
    }

    #[test]
    fn test_tournament_selection_favors_low_fitness() {
        let pop = candidates_with_fitness(&[0, 100, 200, 300, 400, 500, 600, 700, 800, 900]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let next = tournament_selection(pop, 100, 3, &mut rng);
        let low = next.iter().filter(|s| s.fitness <= 300).count();
        assert!(low > 50, "tournaments should favor low fitness, got {}", low);
    }

    #[test]
    fn test_tournament_selection_size() {
        let pop = candidates_with_fitness(&[5, 4, 3, 2, 1, 0]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let next = tournament_selection(pop, 6, 2, &mut rng);
        assert_eq!(next.len(), 6);
    }

    #[test]
    fn test_select_dispatches() {
        let pop = candidates_with_fitness(&[9, 1, 5]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let next = select(SelectionStrategy::Naive, pop, 1, &mut rng);
        assert_eq!(next[0].fitness, 1);
    }
}
