//! Simulated-annealing refinement
//!
//! Single-individual local search used to polish a schedule after the
//! generational loop, or standalone on a random start. Each step applies
//! one granular mutation and accepts it by the Metropolis-style rule
//! `1 / (1 + exp(delta / temperature))` for worsening moves.

use crate::mutation::granular_mutate;
use ballstars_core::{CategoryCaps, MatchPool, Schedule};
use rand::Rng;

/// Cooling schedule and step budget for an annealing run.
#[derive(Clone, Copy, Debug)]
pub struct AnnealingConfig {
    pub iterations: usize,
    pub initial_temperature: f64,
    /// Geometric cooling factor applied after every step.
    pub alpha: f64,
    /// Probability of injecting a pool-drawn match before mutating.
    pub pool_injection_rate: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            iterations: 200_000,
            initial_temperature: 1_000.0,
            alpha: 0.999_97,
            pool_injection_rate: 0.1,
        }
    }
}

/// Refine `start` in place of a full population search.
///
/// Returns the best schedule seen across the run, which is never worse
/// than `start`.
pub fn anneal<R: Rng>(
    start: Schedule,
    pool: &MatchPool,
    caps: &CategoryCaps,
    avg_players_per_team: i32,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Schedule {
    let mut current = start;
    current.evaluate(avg_players_per_team);
    let mut best = current.clone();
    let mut temperature = config.initial_temperature;

    tracing::info!(
        "Starting annealing: {} iterations, T0={}, start fitness {}",
        config.iterations,
        config.initial_temperature,
        current.fitness
    );

    for iteration in 0..config.iterations {
        if best.fitness == 0 {
            break;
        }

        let mut candidate = current.clone();
        if config.pool_injection_rate > 0.0 && rng.gen_bool(config.pool_injection_rate) {
            crate::mutation::add_match_from_pool(&mut candidate, pool, caps, rng);
        }
        granular_mutate(&mut candidate, caps, rng);
        candidate.evaluate(avg_players_per_team);

        let delta = candidate.fitness as f64 - current.fitness as f64;
        if delta <= 0.0 || rng.gen_bool(acceptance_probability(delta, temperature)) {
            current = candidate;
            if current.fitness < best.fitness {
                best = current.clone();
                tracing::debug!(
                    "Annealing improved to {} at iteration {}",
                    best.fitness,
                    iteration
                );
            }
        }

        temperature *= config.alpha;
    }

    tracing::info!("Annealing finished with fitness {}", best.fitness);
    best
}

fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if temperature <= f64::EPSILON {
        return 0.0;
    }
    1.0 / (1.0 + (delta / temperature).exp())
}
