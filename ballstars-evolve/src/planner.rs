//! Generational search driver
//!
//! Runs the evolutionary loop over a population of schedules: offspring
//! generation, optional pool-match injection, mutation, evaluation and
//! survivor selection, tracking the best schedule seen. The loop is
//! strictly sequential and performs no I/O; progress goes through
//! `tracing`.

use crate::crossover::crossover;
use crate::mutation::{add_match_from_pool, mutate};
use crate::selection::{select, SelectionStrategy};
use ballstars_core::{
    round_robin_matchups, CategoryCaps, MatchPool, Schedule, ScheduleError, ScheduleParams,
    TeamId,
};
use rand::Rng;

/// How each generation's offspring are produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OffspringStrategy {
    /// Clone the best individual N times (local search around the best).
    CloneBest,
    /// Pairwise single-point crossover over the current population.
    Crossover,
    /// Plain clone of every individual.
    Clone,
}

/// Configuration for the generational loop.
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub offspring_strategy: OffspringStrategy,
    pub selection: SelectionStrategy,
    /// Probability of injecting a pool-drawn match into each offspring.
    pub pool_injection_rate: f64,
    /// Use the round-robin matchup plan during construction when the team
    /// count is even.
    pub use_round_robin: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            population_size: 4096,
            max_generations: 100,
            offspring_strategy: OffspringStrategy::Crossover,
            selection: SelectionStrategy::Naive,
            pool_injection_rate: 0.3,
            use_round_robin: true,
        }
    }
}

/// Outcome of a search run.
#[derive(Clone, Debug)]
pub struct PlannerResult {
    pub best: Schedule,
    pub best_fitness: u32,
    pub generations_run: usize,
    pub best_fitness_history: Vec<u32>,
}

/// The schedule search driver.
pub struct Planner {
    params: ScheduleParams,
    pool: MatchPool,
    caps: CategoryCaps,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(
        params: ScheduleParams,
        pool: MatchPool,
        caps: CategoryCaps,
        config: PlannerConfig,
    ) -> Self {
        Self {
            params,
            pool,
            caps,
            config,
        }
    }

    /// Run the generational loop until fitness 0 or the generation cap.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<PlannerResult, ScheduleError> {
        let matchups = self.matchup_plan();
        let avg = self.params.avg_players_per_team;

        let mut population = self.init_population(matchups.as_deref(), rng)?;
        let mut best = population
            .iter()
            .min_by_key(|s| s.fitness)
            .cloned()
            .expect("population is non-empty");
        let mut history = vec![best.fitness];

        tracing::info!(
            "Starting schedule search: pop={}, teams={}, rounds={}, initial best={}",
            population.len(),
            self.params.team_count,
            self.params.round_count,
            best.fitness
        );

        let mut generation = 0;
        while best.fitness > 0 && generation < self.config.max_generations {
            let mut offspring = self.generate_offspring(&population, &best, rng);

            for child in &mut offspring {
                if self.config.pool_injection_rate > 0.0
                    && rng.gen_bool(self.config.pool_injection_rate)
                {
                    add_match_from_pool(child, &self.pool, &self.caps, rng);
                }
                mutate(child, &self.caps, rng);
                child.evaluate(avg);
            }
            for individual in &mut population {
                individual.evaluate(avg);
            }

            let survivors = self.config.population_size;
            population.extend(offspring);
            population = select(self.config.selection, population, survivors, rng);

            if let Some(candidate) = population.iter().min_by_key(|s| s.fitness) {
                if candidate.fitness < best.fitness {
                    best = candidate.clone();
                    tracing::info!(
                        "New best fitness {} in generation {}",
                        best.fitness,
                        generation
                    );
                }
            }

            history.push(best.fitness);
            generation += 1;
        }

        tracing::info!(
            "Search finished after {} generations, best fitness {}",
            generation,
            best.fitness
        );

        Ok(PlannerResult {
            best_fitness: best.fitness,
            generations_run: generation,
            best_fitness_history: history,
            best,
        })
    }

    /// The round-robin plan, when the team count allows one.
    fn matchup_plan(&self) -> Option<Vec<(TeamId, TeamId)>> {
        (self.config.use_round_robin && self.params.team_count % 2 == 0)
            .then(|| round_robin_matchups(self.params.team_count))
    }

    fn init_population<R: Rng>(
        &self,
        matchups: Option<&[(TeamId, TeamId)]>,
        rng: &mut R,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        let avg = self.params.avg_players_per_team;
        let size = self.config.population_size.max(1);
        let mut population = Vec::with_capacity(size);
        for _ in 0..size {
            let mut individual =
                Schedule::random(&self.params, &self.pool, &self.caps, matchups, rng)?;
            individual.evaluate(avg);
            population.push(individual);
        }
        Ok(population)
    }

    fn generate_offspring<R: Rng>(
        &self,
        population: &[Schedule],
        best: &Schedule,
        rng: &mut R,
    ) -> Vec<Schedule> {
        match self.config.offspring_strategy {
            OffspringStrategy::CloneBest => population.iter().map(|_| best.clone()).collect(),
            OffspringStrategy::Clone => population.to_vec(),
            OffspringStrategy::Crossover => {
                let mut offspring = Vec::with_capacity(population.len());
                let mut pairs = population.chunks_exact(2);
                for pair in &mut pairs {
                    let (a, b) = crossover(&pair[0], &pair[1], rng);
                    offspring.push(a);
                    offspring.push(b);
                }
                // Odd population: clone the unpaired remainder.
                offspring.extend(pairs.remainder().iter().cloned());
                offspring
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_planner(strategy: OffspringStrategy) -> Planner {
        let params = ScheduleParams::new(4, 3, 6).unwrap();
        let config = PlannerConfig {
            population_size: 16,
            max_generations: 8,
            offspring_strategy: strategy,
            ..Default::default()
        };
        Planner::new(params, MatchPool::default(), CategoryCaps::default(), config)
    }

    #[test]
    fn test_run_terminates_and_tracks_best() {
        let planner = small_planner(OffspringStrategy::Crossover);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let result = planner.run(&mut rng).unwrap();
        assert!(result.generations_run <= 8);
        assert_eq!(result.best.fitness, result.best_fitness);
        assert_eq!(
            result.best_fitness_history.last().copied(),
            Some(result.best_fitness)
        );
    }

    #[test]
    fn test_best_fitness_never_worsens() {
        let planner = small_planner(OffspringStrategy::CloneBest);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let result = planner.run(&mut rng).unwrap();
        for window in result.best_fitness_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_runs_are_reproducible_for_a_seed() {
        let planner = small_planner(OffspringStrategy::Clone);

        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        let result_a = planner.run(&mut rng_a).unwrap();
        let result_b = planner.run(&mut rng_b).unwrap();

        assert_eq!(result_a.best_fitness, result_b.best_fitness);
        assert_eq!(result_a.best_fitness_history, result_b.best_fitness_history);
    }

    #[test]
    fn test_odd_team_count_runs() {
        let params = ScheduleParams::new(5, 2, 6).unwrap();
        let config = PlannerConfig {
            population_size: 8,
            max_generations: 3,
            ..Default::default()
        };
        let planner = Planner::new(params, MatchPool::default(), CategoryCaps::default(), config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let result = planner.run(&mut rng).unwrap();
        assert!(result.best.rounds[0].events.iter().any(|e| e.is_break()));
    }
}
