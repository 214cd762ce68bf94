//! Naive-selection loop for the team balancer
//!
//! Each generation clones and mutates every individual, evaluates
//! population and offspring, and keeps the best half of the combined
//! pool. Runs until a perfectly balanced partition appears or the
//! generation cap is hit.

use rand::Rng;

use crate::error::RosterError;
use crate::player::Player;
use crate::team_set::TeamSet;

#[derive(Clone, Copy, Debug)]
pub struct TeamBuilderConfig {
    pub population_size: usize,
    pub max_generations: usize,
}

impl Default for TeamBuilderConfig {
    fn default() -> Self {
        Self {
            population_size: 8192,
            max_generations: 100,
        }
    }
}

/// Search for a balanced partition of `players` into teams of `team_size`.
pub fn build_teams<R: Rng>(
    players: &[Player],
    team_size: usize,
    config: &TeamBuilderConfig,
    rng: &mut R,
) -> Result<TeamSet, RosterError> {
    let size = config.population_size.max(1);
    let mut population = Vec::with_capacity(size);
    for _ in 0..size {
        population.push(TeamSet::random(players, team_size, rng)?);
    }

    let mut best = population
        .iter()
        .min_by_key(|s| s.fitness)
        .cloned()
        .expect("population is non-empty");

    tracing::info!(
        "Balancing {} players into teams of {}, initial best fitness {}",
        players.len(),
        team_size,
        best.fitness
    );

    let mut generation = 0;
    while best.fitness > 0 && generation < config.max_generations {
        let mut offspring: Vec<TeamSet> = population.clone();
        for child in &mut offspring {
            child.mutate(rng);
            child.evaluate();
        }
        for individual in &mut population {
            individual.evaluate();
        }

        population.extend(offspring);
        population.sort_by_key(|s| s.fitness);
        population.truncate(size);

        if population[0].fitness < best.fitness {
            best = population[0].clone();
            tracing::info!(
                "New best fitness {} in generation {}",
                best.fitness,
                generation
            );
        }

        generation += 1;
    }

    tracing::info!(
        "Team balancing finished after {} generations, fitness {}",
        generation,
        best.fitness
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Gender, Sport};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // A roster that admits a perfectly balanced split: one man and one
    // woman per sport per team.
    fn balanced_roster() -> Vec<Player> {
        let mut players = Vec::new();
        for team in 0..2 {
            for sport in Sport::ALL {
                players.push(Player::new(
                    format!("m-{sport}-{team}"),
                    Gender::Male,
                    sport,
                ));
                players.push(Player::new(
                    format!("f-{sport}-{team}"),
                    Gender::Female,
                    sport,
                ));
            }
        }
        players
    }

    #[test]
    fn test_build_teams_finds_a_balanced_partition() {
        let players = balanced_roster();
        let config = TeamBuilderConfig {
            population_size: 64,
            max_generations: 100,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        let best = build_teams(&players, 14, &config, &mut rng).unwrap();
        assert_eq!(best.teams.len(), 2);
        assert_eq!(best.player_count(), players.len());

        let consistent: u32 = best
            .teams
            .iter()
            .map(|t| t.gender_imbalance() + t.sport_imbalance())
            .sum();
        assert_eq!(best.fitness, consistent);
    }

    #[test]
    fn test_build_teams_propagates_roster_errors() {
        let config = TeamBuilderConfig {
            population_size: 4,
            max_generations: 1,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        assert!(build_teams(&[], 4, &config, &mut rng).is_err());
    }
}
