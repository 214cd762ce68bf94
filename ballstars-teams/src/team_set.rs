//! The team-balancer individual
//!
//! A `TeamSet` is one candidate partition of the roster into teams. Its
//! fitness, to be minimised, is the sum of every team's gender and sport
//! imbalance. Mutation swaps two randomly chosen players between two
//! randomly chosen teams.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::RosterError;
use crate::player::Player;
use crate::team::Team;

#[derive(Clone, Debug)]
pub struct TeamSet {
    pub teams: Vec<Team>,
    pub fitness: u32,
}

impl TeamSet {
    /// Shuffle the roster and deal it out into teams of `team_size`.
    /// A non-dividing roster leaves one smaller remainder team so that
    /// every player is placed.
    pub fn random<R: Rng>(
        players: &[Player],
        team_size: usize,
        rng: &mut R,
    ) -> Result<Self, RosterError> {
        if players.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        if team_size == 0 {
            return Err(RosterError::InvalidTeamSize);
        }

        let mut shuffled = players.to_vec();
        shuffled.shuffle(rng);

        let teams = shuffled
            .chunks(team_size)
            .map(|chunk| Team::new(chunk.to_vec()))
            .collect();

        let mut set = Self { teams, fitness: 0 };
        set.evaluate();
        Ok(set)
    }

    /// Recompute and cache the fitness.
    pub fn evaluate(&mut self) -> u32 {
        self.fitness = self
            .teams
            .iter()
            .map(|team| team.gender_imbalance() + team.sport_imbalance())
            .sum();
        self.fitness
    }

    /// Swap two randomly chosen players between two randomly chosen teams.
    /// Picking the same team twice degenerates to a within-team swap and
    /// leaves the fitness unchanged.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) {
        let a = rng.gen_range(0..self.teams.len());
        let b = rng.gen_range(0..self.teams.len());
        let i = rng.gen_range(0..self.teams[a].members.len());
        let j = rng.gen_range(0..self.teams[b].members.len());

        if a == b {
            self.teams[a].members.swap(i, j);
        } else {
            let player_a = self.teams[a].members[i].clone();
            let player_b = std::mem::replace(&mut self.teams[b].members[j], player_a);
            self.teams[a].members[i] = player_b;
        }
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Gender, Sport};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                let gender = if i % 2 == 0 {
                    Gender::Male
                } else {
                    Gender::Female
                };
                let sport = Sport::ALL[i % Sport::ALL.len()];
                Player::new(format!("player{i}"), gender, sport)
            })
            .collect()
    }

    #[test]
    fn test_random_places_every_player() {
        let players = roster(17);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let set = TeamSet::random(&players, 4, &mut rng).unwrap();
        assert_eq!(set.teams.len(), 5);
        assert_eq!(set.player_count(), 17);
        assert_eq!(set.teams.last().unwrap().members.len(), 1);
    }

    #[test]
    fn test_random_rejects_bad_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(TeamSet::random(&[], 4, &mut rng).is_err());
        assert!(TeamSet::random(&roster(8), 0, &mut rng).is_err());
    }

    #[test]
    fn test_mutation_preserves_the_roster() {
        let players = roster(16);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut set = TeamSet::random(&players, 4, &mut rng).unwrap();

        for _ in 0..200 {
            set.mutate(&mut rng);
        }
        assert_eq!(set.player_count(), 16);

        let mut names: Vec<&str> = set
            .teams
            .iter()
            .flat_map(|t| t.members.iter().map(|p| p.name.as_str()))
            .collect();
        names.sort_unstable();
        let mut expected: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_evaluate_sums_team_imbalances() {
        let players = roster(14);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut set = TeamSet::random(&players, 7, &mut rng).unwrap();

        let expected: u32 = set
            .teams
            .iter()
            .map(|t| t.gender_imbalance() + t.sport_imbalance())
            .sum();
        assert_eq!(set.evaluate(), expected);
        assert_eq!(set.fitness, expected);
    }
}
