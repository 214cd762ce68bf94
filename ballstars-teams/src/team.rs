//! A single balanced team and its imbalance measures.

use rustc_hash::FxHashMap;

use crate::player::{Gender, Player, Sport};

#[derive(Clone, Debug, Default)]
pub struct Team {
    pub members: Vec<Player>,
}

impl Team {
    pub fn new(members: Vec<Player>) -> Self {
        Self { members }
    }

    pub fn add_player(&mut self, player: Player) {
        self.members.push(player);
    }

    /// Absolute difference between male and female member counts.
    pub fn gender_imbalance(&self) -> u32 {
        let males = self
            .members
            .iter()
            .filter(|p| p.gender == Gender::Male)
            .count() as i64;
        let females = self.members.len() as i64 - males;
        (males - females).unsigned_abs() as u32
    }

    /// Spread between the most and least represented sports, with sports
    /// nobody in the team plays counting as zero.
    pub fn sport_imbalance(&self) -> u32 {
        let mut counts: FxHashMap<Sport, u32> = FxHashMap::default();
        for player in &self.members {
            *counts.entry(player.sport).or_default() += 1;
        }

        let mut max = 0;
        let mut min = u32::MAX;
        for sport in Sport::ALL {
            let count = counts.get(&sport).copied().unwrap_or(0);
            max = max.max(count);
            min = min.min(count);
        }
        max - min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, gender: Gender, sport: Sport) -> Player {
        Player::new(name, gender, sport)
    }

    #[test]
    fn test_gender_imbalance() {
        let team = Team::new(vec![
            player("a", Gender::Male, Sport::Squash),
            player("b", Gender::Male, Sport::Badminton),
            player("c", Gender::Female, Sport::Volleyball),
        ]);
        assert_eq!(team.gender_imbalance(), 1);
    }

    #[test]
    fn test_sport_imbalance_counts_missing_sports_as_zero() {
        let team = Team::new(vec![
            player("a", Gender::Male, Sport::Squash),
            player("b", Gender::Female, Sport::Squash),
        ]);
        // Two squash players, nothing else: max 2, min 0.
        assert_eq!(team.sport_imbalance(), 2);
    }

    #[test]
    fn test_empty_team_is_balanced() {
        let team = Team::default();
        assert_eq!(team.gender_imbalance(), 0);
        assert_eq!(team.sport_imbalance(), 0);
    }
}
