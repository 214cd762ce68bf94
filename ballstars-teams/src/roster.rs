//! Roster CSV input and team CSV output
//!
//! The roster format is `first name,last name,gender,sport` with a
//! header line. Output lists one player per row with the index of the
//! team they were assigned to.

use std::fs;
use std::path::Path;

use crate::error::RosterError;
use crate::player::Player;
use crate::team_set::TeamSet;

/// Parse a roster file. The first line is assumed to be a header and is
/// skipped; trailing columns beyond the first four are ignored.
pub fn parse_roster(path: impl AsRef<Path>) -> Result<Vec<Player>, RosterError> {
    parse_roster_str(&fs::read_to_string(path)?)
}

pub fn parse_roster_str(contents: &str) -> Result<Vec<Player>, RosterError> {
    let mut players = Vec::new();
    for (line_no, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 4 {
            return Err(RosterError::MalformedLine(line_no + 1, fields.len()));
        }

        let name = format!("{} {}", fields[0].trim(), fields[1].trim());
        players.push(Player::new(name, fields[2].parse()?, fields[3].parse()?));
    }

    if players.is_empty() {
        return Err(RosterError::EmptyRoster);
    }
    Ok(players)
}

/// Render a team assignment as CSV.
pub fn teams_to_csv(set: &TeamSet) -> String {
    let mut out = String::from("Name,Gender,Sport,TeamId\n");
    for (team_id, team) in set.teams.iter().enumerate() {
        for player in &team.members {
            out.push_str(&format!(
                "{},{},{},{}\n",
                player.name, player.gender, player.sport, team_id
            ));
        }
    }
    out
}

pub fn save_teams(set: &TeamSet, path: impl AsRef<Path>) -> Result<(), RosterError> {
    fs::write(path, teams_to_csv(set))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Gender, Sport};
    use crate::team::Team;

    const ROSTER: &str = "\
First name,Last name,Gender,Sport
Alice,Jansen,Female,Volleyball
Bob,de Vries,Male,Squash

Carol,Bakker,Female,TableTennis
";

    #[test]
    fn test_parse_roster_skips_header_and_blank_lines() {
        let players = parse_roster_str(ROSTER).unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].name, "Alice Jansen");
        assert_eq!(players[1].gender, Gender::Male);
        assert_eq!(players[2].sport, Sport::TableTennis);
    }

    #[test]
    fn test_parse_roster_reports_bad_rows() {
        let err = parse_roster_str("header\nAlice,Jansen,Female\n").unwrap_err();
        assert!(matches!(err, RosterError::MalformedLine(2, 3)));

        let err = parse_roster_str("header\nAlice,Jansen,Female,Chess\n").unwrap_err();
        assert!(matches!(err, RosterError::UnknownSport(_)));
    }

    #[test]
    fn test_teams_to_csv_layout() {
        let set = TeamSet {
            teams: vec![
                Team::new(vec![Player::new("Alice Jansen", Gender::Female, Sport::Squash)]),
                Team::new(vec![Player::new("Bob de Vries", Gender::Male, Sport::Korfball)]),
            ],
            fitness: 0,
        };

        let csv = teams_to_csv(&set);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Name,Gender,Sport,TeamId");
        assert_eq!(lines[1], "Alice Jansen,Female,Squash,0");
        assert_eq!(lines[2], "Bob de Vries,Male,Korfball,1");
    }
}
