//! Roster entries
//!
//! A player carries only the attributes the balancer cares about: a
//! display name, a gender and the sport they signed up for.

use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" | "M" | "m" => Ok(Gender::Male),
            "Female" | "F" | "f" => Ok(Gender::Female),
            other => Err(RosterError::UnknownGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// The sports players can register for. This is the roster-side list;
/// the doubles variants only exist on the scheduling side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sport {
    Badminton,
    Basketball,
    Floorball,
    Korfball,
    Squash,
    TableTennis,
    Volleyball,
}

impl Sport {
    pub const ALL: [Sport; 7] = [
        Sport::Badminton,
        Sport::Basketball,
        Sport::Floorball,
        Sport::Korfball,
        Sport::Squash,
        Sport::TableTennis,
        Sport::Volleyball,
    ];
}

impl FromStr for Sport {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Badminton" => Ok(Sport::Badminton),
            "Basketball" => Ok(Sport::Basketball),
            "Floorball" => Ok(Sport::Floorball),
            "Korfball" => Ok(Sport::Korfball),
            "Squash" => Ok(Sport::Squash),
            "TableTennis" => Ok(Sport::TableTennis),
            "Volleyball" => Ok(Sport::Volleyball),
            other => Err(RosterError::UnknownSport(other.to_string())),
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sport::Badminton => "Badminton",
            Sport::Basketball => "Basketball",
            Sport::Floorball => "Floorball",
            Sport::Korfball => "Korfball",
            Sport::Squash => "Squash",
            Sport::TableTennis => "TableTennis",
            Sport::Volleyball => "Volleyball",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub gender: Gender,
    pub sport: Sport,
}

impl Player {
    pub fn new(name: impl Into<String>, gender: Gender, sport: Sport) -> Self {
        Self {
            name: name.into(),
            gender,
            sport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
        assert!("Unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_sport_parsing_round_trips() {
        for sport in Sport::ALL {
            assert_eq!(sport.to_string().parse::<Sport>().unwrap(), sport);
        }
        assert!("Chess".parse::<Sport>().is_err());
    }
}
