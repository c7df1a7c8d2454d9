use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }

    pub const fn partner(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::South,
            PlayerPosition::East => PlayerPosition::West,
            PlayerPosition::South => PlayerPosition::North,
            PlayerPosition::West => PlayerPosition::East,
        }
    }

    pub const fn team(self) -> Team {
        match self {
            PlayerPosition::North | PlayerPosition::South => Team::NorthSouth,
            PlayerPosition::East | PlayerPosition::West => Team::EastWest,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

/// Fixed partnerships: seats 0 and 2 against seats 1 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    NorthSouth = 0,
    EastWest = 1,
}

impl Team {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::NorthSouth => "North/South",
            Team::EastWest => "East/West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerPosition, Team};

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::North);
    }

    #[test]
    fn partner_sits_opposite() {
        assert_eq!(PlayerPosition::East.partner(), PlayerPosition::West);
        assert_eq!(PlayerPosition::North.partner(), PlayerPosition::South);
    }

    #[test]
    fn teams_pair_alternating_seats() {
        assert_eq!(PlayerPosition::North.team(), Team::NorthSouth);
        assert_eq!(PlayerPosition::South.team(), Team::NorthSouth);
        assert_eq!(PlayerPosition::East.team(), Team::EastWest);
        assert_eq!(Team::NorthSouth.opponent(), Team::EastWest);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(PlayerPosition::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
