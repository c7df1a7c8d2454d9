use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// The ranking regime governing card strength for one deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trump {
    Diamonds,
    Hearts,
    Spades,
    Clubs,
    /// Top-down: no trump suit, plain descending order wins everywhere.
    ObeAbe,
    /// Bottom-up: no trump suit, ascending order wins everywhere.
    UneUfe,
}

impl Trump {
    pub const ALL: [Trump; 6] = [
        Trump::Diamonds,
        Trump::Hearts,
        Trump::Spades,
        Trump::Clubs,
        Trump::ObeAbe,
        Trump::UneUfe,
    ];

    pub const fn from_suit(suit: Suit) -> Self {
        match suit {
            Suit::Diamonds => Trump::Diamonds,
            Suit::Hearts => Trump::Hearts,
            Suit::Spades => Trump::Spades,
            Suit::Clubs => Trump::Clubs,
        }
    }

    /// The trump suit, if this mode has one.
    pub const fn suit(self) -> Option<Suit> {
        match self {
            Trump::Diamonds => Some(Suit::Diamonds),
            Trump::Hearts => Some(Suit::Hearts),
            Trump::Spades => Some(Suit::Spades),
            Trump::Clubs => Some(Suit::Clubs),
            Trump::ObeAbe | Trump::UneUfe => None,
        }
    }
}

impl fmt::Display for Trump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trump::Diamonds => "Diamonds",
            Trump::Hearts => "Hearts",
            Trump::Spades => "Spades",
            Trump::Clubs => "Clubs",
            Trump::ObeAbe => "ObeAbe",
            Trump::UneUfe => "UneUfe",
        };
        f.write_str(label)
    }
}

/// A declarer's answer at a trump-selection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrumpChoice {
    Declare(Trump),
    /// Defer the decision to the partner. Only the forehand player may push.
    Push,
}

impl fmt::Display for TrumpChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrumpChoice::Declare(trump) => write!(f, "{trump}"),
            TrumpChoice::Push => f.write_str("Push"),
        }
    }
}
