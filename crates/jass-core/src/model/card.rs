use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const DECK_SIZE: u8 = 36;

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Integer identifier in [0,36): `suit * 9 + rank offset`.
    pub const fn id(self) -> u8 {
        self.suit as u8 * 9 + self.rank as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        if id >= Self::DECK_SIZE {
            return None;
        }
        let suit = match Suit::from_index((id / 9) as usize) {
            Some(suit) => suit,
            None => return None,
        };
        let rank = match Rank::from_offset(id % 9) {
            Some(rank) => rank,
            None => return None,
        };
        Some(Self { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn id_is_bijective_over_deck() {
        for id in 0..Card::DECK_SIZE {
            let card = Card::from_id(id).expect("id in range decodes");
            assert_eq!(card.id(), id);
            assert_eq!(card.suit.index() as u8 * 9 + card.rank.offset(), id);
        }
        assert_eq!(Card::from_id(36), None);
    }

    #[test]
    fn id_decomposes_into_suit_and_rank() {
        let card = Card::from_id(12).unwrap();
        assert_eq!(card.suit, Suit::Hearts);
        assert_eq!(card.rank, Rank::Jack);
    }

    #[test]
    fn display_combines_rank_and_suit() {
        let card = Card::new(Rank::Ace, Suit::Clubs);
        assert_eq!(card.to_string(), "AC");
    }
}
