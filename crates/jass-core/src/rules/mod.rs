//! Legality and trick-resolution rules for Schieber Jass.
//!
//! All functions here are pure: they never mutate game state, which keeps
//! them safe to call from search lookahead on cloned states.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use crate::model::trump::Trump;

/// Card points dealt out per deal, including the last-trick bonus.
pub const TOTAL_POINTS: u32 = 157;

/// Bonus awarded to the team winning the ninth trick.
pub const LAST_TRICK_BONUS: u32 = 5;

/// Strength of a card within its comparison class; higher beats lower.
///
/// Within the trump suit the order is J > 9 > A > K > Q > 10 > 8 > 7 > 6,
/// the defining quirk of the game. Plain suits (and every suit under ObeAbe)
/// use A > K > Q > J > 10 > 9 > 8 > 7 > 6; UneUfe is the exact reverse.
pub fn card_power(card: Card, trump: Trump) -> u8 {
    match trump {
        Trump::UneUfe => card.rank.offset(),
        Trump::ObeAbe => 8 - card.rank.offset(),
        _ if trump.suit() == Some(card.suit) => match card.rank {
            Rank::Jack => 8,
            Rank::Nine => 7,
            Rank::Ace => 6,
            Rank::King => 5,
            Rank::Queen => 4,
            Rank::Ten => 3,
            Rank::Eight => 2,
            Rank::Seven => 1,
            Rank::Six => 0,
        },
        _ => 8 - card.rank.offset(),
    }
}

/// Point value of a card under the active trump mode.
pub fn card_points(card: Card, trump: Trump) -> u32 {
    let is_trump_suit = trump.suit() == Some(card.suit);
    match trump {
        Trump::ObeAbe => match card.rank {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            Rank::Eight => 8,
            _ => 0,
        },
        Trump::UneUfe => match card.rank {
            Rank::Six => 11,
            Rank::Ten => 10,
            Rank::Eight => 8,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            _ => 0,
        },
        _ if is_trump_suit => match card.rank {
            Rank::Jack => 20,
            Rank::Nine => 14,
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            _ => 0,
        },
        _ => match card.rank {
            Rank::Ace => 11,
            Rank::Ten => 10,
            Rank::King => 4,
            Rank::Queen => 3,
            Rank::Jack => 2,
            _ => 0,
        },
    }
}

/// Resolves the winner among however many cards have been played, as an
/// offset into `cards` (0 = the led card). Returns `None` for an empty trick.
pub fn trick_winner(cards: &[Card], trump: Trump) -> Option<usize> {
    let lead = cards.first()?;
    let lead_suit = lead.suit;
    let trump_suit = trump.suit();

    let mut winning_index = 0;
    let mut winning_card = *lead;

    for (index, card) in cards.iter().enumerate().skip(1) {
        let beats = match trump_suit {
            Some(suit) => {
                let card_is_trump = card.suit == suit;
                let winner_is_trump = winning_card.suit == suit;
                if card_is_trump && !winner_is_trump {
                    true
                } else if !card_is_trump && winner_is_trump {
                    false
                } else if card_is_trump {
                    card_power(*card, trump) > card_power(winning_card, trump)
                } else {
                    card.suit == lead_suit
                        && card_power(*card, trump) > card_power(winning_card, trump)
                }
            }
            None => {
                card.suit == lead_suit && card_power(*card, trump) > card_power(winning_card, trump)
            }
        };

        if beats {
            winning_index = index;
            winning_card = *card;
        }
    }

    Some(winning_index)
}

/// Computes the set of cards `hand` may legally play into `trick`.
///
/// Leading allows the whole hand. Following requires the led suit when the
/// hand holds it, with one exception: when the led suit is the trump suit and
/// the hand's only trump is the Jack, the Jack may be withheld and any card
/// played. A hand unable to follow may play anything, trump included.
///
/// Never returns an empty set for a non-empty hand.
pub fn legal_cards(hand: &Hand, trick: &Trick, trump: Trump) -> Vec<Card> {
    let all: Vec<Card> = hand.iter().copied().collect();
    let lead_suit = match trick.lead_suit() {
        Some(suit) => suit,
        None => return all,
    };

    let followers: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|card| card.suit == lead_suit)
        .collect();
    if followers.is_empty() {
        return all;
    }

    if trump.suit() == Some(lead_suit) && holds_only_trump_jack(&followers, lead_suit) {
        return all;
    }

    followers
}

fn holds_only_trump_jack(trumps: &[Card], trump_suit: Suit) -> bool {
    trumps.len() == 1 && trumps[0] == Card::new(Rank::Jack, trump_suit)
}

#[cfg(test)]
mod tests {
    use super::{LAST_TRICK_BONUS, card_points, card_power, legal_cards, trick_winner};
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::model::trick::Trick;
    use crate::model::trump::Trump;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn trump_jack_outranks_nine_and_ace() {
        let trump = Trump::Hearts;
        let jack = card_power(card(Rank::Jack, Suit::Hearts), trump);
        let nine = card_power(card(Rank::Nine, Suit::Hearts), trump);
        let ace = card_power(card(Rank::Ace, Suit::Hearts), trump);
        assert!(jack > nine);
        assert!(nine > ace);
    }

    #[test]
    fn trump_order_is_exact() {
        let trump = Trump::Spades;
        let ordered = [
            Rank::Jack,
            Rank::Nine,
            Rank::Ace,
            Rank::King,
            Rank::Queen,
            Rank::Ten,
            Rank::Eight,
            Rank::Seven,
            Rank::Six,
        ];
        for pair in ordered.windows(2) {
            assert!(
                card_power(card(pair[0], Suit::Spades), trump)
                    > card_power(card(pair[1], Suit::Spades), trump),
                "{:?} should outrank {:?} in trump",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn trick_winner_jack_holds_against_nine() {
        // Trump Hearts: [JH, AS, KH, 9H] — the led Jack stays in front.
        let cards = [
            card(Rank::Jack, Suit::Hearts),
            card(Rank::Ace, Suit::Spades),
            card(Rank::King, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert_eq!(trick_winner(&cards, Trump::Hearts), Some(0));
    }

    #[test]
    fn nine_of_trump_takes_over_ace() {
        let cards = [
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Nine, Suit::Hearts),
        ];
        assert_eq!(trick_winner(&cards, Trump::Hearts), Some(1));
    }

    #[test]
    fn any_trump_beats_any_plain_card() {
        let cards = [
            card(Rank::Ace, Suit::Spades),
            card(Rank::Six, Suit::Hearts),
        ];
        assert_eq!(trick_winner(&cards, Trump::Hearts), Some(1));
    }

    #[test]
    fn off_suit_card_never_wins() {
        let cards = [
            card(Rank::Seven, Suit::Clubs),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Eight, Suit::Clubs),
        ];
        assert_eq!(trick_winner(&cards, Trump::ObeAbe), Some(2));
    }

    #[test]
    fn obeabe_highest_of_led_suit_wins() {
        let cards = [
            card(Rank::Ten, Suit::Diamonds),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::King, Suit::Diamonds),
        ];
        assert_eq!(trick_winner(&cards, Trump::ObeAbe), Some(1));
    }

    #[test]
    fn uneufe_lowest_of_led_suit_wins() {
        let cards = [
            card(Rank::Ten, Suit::Diamonds),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::Ace, Suit::Diamonds),
        ];
        assert_eq!(trick_winner(&cards, Trump::UneUfe), Some(1));
    }

    #[test]
    fn obeabe_and_uneufe_are_mirror_images() {
        // Mapping offset o -> 8-o turns an ObeAbe trick into the UneUfe trick
        // with the same positional winner.
        let tricks = [
            [
                card(Rank::Ace, Suit::Clubs),
                card(Rank::Nine, Suit::Clubs),
                card(Rank::King, Suit::Diamonds),
                card(Rank::Ten, Suit::Clubs),
            ],
            [
                card(Rank::Seven, Suit::Hearts),
                card(Rank::Eight, Suit::Hearts),
                card(Rank::Six, Suit::Spades),
                card(Rank::Queen, Suit::Hearts),
            ],
        ];
        for trick in tricks {
            let mirrored: Vec<Card> = trick
                .iter()
                .map(|c| {
                    Card::new(
                        crate::model::rank::Rank::from_offset(8 - c.rank.offset()).unwrap(),
                        c.suit,
                    )
                })
                .collect();
            assert_eq!(
                trick_winner(&trick, Trump::ObeAbe),
                trick_winner(&mirrored, Trump::UneUfe)
            );
        }
    }

    #[test]
    fn leading_player_may_play_anything() {
        let hand = Hand::with_cards(vec![
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Six, Suit::Clubs),
        ]);
        let trick = Trick::new(PlayerPosition::North);
        let legal = legal_cards(&hand, &trick, Trump::Spades);
        assert_eq!(legal.len(), 2);
    }

    #[test]
    fn must_follow_led_suit_when_holding_it() {
        let hand = Hand::with_cards(vec![
            card(Rank::King, Suit::Clubs),
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Ace, Suit::Hearts),
        ]);
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, card(Rank::Ace, Suit::Clubs))
            .unwrap();
        let legal = legal_cards(&hand, &trick, Trump::Clubs);
        assert_eq!(legal.len(), 2);
        assert!(legal.iter().all(|c| c.suit == Suit::Clubs));
    }

    #[test]
    fn cannot_follow_means_whole_hand_is_legal() {
        let hand = Hand::with_cards(vec![
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Jack, Suit::Spades),
        ]);
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, card(Rank::Ace, Suit::Clubs))
            .unwrap();
        let legal = legal_cards(&hand, &trick, Trump::Clubs);
        assert_eq!(legal.len(), 2);
    }

    #[test]
    fn lone_trump_jack_may_be_withheld() {
        let hand = Hand::with_cards(vec![
            card(Rank::Jack, Suit::Clubs),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Six, Suit::Diamonds),
        ]);
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, card(Rank::Ace, Suit::Clubs))
            .unwrap();
        let legal = legal_cards(&hand, &trick, Trump::Clubs);
        assert_eq!(legal.len(), 3, "lone trump Jack unlocks the whole hand");
    }

    #[test]
    fn second_trump_forces_following_trump() {
        let hand = Hand::with_cards(vec![
            card(Rank::Jack, Suit::Clubs),
            card(Rank::Six, Suit::Clubs),
            card(Rank::Ace, Suit::Hearts),
        ]);
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, card(Rank::Ace, Suit::Clubs))
            .unwrap();
        let legal = legal_cards(&hand, &trick, Trump::Clubs);
        assert_eq!(legal.len(), 2);
        assert!(legal.iter().all(|c| c.suit == Suit::Clubs));
    }

    #[test]
    fn deal_totals_157_points_in_every_mode() {
        for trump in Trump::ALL {
            let total: u32 = (0..36)
                .map(|id| card_points(Card::from_id(id).unwrap(), trump))
                .sum();
            assert_eq!(total + LAST_TRICK_BONUS, 157, "mode {trump}");
        }
    }

    #[test]
    fn trump_jack_and_nine_carry_bonus_points() {
        assert_eq!(card_points(card(Rank::Jack, Suit::Hearts), Trump::Hearts), 20);
        assert_eq!(card_points(card(Rank::Nine, Suit::Hearts), Trump::Hearts), 14);
        assert_eq!(card_points(card(Rank::Jack, Suit::Spades), Trump::Hearts), 2);
        assert_eq!(card_points(card(Rank::Nine, Suit::Spades), Trump::Hearts), 0);
    }
}
