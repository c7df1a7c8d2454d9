use crate::agent::Agent;
use jass_core::game::observation::GameObservation;
use jass_core::model::card::Card;
use jass_core::model::trump::{Trump, TrumpChoice};
use jass_core::rules;
use tracing::{Level, event};

/// Expected-value tables for trump selection, indexed by rank offset
/// (Ace through Six). Trump suits additionally value the Jack and Nine.
const TRUMP_SUIT_SCORES: [i32; 9] = [11, 4, 3, 20, 10, 14, 0, 0, 0];
const PLAIN_SUIT_SCORES: [i32; 9] = [11, 4, 3, 2, 10, 0, 0, 0, 0];
const UNEUFE_SCORES: [i32; 9] = [0, 0, 0, 0, 10, 0, 0, 0, 11];

/// Holding a trump card is worth more than its face score alone.
const TRUMP_LENGTH_BONUS: i32 = 10;

/// Below this hand score the forehand prefers to push.
const PUSH_THRESHOLD: i32 = 90;

/// Rule-based agent: scores each trump mode from its hand, then plays the
/// cheapest card that still takes the trick, ducking when the partner
/// already holds it.
pub struct HeuristicAgent;

impl HeuristicAgent {
    pub fn new() -> Self {
        Self
    }

    /// Sum of the per-card selection scores for `trump` over `cards`.
    pub fn trump_selection_score(cards: &[Card], trump: Trump) -> i32 {
        cards
            .iter()
            .map(|card| {
                let offset = card.rank as usize;
                match trump {
                    Trump::ObeAbe => PLAIN_SUIT_SCORES[offset],
                    Trump::UneUfe => UNEUFE_SCORES[offset],
                    _ if trump.suit() == Some(card.suit) => TRUMP_SUIT_SCORES[offset],
                    _ => PLAIN_SUIT_SCORES[offset],
                }
            })
            .sum()
    }

    fn best_trump(obs: &GameObservation) -> (Trump, i32) {
        let mut best = (Trump::Diamonds, i32::MIN);
        for trump in Trump::ALL {
            let mut score = Self::trump_selection_score(obs.hand.cards(), trump);
            if let Some(suit) = trump.suit() {
                score += obs.hand.count_suit(suit) as i32 * TRUMP_LENGTH_BONUS;
            }
            if score > best.1 {
                best = (trump, score);
            }
        }
        best
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for HeuristicAgent {
    fn choose_trump(&mut self, obs: &GameObservation) -> TrumpChoice {
        let (trump, score) = Self::best_trump(obs);
        let choice = if score < PUSH_THRESHOLD && obs.can_push() {
            TrumpChoice::Push
        } else {
            TrumpChoice::Declare(trump)
        };
        event!(Level::DEBUG, seat = %obs.player, %choice, score, "heuristic trump");
        choice
    }

    fn choose_card(&mut self, obs: &GameObservation) -> Card {
        let trump = obs.trump.expect("play decision requires declared trump");
        let legal = obs.legal_cards();
        assert!(
            !legal.is_empty(),
            "heuristic agent expected at least one legal card"
        );

        let partner_is_winning =
            obs.current_trick.current_winner(trump) == Some(obs.player.partner());

        // Cards that would hold the trick if played right now.
        let winning: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|&card| {
                let mut probe = obs.current_trick.clone();
                probe
                    .play(obs.player, card)
                    .expect("observation trick accepts the observer's play");
                probe.current_winner(trump) == Some(obs.player)
            })
            .collect();

        let card = if !winning.is_empty() && !partner_is_winning {
            cheapest(&winning, trump)
        } else {
            cheapest(&legal, trump)
        };
        event!(Level::DEBUG, seat = %obs.player, card = %card, "heuristic play");
        card
    }
}

fn cheapest(cards: &[Card], trump: Trump) -> Card {
    *cards
        .iter()
        .min_by_key(|card| rules::card_power(**card, trump))
        .expect("candidate list is non-empty")
}
