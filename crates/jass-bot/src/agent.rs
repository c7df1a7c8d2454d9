use jass_core::game::observation::GameObservation;
use jass_core::game::state::GameState;
use jass_core::model::card::Card;
use jass_core::model::player::PlayerPosition;
use jass_core::model::trump::{Trump, TrumpChoice};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{Level, event};

/// Unified interface for decision makers that see only their own cards.
///
/// Both methods receive the observer's projection of the table; an
/// implementation has no way to inspect the hidden hands.
pub trait Agent: Send {
    /// Answer the pending trump question. Called only while the observer is
    /// the declarer; pushing is legal only when `obs.can_push()` holds.
    fn choose_trump(&mut self, obs: &GameObservation) -> TrumpChoice;

    /// Pick one card from `obs.legal_cards()`. Called only on the
    /// observer's turn.
    fn choose_card(&mut self, obs: &GameObservation) -> Card;
}

/// Interface for decision makers granted the full table state, hidden hands
/// included. Kept as a separate trait so that partial-information agents can
/// never receive a [`GameState`] by accident.
pub trait CheatingAgent: Send {
    fn choose_trump(&mut self, state: &GameState, seat: PlayerPosition) -> TrumpChoice;

    fn choose_card(&mut self, state: &GameState, seat: PlayerPosition) -> Card;
}

/// Baseline agent: uniform random trump and uniform random legal card.
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_trump(&mut self, obs: &GameObservation) -> TrumpChoice {
        if obs.can_push() && self.rng.gen_bool(0.5) {
            return TrumpChoice::Push;
        }
        let trump = *Trump::ALL
            .choose(&mut self.rng)
            .expect("trump list is non-empty");
        TrumpChoice::Declare(trump)
    }

    fn choose_card(&mut self, obs: &GameObservation) -> Card {
        let legal = obs.legal_cards();
        let card = *legal
            .choose(&mut self.rng)
            .expect("agent expected at least one legal card");
        event!(Level::TRACE, seat = %obs.player, card = %card, "random play");
        card
    }
}

#[cfg(test)]
mod tests {
    use super::{Agent, RandomAgent};
    use jass_core::game::state::GameState;
    use jass_core::model::deck::Deck;
    use jass_core::model::player::PlayerPosition;
    use jass_core::model::trump::TrumpChoice;

    #[test]
    fn random_agent_plays_a_full_deal() {
        let mut state = GameState::deal(&Deck::shuffled_with_seed(4), PlayerPosition::North);
        let mut agent = RandomAgent::new(4);

        loop {
            let seat = state.current_player();
            let choice = agent.choose_trump(&state.observe(seat));
            state.declare_trump(seat, choice).unwrap();
            if state.trump().is_some() {
                break;
            }
        }

        while !state.is_done() {
            let seat = state.current_player();
            let card = agent.choose_card(&state.observe(seat));
            state.play_card(seat, card).unwrap();
        }
        assert_eq!(state.point_totals().iter().sum::<u32>(), 157);
    }

    #[test]
    fn random_agent_is_seed_deterministic() {
        let state = GameState::deal(&Deck::shuffled_with_seed(8), PlayerPosition::North);
        let obs = state.observe(PlayerPosition::East);
        let a = RandomAgent::new(1).choose_trump(&obs);
        let b = RandomAgent::new(1).choose_trump(&obs);
        assert_eq!(a, b);
        // Pushing back is never offered twice.
        if let TrumpChoice::Push = a {
            assert!(obs.can_push());
        }
    }
}
