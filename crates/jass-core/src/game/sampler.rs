//! Determinization: sampling a full game state consistent with a partial
//! observation, so that full-information search can run on assumed worlds.

use crate::game::observation::GameObservation;
use crate::game::state::GameState;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use rand::Rng;
use rand::seq::SliceRandom;
use std::array;

/// Deals the unseen cards uniformly at random to the hidden seats, keeping
/// the observer's own hand and all public information intact. Per-seat card
/// counts follow from the trick history, so the sampled state is always a
/// legally reachable deal layout.
pub fn determinize<R: Rng + ?Sized>(obs: &GameObservation, rng: &mut R) -> GameState {
    let mut seen = [false; Card::DECK_SIZE as usize];
    for card in obs.hand.iter() {
        seen[card.id() as usize] = true;
    }
    for trick in &obs.tricks {
        for play in trick.plays() {
            seen[play.card.id() as usize] = true;
        }
    }
    for play in obs.current_trick.plays() {
        seen[play.card.id() as usize] = true;
    }

    let mut unseen: Vec<Card> = (0..Card::DECK_SIZE)
        .filter(|&id| !seen[id as usize])
        .map(|id| Card::from_id(id).expect("deck id decodes"))
        .collect();
    unseen.shuffle(rng);

    let mut hands: [Hand; 4] = array::from_fn(|_| Hand::new());
    hands[obs.player.index()] = obs.hand.clone();

    for seat in PlayerPosition::LOOP {
        if seat == obs.player {
            continue;
        }
        let target = expected_hand_size(obs, seat);
        for _ in 0..target {
            let card = unseen.pop().expect("enough unseen cards for hidden seats");
            hands[seat.index()].add(card);
        }
    }
    debug_assert!(unseen.is_empty(), "every unseen card must be dealt");

    GameState::resume(
        hands,
        obs.dealer,
        obs.trump,
        obs.pushed,
        obs.tricks.clone(),
        obs.current_trick.clone(),
        obs.points,
    )
}

fn expected_hand_size(obs: &GameObservation, seat: PlayerPosition) -> usize {
    let played_in_current = obs
        .current_trick
        .plays()
        .iter()
        .any(|play| play.position == seat);
    9 - obs.tricks.len() - usize::from(played_in_current)
}
