use crate::game::state::{GamePhase, GameState};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::{PlayerPosition, Team};
use crate::model::trick::Trick;
use crate::model::trump::Trump;
use crate::rules;
use serde::{Deserialize, Serialize};

/// The partial-information projection of a [`GameState`] handed to agents
/// that must not see the opponents' hands. Everything here is public table
/// knowledge plus the observer's own cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObservation {
    pub player: PlayerPosition,
    pub hand: Hand,
    pub trump: Option<Trump>,
    pub dealer: PlayerPosition,
    pub forehand: PlayerPosition,
    pub pushed: bool,
    pub tricks: Vec<Trick>,
    pub current_trick: Trick,
    pub points: [u32; 2],
}

impl GameObservation {
    pub fn from_state(state: &GameState, player: PlayerPosition) -> Self {
        let pushed = matches!(state.phase(), GamePhase::TrumpSelection { pushed: true, .. });
        Self {
            player,
            hand: state.hand(player).clone(),
            trump: state.trump(),
            dealer: state.dealer(),
            forehand: state.forehand(),
            pushed,
            tricks: state.tricks().to_vec(),
            current_trick: state.current_trick().clone(),
            points: state.point_totals(),
        }
    }

    /// Seat entitled to the pending trump decision, if the deal is still in
    /// trump selection.
    pub fn declarer(&self) -> Option<PlayerPosition> {
        if self.trump.is_some() {
            return None;
        }
        Some(if self.pushed {
            self.forehand.partner()
        } else {
            self.forehand
        })
    }

    /// Whether the observer may answer the trump question with a push.
    pub fn can_push(&self) -> bool {
        self.declarer() == Some(self.player) && !self.pushed
    }

    pub fn is_done(&self) -> bool {
        self.tricks.len() == 9
    }

    pub fn points(&self, team: Team) -> u32 {
        self.points[team.index()]
    }

    /// Legal cards for the observer under the declared trump.
    pub fn legal_cards(&self) -> Vec<Card> {
        match self.trump {
            Some(trump) => rules::legal_cards(&self.hand, &self.current_trick, trump),
            None => Vec::new(),
        }
    }

    /// Serializes the observation for transport to a remote decision maker.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl GameState {
    /// Projects this state down to what `player` is allowed to see.
    pub fn observe(&self, player: PlayerPosition) -> GameObservation {
        GameObservation::from_state(self, player)
    }
}
