use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::{PlayerPosition, Team};
use crate::model::trick::Trick;
use crate::model::trump::{Trump, TrumpChoice};
use crate::rules;
use std::fmt;

/// Authoritative, fully observable state of one deal.
///
/// Created once per deal and mutated in place by `declare_trump` and
/// `play_card`. Search algorithms clone it and mutate only their copies.
#[derive(Debug, Clone)]
pub struct GameState {
    hands: [Hand; 4],
    trump: Option<Trump>,
    dealer: PlayerPosition,
    forehand: PlayerPosition,
    phase: GamePhase,
    tricks: Vec<Trick>,
    current_trick: Trick,
    points: [u32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    TrumpSelection {
        declarer: PlayerPosition,
        pushed: bool,
    },
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: PlayerPosition, points: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrumpError {
    NotSelectingTrump,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    PushNotAllowed,
}

impl fmt::Display for TrumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrumpError::NotSelectingTrump => write!(f, "trump has already been declared"),
            TrumpError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to declare trump but got {actual}")
            }
            TrumpError::PushNotAllowed => {
                write!(f, "only the forehand player may push the trump decision")
            }
        }
    }
}

impl std::error::Error for TrumpError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    DealComplete,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    CardNotInHand(Card),
    IllegalCard(Card),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotInPlayPhase => write!(f, "trump has not been declared yet"),
            PlayError::DealComplete => write!(f, "all nine tricks have been played"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in the acting hand"),
            PlayError::IllegalCard(card) => write!(f, "{card} violates the follow-suit rules"),
        }
    }
}

impl std::error::Error for PlayError {}

impl GameState {
    /// Deals nine cards to each seat. The player after the dealer is the
    /// forehand: first to declare trump and leader of the first trick.
    pub fn deal(deck: &Deck, dealer: PlayerPosition) -> Self {
        let mut hands = std::array::from_fn(|_| Hand::new());
        for (index, card) in deck.cards().iter().enumerate() {
            hands[index % 4].add(*card);
        }

        let forehand = dealer.next();
        Self {
            hands,
            trump: None,
            dealer,
            forehand,
            phase: GamePhase::TrumpSelection {
                declarer: forehand,
                pushed: false,
            },
            tricks: Vec::with_capacity(9),
            current_trick: Trick::new(forehand),
            points: [0; 2],
        }
    }

    /// Constructs a fresh playing-phase state directly from hands, used
    /// heavily by tests.
    pub fn from_hands(hands: [Hand; 4], forehand: PlayerPosition, trump: Trump) -> Self {
        let mut dealer = forehand;
        while dealer.next() != forehand {
            dealer = dealer.next();
        }
        Self::resume(
            hands,
            dealer,
            Some(trump),
            false,
            Vec::new(),
            Trick::new(forehand),
            [0; 2],
        )
    }

    /// Rebuilds a mid-deal state from its parts. Used by observation
    /// determinization, which substitutes sampled hands for the hidden ones.
    pub fn resume(
        hands: [Hand; 4],
        dealer: PlayerPosition,
        trump: Option<Trump>,
        pushed: bool,
        tricks: Vec<Trick>,
        current_trick: Trick,
        points: [u32; 2],
    ) -> Self {
        let forehand = dealer.next();
        let phase = match trump {
            Some(_) => GamePhase::Playing,
            None => GamePhase::TrumpSelection {
                declarer: if pushed { forehand.partner() } else { forehand },
                pushed,
            },
        };
        Self {
            hands,
            trump,
            dealer,
            forehand,
            phase,
            tricks,
            current_trick,
            points,
        }
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn trump(&self) -> Option<Trump> {
        self.trump
    }

    pub fn dealer(&self) -> PlayerPosition {
        self.dealer
    }

    pub fn forehand(&self) -> PlayerPosition {
        self.forehand
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn points(&self, team: Team) -> u32 {
        self.points[team.index()]
    }

    pub fn point_totals(&self) -> [u32; 2] {
        self.points
    }

    /// Seat expected to act next: the declarer during trump selection, the
    /// next seat in the trick once play has started.
    pub fn current_player(&self) -> PlayerPosition {
        match self.phase {
            GamePhase::TrumpSelection { declarer, .. } => declarer,
            GamePhase::Playing => self.current_trick.expected_position(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.tricks.len() == 9
    }

    /// Team holding the majority of the 157 points. Only meaningful once the
    /// deal is done; the odd total rules out ties.
    pub fn winner(&self) -> Option<Team> {
        if !self.is_done() {
            return None;
        }
        if self.points[Team::NorthSouth.index()] > self.points[Team::EastWest.index()] {
            Some(Team::NorthSouth)
        } else {
            Some(Team::EastWest)
        }
    }

    /// Legal cards for the acting player under the declared trump.
    pub fn legal_cards(&self, seat: PlayerPosition) -> Vec<Card> {
        let trump = match self.trump {
            Some(trump) => trump,
            None => return Vec::new(),
        };
        rules::legal_cards(&self.hands[seat.index()], &self.current_trick, trump)
    }

    /// Applies a trump decision from the current declarer. A push hands the
    /// decision to the partner, who must then declare a real mode.
    pub fn declare_trump(
        &mut self,
        seat: PlayerPosition,
        choice: TrumpChoice,
    ) -> Result<(), TrumpError> {
        let (declarer, pushed) = match self.phase {
            GamePhase::TrumpSelection { declarer, pushed } => (declarer, pushed),
            GamePhase::Playing => return Err(TrumpError::NotSelectingTrump),
        };

        if seat != declarer {
            return Err(TrumpError::OutOfTurn {
                expected: declarer,
                actual: seat,
            });
        }

        match choice {
            TrumpChoice::Push => {
                if pushed {
                    return Err(TrumpError::PushNotAllowed);
                }
                self.phase = GamePhase::TrumpSelection {
                    declarer: declarer.partner(),
                    pushed: true,
                };
            }
            TrumpChoice::Declare(trump) => {
                self.trump = Some(trump);
                self.phase = GamePhase::Playing;
            }
        }
        Ok(())
    }

    /// Plays one card for `seat`, resolving the trick when it is the fourth.
    pub fn play_card(&mut self, seat: PlayerPosition, card: Card) -> Result<PlayOutcome, PlayError> {
        let trump = match (self.phase, self.trump) {
            (GamePhase::Playing, Some(trump)) => trump,
            _ => return Err(PlayError::NotInPlayPhase),
        };

        if self.is_done() {
            return Err(PlayError::DealComplete);
        }

        let expected = self.current_trick.expected_position();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        if !self.hands[seat.index()].contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        let cards_before = self.card_count();
        let legal = rules::legal_cards(&self.hands[seat.index()], &self.current_trick, trump);
        assert!(
            !legal.is_empty(),
            "rule engine produced no legal cards for a non-empty hand"
        );
        if !legal.contains(&card) {
            return Err(PlayError::IllegalCard(card));
        }

        let removed = self.hands[seat.index()].remove(card);
        debug_assert!(removed, "card presence checked above");
        self.current_trick
            .play(seat, card)
            .expect("turn order checked above");

        let outcome = if self.current_trick.is_complete() {
            let winner = self
                .current_trick
                .winner(trump)
                .expect("complete trick has a winner");
            let mut points = self.current_trick.points(trump);
            if self.tricks.len() == 8 {
                points += rules::LAST_TRICK_BONUS;
            }
            self.points[winner.team().index()] += points;

            let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
            self.tricks.push(finished);
            PlayOutcome::TrickCompleted { winner, points }
        } else {
            PlayOutcome::Played
        };

        debug_assert_eq!(self.card_count(), cards_before, "a play must conserve cards");
        Ok(outcome)
    }

    fn card_count(&self) -> usize {
        let in_hands: usize = self.hands.iter().map(Hand::len).sum();
        let in_tricks: usize = self.tricks.iter().map(|trick| trick.plays().len()).sum();
        in_hands + in_tricks + self.current_trick.plays().len()
    }
}
