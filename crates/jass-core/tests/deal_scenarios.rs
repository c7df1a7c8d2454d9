use jass_core::game::state::GameState;
use jass_core::model::card::Card;
use jass_core::model::deck::Deck;
use jass_core::model::hand::Hand;
use jass_core::model::player::{PlayerPosition, Team};
use jass_core::model::rank::Rank;
use jass_core::model::suit::Suit;
use jass_core::model::trump::{Trump, TrumpChoice};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

#[test]
fn follower_holding_clubs_is_restricted_to_clubs() {
    let hands = [
        Hand::with_cards(vec![
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Six, Suit::Hearts),
        ]),
        Hand::with_cards(vec![
            card(Rank::King, Suit::Clubs),
            card(Rank::Nine, Suit::Clubs),
        ]),
        Hand::with_cards(vec![
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Ace, Suit::Spades),
        ]),
        Hand::with_cards(vec![
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Six, Suit::Diamonds),
        ]),
    ];
    let mut state = GameState::from_hands(hands, PlayerPosition::North, Trump::Clubs);
    state
        .play_card(PlayerPosition::North, card(Rank::Ace, Suit::Clubs))
        .unwrap();

    let east_legal = state.legal_cards(PlayerPosition::East);
    assert_eq!(east_legal.len(), 2);
    assert!(east_legal.iter().all(|c| c.suit == Suit::Clubs));
}

#[test]
fn follower_without_clubs_may_play_anything() {
    let hands = [
        Hand::with_cards(vec![
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Six, Suit::Hearts),
        ]),
        Hand::with_cards(vec![
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Nine, Suit::Hearts),
        ]),
        Hand::with_cards(vec![
            card(Rank::King, Suit::Clubs),
            card(Rank::Ace, Suit::Spades),
        ]),
        Hand::with_cards(vec![
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Six, Suit::Diamonds),
        ]),
    ];
    let mut state = GameState::from_hands(hands, PlayerPosition::North, Trump::Clubs);
    state
        .play_card(PlayerPosition::North, card(Rank::Ace, Suit::Clubs))
        .unwrap();

    let east_legal = state.legal_cards(PlayerPosition::East);
    assert_eq!(east_legal.len(), 2, "a void hand keeps all its options");
}

#[test]
fn full_deals_conserve_cards_and_points_across_modes() {
    for (seed, trump) in [
        (0u64, Trump::Diamonds),
        (1, Trump::Hearts),
        (2, Trump::Spades),
        (3, Trump::Clubs),
        (4, Trump::ObeAbe),
        (5, Trump::UneUfe),
    ] {
        let mut state = GameState::deal(&Deck::shuffled_with_seed(seed), PlayerPosition::West);
        let mut rng = SmallRng::seed_from_u64(seed);
        state
            .declare_trump(state.current_player(), TrumpChoice::Declare(trump))
            .unwrap();

        let mut tricks_seen = 0;
        while !state.is_done() {
            let seat = state.current_player();
            let legal = state.legal_cards(seat);
            assert!(!legal.is_empty(), "legal set must never be empty mid-deal");
            for c in &legal {
                assert!(state.hand(seat).contains(*c));
            }
            let choice = *legal.choose(&mut rng).unwrap();
            state.play_card(seat, choice).unwrap();
            tricks_seen = state.tricks().len();
        }

        assert_eq!(tricks_seen, 9);
        assert_eq!(
            state.points(Team::NorthSouth) + state.points(Team::EastWest),
            157,
            "seed {seed} mode {trump}"
        );

        // Every card is accounted for exactly once in the trick history.
        let mut seen = [false; 36];
        for trick in state.tricks() {
            assert_eq!(trick.plays().len(), 4);
            for play in trick.plays() {
                let id = play.card.id() as usize;
                assert!(!seen[id], "card {} played twice", play.card);
                seen[id] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }
}

#[test]
fn pushed_deal_plays_out_normally() {
    let mut state = GameState::deal(&Deck::shuffled_with_seed(17), PlayerPosition::North);
    state
        .declare_trump(PlayerPosition::East, TrumpChoice::Push)
        .unwrap();
    state
        .declare_trump(PlayerPosition::West, TrumpChoice::Declare(Trump::Spades))
        .unwrap();
    assert_eq!(state.current_player(), PlayerPosition::East);

    let mut rng = SmallRng::seed_from_u64(17);
    while !state.is_done() {
        let seat = state.current_player();
        let legal = state.legal_cards(seat);
        let choice = *legal.choose(&mut rng).unwrap();
        state.play_card(seat, choice).unwrap();
    }
    assert_eq!(state.point_totals().iter().sum::<u32>(), 157);
}
