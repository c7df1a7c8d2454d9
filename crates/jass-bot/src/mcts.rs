use crate::agent::{Agent, CheatingAgent};
use jass_core::game::observation::GameObservation;
use jass_core::game::sampler::determinize;
use jass_core::game::state::GameState;
use jass_core::model::card::Card;
use jass_core::model::player::{PlayerPosition, Team};
use jass_core::model::trump::{Trump, TrumpChoice};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{Level, event};

const DEFAULT_ITERATIONS: u32 = 100;
const EXPLORATION: f64 = 1.4;

/// Monte Carlo tree searcher over full deal states.
///
/// The tree lives in a flat arena; nodes refer to their parent and children
/// by index, so backpropagation is an index walk and the whole tree drops at
/// once when a decision is made. Rollouts are uniform random and score 1.0
/// when the acting team takes the deal.
///
/// Partial-information use goes through [`Agent`]: each decision samples one
/// full state consistent with the observation and searches that.
pub struct MctsAgent {
    iterations: u32,
    exploration: f64,
    rng: SmallRng,
}

struct Node<A> {
    state: GameState,
    parent: Option<usize>,
    action: Option<A>,
    children: Vec<usize>,
    wins: f64,
    visits: u32,
}

struct Tree<A> {
    nodes: Vec<Node<A>>,
    exploration: f64,
}

impl<A: Copy> Tree<A> {
    fn with_root(state: GameState, exploration: f64) -> Self {
        Self {
            nodes: vec![Node {
                state,
                parent: None,
                action: None,
                children: Vec::new(),
                wins: 0.0,
                visits: 0,
            }],
            exploration,
        }
    }

    fn uct_value(&self, id: usize) -> f64 {
        let node = &self.nodes[id];
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let parent_visits = match node.parent {
            Some(parent) => self.nodes[parent].visits,
            None => node.visits,
        };
        node.wins / f64::from(node.visits)
            + self.exploration * (f64::from(parent_visits).ln() / f64::from(node.visits)).sqrt()
    }

    /// Descends from the root along the highest-UCT child at every level.
    fn select_leaf(&self) -> usize {
        let mut id = 0;
        while !self.nodes[id].children.is_empty() {
            id = *self.nodes[id]
                .children
                .iter()
                .max_by(|a, b| {
                    self.uct_value(**a)
                        .partial_cmp(&self.uct_value(**b))
                        .expect("uct values are never NaN")
                })
                .expect("children list is non-empty");
        }
        id
    }

    fn add_child(&mut self, parent: usize, state: GameState, action: A) {
        let id = self.nodes.len();
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            children: Vec::new(),
            wins: 0.0,
            visits: 0,
        });
        self.nodes[parent].children.push(id);
    }

    fn backpropagate(&mut self, leaf: usize, result: f64) {
        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            self.nodes[id].visits += 1;
            self.nodes[id].wins += result;
            cursor = self.nodes[id].parent;
        }
    }

    /// The answer reuses the exploration-adjusted value rather than raw
    /// visit counts, so thinly visited but promising branches can still win
    /// the vote.
    fn best_root_action(&self) -> Option<A> {
        self.nodes[0]
            .children
            .iter()
            .max_by(|a, b| {
                self.uct_value(**a)
                    .partial_cmp(&self.uct_value(**b))
                    .expect("uct values are never NaN")
            })
            .and_then(|id| self.nodes[*id].action)
    }
}

impl MctsAgent {
    pub fn new(seed: u64) -> Self {
        Self::with_iterations(seed, DEFAULT_ITERATIONS)
    }

    pub fn with_iterations(seed: u64, iterations: u32) -> Self {
        Self::with_parameters(seed, iterations, EXPLORATION)
    }

    pub fn with_parameters(seed: u64, iterations: u32, exploration: f64) -> Self {
        Self {
            iterations,
            exploration,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Plays the deal out with uniform random moves and scores it for `team`.
    /// A state still awaiting trump gets a uniform random mode first.
    fn rollout(&mut self, state: &GameState, team: Team) -> f64 {
        let mut sim = state.clone();
        if sim.trump().is_none() {
            let trump = *Trump::ALL
                .choose(&mut self.rng)
                .expect("trump list is non-empty");
            sim.declare_trump(sim.current_player(), TrumpChoice::Declare(trump))
                .expect("declarer acts in selection phase");
        }
        while !sim.is_done() {
            let seat = sim.current_player();
            let legal = sim.legal_cards(seat);
            let card = match legal.choose(&mut self.rng) {
                Some(card) => *card,
                None => break,
            };
            sim.play_card(seat, card).expect("legal card applies cleanly");
        }
        match sim.winner() {
            Some(winner) if winner == team => 1.0,
            _ => 0.0,
        }
    }

    /// Best card for `seat` by UCT search, or `None` on a terminal state.
    pub fn best_card(&mut self, state: &GameState, seat: PlayerPosition) -> Option<Card> {
        if state.is_done() {
            return None;
        }
        let team = seat.team();
        let mut tree: Tree<Card> = Tree::with_root(state.clone(), self.exploration);

        for _ in 0..self.iterations {
            let mut leaf = tree.select_leaf();

            // Expand only once a node has been sampled at least once.
            if tree.nodes[leaf].visits > 0 && !tree.nodes[leaf].state.is_done() {
                let acting = tree.nodes[leaf].state.current_player();
                let legal = tree.nodes[leaf].state.legal_cards(acting);
                for card in legal {
                    let mut child = tree.nodes[leaf].state.clone();
                    child
                        .play_card(acting, card)
                        .expect("legal card applies cleanly");
                    tree.add_child(leaf, child, card);
                }
                if !tree.nodes[leaf].children.is_empty() {
                    let pick = self.rng.gen_range(0..tree.nodes[leaf].children.len());
                    leaf = tree.nodes[leaf].children[pick];
                }
            }

            let result = self.rollout(&tree.nodes[leaf].state, team);
            tree.backpropagate(leaf, result);
        }

        tree.best_root_action()
    }

    /// Best trump answer for `seat` by UCT search over the declarable modes,
    /// or `None` when the state is not awaiting a trump decision.
    pub fn best_trump(&mut self, state: &GameState, seat: PlayerPosition) -> Option<TrumpChoice> {
        if state.trump().is_some() {
            return None;
        }
        let team = seat.team();
        let mut choices: Vec<TrumpChoice> =
            Trump::ALL.iter().copied().map(TrumpChoice::Declare).collect();
        let push_open = state.forehand() == seat;
        if push_open {
            choices.push(TrumpChoice::Push);
        }

        let mut tree: Tree<TrumpChoice> = Tree::with_root(state.clone(), self.exploration);

        for _ in 0..self.iterations {
            let mut leaf = tree.select_leaf();

            // Only the root expands: one child per trump answer.
            if leaf == 0 && tree.nodes[0].visits > 0 && tree.nodes[0].children.is_empty() {
                for &choice in &choices {
                    let mut child = state.clone();
                    child
                        .declare_trump(seat, choice)
                        .expect("declarer acts in selection phase");
                    tree.add_child(0, child, choice);
                }
                let pick = self.rng.gen_range(0..tree.nodes[0].children.len());
                leaf = tree.nodes[0].children[pick];
            }

            let result = self.rollout(&tree.nodes[leaf].state, team);
            tree.backpropagate(leaf, result);
        }

        tree.best_root_action()
    }
}

impl CheatingAgent for MctsAgent {
    fn choose_trump(&mut self, state: &GameState, seat: PlayerPosition) -> TrumpChoice {
        let choice = self
            .best_trump(state, seat)
            .expect("trump decision requested outside the selection phase");
        event!(Level::DEBUG, seat = %seat, %choice, "mcts trump");
        choice
    }

    fn choose_card(&mut self, state: &GameState, seat: PlayerPosition) -> Card {
        assert!(
            !state.legal_cards(seat).is_empty(),
            "mcts agent expected at least one legal card"
        );
        let card = self
            .best_card(state, seat)
            .expect("root with legal cards yields an action");
        event!(Level::DEBUG, seat = %seat, card = %card, "mcts play");
        card
    }
}

impl Agent for MctsAgent {
    fn choose_trump(&mut self, obs: &GameObservation) -> TrumpChoice {
        let sampled = determinize(obs, &mut self.rng);
        CheatingAgent::choose_trump(self, &sampled, obs.player)
    }

    fn choose_card(&mut self, obs: &GameObservation) -> Card {
        let sampled = determinize(obs, &mut self.rng);
        CheatingAgent::choose_card(self, &sampled, obs.player)
    }
}
