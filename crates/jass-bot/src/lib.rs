pub mod agent;
pub mod heuristic;
pub mod mcts;
pub mod minimax;

pub use agent::{Agent, CheatingAgent, RandomAgent};
pub use heuristic::HeuristicAgent;
pub use mcts::MctsAgent;
pub use minimax::MinimaxAgent;
