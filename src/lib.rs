// Search engine for 10x10 Chinese checkers: jump-chain move generation,
// static evaluation and negamax alpha-beta with a parallel root split.
pub mod agent;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod search;

pub use agent::{Agent, SearchResult};
pub use board::{Action, Board, Cell, Kind, Player, Pos};
pub use config::AgentConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use movegen::{legal_actions, JumpRule};
pub use search::alphabeta::ResultPolicy;
pub use search::eval::OpponentWeight;
