use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Action, Board, Player};
use crate::config::AgentConfig;
use crate::rules::opponents_disjoint;
use crate::search::alphabeta::{Outcome, SearchParams, Searcher};
use crate::search::tiebreak::choose_tied;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the mover has no legal action.
    pub action: Option<Action>,
    pub score: i32,
    /// Size of the set the action was drawn from.
    pub ties: usize,
    pub depth: u32,
    pub without_opponent: bool,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Long-lived searcher for one side.
#[derive(Debug, Clone)]
pub struct Agent {
    player: Player,
    config: AgentConfig,
    searcher: Searcher,
    rng: SmallRng,
}

impl Agent {
    pub fn new(player: Player, config: AgentConfig) -> Self {
        let rng = seeded_rng(config.seed);
        let searcher = Searcher::new(SearchParams::from(&config));
        Self { player, config, searcher, rng }
    }

    pub fn player(&self) -> Player { self.player }

    pub fn config(&self) -> &AgentConfig { &self.config }

    pub fn configure(&mut self, config: AgentConfig) { *self = Agent::new(self.player, config); }

    /// Runs the search variant selected by the configuration.
    pub fn run(&mut self, board: &mut Board) -> SearchResult {
        if self.config.parallel { self.run_parallel(board) } else { self.run_normal(board) }
    }

    pub fn run_normal(&mut self, board: &mut Board) -> SearchResult {
        let t0 = Instant::now();
        let (depth, absent) = self.mode(board);
        let outcome = self.searcher.search(self.player, board, depth, absent, self.config.policy);
        self.finish(outcome, depth, absent, t0.elapsed())
    }

    pub fn run_parallel(&mut self, board: &mut Board) -> SearchResult {
        let t0 = Instant::now();
        let (depth, absent) = self.mode(board);
        let outcome = self.searcher.search_parallel(self.player, board, depth, absent, self.config.policy);
        self.finish(outcome, depth, absent, t0.elapsed())
    }

    /// Search depth and whether the opponent-free continuation applies.
    fn mode(&self, board: &Board) -> (u32, bool) {
        let absent = self.config.without_opponent && opponents_disjoint(board);
        (self.config.depth(absent), absent)
    }

    fn finish(&mut self, outcome: Outcome, depth: u32, without_opponent: bool, elapsed: Duration) -> SearchResult {
        let action = choose_tied(&outcome.actions, &mut self.rng);
        debug!(
            "player {} depth={} without_opponent={} score={} ties={} nodes={} elapsed={:.3}s",
            self.player, depth, without_opponent, outcome.score, outcome.actions.len(), outcome.nodes, elapsed.as_secs_f64()
        );
        if action.is_none() { warn!("player {} has no legal action", self.player); }
        if let Some(budget) = self.config.time_budget() {
            if elapsed > budget {
                warn!("player {} search overran its budget: {}ms > {}ms", self.player, elapsed.as_millis(), budget.as_millis());
            }
        }
        SearchResult { action, score: outcome.score, ties: outcome.actions.len(), depth, without_opponent, nodes: outcome.nodes, elapsed }
    }
}

fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    }
}
