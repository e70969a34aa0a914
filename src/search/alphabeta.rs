use std::ops::Range;

use log::trace;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Action, Board, Player};
use crate::config::AgentConfig;
use crate::movegen::{JumpRule, MoveGen, ACTION_CAPACITY};
use crate::rules::is_finished;
use crate::search::eval::{evaluate, OpponentWeight, NO_MOVES_SCORE, SCORE_INF, WIN_SCORE};

/// Which actions a root search reports alongside its score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultPolicy {
    /// The first action that reached the best score.
    BestOnly,
    /// Every action tied at the best score, for a random tie-break.
    #[default]
    AllTied,
}

/// Knobs the searcher reads at every node.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub max_actions: Option<usize>,
    pub sort_actions: bool,
    pub opponent_weight: OpponentWeight,
    pub jump_rule: JumpRule,
}

impl From<&AgentConfig> for SearchParams {
    fn from(c: &AgentConfig) -> Self {
        Self {
            max_actions: c.max_actions,
            sort_actions: c.sort_actions,
            opponent_weight: c.opponent_weight,
            jump_rule: c.jump_rule,
        }
    }
}

/// Best score at the root and the action(s) that reach it.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub score: i32,
    pub actions: Vec<Action>,
    pub nodes: u64,
}

impl Outcome {
    fn no_moves(nodes: u64) -> Self { Self { score: NO_MOVES_SCORE, actions: Vec::new(), nodes } }
}

/// Orders by progress along the mover's racing diagonal, most forward first.
pub fn order_actions(player: Player, actions: &mut [Action]) {
    match player {
        Player::One => actions.sort_by_key(|a| a.advance()),
        Player::Two => actions.sort_by_key(|a| std::cmp::Reverse(a.advance())),
    }
}

/// Splits `len` items into `parts` contiguous ranges whose sizes differ by at
/// most one, the larger ranges first.
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let base = len / parts;
    let remain = len % parts;
    let mut start = 0;
    (0..parts)
        .map(|i| {
            let end = start + base + usize::from(i < remain);
            let r = start..end;
            start = end;
            r
        })
        .collect()
}

/// Combines per-chunk outcomes: the highest score wins and, under
/// `AllTied`, every chunk at that score contributes its actions.
pub fn merge(parts: impl IntoIterator<Item = Outcome>, policy: ResultPolicy) -> Outcome {
    let mut best: Option<Outcome> = None;
    let mut nodes = 0u64;
    for part in parts {
        nodes += part.nodes;
        if part.actions.is_empty() { continue; }
        let replace = best.as_ref().map_or(true, |b| part.score > b.score);
        if replace { best = Some(part); continue; }
        if let Some(b) = best.as_mut() {
            if part.score == b.score && policy == ResultPolicy::AllTied { b.actions.extend(part.actions); }
        }
    }
    match best {
        Some(mut b) => { b.nodes = nodes; b }
        None => Outcome::no_moves(nodes),
    }
}

/// Negamax with alpha-beta pruning over in-place apply/undo.
///
/// Every ply subtracts one from the score, so among equal outcomes the
/// search prefers shorter wins and longer losses. Children are searched with
/// the window shifted by that decay so bounds map exactly between plies.
#[derive(Debug, Clone)]
pub struct Searcher {
    params: SearchParams,
    movegen: MoveGen,
    /// Action lists indexed by remaining depth; each ply reuses its own.
    buffers: Vec<Vec<Action>>,
    pub(crate) nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(SearchParams::default()) }
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self {
        Self { params, movegen: MoveGen::new(params.jump_rule), buffers: Vec::new(), nodes: 0 }
    }

    pub fn params(&self) -> SearchParams { self.params }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Generates, optionally orders, then caps the actions examined at a node.
    fn candidates(&mut self, mover: Player, board: &mut Board, out: &mut Vec<Action>) {
        self.movegen.generate(mover, board, out);
        if self.params.sort_actions { order_actions(mover, out); }
        if let Some(cap) = self.params.max_actions { out.truncate(cap); }
    }

    pub fn root_actions(&mut self, mover: Player, board: &mut Board) -> Vec<Action> {
        let mut actions = Vec::with_capacity(ACTION_CAPACITY);
        self.candidates(mover, board, &mut actions);
        actions
    }

    /// Sequential root search over the full window.
    pub fn search(&mut self, mover: Player, board: &mut Board, depth: u32, without_opponent: bool, policy: ResultPolicy) -> Outcome {
        let actions = self.root_actions(mover, board);
        self.search_slice(mover, board, &actions, -SCORE_INF, SCORE_INF, depth, without_opponent, policy)
    }

    /// Root search with the candidate list split into one contiguous chunk per
    /// rayon worker. Each chunk gets a private board and the initial window;
    /// nothing is shared between workers until the merge.
    pub fn search_parallel(&mut self, mover: Player, board: &mut Board, depth: u32, without_opponent: bool, policy: ResultPolicy) -> Outcome {
        let actions = self.root_actions(mover, board);
        if actions.is_empty() { return Outcome::no_moves(0); }
        let chunks = partition(actions.len(), rayon::current_num_threads());
        let params = self.params;
        let (alpha, beta) = (-SCORE_INF, SCORE_INF);
        let root: &Board = board;
        let results: Vec<Outcome> = chunks
            .par_iter()
            .filter(|r| !r.is_empty())
            .map(|range| {
                let mut worker = Searcher::new(params);
                let mut local = root.clone();
                let out = worker.search_slice(mover, &mut local, &actions[range.clone()], alpha, beta, depth, without_opponent, policy);
                trace!("chunk {:?}: score={} actions={} nodes={}", range, out.score, out.actions.len(), out.nodes);
                out
            })
            .collect();
        let merged = merge(results, policy);
        self.nodes += merged.nodes;
        merged
    }

    /// Searches a fixed list of root actions.
    #[allow(clippy::too_many_arguments)]
    pub fn search_slice(
        &mut self,
        mover: Player,
        board: &mut Board,
        actions: &[Action],
        alpha: i32,
        beta: i32,
        depth: u32,
        without_opponent: bool,
        policy: ResultPolicy,
    ) -> Outcome {
        let start = self.nodes;
        let mut tied = Vec::new();
        let collect = (policy == ResultPolicy::AllTied).then_some(&mut tied);
        let (score, first) = self.search_actions(mover, board, actions, alpha, beta, depth, without_opponent, collect);
        let nodes = self.nodes - start;
        match first {
            None => Outcome::no_moves(nodes),
            Some(a) if policy == ResultPolicy::BestOnly => Outcome { score, actions: vec![a], nodes },
            Some(_) => Outcome { score, actions: tied, nodes },
        }
    }

    fn negamax(&mut self, mover: Player, board: &mut Board, alpha: i32, beta: i32, depth: u32, without_opponent: bool) -> i32 {
        let slot = depth as usize;
        if self.buffers.len() <= slot { self.buffers.resize_with(slot + 1, Vec::new); }
        let mut actions = std::mem::take(&mut self.buffers[slot]);
        self.candidates(mover, board, &mut actions);
        let (score, _) = self.search_actions(mover, board, &actions, alpha, beta, depth, without_opponent, None);
        self.buffers[slot] = actions;
        score
    }

    /// Scores `actions` in order. Returns the best score and the first action
    /// reaching it (`None` when `actions` is empty). With `tied` present the
    /// lower bound is opened by one so that every action equal to the best is
    /// scored exactly and collected.
    #[allow(clippy::too_many_arguments)]
    fn search_actions(
        &mut self,
        mover: Player,
        board: &mut Board,
        actions: &[Action],
        mut alpha: i32,
        beta: i32,
        depth: u32,
        without_opponent: bool,
        mut tied: Option<&mut Vec<Action>>,
    ) -> (i32, Option<Action>) {
        let mut best: Option<(i32, Action)> = None;
        for &action in actions {
            self.nodes += 1;
            let mut child = board.scoped(action);
            if is_finished(mover, &child) {
                if let Some(t) = tied.as_deref_mut() { t.clear(); t.push(action); }
                return (WIN_SCORE + depth as i32, Some(action));
            }
            let lo = if tied.is_some() { alpha - 1 } else { alpha };
            let raw = if depth == 0 {
                evaluate(mover, &child, self.params.opponent_weight)
            } else if without_opponent {
                self.negamax(mover, &mut child, lo + 1, beta + 1, depth - 1, true)
            } else {
                -self.negamax(mover.opponent(), &mut child, -beta - 1, -lo - 1, depth - 1, false)
            };
            drop(child);
            let score = raw - 1;

            if score >= beta {
                if let Some(t) = tied.as_deref_mut() { t.clear(); t.push(action); }
                return (beta, Some(action));
            }
            if score > alpha { alpha = score; }
            match best {
                Some((b, _)) if score < b => {}
                Some((b, _)) if score == b => {
                    if let Some(t) = tied.as_deref_mut() { t.push(action); }
                }
                _ => {
                    best = Some((score, action));
                    if let Some(t) = tied.as_deref_mut() { t.clear(); t.push(action); }
                }
            }
        }
        match best {
            Some((score, action)) => (score, Some(action)),
            None => (NO_MOVES_SCORE, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    #[test]
    fn partition_spreads_the_remainder_first() {
        let parts = partition(10, 4);
        let sizes: Vec<usize> = parts.iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);
        assert_eq!(parts.first().map(|r| r.start), Some(0));
        assert_eq!(parts.last().map(|r| r.end), Some(10));
    }

    #[test]
    fn partition_with_more_workers_than_items() {
        let sizes: Vec<usize> = partition(3, 8).iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1, 0, 0, 0, 0, 0]);
        assert_eq!(partition(5, 0).len(), 1);
    }

    #[test]
    fn ordering_puts_forward_moves_first() {
        let back = Action::new(Pos::new(5, 5), Pos::new(6, 5));
        let side = Action::new(Pos::new(5, 5), Pos::new(4, 6));
        let fwd = Action::new(Pos::new(5, 5), Pos::new(3, 5));
        let mut one = vec![back, side, fwd];
        order_actions(Player::One, &mut one);
        assert_eq!(one, vec![fwd, side, back]);
        let mut two = vec![fwd, side, back];
        order_actions(Player::Two, &mut two);
        assert_eq!(two, vec![back, side, fwd]);
    }

    #[test]
    fn merge_keeps_only_top_scoring_chunks() {
        let a = Action::new(Pos::new(0, 0), Pos::new(0, 1));
        let b = Action::new(Pos::new(1, 0), Pos::new(1, 1));
        let c = Action::new(Pos::new(2, 0), Pos::new(2, 1));
        let parts = vec![
            Outcome { score: 5, actions: vec![a], nodes: 3 },
            Outcome { score: 7, actions: vec![b], nodes: 4 },
            Outcome { score: 7, actions: vec![c], nodes: 5 },
            Outcome::no_moves(1),
        ];
        let all = merge(parts.clone(), ResultPolicy::AllTied);
        assert_eq!(all.score, 7);
        assert_eq!(all.actions, vec![b, c]);
        assert_eq!(all.nodes, 13);
        let one = merge(parts, ResultPolicy::BestOnly);
        assert_eq!(one.actions, vec![b]);
    }
}
