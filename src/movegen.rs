use serde::{Deserialize, Serialize};

use crate::board::{Action, Board, Player, Pos};

/// The six neighbours of the hex lattice laid over the square grid.
pub const DIRECTIONS: [(i8, i8); 6] = [(0, 1), (0, -1), (1, 0), (-1, 0), (1, -1), (-1, 1)];

/// Typical upper bound on actions per position; used as a capacity hint.
pub const ACTION_CAPACITY: usize = 200;

/// Which occupied runs a piece may jump over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpRule {
    /// Any contiguous run of pieces, flanked by equally long empty runs.
    #[default]
    Bridge,
    /// A single piece, flanked by equally long empty runs.
    Pivot,
}

/// Reusable move generator. Holds scratch buffers so a searcher can call it
/// at every node without reallocating.
#[derive(Debug, Default, Clone)]
pub struct MoveGen {
    rule: JumpRule,
    origins: Vec<Pos>,
    seen: Vec<u128>,
}

impl MoveGen {
    pub fn new(rule: JumpRule) -> Self {
        Self { rule, origins: Vec::with_capacity(16), seen: Vec::with_capacity(16) }
    }

    pub fn rule(&self) -> JumpRule { self.rule }

    /// Fills `out` with every legal action of `player`: all single steps
    /// first, then jump chains origin by origin. `board` is mutated while
    /// chains are explored and restored before returning.
    pub fn generate(&mut self, player: Player, board: &mut Board, out: &mut Vec<Action>) {
        out.clear();
        self.origins.clear();
        self.origins.extend(board.pieces(player));
        self.seen.clear();
        self.seen.resize(self.origins.len(), 0);

        for (i, &from) in self.origins.iter().enumerate() {
            for d in DIRECTIONS {
                let Some(to) = from.offset(d) else { continue };
                if !board.is_empty_at(to) { continue; }
                out.push(Action::new(from, to));
                self.seen[i] |= to.bit();
            }
        }
        for (i, &from) in self.origins.iter().enumerate() {
            explore_jumps(self.rule, board, from, from, &mut self.seen[i], out);
        }
    }
}

/// Depth-first search over jump landings reachable from `curr`, recording
/// each new landing as an action from `origin`.
fn explore_jumps(rule: JumpRule, board: &mut Board, origin: Pos, curr: Pos, seen: &mut u128, out: &mut Vec<Action>) {
    for d in DIRECTIONS {
        let Some(landing) = jump_landing(rule, board, curr, d) else { continue };
        if landing == origin || *seen & landing.bit() != 0 { continue; }
        *seen |= landing.bit();
        out.push(Action::new(origin, landing));
        let mut hop = board.scoped(Action::new(curr, landing));
        explore_jumps(rule, &mut hop, origin, landing, seen, out);
    }
}

/// Landing square of a jump from `from` in direction `d`, if any.
///
/// Scanning outward: `lead` empty cells, then a bridge of occupied cells,
/// then `lead` more empty cells; the next empty cell is the landing. A
/// second occupied run or the board edge ends the scan.
pub fn jump_landing(rule: JumpRule, board: &Board, from: Pos, d: (i8, i8)) -> Option<Pos> {
    let mut lead = 0u8;
    let mut bridge = 0u8;
    let mut trail = 0u8;
    let mut cur = from;
    loop {
        cur = cur.offset(d)?;
        let empty = board.is_empty_at(cur);
        if bridge == 0 {
            if empty { lead += 1; } else { bridge = 1; }
        } else if !empty {
            if trail > 0 || rule == JumpRule::Pivot { return None; }
            bridge += 1;
        } else if trail == lead {
            return Some(cur);
        } else {
            trail += 1;
        }
    }
}

/// Every legal action of `player` on `board`, in generation order.
pub fn legal_actions(player: Player, board: &Board, rule: JumpRule) -> Vec<Action> {
    let mut scratch = board.clone();
    let mut out = Vec::with_capacity(ACTION_CAPACITY);
    MoveGen::new(rule).generate(player, &mut scratch, &mut out);
    out
}
