use crate::board::{Board, Player};
use crate::movegen::{JumpRule, MoveGen};

/// Counts action sequences of length `depth`, players alternating from
/// `player`. Uses scoped apply/undo, so `board` is unchanged on return.
pub fn perft(player: Player, board: &mut Board, depth: u32, rule: JumpRule) -> u64 {
    if depth == 0 { return 1; }
    let mut actions = Vec::new();
    MoveGen::new(rule).generate(player, board, &mut actions);
    if depth == 1 { return actions.len() as u64; }
    let mut nodes = 0u64;
    for a in actions {
        let mut child = board.scoped(a);
        nodes += perft(player.opponent(), &mut child, depth - 1, rule);
    }
    nodes
}
