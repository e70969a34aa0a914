use serde::{Deserialize, Serialize};

use crate::board::{Board, Kind, Player, BOARD_SIZE};

// Indexed [x][y] from player one's point of view: the target corner sits at
// (0, 0). Player two reads both tables through the point-mirrored square.
#[rustfmt::skip]
pub const PRIMARY_TABLE: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [400,   0, 317, 280, 245, 213, 184, 157, 132, 110],
    [  0,   0, 286, 250, 218, 188, 160, 135, 112,  92],
    [317, 286, 256, 222, 192, 163, 138, 114,  94,  75],
    [280, 250, 222, 196, 167, 141, 117,  96,  76,  60],
    [245, 218, 192, 167, 144, 119,  98,  78,  61,  46],
    [213, 188, 163, 141, 119, 100,  80,  62,  47,  34],
    [184, 160, 138, 117,  98,  80,  64,  48,  35,  24],
    [157, 135, 114,  96,  78,  62,  48,  36,  24,  15],
    [132, 112,  94,  76,  61,  47,  35,  24,  16,   8],
    [110,  92,  75,  60,  46,  34,  24,  15,   8,   4],
];

#[rustfmt::skip]
pub const SECONDARY_TABLE: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [  0, 357, 100, 280, 245, 213, 184, 157, 132, 110],
    [357, 324, 286, 250, 218, 188, 160, 135, 112,  92],
    [100, 286, 256, 222, 192, 163, 138, 114,  94,  75],
    [280, 250, 222, 196, 167, 141, 117,  96,  76,  60],
    [245, 218, 192, 167, 144, 119,  98,  78,  61,  46],
    [213, 188, 163, 141, 119, 100,  80,  62,  47,  34],
    [184, 160, 138, 117,  98,  80,  64,  48,  35,  24],
    [157, 135, 114,  96,  78,  62,  48,  36,  24,  15],
    [132, 112,  94,  76,  61,  47,  35,  24,  16,   8],
    [110,  92,  75,  60,  46,  34,  24,  15,   8,   4],
];

/// Base score for reaching the target formation; the remaining depth is
/// added on top so that quicker wins rank higher.
pub const WIN_SCORE: i32 = 1 << 28;
/// Window bound strictly above any reachable score.
pub const SCORE_INF: i32 = 1 << 30;
/// Score of a node where the mover has no legal action.
pub const NO_MOVES_SCORE: i32 = -WIN_SCORE;

/// How much the opponent's positional total counts against the mover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentWeight {
    #[default]
    Full,
    Half,
}

#[inline]
fn table(kind: Kind) -> &'static [[i32; BOARD_SIZE]; BOARD_SIZE] {
    match kind {
        Kind::Primary => &PRIMARY_TABLE,
        Kind::Secondary => &SECONDARY_TABLE,
    }
}

/// Positional total of each side, `[player one, player two]`.
pub fn side_totals(board: &Board) -> [i32; 2] {
    let mut totals = [0; 2];
    for (pos, cell) in board.occupied() {
        let (Some(owner), Some(kind)) = (cell.owner(), cell.kind()) else { continue };
        let sq = if owner == Player::One { pos } else { pos.mirrored() };
        totals[owner.slot()] += table(kind)[sq.x as usize][sq.y as usize];
    }
    totals
}

/// Static score of a non-terminal position from `player`'s side.
pub fn evaluate(player: Player, board: &Board, weight: OpponentWeight) -> i32 {
    let totals = side_totals(board);
    let own = totals[player.slot()];
    let opp = totals[player.opponent().slot()];
    match weight {
        OpponentWeight::Full => own - opp,
        OpponentWeight::Half => own - opp / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let b = Board::start();
        assert_eq!(evaluate(Player::One, &b, OpponentWeight::Full), 0);
        assert_eq!(evaluate(Player::Two, &b, OpponentWeight::Full), 0);
    }

    #[test]
    fn half_weight_discounts_the_opponent() {
        let b = Board::start();
        let [one, two] = side_totals(&b);
        assert_eq!(evaluate(Player::One, &b, OpponentWeight::Half), one - two / 2);
    }
}
