use crate::board::{Board, Cell, Kind, Player, Pos};

const P: Kind = Kind::Primary;
const S: Kind = Kind::Secondary;

const TARGET_ONE: [(Pos, Kind); 10] = [
    (Pos::new(0, 0), P), (Pos::new(0, 1), S), (Pos::new(0, 2), P), (Pos::new(0, 3), P),
    (Pos::new(1, 0), S), (Pos::new(1, 1), S), (Pos::new(1, 2), P),
    (Pos::new(2, 0), P), (Pos::new(2, 1), P),
    (Pos::new(3, 0), P),
];

const TARGET_TWO: [(Pos, Kind); 10] = [
    (Pos::new(9, 9), P), (Pos::new(9, 8), S), (Pos::new(9, 7), P), (Pos::new(9, 6), P),
    (Pos::new(8, 9), S), (Pos::new(8, 8), S), (Pos::new(8, 7), P),
    (Pos::new(7, 9), P), (Pos::new(7, 8), P),
    (Pos::new(6, 9), P),
];

/// The cells `player` must fill to win, and the piece kind each one needs.
pub fn target_formation(player: Player) -> &'static [(Pos, Kind); 10] {
    match player {
        Player::One => &TARGET_ONE,
        Player::Two => &TARGET_TWO,
    }
}

/// True iff every target cell of `player` holds exactly the required code.
pub fn is_finished(player: Player, board: &Board) -> bool {
    target_formation(player).iter().all(|&(pos, kind)| board.get(pos) == Cell::piece(player, kind))
}

/// Inclusive range of `x + y` spanned by a player's pieces.
fn diag_span(player: Player, board: &Board) -> Option<(i32, i32)> {
    board.pieces(player).map(Pos::diag).fold(None, |acc, d| match acc {
        None => Some((d, d)),
        Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
    })
}

/// True when the two armies occupy disjoint diagonal bands and so cannot
/// interact this turn. A side with no pieces counts as absent.
pub fn opponents_disjoint(board: &Board) -> bool {
    match (diag_span(Player::One, board), diag_span(Player::Two, board)) {
        (Some((lo1, hi1)), Some((lo2, hi2))) => lo1 > hi2 || hi1 < lo2,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formations_mirror_each_other() {
        for (&(a, ka), &(b, kb)) in TARGET_ONE.iter().zip(TARGET_TWO.iter()) {
            assert_eq!(a.mirrored(), b);
            assert_eq!(ka, kb);
        }
    }

    #[test]
    fn start_position_is_disjoint_and_unfinished() {
        let b = Board::start();
        assert!(opponents_disjoint(&b));
        assert!(!is_finished(Player::One, &b));
        assert!(!is_finished(Player::Two, &b));
    }
}
