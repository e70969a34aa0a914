use std::collections::HashSet;

use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sternhalma::{legal_actions, Action, Board, Cell, JumpRule, Kind, Player, Pos};

fn random_board(seed: u64, per_side: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut squares: Vec<Pos> = (0..10).flat_map(|x| (0..10).map(move |y| Pos::new(x, y))).collect();
    squares.shuffle(&mut rng);
    let mut b = Board::empty();
    for (i, &pos) in squares.iter().take(2 * per_side).enumerate() {
        let player = if i < per_side { Player::One } else { Player::Two };
        let kind = if rng.gen_bool(0.5) { Kind::Primary } else { Kind::Secondary };
        b.set(pos, Cell::piece(player, kind));
    }
    b
}

fn a(fx: u8, fy: u8, tx: u8, ty: u8) -> Action { Action::new(Pos::new(fx, fy), Pos::new(tx, ty)) }

#[test]
fn start_position_action_counts() {
    let b = Board::start();
    for player in Player::BOTH {
        assert_eq!(legal_actions(player, &b, JumpRule::Bridge).len(), 20, "bridge, {player}");
        assert_eq!(legal_actions(player, &b, JumpRule::Pivot).len(), 14, "pivot, {player}");
    }
}

#[test]
fn two_hop_chain_reports_every_landing() {
    let mut b = Board::empty();
    b.set(Pos::new(9, 4), Cell::OnePrimary);
    b.set(Pos::new(8, 4), Cell::TwoPrimary);
    b.set(Pos::new(6, 4), Cell::TwoPrimary);
    let got = legal_actions(Player::One, &b, JumpRule::Bridge);
    // steps first in direction order, then the chain (9,4) -> (7,4) -> (5,4)
    assert_eq!(got, vec![a(9, 4, 9, 5), a(9, 4, 9, 3), a(9, 4, 8, 5), a(9, 4, 7, 4), a(9, 4, 5, 4)]);
}

#[test]
fn distant_pivot_jump_lands_symmetrically() {
    let mut b = Board::empty();
    b.set(Pos::new(9, 0), Cell::OnePrimary);
    b.set(Pos::new(9, 3), Cell::TwoSecondary);
    let got = legal_actions(Player::One, &b, JumpRule::Pivot);
    assert_eq!(got, vec![a(9, 0, 9, 1), a(9, 0, 8, 0), a(9, 0, 8, 1), a(9, 0, 9, 6)]);
}

#[test]
fn actions_are_unique_and_land_on_empty_cells() {
    for seed in 0..40 {
        let b = random_board(seed, 10);
        for player in Player::BOTH {
            for rule in [JumpRule::Bridge, JumpRule::Pivot] {
                let actions = legal_actions(player, &b, rule);
                let unique: HashSet<Action> = actions.iter().copied().collect();
                assert_eq!(unique.len(), actions.len(), "duplicate action, seed {seed}");
                for act in &actions {
                    assert_eq!(b.get(act.from).owner(), Some(player), "seed {seed}: {act}");
                    assert!(b.is_empty_at(act.to), "seed {seed}: {act} lands on a piece");
                    assert_ne!(act.from, act.to);
                }
            }
        }
    }
}

#[test]
fn apply_then_inverse_restores_the_board() {
    for seed in 0..10 {
        let b = random_board(seed, 10);
        for act in legal_actions(Player::One, &b, JumpRule::Bridge) {
            let mut c = b.clone();
            c.apply(act);
            assert!(c.is_empty_at(act.from));
            assert_eq!(c.get(act.to), b.get(act.from));
            c.apply(act.inverse());
            assert_eq!(c, b, "seed {seed}: {act}");
        }
    }
}

#[test]
fn rotated_board_gives_mirrored_actions() {
    for seed in 0..40 {
        let b = random_board(seed, 10);
        let mine: HashSet<Action> = legal_actions(Player::One, &b, JumpRule::Bridge).into_iter().map(Action::mirrored).collect();
        let theirs: HashSet<Action> = legal_actions(Player::Two, &b.flipped(), JumpRule::Bridge).into_iter().collect();
        assert_eq!(mine, theirs, "seed {seed}");
    }
}

#[test]
fn pivot_landings_are_a_subset_of_bridge_landings() {
    for seed in 0..40 {
        let b = random_board(seed, 10);
        let bridge: HashSet<Action> = legal_actions(Player::One, &b, JumpRule::Bridge).into_iter().collect();
        for act in legal_actions(Player::One, &b, JumpRule::Pivot) {
            assert!(bridge.contains(&act), "seed {seed}: {act} missing under bridge rule");
        }
    }
}

#[test]
fn legal_actions_does_not_touch_the_input() {
    let b = random_board(3, 10);
    let before = b.clone();
    let _ = legal_actions(Player::Two, &b, JumpRule::Bridge);
    assert_eq!(b, before);
}
