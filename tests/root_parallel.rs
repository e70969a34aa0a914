use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sternhalma::search::alphabeta::{Outcome, ResultPolicy, Searcher};
use sternhalma::{Action, Agent, AgentConfig, Board, Cell, Player, Pos};

const SINGLE_BEST: &str = "
    ....2.....
    ..........
    4.........
    .......1..
    ..........
    .2.1......
    .....1....
    ..........
    ..........
    ..........
";

const TWO_TIED: &str = "
    .......21.
    .1.4......
    ...1......
    ..........
    ........2.
    ..........
    ..........
    ..........
    ..........
    ..........
";

const FOUR_TIED: &str = "
    ..........
    ..........
    ..........
    ........1.
    ..........
    ..........
    ..........
    ..........
    ..111.....
    2.........
";

fn a(fx: u8, fy: u8, tx: u8, ty: u8) -> Action { Action::new(Pos::new(fx, fy), Pos::new(tx, ty)) }

fn random_board(seed: u64, per_side: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut squares: Vec<Pos> = (0..10).flat_map(|x| (0..10).map(move |y| Pos::new(x, y))).collect();
    squares.shuffle(&mut rng);
    let mut b = Board::empty();
    for (i, &pos) in squares.iter().take(2 * per_side).enumerate() {
        b.set(pos, if i < per_side { Cell::OneSecondary } else { Cell::TwoPrimary });
    }
    b
}

fn sequential(player: Player, board: &Board, depth: u32, policy: ResultPolicy) -> Outcome {
    let mut b = board.clone();
    Searcher::default().search(player, &mut b, depth, false, policy)
}

fn parallel(threads: usize, player: Player, board: &Board, depth: u32, policy: ResultPolicy) -> Outcome {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
    let mut b = board.clone();
    let out = pool.install(|| Searcher::default().search_parallel(player, &mut b, depth, false, policy));
    assert_eq!(&b, board, "root board must be untouched");
    out
}

#[test]
fn tie_sets_match_sequential_search() {
    let cases = [
        (SINGLE_BEST, 216, vec![a(5, 3, 4, 3)]),
        (TWO_TIED, 338, vec![a(1, 1, 2, 0), a(1, 1, 0, 2)]),
        (FOUR_TIED, 195, vec![a(3, 8, 3, 7), a(8, 2, 7, 2), a(8, 3, 7, 3), a(8, 4, 8, 1)]),
    ];
    for (text, score, ties) in cases {
        let b: Board = text.parse().unwrap();
        let seq = sequential(Player::One, &b, 1, ResultPolicy::AllTied);
        assert_eq!((seq.score, &seq.actions), (score, &ties));
        for threads in [1, 2, 4, 7] {
            let par = parallel(threads, Player::One, &b, 1, ResultPolicy::AllTied);
            assert_eq!(par.score, seq.score, "{threads} threads");
            assert_eq!(par.actions, seq.actions, "{threads} threads");
        }
    }
}

#[test]
fn random_positions_agree_across_thread_counts() {
    for seed in 0..8 {
        let b = random_board(seed, 5);
        for depth in 1..=2 {
            for player in Player::BOTH {
                for policy in [ResultPolicy::AllTied, ResultPolicy::BestOnly] {
                    let seq = sequential(player, &b, depth, policy);
                    for threads in [3, 4] {
                        let par = parallel(threads, player, &b, depth, policy);
                        assert_eq!(par.score, seq.score, "seed {seed} depth {depth} {player} {policy:?}");
                        assert_eq!(par.actions, seq.actions, "seed {seed} depth {depth} {player} {policy:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn more_workers_than_actions() {
    let mut b = Board::empty();
    b.set(Pos::new(0, 9), Cell::OnePrimary);
    b.set(Pos::new(9, 0), Cell::TwoPrimary);
    // corner piece: three steps, no jumps
    let seq = sequential(Player::One, &b, 1, ResultPolicy::AllTied);
    let par = parallel(8, Player::One, &b, 1, ResultPolicy::AllTied);
    assert_eq!(par.score, seq.score);
    assert_eq!(par.actions, seq.actions);
    assert!(par.nodes > 0);
}

#[test]
fn parallel_agent_picks_from_the_tie_set() {
    let mut b: Board = FOUR_TIED.parse().unwrap();
    let ties = [a(3, 8, 3, 7), a(8, 2, 7, 2), a(8, 3, 7, 3), a(8, 4, 8, 1)];
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let mut picked = std::collections::HashSet::new();
    for seed in 0..64 {
        let config = AgentConfig { max_depth: 1, parallel: true, seed: Some(seed), ..Default::default() };
        let mut agent = Agent::new(Player::One, config);
        let res = pool.install(|| agent.run(&mut b));
        assert_eq!(res.score, 195);
        assert_eq!(res.ties, 4);
        let action = res.action.expect("tied actions available");
        assert!(ties.contains(&action), "{action} is not tied");
        picked.insert(action);
    }
    assert!(picked.len() > 1, "tie-break never varied across seeds");
}
