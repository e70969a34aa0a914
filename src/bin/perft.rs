use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sternhalma::perft::perft;
use sternhalma::{legal_actions, Board, JumpRule, Player};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Move-generation node counter for Sternhalma")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,

    /// Board file; start position if omitted
    #[arg(long)]
    board: Option<PathBuf>,

    /// Player to move first: 1 or 2
    #[arg(long, default_value_t = 1)]
    player: i32,

    /// Single-piece jumps only
    #[arg(long, default_value_t = false)]
    pivot: bool,

    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,

    /// Show a progress bar over root actions
    #[arg(long, default_value_t = false)]
    progress: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let player = Player::from_id(args.player)?;
    let rule = if args.pivot { JumpRule::Pivot } else { JumpRule::Bridge };
    let base = match &args.board {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?.parse::<Board>()?,
        None => Board::start(),
    };
    if args.depth == 0 {
        println!("nodes: 1");
        return Ok(());
    }

    let root = legal_actions(player, &base, rule);
    let pb = if args.progress { ProgressBar::new(root.len() as u64) } else { ProgressBar::hidden() };
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} root actions {elapsed_precise}")?);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let t0 = Instant::now();
    let nodes: u64 = pool.install(|| {
        root.par_iter()
            .map(|&a| {
                let mut b = base.clone();
                b.apply(a);
                let n = perft(player.opponent(), &mut b, args.depth - 1, rule);
                pb.inc(1);
                n
            })
            .sum()
    });
    let dt = t0.elapsed().as_secs_f64();
    pb.finish_and_clear();

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
