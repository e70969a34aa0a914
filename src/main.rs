use anyhow::{Context, Result};
use clap::Parser;
use sternhalma::{legal_actions, Agent, AgentConfig, Board, Player};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sternhalma", version, about = "Search one Chinese-checkers position and print the chosen action")]
struct Args {
    /// Player to move: 1 or 2
    #[arg(long, default_value_t = 1)]
    player: i32,

    /// Board file: ten rows of ten cells ('.' or 0-4). Start position if omitted
    #[arg(long)]
    board: Option<PathBuf>,

    /// Agent config (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    depth: Option<u32>,

    #[arg(long)]
    depth_without_opponent: Option<u32>,

    /// Actions examined per node
    #[arg(long)]
    max_actions: Option<usize>,

    #[arg(long, default_value_t = false)]
    sort: bool,

    #[arg(long, default_value_t = false)]
    without_opponent: bool,

    /// Split the root across worker threads
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Worker threads for --parallel (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Advisory time budget in milliseconds
    #[arg(long, default_value_t = 950)]
    budget_ms: u64,

    /// List legal actions instead of searching
    #[arg(long, default_value_t = false)]
    list: bool,

    /// Emit JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn load_config(args: &Args) -> Result<AgentConfig> {
    let mut c = match &args.config {
        Some(p) => AgentConfig::from_json_file(p)?,
        None => AgentConfig::default(),
    };
    if let Some(d) = args.depth { c.max_depth = d; }
    if let Some(d) = args.depth_without_opponent { c.max_depth_without_opponent = d; }
    if args.max_actions.is_some() { c.max_actions = args.max_actions; }
    if args.sort { c.sort_actions = true; }
    if args.without_opponent { c.without_opponent = true; }
    if args.parallel { c.parallel = true; }
    if args.seed.is_some() { c.seed = args.seed; }
    if c.time_budget_ms.is_none() { c.time_budget_ms = Some(args.budget_ms); }
    Ok(c)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let player = Player::from_id(args.player)?;
    let mut board = match &args.board {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading board {}", p.display()))?;
            text.parse::<Board>().with_context(|| format!("parsing board {}", p.display()))?
        }
        None => Board::start(),
    };
    let config = load_config(&args)?;

    if args.list {
        let actions = legal_actions(player, &board, config.jump_rule);
        if args.json {
            println!("{}", serde_json::to_string(&actions)?);
        } else {
            for a in &actions { println!("{a}"); }
            println!("{} actions", actions.len());
        }
        return Ok(());
    }

    board.validate()?;
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(n.max(1)).build_global().context("building worker pool")?;
    }

    let mut agent = Agent::new(player, config);
    let res = agent.run(&mut board);
    if args.json {
        let payload = serde_json::json!({
            "player": player.id(),
            "action": res.action.map(|a| a.to_codes()),
            "score": res.score,
            "ties": res.ties,
            "depth": res.depth,
            "without_opponent": res.without_opponent,
            "nodes": res.nodes,
            "elapsed_ms": res.elapsed.as_millis() as u64,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        let action = res.action.map_or_else(|| "(none)".to_string(), |a| a.to_string());
        println!(
            "action={} score={} ties={} depth={} without_opponent={} nodes={} elapsed={:.3}s",
            action, res.score, res.ties, res.depth, res.without_opponent, res.nodes, res.elapsed.as_secs_f64()
        );
    }
    Ok(())
}
