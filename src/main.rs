//! Command-line driver: run one search on a position and print the
//! `info`/`bestmove` lines.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use goshawk::mcts::{mcts_search, ExpansionPolicy, MctsConfig, DEFAULT_ARENA_MB};
use goshawk::search::{iterative_deepening_search, HistoryTable, SearchInfo};
use goshawk::{BoardStack, PestoEval};

fn main() -> Result<()> {
    env_logger::init();

    let mut fen: Option<String> = None;
    let mut use_mcts = false;
    let mut depth: Option<i32> = None;
    let mut movetime: Option<u64> = None;
    let mut policy = ExpansionPolicy::Random;
    let mut arena_mb = DEFAULT_ARENA_MB;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fen" => fen = Some(args.next().context("--fen needs a value")?),
            "--mcts" => use_mcts = true,
            "--depth" => {
                depth = Some(
                    args.next()
                        .context("--depth needs a value")?
                        .parse()
                        .context("--depth must be an integer")?,
                )
            }
            "--movetime" => {
                movetime = Some(
                    args.next()
                        .context("--movetime needs a value")?
                        .parse()
                        .context("--movetime must be milliseconds")?,
                )
            }
            "--policy" => match args.next().context("--policy needs a value")?.as_str() {
                "random" => policy = ExpansionPolicy::Random,
                "eval" => policy = ExpansionPolicy::EvalWeighted,
                other => bail!("unknown policy: {other}"),
            },
            "--arena-mb" => {
                arena_mb = args
                    .next()
                    .context("--arena-mb needs a value")?
                    .parse()
                    .context("--arena-mb must be an integer")?
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    let mut board = match fen {
        Some(fen) => BoardStack::from_fen(&fen).map_err(|e| anyhow!("invalid FEN: {e:?}"))?,
        None => BoardStack::new(),
    };
    let pesto = PestoEval::new();

    let mut info = match depth {
        Some(d) => SearchInfo::with_depth(d),
        None => SearchInfo::new(),
    };
    if let Some(ms) = movetime {
        info.allocate_time(Duration::from_millis(ms));
    } else if use_mcts || depth.is_none() {
        // Timeboxed by default; MCTS has no depth-based stopping point.
        info.allocate_time(Duration::from_millis(3000));
    }

    if use_mcts {
        let config = MctsConfig {
            policy,
            arena_mb,
            verbose: true,
            ..Default::default()
        };
        mcts_search(board.current_state(), &pesto, &mut info, &config);
    } else {
        let mut history = HistoryTable::new();
        iterative_deepening_search(&mut board, &pesto, &mut history, &mut info, true);
    }

    Ok(())
}
