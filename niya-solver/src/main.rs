//! Niya Solver
//!
//! Solves single boards from the command line and prints the result.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use niya_core::Board;
use niya_solver::{PositionCache, SolveRecord, SolveReport, Solver, SolverConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve one board
    Solve(SolveArgs),
    /// Print the canonical form of a board
    Canon {
        /// 16 two-digit tiles "<plant><poem>", row-major
        #[arg(long)]
        board: String,

        /// Print JSON instead of a grid
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// 16 two-digit tiles "<plant><poem>", row-major
    #[arg(long, conflicts_with = "seed")]
    board: Option<String>,

    /// Solve a shuffled standard board from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Skip player two's reply analysis
    #[arg(long)]
    skip_replies: bool,

    /// Canonicalize the board before solving
    #[arg(long)]
    canonicalize: bool,

    /// Print the integer-coded record as JSON
    #[arg(long)]
    json: bool,

    /// Solver settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let result = match cli.command {
        Command::Solve(args) => run_solve(args),
        Command::Canon { board, json } => run_canon(&board, json),
    };
    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn parse_board(tiles: &str) -> Result<Board> {
    tiles
        .parse()
        .with_context(|| format!("invalid board {:?}", tiles))
}

fn run_solve(args: SolveArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if args.skip_replies {
        config.analyze_replies = false;
    }

    let mut board = match (&args.board, args.seed) {
        (Some(tiles), _) => parse_board(tiles)?,
        (None, Some(seed)) => Board::standard_shuffled(&mut StdRng::seed_from_u64(seed)),
        (None, None) => Board::standard(),
    };
    if args.canonicalize {
        board = board.canonical();
    }

    log::debug!("config: {:?}", config);
    let mut solver = Solver::new(config)?;
    let start = Instant::now();
    let report = solver.solve(&board);
    let elapsed = start.elapsed();
    solver.stats().log_summary(solver.cache().len());

    if args.json {
        let record = SolveRecord::from(&report);
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_report(&board, &report);
        println!("Time: {:.3}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn print_report(board: &Board, report: &SolveReport) {
    println!("{}", board.render(Some(report.best_move)));
    println!(
        "P1 best opening: {} ({})",
        report.best_move,
        report.best_move_class()
    );
    let verdict = match report.score {
        1 => "P1 wins",
        -1 => "P2 wins",
        _ => "Draw",
    };
    println!(
        "Result: {} by {} in {} moves",
        verdict, report.outcome, report.game_depth
    );

    let Some(replies) = &report.replies else {
        return;
    };
    println!();
    println!("Opening  Reply  Score  Outcome");
    for reply in replies {
        let cell = reply
            .reply
            .map_or_else(|| "-".to_string(), |cell| cell.to_string());
        println!(
            "{:>7}  {:>5}  {:>+5}  {}",
            reply.opening, cell, reply.score, reply.outcome
        );
    }
    if let Some(tally) = report.reply_tally() {
        println!(
            "\nOpenings: {} P1 wins, {} P2 wins, {} draws",
            tally.p1_wins, tally.p2_wins, tally.draws
        );
    }
}

fn run_canon(tiles: &str, json: bool) -> Result<()> {
    let board = parse_board(tiles)?;
    let canonical = board.canonical();
    if json {
        println!("{}", serde_json::to_string(&canonical)?);
    } else {
        println!("{}", canonical.to_tile_string());
        println!("{}", canonical);
        if canonical == board {
            println!("(already canonical)");
        }
    }
    Ok(())
}
