//! Scacchiera move advisor entry point.
//!
//! Replays the given moves through the rules engine, then recommends the best
//! moves for the side to play.

use clap::Parser;
use scacchiera::board::{Board, Color, START_POSITION};
use scacchiera::search::{EvalParams, MoveEvaluator};
use scacchiera::utils::parse_move;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 64-character board string, row 0 first ('#' = empty, uppercase = White)
    #[arg(short, long, default_value_t = String::from(START_POSITION))]
    board: String,

    /// Side to move first: w or b
    #[arg(short, long, default_value_t = 'w')]
    side: char,

    /// Plies of replies searched below each candidate
    #[arg(short, long, default_value_t = 1)]
    depth: u32,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    threads: Option<usize>,

    /// How many candidates to print
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Moves to play first, e.g. --play b5d5 --play g6e6
    #[arg(short, long)]
    play: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut board: Board = match args.board.parse() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let Some(mut side) = Color::from_char(args.side) else {
        eprintln!("side must be 'w' or 'b', got {:?}", args.side);
        return ExitCode::FAILURE;
    };

    for text in &args.play {
        let (from, to) = match parse_move(text) {
            Ok(squares) => squares,
            Err(e) => {
                eprintln!("{}: {}", text, e);
                return ExitCode::FAILURE;
            }
        };
        let code = board.check_move(from.row, from.col, to.row, to.col, side);
        println!("{} {} -> {:?} ({})", side.as_char(), text, code, code.code());
        if !code.advances_turn() {
            eprintln!("move {} rejected, stopping", text);
            return ExitCode::FAILURE;
        }
        if let Some(kind) = board.take_last_promotion() {
            println!("pawn promoted to {:?}", kind);
        }
        side = side.opponent();
    }
    println!("board: {}", board);
    println!("state: {:?}", board.game_state());

    let mut params = EvalParams::new().depth(args.depth).top_k(args.top);
    if let Some(threads) = args.threads {
        params = params.workers(threads);
    }
    let mut evaluator = MoveEvaluator::new(&board, side).with_params(params);
    if let Err(e) = evaluator.run() {
        eprintln!("evaluation failed: {}", e);
        return ExitCode::FAILURE;
    }

    let moves = evaluator.best_moves();
    if moves.is_empty() {
        println!("no legal move for {:?}", side);
        return ExitCode::SUCCESS;
    }
    for (rank, mv) in moves.iter().enumerate() {
        println!("{}. {} (score {})", rank + 1, mv, mv.score);
    }
    let stats = evaluator.stats();
    println!(
        "{} nodes in {} ms ({} nps)",
        stats.nodes,
        stats.search_time.as_millis(),
        stats.nps
    );
    ExitCode::SUCCESS
}
