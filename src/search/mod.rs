//! Move advisor for the rules engine
//!
//! Scores every legal move of one side on a pool of worker threads and keeps
//! the best few in a bounded ranking.

pub mod evaluator;
pub mod params;
pub mod pool;
pub mod stats;
pub mod topk;

pub use self::evaluator::MoveEvaluator;
pub use self::params::EvalParams;
pub use self::pool::{TaskHandle, WorkerPool};
pub use self::stats::SearchStats;
pub use self::topk::BoundedTopK;
pub use crate::board::Move;
