//! Evaluation parameters and configuration
//!
//! Controls how deep the advisor looks, how many worker threads it uses and
//! how many candidates it keeps.

/// Default number of ranked candidates kept by an evaluation pass
pub const DEFAULT_TOP_K: usize = 5;

/// Parameters for a `MoveEvaluator` pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalParams {
    /// Plies of opponent replies searched below each root move
    pub depth: u32,

    /// Worker threads scoring root moves
    pub workers: usize,

    /// Capacity of the ranking
    pub top_k: usize,
}

impl Default for EvalParams {
    fn default() -> Self {
        Self {
            depth: 1,
            workers: num_cpus::get().max(1),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl EvalParams {
    /// Create new params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search depth in plies
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set worker thread count
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set how many candidates are kept
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}
