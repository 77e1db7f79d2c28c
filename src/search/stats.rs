//! Evaluation statistics and performance metrics
//!
//! Tracks how much work an evaluation pass did: moves scored (including the
//! recursive replies), root candidates, failed worker tasks and timing.

use std::time::{Duration, Instant};

/// Evaluation statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total moves scored, root and replies
    pub nodes: u64,

    /// Candidate moves submitted at the root
    pub root_nodes: u64,

    /// Root tasks that failed and contributed no candidate
    pub failed_tasks: u64,

    /// Evaluation start time
    pub start_time: Option<Instant>,

    /// Time spent evaluating
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and calculate NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    /// Add nodes scored by one worker task
    pub fn add_nodes(&mut self, nodes: u64) {
        self.nodes += nodes;
    }

    /// Increment root candidate count
    pub fn inc_root_node(&mut self) {
        self.root_nodes += 1;
    }

    /// Increment failed task count
    pub fn inc_failed_task(&mut self) {
        self.failed_tasks += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "nodes {} root {} failed {} time {} ms nps {}",
            self.nodes,
            self.root_nodes,
            self.failed_tasks,
            self.search_time.as_millis(),
            self.nps
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_and_reset() {
        let mut stats = SearchStats::new();
        stats.start_timing();
        stats.inc_root_node();
        stats.inc_root_node();
        stats.add_nodes(40);
        stats.inc_failed_task();
        stats.update_timing();
        assert_eq!(stats.root_nodes, 2);
        assert_eq!(stats.nodes, 40);
        assert_eq!(stats.failed_tasks, 1);
        assert!(stats.summary().starts_with("nodes 40 root 2 failed 1"));

        stats.reset();
        assert_eq!(stats.nodes, 0);
        assert!(stats.start_time.is_none());
    }
}
