//! Error types for the rules engine and the move advisor.
//!
//! Rule violations (wrong owner, illegal geometry, moving into check, ...) are
//! not errors: `Board::check_move` reports them as a `ResultCode`. The types
//! here cover malformed input, an impossible recommendation request and
//! failures of the worker pool.

use crate::board::{Color, PieceKind};

#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("invalid board string: expected 64 characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid board string: unexpected character {ch:?} at index {index}")]
    InvalidCharacter { ch: char, index: usize },

    #[error("invalid board string: more than one {0:?} King")]
    TooManyKings(Color),

    #[error("no legal move available for {0:?}")]
    NoLegalMove(Color),

    #[error("collection is empty")]
    EmptyCollection,

    #[error("invalid promotion piece: {0:?}")]
    InvalidPromotion(PieceKind),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("worker pool needs at least one worker")]
    NoWorkers,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("task panicked: {0}")]
    TaskPanicked(String),

    #[error("task was dropped before producing a result")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, ChessError>;
