pub mod board;
pub mod error;
pub mod pieces;
pub mod search;
pub mod utils;

pub use board::{Board, Color, GameState, Move, Piece, PieceKind, ResultCode, Square};
pub use error::{ChessError, PoolError};
