//! Per-piece movement rules.
//!
//! Each rule is a pure function of (origin, destination, board) and answers
//! whether the piece's geometry and the occupancy of the board allow the move.
//! Whether the move leaves the mover's own King in check is NOT considered
//! here; `Board::check_move` handles that by simulation. Castling is also
//! handled by the board, not by the King's rule.

use crate::board::{Board, Color, Piece, PieceKind, Square};
use crate::utils::squares_between;

/// Dispatch to the rule of `piece.kind`
pub fn is_legal(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    if from == to {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_rule(piece.color, from, to, board),
        PieceKind::Knight => knight_rule(piece.color, from, to, board),
        PieceKind::Bishop => bishop_rule(piece.color, from, to, board),
        PieceKind::Rook => rook_rule(piece.color, from, to, board),
        PieceKind::Queen => queen_rule(piece.color, from, to, board),
        PieceKind::King => king_rule(piece.color, from, to, board),
    }
}

// Destination is empty or holds an opposing piece
#[inline]
fn not_own_piece(color: Color, to: Square, board: &Board) -> bool {
    board.piece_at(to).map_or(true, |p| p.color != color)
}

#[inline]
fn path_clear(from: Square, to: Square, board: &Board) -> bool {
    squares_between(from, to).all(|sq| board.piece_at(sq).is_none())
}

#[inline]
fn deltas(from: Square, to: Square) -> (i32, i32) {
    (
        to.row as i32 - from.row as i32,
        to.col as i32 - from.col as i32,
    )
}

pub fn pawn_rule(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let forward = color.pawn_direction();
    let (dr, dc) = deltas(from, to);

    if dc == 0 && dr == forward {
        return board.piece_at(to).is_none();
    }
    if dc == 0 && dr == 2 * forward {
        if from.row != color.pawn_start_row() {
            return false;
        }
        let middle = Square::new((from.row as i32 + forward) as usize, from.col);
        return board.piece_at(middle).is_none() && board.piece_at(to).is_none();
    }
    if dc.abs() == 1 && dr == forward {
        return board.piece_at(to).is_some_and(|p| p.color != color);
    }
    false
}

pub fn knight_rule(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let (dr, dc) = deltas(from, to);
    let shape = matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2));
    shape && not_own_piece(color, to, board)
}

pub fn bishop_rule(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr == 0 || dr.abs() != dc.abs() {
        return false;
    }
    path_clear(from, to, board) && not_own_piece(color, to, board)
}

pub fn rook_rule(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let (dr, dc) = deltas(from, to);
    if (dr == 0) == (dc == 0) {
        return false;
    }
    path_clear(from, to, board) && not_own_piece(color, to, board)
}

/// Rook rule OR bishop rule for the same endpoints
pub fn queen_rule(color: Color, from: Square, to: Square, board: &Board) -> bool {
    rook_rule(color, from, to, board) || bishop_rule(color, from, to, board)
}

pub fn king_rule(color: Color, from: Square, to: Square, board: &Board) -> bool {
    let (dr, dc) = deltas(from, to);
    if (dr, dc) == (0, 0) || dr.abs() > 1 || dc.abs() > 1 {
        return false;
    }
    not_own_piece(color, to, board)
}
