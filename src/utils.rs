// Square indexing and coordinate notation helpers

use crate::board::Square;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

// Central 4x4 region (rows/cols 2..=5)
pub const CENTER_MIN: usize = 2;
pub const CENTER_MAX: usize = 5;

#[inline]
pub fn is_center(sq: Square) -> bool {
    (CENTER_MIN..=CENTER_MAX).contains(&sq.row) && (CENTER_MIN..=CENTER_MAX).contains(&sq.col)
}

/// Iterate all 64 squares in row-major order
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..NUM_SQUARES).map(Square::from_index)
}

/// Squares strictly between `from` and `to` along a rank, file or diagonal.
/// Yields nothing when the two squares are not aligned.
pub fn squares_between(from: Square, to: Square) -> impl Iterator<Item = Square> {
    let dr = to.row as i32 - from.row as i32;
    let dc = to.col as i32 - from.col as i32;
    let aligned = (dr == 0) != (dc == 0) || (dr != 0 && dr.abs() == dc.abs());
    let steps = if aligned { dr.abs().max(dc.abs()) } else { 0 };
    let (sr, sc) = (dr.signum(), dc.signum());
    (1..steps).map(move |i| {
        Square::new(
            (from.row as i32 + sr * i) as usize,
            (from.col as i32 + sc * i) as usize,
        )
    })
}

/// Parse a square written as row letter + column digit (e.g. "a1" -> row 0, col 0)
pub fn parse_square(s: &str) -> Result<Square, &'static str> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err("Invalid square notation");
    }
    let row = bytes[0].to_ascii_lowercase();
    let col = bytes[1];
    if !(b'a'..=b'h').contains(&row) || !(b'1'..=b'8').contains(&col) {
        return Err("Invalid square notation");
    }
    Ok(Square::new((row - b'a') as usize, (col - b'1') as usize))
}

/// Parse a four-character move ("b1d1") into origin and destination
pub fn parse_move(s: &str) -> Result<(Square, Square), &'static str> {
    let s = s.trim();
    if s.len() != 4 || !s.is_ascii() {
        return Err("Move must be four characters, e.g. b1d1");
    }
    Ok((parse_square(&s[0..2])?, parse_square(&s[2..4])?))
}

pub fn square_name(sq: Square) -> String {
    let row_char = (b'a' + sq.row as u8) as char;
    let col_char = (b'1' + sq.col as u8) as char;
    format!("{}{}", row_char, col_char)
}
