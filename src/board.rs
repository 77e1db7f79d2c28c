// Board layout: row 0 is White's back rank, row 7 is Black's.
// Square index = row * 8 + col, the same row-major order as the board string.

use crate::error::{ChessError, Result};
use crate::pieces;
use crate::search::MoveEvaluator;
use crate::utils::{all_squares, square_name, squares_between, BOARD_SIZE, NUM_SQUARES};
use std::fmt;
use std::str::FromStr;

pub const START_POSITION: &str =
    "RNBQKBNRPPPPPPPP################################pppppppprnbqkbnr";

pub const EMPTY_SQUARE: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn pawn_start_row(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn back_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row on which this side's pawns promote
    pub fn promotion_row(self) -> usize {
        self.opponent().back_row()
    }

    /// 'W' / 'B', case-insensitive
    pub fn from_char(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'B' => Some(Color::Black),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Material value used by the move evaluator
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 1000,
        }
    }

    pub fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Uppercase letter of the kind
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Uppercase = White, lowercase = Black
    pub fn to_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self { row, col }
    }

    /// None when either coordinate is off the board
    pub fn checked(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    pub fn from_index(idx: usize) -> Self {
        Self::new(idx / BOARD_SIZE, idx % BOARD_SIZE)
    }

    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_name(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    StillPlaying,
    WhiteWin,
    BlackWin,
    Draw,
}

impl GameState {
    fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameState::WhiteWin,
            Color::Black => GameState::BlackWin,
        }
    }
}

/// Verdict of `Board::check_move`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    NoPieceAtSource,
    WrongOwner,
    DestinationOccupiedBySelf,
    IllegalPieceMove,
    MovesIntoCheck,
    Check,
    Ok,
    CastlingPerformed,
    Checkmate,
    PawnPromoted,
}

impl ResultCode {
    /// Stable numeric code shown by front-ends
    pub fn code(self) -> u8 {
        match self {
            ResultCode::NoPieceAtSource => 11,
            ResultCode::WrongOwner => 12,
            ResultCode::DestinationOccupiedBySelf => 13,
            ResultCode::IllegalPieceMove => 21,
            ResultCode::MovesIntoCheck => 31,
            ResultCode::Check => 41,
            ResultCode::Ok => 42,
            ResultCode::CastlingPerformed => 43,
            ResultCode::Checkmate => 44,
            ResultCode::PawnPromoted => 45,
        }
    }

    /// True when the move was applied to the board
    pub fn advances_turn(self) -> bool {
        self.code() >= 41
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wing {
    Kingside,
    Queenside,
}

impl Wing {
    fn rook_col(self) -> usize {
        match self {
            Wing::Kingside => 7,
            Wing::Queenside => 0,
        }
    }

    fn king_target_col(self) -> usize {
        match self {
            Wing::Kingside => 6,
            Wing::Queenside => 2,
        }
    }

    fn rook_target_col(self) -> usize {
        match self {
            Wing::Kingside => 5,
            Wing::Queenside => 3,
        }
    }
}

const KING_HOME_COL: usize = 4;

/// Castling rights, 4 LSB: white kingside, white queenside, black ks, black qs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 0b1000;
    pub const WHITE_QUEENSIDE: u8 = 0b0100;
    pub const BLACK_KINGSIDE: u8 = 0b0010;
    pub const BLACK_QUEENSIDE: u8 = 0b0001;
    pub const ALL: CastlingRights = CastlingRights(0b1111);
    pub const NONE: CastlingRights = CastlingRights(0);

    fn bit(color: Color, wing: Wing) -> u8 {
        match (color, wing) {
            (Color::White, Wing::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, Wing::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, Wing::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, Wing::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    pub fn has(self, color: Color, wing: Wing) -> bool {
        self.0 & Self::bit(color, wing) != 0
    }

    /// False once the side's King or both of its Rooks have moved
    pub fn any(self, color: Color) -> bool {
        self.has(color, Wing::Kingside) || self.has(color, Wing::Queenside)
    }

    fn grant(&mut self, color: Color, wing: Wing) {
        self.0 |= Self::bit(color, wing);
    }

    fn revoke(&mut self, color: Color, wing: Wing) {
        self.0 &= !Self::bit(color, wing);
    }

    fn revoke_all(&mut self, color: Color) {
        self.revoke(color, Wing::Kingside);
        self.revoke(color, Wing::Queenside);
    }
}

/// A scored move; the default value is the "no move" sentinel with every field -1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_row: i32,
    pub from_col: i32,
    pub to_row: i32,
    pub to_col: i32,
    pub score: i32,
}

impl Move {
    pub const NONE: Move = Move {
        from_row: -1,
        from_col: -1,
        to_row: -1,
        to_col: -1,
        score: -1,
    };

    pub fn new(from: Square, to: Square, score: i32) -> Self {
        Self {
            from_row: from.row as i32,
            from_col: from.col as i32,
            to_row: to.row as i32,
            to_col: to.col as i32,
            score,
        }
    }

    pub fn is_none(&self) -> bool {
        self.from_row < 0 || self.from_col < 0 || self.to_row < 0 || self.to_col < 0
    }

    pub fn from(&self) -> Option<Square> {
        if self.is_none() {
            return None;
        }
        Square::checked(self.from_row as usize, self.from_col as usize)
    }

    pub fn to(&self) -> Option<Square> {
        if self.is_none() {
            return None;
        }
        Square::checked(self.to_row as usize, self.to_col as usize)
    }

    fn coords(&self) -> (i32, i32, i32, i32) {
        (self.from_row, self.from_col, self.to_row, self.to_col)
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NONE
    }
}

// Higher score ranks higher. Equal scores: lower coordinates rank higher, so the
// order does not depend on when a move was found. The sentinel ranks lowest.
impl Ord for Move {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self.is_none(), other.is_none()) {
            (true, true) => other.coords().cmp(&self.coords()).then(self.score.cmp(&other.score)),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .score
                .cmp(&other.score)
                .then_with(|| other.coords().cmp(&self.coords())),
        }
    }
}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from(), self.to()) {
            (Some(from), Some(to)) => write!(f, "{}{}", from, to),
            _ => f.write_str("0000"),
        }
    }
}

// Undo entry for rollback
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    pub from: Square,
    pub to: Square,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub promoted: Option<PieceKind>,
    pub prev_castling: CastlingRights,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; NUM_SQUARES],
    castling: CastlingRights,
    game_state: GameState,
    last_promotion: Option<PieceKind>,
    promotion_choice: PieceKind,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board in the standard opening position
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup();
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [None; NUM_SQUARES],
            castling: CastlingRights::NONE,
            game_state: GameState::StillPlaying,
            last_promotion: None,
            promotion_choice: PieceKind::Queen,
        }
    }

    /// Reset to the standard opening position
    pub fn setup(&mut self) {
        let mut board = Self::empty();
        for (idx, ch) in START_POSITION.chars().enumerate() {
            board.squares[idx] = Piece::from_char(ch);
        }
        board.castling = CastlingRights::ALL;
        board.promotion_choice = self.promotion_choice;
        *self = board;
    }

    /// Reset from a 64-character board string. On error the board is untouched.
    pub fn setup_from(&mut self, board_string: &str) -> Result<()> {
        let mut board: Board = board_string.parse()?;
        board.promotion_choice = self.promotion_choice;
        *self = board;
        Ok(())
    }

    /// Inverse of `setup_from`
    pub fn serialize(&self) -> String {
        self.squares
            .iter()
            .map(|sq| sq.map_or(EMPTY_SQUARE, Piece::to_char))
            .collect()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// None for empty or off-board squares
    pub fn get_piece(&self, row: usize, col: usize) -> Option<Piece> {
        Square::checked(row, col).and_then(|sq| self.piece_at(sq))
    }

    // Raw placement; castling rights are not touched
    pub fn set_piece(&mut self, row: usize, col: usize, piece: Option<Piece>) {
        match Square::checked(row, col) {
            Some(sq) => self.squares[sq.index()] = piece,
            None => log::warn!("set_piece ignored off-board square ({}, {})", row, col),
        }
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn promotion_choice(&self) -> PieceKind {
        self.promotion_choice
    }

    /// Kind used when a pawn reaches the far row through `check_move`
    pub fn set_promotion_choice(&mut self, kind: PieceKind) -> Result<()> {
        if !kind.is_promotion_choice() {
            return Err(ChessError::InvalidPromotion(kind));
        }
        self.promotion_choice = kind;
        Ok(())
    }

    /// Kind of the most recent promotion; consumed by the call
    pub fn take_last_promotion(&mut self) -> Option<PieceKind> {
        self.last_promotion.take()
    }

    /// Iterate (square, piece) for every piece of `color`
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        all_squares().filter_map(move |sq| match self.piece_at(sq) {
            Some(p) if p.color == color => Some((sq, p)),
            _ => None,
        })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    // Legality helpers -------------------------------------------

    /// Any opposing piece's rule reaches the King. A missing King is never in check.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            return false;
        };
        self.pieces_of(color.opponent())
            .any(|(from, piece)| pieces::is_legal(piece, from, king, self))
    }

    /// Whether `by` attacks `sq`. Pawns attack diagonally forward whether or not
    /// the square is occupied; everything else follows its movement rule.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.pieces_of(by).any(|(from, piece)| match piece.kind {
            PieceKind::Pawn => {
                sq.row as i32 - from.row as i32 == by.pawn_direction()
                    && (sq.col as i32 - from.col as i32).abs() == 1
            }
            _ => pieces::is_legal(piece, from, sq, self),
        })
    }

    /// True if some move of `color` leaves its King out of check. Exhaustive
    /// simulate-check-undo over every (piece, destination) pair.
    pub fn can_escape_check(&mut self, color: Color) -> bool {
        for (from, to) in self.rule_moves(color) {
            let undo = self.make_move(from, to, None);
            let still_in_check = self.is_king_in_check(color);
            self.unmake_move(undo);
            if !still_in_check {
                return true;
            }
        }
        false
    }

    /// Every rule-legal (origin, destination) pair for `color`, row-major
    pub fn rule_moves(&self, color: Color) -> Vec<(Square, Square)> {
        let mut out = Vec::with_capacity(64);
        for (from, piece) in self.pieces_of(color) {
            for to in all_squares() {
                if pieces::is_legal(piece, from, to, self) {
                    out.push((from, to));
                }
            }
        }
        out
    }

    /// Rule-legal moves that do not leave the mover's King in check
    pub fn legal_moves(&mut self, color: Color) -> Vec<(Square, Square)> {
        let candidates = self.rule_moves(color);
        candidates
            .into_iter()
            .filter(|&(from, to)| {
                let undo = self.make_move(from, to, None);
                let safe = !self.is_king_in_check(color);
                self.unmake_move(undo);
                safe
            })
            .collect()
    }

    // Make / unmake ----------------------------------------------

    /// Move the piece on `from` to `to` without any validation. A pawn is
    /// replaced by `promotion` when given and it lands on its promotion row.
    ///
    /// Panics if `from` is empty; callers take squares from `pieces_of`.
    pub fn make_move(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> Undo {
        let moved = self.squares[from.index()].expect("make_move from an empty square");
        let captured = self.squares[to.index()];
        let promoted = promotion.filter(|_| {
            moved.kind == PieceKind::Pawn && to.row == moved.color.promotion_row()
        });

        let undo = Undo {
            from,
            to,
            moved,
            captured,
            promoted,
            prev_castling: self.castling,
        };

        self.update_castling_after_move(moved, from);
        if let Some(capt) = captured {
            if capt.kind == PieceKind::Rook {
                self.update_castling_on_rook_capture(capt.color, to);
            }
        }

        let landed = match promoted {
            Some(kind) => Piece::new(kind, moved.color),
            None => moved,
        };
        self.squares[from.index()] = None;
        self.squares[to.index()] = Some(landed);
        undo
    }

    pub fn unmake_move(&mut self, undo: Undo) {
        self.squares[undo.from.index()] = Some(undo.moved);
        self.squares[undo.to.index()] = undo.captured;
        self.castling = undo.prev_castling;
    }

    // King leaving home drops both rights, a Rook leaving its corner drops one
    fn update_castling_after_move(&mut self, piece: Piece, from: Square) {
        let back = piece.color.back_row();
        match piece.kind {
            PieceKind::King if from == Square::new(back, KING_HOME_COL) => {
                self.castling.revoke_all(piece.color);
            }
            PieceKind::Rook if from.row == back => {
                for wing in [Wing::Kingside, Wing::Queenside] {
                    if from.col == wing.rook_col() {
                        self.castling.revoke(piece.color, wing);
                    }
                }
            }
            _ => {}
        }
    }

    // A Rook captured on its corner takes its owner's right with it
    fn update_castling_on_rook_capture(&mut self, owner: Color, captured_sq: Square) {
        if captured_sq.row != owner.back_row() {
            return;
        }
        for wing in [Wing::Kingside, Wing::Queenside] {
            if captured_sq.col == wing.rook_col() {
                self.castling.revoke(owner, wing);
            }
        }
    }

    // Castling ---------------------------------------------------

    fn castling_wing(&self, color: Color, from: Square, to: Square) -> Option<Wing> {
        let back = color.back_row();
        let king = Piece::new(PieceKind::King, color);
        if from != Square::new(back, KING_HOME_COL) || to.row != back {
            return None;
        }
        if self.piece_at(from) != Some(king) {
            return None;
        }
        [Wing::Kingside, Wing::Queenside]
            .into_iter()
            .find(|wing| wing.king_target_col() == to.col)
    }

    fn can_castle(&self, color: Color, wing: Wing) -> bool {
        if !self.castling.has(color, wing) {
            return false;
        }
        let back = color.back_row();
        let king_sq = Square::new(back, KING_HOME_COL);
        let rook_sq = Square::new(back, wing.rook_col());
        if self.piece_at(rook_sq) != Some(Piece::new(PieceKind::Rook, color)) {
            return false;
        }
        if squares_between(king_sq, rook_sq).any(|sq| self.piece_at(sq).is_some()) {
            return false;
        }
        // the King may not start on, pass through or land on an attacked square
        if self.is_king_in_check(color) {
            return false;
        }
        let enemy = color.opponent();
        [wing.rook_target_col(), wing.king_target_col()]
            .into_iter()
            .all(|col| !self.is_square_attacked(Square::new(back, col), enemy))
    }

    fn perform_castling(&mut self, color: Color, wing: Wing) {
        let back = color.back_row();
        let king = self.squares[Square::new(back, KING_HOME_COL).index()].take();
        let rook = self.squares[Square::new(back, wing.rook_col()).index()].take();
        self.squares[Square::new(back, wing.king_target_col()).index()] = king;
        self.squares[Square::new(back, wing.rook_target_col()).index()] = rook;
        self.castling.revoke_all(color);
    }

    // Move validation --------------------------------------------

    /// Validate and, when legal, play a move for `side` using the configured
    /// promotion choice.
    pub fn check_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        side: Color,
    ) -> ResultCode {
        let choice = self.promotion_choice;
        self.apply_checked(from_row, from_col, to_row, to_col, side, choice)
    }

    /// Same as `check_move`, with an explicit promotion choice for this move
    pub fn check_move_with_promotion(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        side: Color,
        promotion: PieceKind,
    ) -> Result<ResultCode> {
        if !promotion.is_promotion_choice() {
            return Err(ChessError::InvalidPromotion(promotion));
        }
        Ok(self.apply_checked(from_row, from_col, to_row, to_col, side, promotion))
    }

    fn apply_checked(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        side: Color,
        promotion: PieceKind,
    ) -> ResultCode {
        let code = match (Square::checked(from_row, from_col), Square::checked(to_row, to_col)) {
            (Some(from), Some(to)) => self.validate_and_play(from, to, side, promotion),
            _ => ResultCode::IllegalPieceMove,
        };
        log::trace!(
            "check_move ({},{})->({},{}) by {:?}: {:?} ({})",
            from_row,
            from_col,
            to_row,
            to_col,
            side,
            code,
            code.code()
        );
        code
    }

    fn validate_and_play(
        &mut self,
        from: Square,
        to: Square,
        side: Color,
        promotion: PieceKind,
    ) -> ResultCode {
        let Some(piece) = self.piece_at(from) else {
            return ResultCode::NoPieceAtSource;
        };
        if piece.color != side {
            return ResultCode::WrongOwner;
        }
        if self.piece_at(to).is_some_and(|p| p.color == side) {
            return ResultCode::DestinationOccupiedBySelf;
        }

        if let Some(wing) = self.castling_wing(side, from, to) {
            if self.can_castle(side, wing) {
                self.perform_castling(side, wing);
                self.settle_after_move(side);
                return ResultCode::CastlingPerformed;
            }
        }

        if !pieces::is_legal(piece, from, to, self) {
            return ResultCode::IllegalPieceMove;
        }

        let undo = self.make_move(from, to, Some(promotion));
        if self.is_king_in_check(side) {
            self.unmake_move(undo);
            return ResultCode::MovesIntoCheck;
        }

        // committed
        if let Some(kind) = undo.promoted {
            self.last_promotion = Some(kind);
        }
        let (opponent_in_check, opponent_stuck) = self.settle_after_move(side);

        if opponent_in_check && opponent_stuck {
            ResultCode::Checkmate
        } else if undo.promoted.is_some() {
            ResultCode::PawnPromoted
        } else if opponent_in_check {
            ResultCode::Check
        } else {
            ResultCode::Ok
        }
    }

    // Update the game state after `mover` committed a move.
    // Returns (opponent in check, opponent has no safe move).
    fn settle_after_move(&mut self, mover: Color) -> (bool, bool) {
        let opponent = mover.opponent();
        let in_check = self.is_king_in_check(opponent);
        let stuck = !self.can_escape_check(opponent);
        if stuck {
            self.game_state = if in_check {
                GameState::won_by(mover)
            } else {
                GameState::Draw
            };
        }
        (in_check, stuck)
    }

    // Advisor ----------------------------------------------------

    /// Best move for `side`, searching `depth` plies of replies on `workers` threads
    pub fn get_best_move(&self, side: Color, depth: u32, workers: usize) -> Result<Move> {
        let mut evaluator = MoveEvaluator::new(self, side);
        evaluator.evaluate(depth, workers)?;
        evaluator
            .best_moves()
            .into_iter()
            .next()
            .ok_or(ChessError::NoLegalMove(side))
    }
}

impl FromStr for Board {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        let len = s.chars().count();
        if len != NUM_SQUARES {
            return Err(ChessError::InvalidLength(len));
        }
        let mut board = Board::empty();
        let mut kings = [0usize; 2];
        for (index, ch) in s.chars().enumerate() {
            let piece = match ch {
                EMPTY_SQUARE => None,
                _ => Some(Piece::from_char(ch).ok_or(ChessError::InvalidCharacter { ch, index })?),
            };
            if let Some(Piece { kind: PieceKind::King, color }) = piece {
                kings[color as usize] += 1;
                if kings[color as usize] > 1 {
                    return Err(ChessError::TooManyKings(color));
                }
            }
            board.squares[index] = piece;
        }

        // Kings and Rooks on their home squares have not moved yet
        for color in [Color::White, Color::Black] {
            let back = color.back_row();
            if board.piece_at(Square::new(back, KING_HOME_COL))
                != Some(Piece::new(PieceKind::King, color))
            {
                continue;
            }
            for wing in [Wing::Kingside, Wing::Queenside] {
                if board.piece_at(Square::new(back, wing.rook_col()))
                    == Some(Piece::new(PieceKind::Rook, color))
                {
                    board.castling.grant(color, wing);
                }
            }
        }
        Ok(board)
    }
}

// Simple display (board string)
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
