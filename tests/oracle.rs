// Cross-checks the rules engine against shakmaty on FEN positions.
// The board string carries neither castling nor en passant, so those moves are
// left out of the comparison and every FEN here has no en passant square.

use scacchiera::board::{Board, Color, Square};
use scacchiera::utils::BOARD_SIZE;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};
use std::collections::BTreeSet;

const POSITIONS: &[(&str, &str)] = &[
    (
        "start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "promotions",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ),
    (
        "pinned pieces",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ),
    (
        "king safety",
        "1r2k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPB1PPP/R2BK2R w KQk - 2 2",
    ),
    ("black in check", "4k3/8/8/8/8/8/8/4R1K1 b - - 0 1"),
    (
        "fools mate",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    ),
    ("back rank mate", "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"),
    ("stalemate", "7k/8/6Q1/8/8/8/8/K7 b - - 0 1"),
];

// FEN lists rank 8 first; the board string starts at row 0 (rank 1)
fn board_from_fen(fen: &str) -> Board {
    let placement = fen.split_whitespace().next().expect("FEN placement");
    let mut cells = ['#'; BOARD_SIZE * BOARD_SIZE];
    for (i, rank) in placement.split('/').enumerate() {
        let row = BOARD_SIZE - 1 - i;
        let mut col = 0;
        for ch in rank.chars() {
            match ch.to_digit(10) {
                Some(skip) => col += skip as usize,
                None => {
                    cells[row * BOARD_SIZE + col] = ch;
                    col += 1;
                }
            }
        }
    }
    cells
        .iter()
        .collect::<String>()
        .parse()
        .expect("FEN placement maps to a board string")
}

fn shakmaty_position(fen: &str) -> Chess {
    let fen: Fen = fen.parse().expect("valid FEN");
    fen.into_position(CastlingMode::Standard)
        .expect("shakmaty should accept FEN")
}

fn uci(from: Square, to: Square) -> String {
    let name = |sq: Square| {
        format!(
            "{}{}",
            (b'a' + sq.col as u8) as char,
            (b'1' + sq.row as u8) as char
        )
    };
    format!("{}{}", name(from), name(to))
}

fn side_to_move(pos: &Chess) -> Color {
    if pos.turn() == shakmaty::Color::White {
        Color::White
    } else {
        Color::Black
    }
}

#[test]
fn check_detection_matches_shakmaty() {
    for (name, fen) in POSITIONS {
        let pos = shakmaty_position(fen);
        let board = board_from_fen(fen);
        let side = side_to_move(&pos);
        assert_eq!(
            board.is_king_in_check(side),
            pos.is_check(),
            "check mismatch in {name}"
        );
    }
}

#[test]
fn checkmate_detection_matches_shakmaty() {
    for (name, fen) in POSITIONS {
        let pos = shakmaty_position(fen);
        let mut board = board_from_fen(fen);
        let side = side_to_move(&pos);
        let mated = board.is_king_in_check(side) && !board.can_escape_check(side);
        assert_eq!(mated, pos.is_checkmate(), "checkmate mismatch in {name}");
    }
}

#[test]
fn legal_moves_match_shakmaty() {
    for (name, fen) in POSITIONS {
        let pos = shakmaty_position(fen);
        let mut board = board_from_fen(fen);
        let side = side_to_move(&pos);

        let ours: BTreeSet<String> = board
            .legal_moves(side)
            .into_iter()
            .map(|(from, to)| uci(from, to))
            .collect();
        // promotions differ only by suffix, keep the squares
        let theirs: BTreeSet<String> = pos
            .legal_moves()
            .iter()
            .filter(|m| !m.is_castle() && !m.is_en_passant())
            .map(|m| m.to_uci(CastlingMode::Standard).to_string()[..4].to_string())
            .collect();

        let extra: Vec<_> = ours.difference(&theirs).collect();
        let missed: Vec<_> = theirs.difference(&ours).collect();
        assert!(
            extra.is_empty() && missed.is_empty(),
            "{name}: extra {:?}, missed {:?}",
            extra,
            missed
        );
    }
}
