//! Integration tests for hex-patterns
//!
//! Board state, labels, win detection and the text protocol, exercised
//! through the public API only.

use hex_patterns::board::{Board, Color, Coord, PlacementError, coord_to_label, label_to_coord};
use hex_patterns::engine::{compute_reply, prune};
use hex_patterns::protocol::ProtocolEngine;
use hex_patterns::session::EngineConfig;
use hex_patterns::win::{Winner, compute_win};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Parse a label, panicking on bad input.
fn c(label: &str) -> Coord {
    label_to_coord(label).unwrap_or_else(|e| panic!("bad label {label}: {e}"))
}

/// Set up stones on the board by placing them directly and refresh the
/// engine's live patterns.
fn setpos(size: usize, black: &[&str], white: &[&str]) -> Board {
    let mut board = Board::new(size).unwrap();
    for &label in black {
        let (x, y) = c(label);
        board.place(x, y, Color::Black).unwrap();
    }
    for &label in white {
        let (x, y) = c(label);
        board.place(x, y, Color::White).unwrap();
    }
    prune(&mut board);
    board
}

/// Send a script to a fresh protocol engine and return its output.
fn run_script(script: &str) -> String {
    let mut engine = ProtocolEngine::new(EngineConfig::new(8).with_seed(4)).unwrap();
    let mut out = Vec::new();
    engine.run_with(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Label conversion tests
// =============================================================================

#[test]
fn test_label_roundtrip_all_cells() {
    for n in [1, 8, 13, 26] {
        for y in 0..n {
            for x in 0..n {
                let label = coord_to_label((x, y));
                assert_eq!(label_to_coord(&label), Ok((x, y)), "label {label}");
            }
        }
    }
}

#[test]
fn test_label_format() {
    assert_eq!(coord_to_label((0, 0)), "a1");
    assert_eq!(coord_to_label((25, 9)), "z10");
    assert_eq!(label_to_coord("h8"), Ok((7, 7)));
}

#[test]
fn test_labels_reject_leading_zero() {
    assert!(label_to_coord("a01").is_err());
    assert!(label_to_coord("a0").is_err());
}

// =============================================================================
// Placement tests
// =============================================================================

#[test]
fn test_place_out_of_bounds() {
    let mut board = Board::new(8).unwrap();
    let err = board.place(8, 3, Color::Black).unwrap_err();
    assert_eq!(err, PlacementError::OutOfBounds { x: 8, y: 3, size: 8 });
    assert_eq!(board.unoccupied().len(), 64);
}

#[test]
fn test_place_occupied_keeps_state() {
    let mut board = setpos(8, &["d7"], &[]);
    let live_before = board.live().to_vec();
    let free_before = board.unoccupied().clone();

    let err = board.place(3, 6, Color::White).unwrap_err();
    assert_eq!(err, PlacementError::CellOccupied { x: 3, y: 6 });
    assert_eq!(board.get((3, 6)), Some(Color::Black));
    assert_eq!(board.live(), live_before.as_slice());
    assert_eq!(board.unoccupied(), &free_before);
}

#[test]
fn test_error_messages() {
    let err = PlacementError::CellOccupied { x: 1, y: 2 };
    assert_eq!(err.to_string(), "(1, 2) is already occupied");
}

// =============================================================================
// Win detection tests
// =============================================================================

#[test]
fn test_empty_board_no_winner() {
    for n in 1..=26 {
        let board = Board::new(n).unwrap();
        assert_eq!(compute_win(&board), Winner::NoWinner, "size {n}");
    }
}

#[test]
fn test_black_path_wins_regardless_of_white() {
    for n in 2..=12 {
        let mut board = Board::new(n).unwrap();
        // A straight column for Black, White filling everything beside it.
        for y in 0..n {
            board.place(n / 2, y, Color::Black).unwrap();
        }
        for y in 0..n {
            for x in 0..n {
                if x != n / 2 && (x + y) % 2 == 0 {
                    board.place(x, y, Color::White).unwrap();
                }
            }
        }
        assert_eq!(compute_win(&board), Winner::BlackWins, "size {n}");
    }
}

#[test]
fn test_bent_black_path() {
    let mut board = Board::new(5).unwrap();
    for label in ["e1", "d2", "c3", "c4", "b5"] {
        let (x, y) = c(label);
        board.place(x, y, Color::Black).unwrap();
    }
    assert_eq!(compute_win(&board), Winner::BlackWins);
}

#[test]
fn test_white_path_wins() {
    let mut board = Board::new(5).unwrap();
    for label in ["a3", "b3", "c2", "d2", "e1"] {
        let (x, y) = c(label);
        board.place(x, y, Color::White).unwrap();
    }
    assert_eq!(compute_win(&board), Winner::WhiteWins);
}

#[test]
fn test_full_board_has_winner() {
    let mut board = Board::new(6).unwrap();
    let mut rng = fastrand::Rng::with_seed(2);
    let mut color = Color::Black;
    while !board.unoccupied().is_empty() {
        let free: Vec<Coord> = board.unoccupied().iter().copied().collect();
        let (x, y) = free[rng.usize(..free.len())];
        board.place(x, y, color).unwrap();
        color = color.opponent();
    }
    assert_ne!(compute_win(&board), Winner::NoWinner);
}

// =============================================================================
// Engine tests
// =============================================================================

#[test]
fn test_reply_is_always_free() {
    let mut board = setpos(8, &["d4"], &[]);
    let mut rng = fastrand::Rng::with_seed(8);
    for label in ["a1", "h8", "e4", "d5"] {
        let (x, y) = c(label);
        if !board.is_empty((x, y)) {
            continue;
        }
        board.place(x, y, Color::White).unwrap();
        let reply = compute_reply(&mut board, (x, y), &mut rng).unwrap();
        assert!(board.is_empty(reply), "reply {} is taken", coord_to_label(reply));
        board.place(reply.0, reply.1, Color::Black).unwrap();
        prune(&mut board);
        assert!(board.live().iter().all(|p| p.is_intact(&board)));
    }
}

// =============================================================================
// Protocol tests
// =============================================================================

#[test]
fn test_protocol_session() {
    let out = run_script("1 boardsize 4\n2 genmove\n3 winner\n4 quit\n");
    assert_eq!(out, "=1 \n\n=2 b2\n\n=3 none\n\n=4 \n\n");
}

#[test]
fn test_protocol_showboard() {
    let out = run_script("boardsize 3\ngenmove\nshowboard\nquit\n");
    assert!(out.starts_with("= \n\n= b2\n\n= \n"));
    assert!(out.contains(" 1 . . ."));
    assert!(out.contains("  2 . X ."));
}

#[test]
fn test_protocol_play_answers_with_black() {
    let out = run_script("boardsize 5\n5 play a1\nquit\n");
    let replies: Vec<&str> = out.split("\n\n").collect();
    let reply = replies[1].strip_prefix("=5 ").unwrap();
    assert!(label_to_coord(reply).is_ok(), "bad reply {reply}");
    assert_ne!(reply, "a1");
}

#[test]
fn test_protocol_errors_keep_going() {
    let out = run_script("play\nplay q99\nfoo\nname\n");
    let replies: Vec<&str> = out.split("\n\n").filter(|s| !s.is_empty()).collect();
    assert_eq!(replies.len(), 4);
    assert!(replies[0].starts_with('?'));
    assert!(replies[1].starts_with('?'));
    assert_eq!(replies[2], "? unknown command: foo");
    assert_eq!(replies[3], "= hex-patterns");
}

#[test]
fn test_protocol_patterns_lists_live_set() {
    let out = run_script("boardsize 8\ngenmove\npatterns\nquit\n");
    // d4 sits in the middle of an empty board: nothing to defend yet.
    assert!(out.contains("= d4\n\n"));
    let replies: Vec<&str> = out.split("\n\n").collect();
    assert_eq!(replies[2], "= ");
}
