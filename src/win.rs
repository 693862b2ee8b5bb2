//! Edge-to-edge connection detection.

use std::collections::VecDeque;
use std::fmt;

use crate::board::{Board, Color, Coord};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winner {
    NoWinner,
    BlackWins,
    WhiteWins,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::NoWinner => f.write_str("no winner"),
            Winner::BlackWins => f.write_str("Black wins"),
            Winner::WhiteWins => f.write_str("White wins"),
        }
    }
}

/// Check both connections, Black first.
pub fn compute_win(board: &Board) -> Winner {
    if connects(board, Color::Black) {
        Winner::BlackWins
    } else if connects(board, Color::White) {
        Winner::WhiteWins
    } else {
        Winner::NoWinner
    }
}

/// Breadth-first search from the color's first edge to its last one.
///
/// Black runs along `y`, White along `x`.
pub fn connects(board: &Board, color: Color) -> bool {
    let n = board.size();
    let axis = |(x, y): Coord| match color {
        Color::Black => y,
        Color::White => x,
    };

    let mut seen = vec![false; n * n];
    let mut queue: VecDeque<Coord> = board
        .stones(color)
        .filter(|&c| axis(c) == 0)
        .collect();
    for &(x, y) in &queue {
        seen[y * n + x] = true;
    }

    while let Some(c) = queue.pop_front() {
        if axis(c) == n - 1 {
            return true;
        }
        let Some(cell) = board.cell(c) else {
            continue;
        };
        for &(nx, ny) in &cell.neighbors {
            let i = ny * n + nx;
            if !seen[i] && board.get((nx, ny)) == Some(color) {
                seen[i] = true;
                queue.push_back((nx, ny));
            }
        }
    }
    false
}
