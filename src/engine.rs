//! Reply selection.
//!
//! The engine answers a White move in four steps, stopping at the first
//! that yields a free cell:
//!
//! 1. a live pattern containing the move is resolved and its reply played,
//! 2. the next free cell of the priority list,
//! 3. a random live pattern, resolved as if White had played in its first
//!    half,
//! 4. a random free cell.
//!
//! Resolving a pattern consumes it and leaves behind its residual patterns
//! (usually one or two bridges). The caller places the reply and then calls
//! [`prune`] to drop instances that are no longer intact.

use fastrand::Rng;
use log::{debug, trace};
use thiserror::Error;

use crate::board::{Board, Coord, coord_to_label};
use crate::catalog::Kind;
use crate::cell::{are_adjacent, shift};
use crate::patterns::{Pattern, find_patterns};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no free cell left to play")]
pub struct BoardExhausted;

/// A reply and what is left of the pattern after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub reply: Coord,
    pub residual: Vec<Pattern>,
}

// =============================================================================
// Reply rules
// =============================================================================

/// Apply the reply rule of `pattern` to a White move.
///
/// `None` for `opponent` means "as if White had played in the first half".
/// Returns `None` when the pattern's geometry does not yield a reply.
pub fn resolve(pattern: &Pattern, opponent: Option<Coord>) -> Option<Resolution> {
    match pattern {
        Pattern::Bridge([a, b]) => {
            let reply = if opponent == Some(*b) { *a } else { *b };
            Some(Resolution {
                reply,
                residual: Vec::new(),
            })
        }
        Pattern::Four32 { anchor, cells } => resolve_four32(*anchor, cells, opponent),
        _ => Some(resolve_halves(pattern, opponent)),
    }
}

/// Two alternative routes: answer in the one White did not touch.
fn resolve_halves(pattern: &Pattern, opponent: Option<Coord>) -> Resolution {
    let (kind, cells) = (pattern.kind(), pattern.cells());
    let first_hit = opponent
        .and_then(|o| pattern.position(o))
        .is_none_or(|i| kind.in_first_half(i));
    if first_hit {
        Resolution {
            reply: cells[kind.second_half_start()],
            residual: second_half_residual(kind, cells),
        }
    } else {
        Resolution {
            reply: cells[0],
            residual: first_half_residual(kind, cells),
        }
    }
}

fn bridge_at(cells: &[Coord], i: usize, j: usize) -> Pattern {
    Pattern::bridge(cells[i], cells[j])
}

/// What is left once the first half's key has been played.
fn first_half_residual(kind: Kind, cells: &[Coord]) -> Vec<Pattern> {
    match kind {
        // The support cells of Jyp4 drop out.
        Kind::DoubleTriangle | Kind::Jyp3 | Kind::Jyp4 => vec![bridge_at(cells, 1, 2)],
        Kind::Jyp9 | Kind::Pattern8 => vec![bridge_at(cells, 1, 2), bridge_at(cells, 3, 4)],
        Kind::Pattern7 => vec![bridge_at(cells, 1, 2), bridge_at(cells, 7, 8)],
        Kind::Bridge | Kind::Four32 => Vec::new(),
    }
}

/// What is left once the second half's key has been played.
fn second_half_residual(kind: Kind, cells: &[Coord]) -> Vec<Pattern> {
    match kind {
        Kind::DoubleTriangle | Kind::Jyp3 => vec![bridge_at(cells, 4, 5)],
        Kind::Jyp4 => vec![bridge_at(cells, 5, 6)],
        Kind::Jyp9 => vec![bridge_at(cells, 6, 7), bridge_at(cells, 8, 9)],
        Kind::Pattern8 => vec![bridge_at(cells, 9, 10), bridge_at(cells, 11, 12)],
        Kind::Pattern7 => {
            let zig = [4, 5, 6, 9, 10, 11, 12, 13].map(|i| cells[i]);
            vec![Pattern::Four32 {
                anchor: cells[3],
                cells: zig,
            }]
        }
        Kind::Bridge | Kind::Four32 => Vec::new(),
    }
}

/// The parts of a ziggurat the reply rule works with.
struct Ziggurat {
    connector: Coord,
    triangle: Vec<Coord>,
}

impl Ziggurat {
    fn new(anchor: Coord, cells: &[Coord; 8]) -> Option<Self> {
        let dist = |c: Coord| c.0.abs_diff(anchor.0);
        // First cell furthest from the anchor sideways.
        let far = cells
            .iter()
            .copied()
            .reduce(|far, c| if dist(c) > dist(far) { c } else { far })?;
        let s: isize = if far.1 > anchor.1 { 1 } else { -1 };

        let connector = [(s, s), (-2 * s, s)]
            .into_iter()
            .filter_map(|d| shift(anchor, d))
            .find(|c| cells.contains(c))?;

        let apex = if are_adjacent(far, connector) {
            (anchor.0, far.1)
        } else {
            far
        };
        let mut triangle = vec![apex];
        triangle.extend(cells.iter().copied().filter(|&c| are_adjacent(apex, c)));
        (triangle.len() == 3).then_some(Self {
            connector,
            triangle,
        })
    }

    /// The triangle cell alone on its row.
    fn tip(&self) -> Option<Coord> {
        self.triangle
            .iter()
            .copied()
            .find(|c| self.triangle.iter().filter(|t| t.1 == c.1).count() == 1)
    }
}

fn resolve_four32(
    anchor: Coord,
    cells: &[Coord; 8],
    opponent: Option<Coord>,
) -> Option<Resolution> {
    let zig = Ziggurat::new(anchor, cells)?;

    let play_connector = match opponent {
        None => true,
        Some(o) => zig.triangle.contains(&o) || !cells.contains(&o),
    };

    if play_connector {
        let connector = zig.connector;
        let carriers: Vec<Coord> = cells
            .iter()
            .copied()
            .filter(|&c| are_adjacent(c, connector) && are_adjacent(c, anchor))
            .collect();
        let edge_pair: Vec<Coord> = cells
            .iter()
            .copied()
            .filter(|&c| {
                are_adjacent(c, connector) && !carriers.contains(&c) && !zig.triangle.contains(&c)
            })
            .collect();
        let (&[c1, c2], &[e1, e2]) = (carriers.as_slice(), edge_pair.as_slice()) else {
            return None;
        };
        Some(Resolution {
            reply: connector,
            residual: vec![Pattern::bridge(c1, c2), Pattern::bridge(e1, e2)],
        })
    } else {
        let tip = zig.tip()?;
        let rest: Vec<Coord> = zig
            .triangle
            .iter()
            .copied()
            .filter(|&c| c != tip)
            .collect();
        let &[r1, r2] = rest.as_slice() else {
            return None;
        };
        Some(Resolution {
            reply: tip,
            residual: vec![Pattern::bridge(r1, r2)],
        })
    }
}

// =============================================================================
// Live set maintenance
// =============================================================================

/// Rebuild the live set from scratch.
pub fn refresh(board: &mut Board) {
    board.live = find_patterns(board);
    debug!("matcher found {} live patterns", board.live.len());
}

/// Drop every live instance with an occupied cell, rebuilding the set if
/// nothing survives.
pub fn prune(board: &mut Board) {
    let live = std::mem::take(&mut board.live);
    let before = live.len();
    let kept: Vec<Pattern> = live.into_iter().filter(|p| p.is_intact(board)).collect();
    trace!("pruned {} of {} live patterns", before - kept.len(), before);
    board.live = kept;
    if board.live.is_empty() {
        refresh(board);
    }
}

fn add_residual(board: &mut Board, residual: Vec<Pattern>) {
    for pattern in residual {
        trace!("residual {pattern}");
        if !board.live.contains(&pattern) {
            board.live.push(pattern);
        }
    }
}

/// Consume `pattern` and return its reply if that cell is free.
fn consume(board: &mut Board, pattern: &Pattern, opponent: Option<Coord>) -> Option<Coord> {
    let Resolution { reply, residual } = resolve(pattern, opponent)?;
    if !board.is_empty(reply) {
        return None;
    }
    trace!("{pattern} decomposes into {} patterns", residual.len());
    add_residual(board, residual);
    Some(reply)
}

// =============================================================================
// Reply selection
// =============================================================================

/// The main diagonal, centre first.
pub fn default_priority(size: usize) -> Vec<Coord> {
    let mut cells: Vec<Coord> = (0..size).map(|i| (i, i)).collect();
    cells.sort_by_key(|&(i, _)| ((2 * i).abs_diff(size - 1), i));
    cells
}

fn reply_from_live(board: &mut Board, opponent: Coord) -> Option<Coord> {
    let i = board.live.iter().position(|p| p.contains(opponent))?;
    let pattern = board.live.remove(i);
    let reply = consume(board, &pattern, Some(opponent));
    if let Some(r) = reply {
        debug!(
            "{} answers {} with {}",
            pattern.kind(),
            coord_to_label(opponent),
            coord_to_label(r)
        );
    }
    reply
}

fn reply_from_priority(board: &mut Board) -> Option<Coord> {
    while let Some(c) = board.priority.pop_front() {
        if board.is_empty(c) {
            debug!("priority cell {}", coord_to_label(c));
            return Some(c);
        }
    }
    None
}

fn reply_from_random_pattern(board: &mut Board, rng: &mut Rng) -> Option<Coord> {
    while !board.live.is_empty() {
        let pattern = board.live.remove(rng.usize(..board.live.len()));
        if let Some(reply) = consume(board, &pattern, None) {
            debug!("{} played unprompted at {}", pattern.kind(), coord_to_label(reply));
            return Some(reply);
        }
    }
    None
}

fn random_cell(board: &Board, rng: &mut Rng) -> Result<Coord, BoardExhausted> {
    let free = board.unoccupied();
    if free.is_empty() {
        return Err(BoardExhausted);
    }
    let reply = free.iter().nth(rng.usize(..free.len())).copied().ok_or(BoardExhausted)?;
    debug!("random cell {}", coord_to_label(reply));
    Ok(reply)
}

/// Choose Black's answer to White's move at `opponent`.
///
/// The move must already be on the board. The reply is not placed.
pub fn compute_reply(
    board: &mut Board,
    opponent: Coord,
    rng: &mut Rng,
) -> Result<Coord, BoardExhausted> {
    if let Some(reply) = reply_from_live(board, opponent) {
        return Ok(reply);
    }
    if board.priority.contains(&opponent) {
        // White took a priority cell; keep the rest for later.
        board.priority.retain(|&c| c != opponent);
    } else if let Some(reply) = reply_from_priority(board) {
        return Ok(reply);
    }
    if let Some(reply) = reply_from_random_pattern(board, rng) {
        return Ok(reply);
    }
    random_cell(board, rng)
}

/// Choose a Black move with nothing to answer, e.g. the opening.
pub fn compute_move(board: &mut Board, rng: &mut Rng) -> Result<Coord, BoardExhausted> {
    if let Some(reply) = reply_from_priority(board) {
        return Ok(reply);
    }
    if let Some(reply) = reply_from_random_pattern(board, rng) {
        return Ok(reply);
    }
    random_cell(board, rng)
}
