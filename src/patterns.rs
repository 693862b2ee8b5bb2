//! Pattern instances and the matcher that finds them.
//!
//! An instance is a catalog template (see [`crate::catalog`]) that currently
//! fits the board: its anchor is Black, all its cells are free, its White
//! stone (if any) is in place and every ground cell is grounded. Bridges are
//! matched separately, either between two Black stones or from a Black stone
//! to the edge.
//!
//! The matcher is a pure function of the board. It returns every instance it
//! finds, even when instances share cells.

use std::fmt;

use crate::board::{Board, Color, Coord, coord_to_label};
use crate::catalog::{Heading, Kind, Template};
use crate::cell::{Cell, are_adjacent};

/// A matched template. Cells are listed in catalog order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Always stored sorted.
    Bridge([Coord; 2]),
    DoubleTriangle([Coord; 6]),
    Jyp3([Coord; 6]),
    Jyp4([Coord; 8]),
    /// The anchor stone is kept for the reply geometry; it is not one of
    /// the instance's cells.
    Four32 { anchor: Coord, cells: [Coord; 8] },
    Pattern7([Coord; 14]),
    Pattern8([Coord; 13]),
    Jyp9([Coord; 10]),
}

impl Pattern {
    pub fn bridge(a: Coord, b: Coord) -> Self {
        let mut pair = [a, b];
        pair.sort();
        Pattern::Bridge(pair)
    }

    /// Build an instance of `kind` from cells in catalog order.
    ///
    /// Returns `None` when the number of cells does not fit the kind.
    pub fn from_cells(kind: Kind, anchor: Coord, cells: &[Coord]) -> Option<Self> {
        let pattern = match kind {
            Kind::Bridge => {
                let [a, b] = <[Coord; 2]>::try_from(cells).ok()?;
                Pattern::bridge(a, b)
            }
            Kind::DoubleTriangle => Pattern::DoubleTriangle(cells.try_into().ok()?),
            Kind::Jyp3 => Pattern::Jyp3(cells.try_into().ok()?),
            Kind::Jyp4 => Pattern::Jyp4(cells.try_into().ok()?),
            Kind::Four32 => Pattern::Four32 {
                anchor,
                cells: cells.try_into().ok()?,
            },
            Kind::Pattern7 => Pattern::Pattern7(cells.try_into().ok()?),
            Kind::Pattern8 => Pattern::Pattern8(cells.try_into().ok()?),
            Kind::Jyp9 => Pattern::Jyp9(cells.try_into().ok()?),
        };
        Some(pattern)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Pattern::Bridge(_) => Kind::Bridge,
            Pattern::DoubleTriangle(_) => Kind::DoubleTriangle,
            Pattern::Jyp3(_) => Kind::Jyp3,
            Pattern::Jyp4(_) => Kind::Jyp4,
            Pattern::Four32 { .. } => Kind::Four32,
            Pattern::Pattern7(_) => Kind::Pattern7,
            Pattern::Pattern8(_) => Kind::Pattern8,
            Pattern::Jyp9(_) => Kind::Jyp9,
        }
    }

    pub fn cells(&self) -> &[Coord] {
        match self {
            Pattern::Bridge(c) => c,
            Pattern::DoubleTriangle(c) | Pattern::Jyp3(c) => c,
            Pattern::Jyp4(c) | Pattern::Four32 { cells: c, .. } => c,
            Pattern::Pattern7(c) => c,
            Pattern::Pattern8(c) => c,
            Pattern::Jyp9(c) => c,
        }
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells().contains(&c)
    }

    /// Index of `c` in the cell list.
    pub fn position(&self, c: Coord) -> Option<usize> {
        self.cells().iter().position(|&x| x == c)
    }

    /// Whether every cell is still free.
    pub fn is_intact(&self, board: &Board) -> bool {
        self.cells().iter().all(|&c| board.is_empty(c))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        if let Pattern::Four32 { anchor, .. } = self {
            write!(f, "@{}", coord_to_label(*anchor))?;
        }
        for &c in self.cells() {
            write!(f, " {}", coord_to_label(c))?;
        }
        Ok(())
    }
}

/// Whether `c` is on the edge row `heading` points at, or rests on a Black
/// stone one row closer to it. Sideways neighbours do not count.
pub fn is_grounded(board: &Board, c: Coord, heading: Heading) -> bool {
    if c.1 == heading.edge_row(board.size()) {
        return true;
    }
    let Some(cell) = board.cell(c) else {
        return false;
    };
    let below = c.1 as isize + heading.dy();
    cell.neighbors
        .iter()
        .any(|&n| n.1 as isize == below && board.get(n) == Some(Color::Black))
}

fn template_matches(board: &Board, template: &Template) -> bool {
    template.cells.iter().all(|&c| board.is_empty(c))
        && template
            .white
            .is_none_or(|w| board.get(w) == Some(Color::White))
        && template
            .ground_cells()
            .all(|c| is_grounded(board, c, template.heading))
}

/// Bridges from the stone on `cell` to either Black edge.
fn edge_bridges(board: &Board, cell: &Cell) -> Vec<Pattern> {
    let on_edge = |c: Coord| {
        board.is_empty(c) && board.cell(c).is_some_and(|c| c.touches_black_edge)
    };
    let mut out = Vec::new();
    for &e in cell.neighbors.iter().filter(|&&e| on_edge(e)) {
        let shared: Vec<Coord> = cell
            .neighbors
            .iter()
            .copied()
            .filter(|&f| f != e && are_adjacent(e, f) && on_edge(f))
            .collect();
        if let [f] = shared.as_slice() {
            out.push(Pattern::bridge(e, *f));
        }
    }
    out
}

fn push_unique(found: &mut Vec<Pattern>, pattern: Pattern) {
    if !found.contains(&pattern) {
        found.push(pattern);
    }
}

/// Every pattern instance on the board.
///
/// Black stones are visited row by row. For each stone the order is: bridges
/// to other stones, bridges to the edge, then catalog templates. Identical
/// instances are reported once.
pub fn find_patterns(board: &Board) -> Vec<Pattern> {
    let mut found = Vec::new();
    for stone in board.stones(Color::Black) {
        let Some(cell) = board.cell(stone) else {
            continue;
        };

        for bt in &cell.bridge_targets {
            if board.get(bt.target) == Some(Color::Black)
                && bt.carriers.iter().all(|&c| board.is_empty(c))
            {
                push_unique(&mut found, Pattern::bridge(bt.carriers[0], bt.carriers[1]));
            }
        }

        for pattern in edge_bridges(board, cell) {
            push_unique(&mut found, pattern);
        }

        for template in cell.templates.iter().filter(|t| template_matches(board, t)) {
            if let Some(pattern) = Pattern::from_cells(template.kind, stone, &template.cells) {
                push_unique(&mut found, pattern);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::label_to_coord;

    fn c(label: &str) -> Coord {
        label_to_coord(label).unwrap()
    }

    fn setup(size: usize, black: &[&str], white: &[&str]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &b in black {
            let (x, y) = c(b);
            board.place(x, y, Color::Black).unwrap();
        }
        for &w in white {
            let (x, y) = c(w);
            board.place(x, y, Color::White).unwrap();
        }
        board
    }

    fn shown(patterns: &[Pattern]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_bridge_is_sorted() {
        let p = Pattern::bridge(c("d2"), c("c3"));
        assert_eq!(p.cells(), &[c("c3"), c("d2")]);
        assert_eq!(p, Pattern::bridge(c("c3"), c("d2")));
    }

    #[test]
    fn test_from_cells_wrong_length() {
        assert!(Pattern::from_cells(Kind::Jyp3, (0, 0), &[(1, 1)]).is_none());
    }

    #[test]
    fn test_display() {
        let p = Pattern::bridge(c("a8"), c("b8"));
        assert_eq!(p.to_string(), "Bridge a8 b8");
    }

    #[test]
    fn test_empty_board_has_no_patterns() {
        let board = Board::new(8).unwrap();
        assert!(find_patterns(&board).is_empty());
    }

    #[test]
    fn test_edge_bridge() {
        let board = setup(8, &["b7"], &[]);
        assert_eq!(shown(&find_patterns(&board)), vec!["Bridge a8 b8"]);
    }

    #[test]
    fn test_stone_bridge() {
        let board = setup(8, &["c3", "d4"], &[]);
        let found = find_patterns(&board);
        assert!(found.contains(&Pattern::bridge(c("d3"), c("c4"))));
        // Found from both ends but reported once.
        let bridges = found
            .iter()
            .filter(|p| **p == Pattern::bridge(c("d3"), c("c4")))
            .count();
        assert_eq!(bridges, 1);
    }

    #[test]
    fn test_double_triangle() {
        let board = setup(8, &["d7"], &[]);
        assert_eq!(
            shown(&find_patterns(&board)),
            vec!["Bridge c8 d8", "DoubleTriangle e7 e8 d8 c7 c8 b8"]
        );
    }

    #[test]
    fn test_jyp3_needs_white() {
        let board = setup(8, &["e6", "e8"], &["d6"]);
        assert_eq!(shown(&find_patterns(&board)), vec!["Jyp3 f6 f7 e7 d7 d8 c8"]);
    }

    #[test]
    fn test_jyp4() {
        let board = setup(8, &["d7"], &["d6"]);
        assert_eq!(
            shown(&find_patterns(&board)),
            vec![
                "Bridge c8 d8",
                "DoubleTriangle e7 e8 d8 c7 c8 b8",
                "Jyp4 e7 e8 d8 f7 c7 c8 b8 b7",
            ]
        );
    }

    #[test]
    fn test_four32_small_board() {
        let board = setup(4, &["c2"], &[]);
        assert_eq!(
            shown(&find_patterns(&board)),
            vec!["Bridge c1 d1", "Four32@c2 d2 d3 c3 b3 d4 c4 b4 a4"]
        );
    }

    #[test]
    fn test_third_row_stone_has_two_ziggurats() {
        let board = setup(8, &["e6"], &[]);
        assert_eq!(
            shown(&find_patterns(&board)),
            vec![
                "Four32@e6 d6 c7 d7 e7 b8 c8 d8 e8",
                "Four32@e6 f6 f7 e7 d7 f8 e8 d8 c8",
            ]
        );
    }

    #[test]
    fn test_jyp9() {
        let board = setup(8, &["e6"], &["d8"]);
        assert_eq!(
            shown(&find_patterns(&board)),
            vec!["Jyp9 f7 f6 e7 f8 e8 c7 d6 d7 c8 b8"]
        );
    }

    #[test]
    fn test_pattern8_overlaps_ziggurats() {
        let board = setup(8, &["e6"], &["g6"]);
        let found = find_patterns(&board);
        assert_eq!(
            shown(&found),
            vec![
                "Four32@e6 d6 c7 d7 e7 b8 c8 d8 e8",
                "Four32@e6 f6 f7 e7 d7 f8 e8 d8 c8",
                "Pattern8 f7 f6 e7 f8 e8 d8 g7 g8 c7 d6 d7 c8 b8",
            ]
        );
        assert!(found[2].contains(c("e7")) && found[0].contains(c("e7")));
    }

    #[test]
    fn test_pattern7() {
        let board = setup(8, &["e6"], &["b7"]);
        let found = find_patterns(&board);
        assert_eq!(found.len(), 3);
        assert_eq!(
            found[2].to_string(),
            "Pattern7 c7 d6 d7 f6 g6 g7 f7 c8 b8 e7 g8 f8 e8 d8"
        );
    }

    #[test]
    fn test_grounding() {
        let board = setup(8, &["d7"], &[]);
        assert!(is_grounded(&board, c("c8"), Heading::Down));
        // Resting on d7 from above.
        assert!(is_grounded(&board, c("d6"), Heading::Down));
        assert!(is_grounded(&board, c("e6"), Heading::Down));
        // A sideways neighbour is not enough.
        assert!(!is_grounded(&board, c("c7"), Heading::Down));
        assert!(!is_grounded(&board, c("d6"), Heading::Up));
        assert!(is_grounded(&board, c("d1"), Heading::Up));
    }

    #[test]
    fn test_up_heading_mirrors_down() {
        // b7 on an 8x8 board is c2 turned half way round.
        let board = setup(8, &["g2"], &[]);
        assert_eq!(shown(&find_patterns(&board)), vec!["Bridge g1 h1"]);
    }
}
