//! Static per-cell geometry.
//!
//! A [`Cell`] is built once when the board is created and knows its
//! neighbours, its bridge targets and every catalog template anchored on
//! it. Only the stone on it ever changes.

use crate::board::{Color, Coord};
use crate::catalog::{Template, templates_at};
use crate::constants::{BRIDGE_OFFSETS, NEIGHBOR_OFFSETS};

/// Move `c` by `(dx, dy)`, failing on underflow.
pub fn shift((x, y): Coord, (dx, dy): (isize, isize)) -> Option<Coord> {
    Some((x.checked_add_signed(dx)?, y.checked_add_signed(dy)?))
}

/// Move `c` by `(dx, dy)` and keep the result only if it is on a board of
/// the given size.
pub fn offset_coord(c: Coord, d: (isize, isize), size: usize) -> Option<Coord> {
    shift(c, d).filter(|&(x, y)| x < size && y < size)
}

/// Whether two cells are hex neighbours.
pub fn are_adjacent(a: Coord, b: Coord) -> bool {
    let d = (
        b.0 as isize - a.0 as isize,
        b.1 as isize - a.1 as isize,
    );
    NEIGHBOR_OFFSETS.contains(&d)
}

/// A cell two steps away together with the two cells linking it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeTarget {
    pub target: Coord,
    pub carriers: [Coord; 2],
}

#[derive(Clone, Debug)]
pub struct Cell {
    pub coord: Coord,
    pub(crate) state: Option<Color>,
    /// On the first or last row.
    pub touches_black_edge: bool,
    /// On the first or last column.
    pub touches_white_edge: bool,
    pub neighbors: Vec<Coord>,
    pub bridge_targets: Vec<BridgeTarget>,
    pub templates: Vec<Template>,
}

impl Cell {
    pub fn new(coord: Coord, size: usize) -> Self {
        let (x, y) = coord;
        let neighbors = NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&d| offset_coord(coord, d, size))
            .collect();
        let bridge_targets = BRIDGE_OFFSETS
            .iter()
            .filter_map(|&(d, [c1, c2])| {
                Some(BridgeTarget {
                    target: offset_coord(coord, d, size)?,
                    carriers: [
                        offset_coord(coord, c1, size)?,
                        offset_coord(coord, c2, size)?,
                    ],
                })
            })
            .collect();
        Self {
            coord,
            state: None,
            touches_black_edge: y == 0 || y + 1 == size,
            touches_white_edge: x == 0 || x + 1 == size,
            neighbors,
            bridge_targets,
            templates: templates_at(coord, size),
        }
    }

    pub fn state(&self) -> Option<Color> {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_neighbors() {
        // The acute corners have two neighbours, the obtuse ones three.
        assert_eq!(Cell::new((0, 0), 5).neighbors.len(), 2);
        assert_eq!(Cell::new((4, 4), 5).neighbors.len(), 2);
        assert_eq!(Cell::new((4, 0), 5).neighbors.len(), 3);
        assert_eq!(Cell::new((0, 4), 5).neighbors.len(), 3);
        assert_eq!(Cell::new((2, 2), 5).neighbors.len(), 6);
    }

    #[test]
    fn test_edges() {
        let cell = Cell::new((0, 3), 8);
        assert!(cell.touches_white_edge);
        assert!(!cell.touches_black_edge);

        let cell = Cell::new((3, 7), 8);
        assert!(cell.touches_black_edge);
        assert!(!cell.touches_white_edge);
    }

    #[test]
    fn test_bridge_targets_and_carriers() {
        let cell = Cell::new((3, 3), 8);
        assert_eq!(cell.bridge_targets.len(), 6);
        for bt in &cell.bridge_targets {
            for c in bt.carriers {
                assert!(are_adjacent(cell.coord, c));
                assert!(are_adjacent(bt.target, c));
            }
            assert!(are_adjacent(bt.carriers[0], bt.carriers[1]));
        }

        // Only the (+1, +1) bridge fits in the top-left corner.
        let corner = Cell::new((0, 0), 8);
        assert_eq!(corner.bridge_targets.len(), 1);
        assert_eq!(corner.bridge_targets[0].target, (1, 1));
        assert_eq!(corner.bridge_targets[0].carriers, [(1, 0), (0, 1)]);
    }

    #[test]
    fn test_adjacency() {
        assert!(are_adjacent((2, 2), (3, 1)));
        assert!(are_adjacent((2, 2), (1, 3)));
        assert!(!are_adjacent((2, 2), (3, 3)));
        assert!(!are_adjacent((2, 2), (1, 1)));
        assert!(!are_adjacent((2, 2), (2, 2)));
    }

    #[test]
    fn test_offset_coord_bounds() {
        assert_eq!(offset_coord((0, 0), (-1, 0), 4), None);
        assert_eq!(offset_coord((3, 3), (1, 0), 4), None);
        assert_eq!(offset_coord((1, 1), (1, -1), 4), Some((2, 0)));
    }
}
