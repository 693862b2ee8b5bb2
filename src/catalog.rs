//! The fixed catalog of edge-connection templates.
//!
//! Every template is written once, heading down the board (towards row
//! `n - 1`) with its anchor Black stone at the origin. Each template is a
//! pair of alternative routes from the anchor to the edge: whichever route
//! White touches, Black answers by playing the first cell of the other one.
//!
//! The other orientations are derived rather than written out:
//! - heading up negates every offset (a half turn of the board),
//! - the mirror image maps `(dx, dy)` to `(-dx - dy, dy)`, which swaps the
//!   two downward neighbours while keeping rows fixed.
//!
//! Templates whose shape is its own mirror image are only generated in the
//! two headings, so the matcher never sees the same cells twice in a
//! different order.
//!
//! The list is best effort. Instances may overlap and the catalog makes no
//! attempt to choose between them.

use std::fmt;

use crate::board::Coord;
use crate::cell::offset_coord;

/// Cell counts of the four Pattern7 segments.
///
/// The first half is made of segments one and three (the left key, its
/// carriers and its edge pair), the second half of segments two and four
/// (the right key and the ziggurat below it).
pub const PATTERN7_SEGMENTS: [usize; 4] = [3, 4, 2, 5];

/// The closed set of pattern kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Bridge,
    DoubleTriangle,
    Jyp3,
    Jyp4,
    Four32,
    Pattern7,
    Pattern8,
    Jyp9,
}

impl Kind {
    /// Every kind, in catalog order.
    pub const ALL: [Kind; 8] = [
        Kind::Bridge,
        Kind::DoubleTriangle,
        Kind::Jyp3,
        Kind::Jyp4,
        Kind::Four32,
        Kind::Pattern7,
        Kind::Pattern8,
        Kind::Jyp9,
    ];

    /// Number of cells listed by an instance of this kind.
    pub const fn cell_count(self) -> usize {
        match self {
            Kind::Bridge => 2,
            Kind::DoubleTriangle | Kind::Jyp3 => 6,
            Kind::Jyp4 | Kind::Four32 => 8,
            Kind::Pattern7 => 14,
            Kind::Pattern8 => 13,
            Kind::Jyp9 => 10,
        }
    }

    /// Index of the first cell of the second half.
    ///
    /// Only meaningful for the two-part kinds; a Bridge splits after its
    /// first cell and a Four32 is split geometrically instead.
    pub const fn second_half_start(self) -> usize {
        match self {
            Kind::Bridge => 1,
            Kind::DoubleTriangle | Kind::Jyp3 | Kind::Four32 => 3,
            Kind::Jyp4 => 4,
            Kind::Pattern7 => PATTERN7_SEGMENTS[0],
            Kind::Pattern8 => 8,
            Kind::Jyp9 => 5,
        }
    }

    /// Whether the cell at `index` belongs to the first half.
    pub const fn in_first_half(self, index: usize) -> bool {
        match self {
            Kind::Pattern7 => {
                let seg1 = PATTERN7_SEGMENTS[0];
                let seg3 = seg1 + PATTERN7_SEGMENTS[1];
                index < seg1 || (index >= seg3 && index < seg3 + PATTERN7_SEGMENTS[2])
            }
            _ => index < self.second_half_start(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bridge => "Bridge",
            Kind::DoubleTriangle => "DoubleTriangle",
            Kind::Jyp3 => "Jyp3",
            Kind::Jyp4 => "Jyp4",
            Kind::Four32 => "Four32",
            Kind::Pattern7 => "Pattern7",
            Kind::Pattern8 => "Pattern8",
            Kind::Jyp9 => "Jyp9",
        };
        f.write_str(name)
    }
}

/// Which of Black's two edges a template heads towards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    /// Towards the last row.
    Down,
    /// Towards the first row.
    Up,
}

impl Heading {
    /// Row step taken when moving one row closer to the target edge.
    pub const fn dy(self) -> isize {
        match self {
            Heading::Down => 1,
            Heading::Up => -1,
        }
    }

    /// The edge row this heading reaches on a board of the given size.
    pub const fn edge_row(self, size: usize) -> usize {
        match self {
            Heading::Down => size - 1,
            Heading::Up => 0,
        }
    }
}

/// A heading plus an optional mirror image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Orientation {
    pub heading: Heading,
    pub mirrored: bool,
}

impl Orientation {
    const PLAIN: [Orientation; 2] = [
        Orientation {
            heading: Heading::Down,
            mirrored: false,
        },
        Orientation {
            heading: Heading::Up,
            mirrored: false,
        },
    ];

    const ALL: [Orientation; 4] = [
        Orientation {
            heading: Heading::Down,
            mirrored: false,
        },
        Orientation {
            heading: Heading::Down,
            mirrored: true,
        },
        Orientation {
            heading: Heading::Up,
            mirrored: false,
        },
        Orientation {
            heading: Heading::Up,
            mirrored: true,
        },
    ];

    /// Transform a downward offset into this orientation.
    pub const fn apply(self, (dx, dy): (isize, isize)) -> (isize, isize) {
        let (dx, dy) = if self.mirrored { (-dx - dy, dy) } else { (dx, dy) };
        match self.heading {
            Heading::Down => (dx, dy),
            Heading::Up => (-dx, -dy),
        }
    }
}

/// A template written heading down with its anchor at the origin.
struct Shape {
    kind: Kind,
    offsets: &'static [(isize, isize)],
    /// Indices of the cells that must be grounded: on the target edge, or
    /// resting on a Black stone one row closer to it.
    ground: &'static [usize],
    /// Offset of the White stone that selects this shape, if any.
    white: Option<(isize, isize)>,
    /// Whether the mirror image is a distinct shape.
    chiral: bool,
}

const SHAPES: [Shape; 7] = [
    // Two sideways steps, each followed by an edge bridge.
    Shape {
        kind: Kind::DoubleTriangle,
        offsets: &[(1, 0), (1, 1), (0, 1), (-1, 0), (-1, 1), (-2, 1)],
        ground: &[1, 2, 4, 5],
        white: None,
        chiral: false,
    },
    // White beside the anchor: a sideways step landing on a Black stone,
    // or a step down the open side.
    Shape {
        kind: Kind::Jyp3,
        offsets: &[(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 2), (-2, 2)],
        ground: &[1, 2, 4, 5],
        white: Some((-1, 0)),
        chiral: true,
    },
    // White behind the anchor: the double triangle with both outer cells
    // kept free.
    Shape {
        kind: Kind::Jyp4,
        offsets: &[(1, 0), (1, 1), (0, 1), (2, 0), (-1, 0), (-1, 1), (-2, 1), (-2, 0)],
        ground: &[1, 2, 5, 6],
        white: Some((0, -1)),
        chiral: false,
    },
    // Ziggurat: third-row stone, one free cell beside it, three cells on
    // the second row and four on the edge.
    Shape {
        kind: Kind::Four32,
        offsets: &[(-1, 0), (-2, 1), (-1, 1), (0, 1), (-3, 2), (-2, 2), (-1, 2), (0, 2)],
        ground: &[4, 5, 6, 7],
        white: None,
        chiral: true,
    },
    // Left: bridge to a second-row key and its edge pair. Right: a sideways
    // step onto a key that owns a ziggurat.
    Shape {
        kind: Kind::Pattern7,
        offsets: &[
            (-2, 1),
            (-1, 0),
            (-1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (1, 1),
            (-2, 2),
            (-3, 2),
            (0, 1),
            (2, 2),
            (1, 2),
            (0, 2),
            (-1, 2),
        ],
        ground: &[7, 8, 10, 11, 12, 13],
        white: Some((-3, 1)),
        chiral: true,
    },
    // Jyp9 with White pressing on the right: the right route needs three
    // extra free cells around its key.
    Shape {
        kind: Kind::Pattern8,
        offsets: &[
            (1, 1),
            (1, 0),
            (0, 1),
            (1, 2),
            (0, 2),
            (-1, 2),
            (2, 1),
            (2, 2),
            (-2, 1),
            (-1, 0),
            (-1, 1),
            (-2, 2),
            (-3, 2),
        ],
        ground: &[3, 4, 11, 12],
        white: Some((2, 0)),
        chiral: true,
    },
    // White under the anchor: bridge out to either side, then an edge
    // bridge from each key.
    Shape {
        kind: Kind::Jyp9,
        offsets: &[
            (1, 1),
            (1, 0),
            (0, 1),
            (1, 2),
            (0, 2),
            (-2, 1),
            (-1, 0),
            (-1, 1),
            (-2, 2),
            (-3, 2),
        ],
        ground: &[3, 4, 8, 9],
        white: Some((-1, 2)),
        chiral: false,
    },
];

/// One orientation of a shape placed on the board at a particular anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub kind: Kind,
    pub heading: Heading,
    /// Absolute cells, in the shape's order.
    pub cells: Vec<Coord>,
    /// Indices into `cells` that must be grounded.
    pub ground: &'static [usize],
    /// Cell that must hold a White stone.
    pub white: Option<Coord>,
}

impl Template {
    /// The cells named by `ground`.
    pub fn ground_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.ground.iter().map(|&i| self.cells[i])
    }
}

/// Every template that fits on the board at `anchor`.
///
/// An orientation is dropped in full as soon as one of its cells, or its
/// White cell, would fall off the board.
pub fn templates_at(anchor: Coord, size: usize) -> Vec<Template> {
    let mut out = Vec::new();
    for shape in &SHAPES {
        let orientations: &[Orientation] = if shape.chiral {
            &Orientation::ALL
        } else {
            &Orientation::PLAIN
        };
        for &orientation in orientations {
            if let Some(template) = place_shape(shape, orientation, anchor, size) {
                out.push(template);
            }
        }
    }
    out
}

fn place_shape(
    shape: &Shape,
    orientation: Orientation,
    anchor: Coord,
    size: usize,
) -> Option<Template> {
    let cells = shape
        .offsets
        .iter()
        .map(|&d| offset_coord(anchor, orientation.apply(d), size))
        .collect::<Option<Vec<_>>>()?;
    let white = match shape.white {
        Some(d) => Some(offset_coord(anchor, orientation.apply(d), size)?),
        None => None,
    };
    Some(Template {
        kind: shape.kind,
        heading: orientation.heading,
        cells,
        ground: shape.ground,
        white,
    })
}
