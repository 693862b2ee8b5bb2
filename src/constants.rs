//! Board geometry and engine defaults.
//!
//! Coordinates are `(x, y)` pairs: `x` is the column (labelled `a`, `b`, ...)
//! and `y` the row (labelled `1`, `2`, ...). Black owns the first and last
//! rows, White the first and last columns.
//!
//! The hex grid is stored as a rhombus, so the six neighbours of `(x, y)` are
//! found with the axial offsets below. Moving "down" the board (towards row
//! `n - 1`) reaches `(x, y + 1)` and `(x - 1, y + 1)`.

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest playable board.
pub const MIN_SIZE: usize = 1;

/// Largest playable board. Every column needs its own lowercase letter.
pub const MAX_SIZE: usize = 26;

/// Board size used when none is given.
pub const DEFAULT_SIZE: usize = 8;

/// Offsets to the six hex neighbours, `(dx, dy)`.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [
    (1, 0),  // East
    (1, -1), // North-east
    (0, 1),  // South-east
    (0, -1), // North-west
    (-1, 0), // West
    (-1, 1), // South-west
];

/// Two-step bridge offsets together with the two carrier cells that link
/// the ends of the bridge.
pub const BRIDGE_OFFSETS: [((isize, isize), [(isize, isize); 2]); 6] = [
    ((1, 1), [(1, 0), (0, 1)]),
    ((2, -1), [(1, 0), (1, -1)]),
    ((1, -2), [(1, -1), (0, -1)]),
    ((-1, -1), [(0, -1), (-1, 0)]),
    ((-2, 1), [(-1, 0), (-1, 1)]),
    ((-1, 2), [(-1, 1), (0, 1)]),
];

// =============================================================================
// Engine
// =============================================================================

/// Name reported by the line protocol.
pub const ENGINE_NAME: &str = "hex-patterns";

/// Version of the line protocol.
pub const PROTOCOL_VERSION: &str = "1";
