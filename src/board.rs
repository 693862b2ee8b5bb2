//! Board state: occupancy, labels and the engine's per-game bookkeeping.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use thiserror::Error;

use crate::cell::Cell;
use crate::constants::{MAX_SIZE, MIN_SIZE};
use crate::patterns::Pattern;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Connects the first row to the last.
    Black,
    /// Connects the first column to the last.
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("Black"),
            Color::White => f.write_str("White"),
        }
    }
}

/// `(x, y)`: column, then row. Both zero based.
pub type Coord = (usize, usize);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },
    #[error("({x}, {y}) is already occupied")]
    CellOccupied { x: usize, y: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("board size {0} is not between {min} and {max}", min = MIN_SIZE, max = MAX_SIZE)]
pub struct SizeError(pub usize);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("empty label")]
    Empty,
    #[error("label {0:?} does not start with a column letter")]
    Column(String),
    #[error("label {0:?} does not end with a row number")]
    Row(String),
}

pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    unoccupied: BTreeSet<Coord>,
    /// Live pattern instances, maintained by the engine.
    pub(crate) live: Vec<Pattern>,
    /// Preferred fallback cells, each used at most once.
    pub(crate) priority: VecDeque<Coord>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, SizeError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(SizeError(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(Cell::new((x, y), size));
            }
        }
        let unoccupied = cells.iter().map(|c| c.coord).collect();
        Ok(Self {
            size,
            cells,
            unoccupied,
            live: Vec::new(),
            priority: VecDeque::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (x, y): Coord) -> usize {
        y * self.size + x
    }

    pub fn contains(&self, (x, y): Coord) -> bool {
        x < self.size && y < self.size
    }

    pub fn cell(&self, c: Coord) -> Option<&Cell> {
        if !self.contains(c) {
            return None;
        }
        self.cells.get(self.idx(c))
    }

    /// Stone at `c`; `None` for an empty or off-board cell.
    pub fn get(&self, c: Coord) -> Option<Color> {
        self.cell(c).and_then(Cell::state)
    }

    /// Whether `c` is on the board and free.
    pub fn is_empty(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(Cell::is_empty)
    }

    /// Put a stone on `(x, y)`. A rejected placement changes nothing.
    pub fn place(&mut self, x: usize, y: usize, color: Color) -> Result<(), PlacementError> {
        if !self.contains((x, y)) {
            return Err(PlacementError::OutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        let i = self.idx((x, y));
        let cell = &mut self.cells[i];
        if cell.state.is_some() {
            return Err(PlacementError::CellOccupied { x, y });
        }
        cell.state = Some(color);
        self.unoccupied.remove(&(x, y));
        Ok(())
    }

    pub fn unoccupied(&self) -> &BTreeSet<Coord> {
        &self.unoccupied
    }

    /// Stones of one color, row by row.
    pub fn stones(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .filter(move |c| c.state == Some(color))
            .map(|c| c.coord)
    }

    /// Pattern instances the engine currently tracks.
    pub fn live(&self) -> &[Pattern] {
        &self.live
    }

    /// Remaining fallback cells, in the order they will be tried.
    pub fn priority(&self) -> impl Iterator<Item = Coord> + '_ {
        self.priority.iter().copied()
    }

    pub fn set_priority(&mut self, cells: impl IntoIterator<Item = Coord>) {
        self.priority = cells.into_iter().filter(|&c| self.contains(c)).collect();
    }

    /// Neighbouring stones of the same color, each pair listed once.
    pub fn adjacent_pairs(&self, color: Color) -> Vec<(Coord, Coord)> {
        let mut pairs = Vec::new();
        for cell in self.cells.iter().filter(|c| c.state == Some(color)) {
            for &n in &cell.neighbors {
                if self.idx(n) > self.idx(cell.coord) && self.get(n) == Some(color) {
                    pairs.push((cell.coord, n));
                }
            }
        }
        pairs
    }

    /// Same-color stones one bridge apart with both carriers free, each
    /// pair listed once.
    pub fn stone_bridges(&self, color: Color) -> Vec<(Coord, Coord)> {
        let mut pairs = Vec::new();
        for cell in self.cells.iter().filter(|c| c.state == Some(color)) {
            for bt in &cell.bridge_targets {
                if self.idx(bt.target) > self.idx(cell.coord)
                    && self.get(bt.target) == Some(color)
                    && bt.carriers.iter().all(|&c| self.is_empty(c))
                {
                    pairs.push((cell.coord, bt.target));
                }
            }
        }
        pairs
    }
}

/// Column letter for index `x`.
fn column_letter(x: usize) -> char {
    u32::try_from(x)
        .ok()
        .and_then(|x| char::from_u32('a' as u32 + x))
        .unwrap_or('?')
}

/// Parse a label such as `"b7"` into `(1, 6)`.
///
/// Columns are lowercase letters, rows are 1-based decimals without
/// leading zeros. The result is not checked against a board size.
pub fn label_to_coord(label: &str) -> Result<Coord, LabelError> {
    let mut chars = label.chars();
    let col = chars.next().ok_or(LabelError::Empty)?;
    if !col.is_ascii_lowercase() {
        return Err(LabelError::Column(label.to_string()));
    }
    let row = chars.as_str();
    let row_err = || LabelError::Row(label.to_string());
    if row.is_empty() || row.starts_with('0') || !row.bytes().all(|b| b.is_ascii_digit()) {
        return Err(row_err());
    }
    let row: usize = row.parse().map_err(|_| row_err())?;
    Ok(((col as u8 - b'a') as usize, row - 1))
}

/// Format a coordinate as a label, the inverse of [`label_to_coord`].
pub fn coord_to_label((x, y): Coord) -> String {
    format!("{}{}", column_letter(x), y + 1)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..self.size {
            write!(f, " {}", column_letter(x))?;
        }
        writeln!(f)?;
        for y in 0..self.size {
            write!(f, "{}{:>2}", " ".repeat(y), y + 1)?;
            for x in 0..self.size {
                let ch = match self.get((x, y)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
