//! Grid geometry for subsector maps.
//!
//! Cells are addressed by a linear [`Coord`] in row-major order. A
//! [`GridGeometry`] resolves coordinates to [`Position`]s, measures distances
//! and walks neighbor offsets. Square and hex topologies are provided.

use serde::{Deserialize, Serialize};

/// Linear cell index into a grid (row-major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord(pub usize);

/// Zero-based column/row position of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Four-digit map label, 1-based column then row (e.g. "0310").
    pub fn label(&self) -> String {
        format!("{:02}{:02}", self.x + 1, self.y + 1)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Grid layout chosen for a map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Square,
    Hex,
}

impl Topology {
    /// Build the geometry strategy for a grid of the given size.
    pub fn geometry(self, columns: usize, rows: usize) -> Box<dyn GridGeometry> {
        match self {
            Topology::Square => Box::new(SquareGrid::new(columns, rows)),
            Topology::Hex => Box::new(HexGrid::new(columns, rows)),
        }
    }
}

/// Coordinate transform and distance metric for a bounded grid.
///
/// Passing an index outside the grid or an undefined direction is a caller
/// bug and panics.
pub trait GridGeometry {
    fn columns(&self) -> usize;

    fn rows(&self) -> usize;

    /// Distance between two positions in grid steps.
    fn distance(&self, a: Position, b: Position) -> u32;

    /// Number of neighbor directions this topology defines.
    fn direction_count(&self) -> usize;

    /// Offset applied to `from` when stepping in `direction`.
    fn offset(&self, from: Position, direction: usize) -> (i32, i32);

    fn len(&self) -> usize {
        self.columns() * self.rows()
    }

    fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.columns() && (pos.y as usize) < self.rows()
    }

    fn index_to_xy(&self, coord: Coord) -> Position {
        assert!(
            coord.0 < self.len(),
            "coordinate {} outside {}x{} grid",
            coord.0,
            self.columns(),
            self.rows()
        );
        Position::new((coord.0 % self.columns()) as i32, (coord.0 / self.columns()) as i32)
    }

    fn xy_to_index(&self, pos: Position) -> Coord {
        assert!(
            self.contains(pos),
            "position ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.columns(),
            self.rows()
        );
        Coord(pos.y as usize * self.columns() + pos.x as usize)
    }

    /// Distance between two coordinate tokens.
    fn coord_distance(&self, a: Coord, b: Coord) -> u32 {
        self.distance(self.index_to_xy(a), self.index_to_xy(b))
    }

    /// Neighboring cell in `direction`, or `None` at the grid edge.
    fn neighbor(&self, coord: Coord, direction: usize) -> Option<Coord> {
        assert!(
            direction < self.direction_count(),
            "undefined direction {} (topology has {})",
            direction,
            self.direction_count()
        );
        let from = self.index_to_xy(coord);
        let (dx, dy) = self.offset(from, direction);
        let to = Position::new(from.x + dx, from.y + dy);
        self.contains(to).then(|| self.xy_to_index(to))
    }

    /// All in-grid neighbors of a cell.
    fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        (0..self.direction_count())
            .filter_map(|dir| self.neighbor(coord, dir))
            .collect()
    }
}

/// Square grid with 4-connectivity and Manhattan distance.
#[derive(Clone, Copy, Debug)]
pub struct SquareGrid {
    columns: usize,
    rows: usize,
}

impl SquareGrid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }
}

const SQUARE_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

impl GridGeometry for SquareGrid {
    fn columns(&self) -> usize {
        self.columns
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn distance(&self, a: Position, b: Position) -> u32 {
        a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
    }

    fn direction_count(&self) -> usize {
        SQUARE_OFFSETS.len()
    }

    fn offset(&self, _from: Position, direction: usize) -> (i32, i32) {
        SQUARE_OFFSETS[direction]
    }
}

/// Flat-topped hex grid with odd columns shifted down half a cell.
#[derive(Clone, Copy, Debug)]
pub struct HexGrid {
    columns: usize,
    rows: usize,
}

impl HexGrid {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    /// Offset position to cube coordinates (q, r, s).
    fn cube(pos: Position) -> (i32, i32, i32) {
        let q = pos.x;
        let r = pos.y - (pos.x - (pos.x & 1)) / 2;
        (q, r, -q - r)
    }
}

// N, NE, SE, S, SW, NW for even and odd columns
const HEX_OFFSETS_EVEN: [(i32, i32); 6] = [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1)];
const HEX_OFFSETS_ODD: [(i32, i32); 6] = [(0, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)];

impl GridGeometry for HexGrid {
    fn columns(&self) -> usize {
        self.columns
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn distance(&self, a: Position, b: Position) -> u32 {
        let (aq, ar, as_) = Self::cube(a);
        let (bq, br, bs) = Self::cube(b);
        (aq.abs_diff(bq) + ar.abs_diff(br) + as_.abs_diff(bs)) / 2
    }

    fn direction_count(&self) -> usize {
        HEX_OFFSETS_EVEN.len()
    }

    fn offset(&self, from: Position, direction: usize) -> (i32, i32) {
        if from.x & 1 == 0 {
            HEX_OFFSETS_EVEN[direction]
        } else {
            HEX_OFFSETS_ODD[direction]
        }
    }
}
