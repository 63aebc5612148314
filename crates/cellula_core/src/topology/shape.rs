//! Tiling geometry: which relative positions touch a cell.
//!
//! Offsets are relative and unchecked. Bounds are the edge policy's business.

pub use cellula_data::ShapeKind;
use cellula_data::Offset;

const MOORE: [Offset; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const HEXAGON: [Offset; 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

// Points up: shares its base with the cell below.
const TRIANGLE_UP: [Offset; 12] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -2),
    (0, -1),
    (0, 1),
    (0, 2),
    (1, -2),
    (1, -1),
    (1, 0),
    (1, 1),
    (1, 2),
];

// Points down: shares its base with the cell above.
const TRIANGLE_DOWN: [Offset; 12] = [
    (-1, -2),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (-1, 2),
    (0, -2),
    (0, -1),
    (0, 1),
    (0, 2),
    (1, -1),
    (1, 0),
    (1, 1),
];

const PENTAGON_EVEN: [Offset; 7] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 1),
];

const PENTAGON_ODD: [Offset; 7] = [
    (-1, -1),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub trait ShapeLogic {
    /// Every geometrically adjacent offset of the cell at `(row, col)`.
    fn neighbor_offsets(&self, row: isize, col: isize) -> &'static [Offset];

    /// Whether the offsets depend on position parity. Such tilings can only
    /// grow by even amounts on the top and left sides.
    fn alternates(&self) -> bool;

    /// Resolves a configuration name. Unknown names fall back to `Rectangle`.
    fn from_name(name: &str) -> Self;
}

impl ShapeLogic for ShapeKind {
    fn neighbor_offsets(&self, row: isize, col: isize) -> &'static [Offset] {
        match self {
            ShapeKind::Rectangle | ShapeKind::Rhombus => &MOORE,
            ShapeKind::Hexagon => &HEXAGON,
            ShapeKind::Triangle => {
                if (row + col).rem_euclid(2) == 0 {
                    &TRIANGLE_UP
                } else {
                    &TRIANGLE_DOWN
                }
            }
            ShapeKind::Pentagon => {
                if row.rem_euclid(2) == 0 {
                    &PENTAGON_EVEN
                } else {
                    &PENTAGON_ODD
                }
            }
        }
    }

    fn alternates(&self) -> bool {
        matches!(self, ShapeKind::Triangle | ShapeKind::Pentagon)
    }

    fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" | "square" | "rectangular" => ShapeKind::Rectangle,
            "hexagon" | "hex" | "hexagonal" => ShapeKind::Hexagon,
            "triangle" | "tri" | "triangular" => ShapeKind::Triangle,
            "rhombus" | "diamond" => ShapeKind::Rhombus,
            "pentagon" | "pent" | "pentagonal" => ShapeKind::Pentagon,
            other => {
                tracing::warn!(shape = other, "Unknown shape, using rectangle");
                ShapeKind::Rectangle
            }
        }
    }
}
