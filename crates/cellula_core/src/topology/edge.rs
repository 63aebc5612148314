//! Boundary handling for neighbor positions outside the grid.

pub use cellula_data::EdgeKind;
use cellula_data::Offset;

pub trait EdgeLogic {
    /// Maps an absolute position onto the grid, or `None` when the policy has
    /// no cell for it at the current size.
    fn locate(&self, row: isize, col: isize, rows: usize, cols: usize) -> Option<(usize, usize)>;

    /// Whether out-of-range positions grow the grid instead of being folded back.
    fn grows(&self) -> bool;

    /// Resolves every offset around `(row, col)` to a grid position.
    ///
    /// Toroidal and mirror edges return exactly one position per offset on a
    /// non-empty grid. A growing edge expects the grid to have been expanded
    /// already and drops whatever is still outside.
    fn resolve(
        &self,
        row: usize,
        col: usize,
        offsets: &[Offset],
        rows: usize,
        cols: usize,
    ) -> Vec<(usize, usize)> {
        offsets
            .iter()
            .filter_map(|(dr, dc)| self.locate(row as isize + dr, col as isize + dc, rows, cols))
            .collect()
    }

    /// Resolves a configuration name. Unknown names fall back to `Mirror`.
    fn from_name(name: &str) -> Self;
}

/// Reflects `i` into `0..max` the way a mirror at each border would.
///
/// One reflection is `-i` below zero and `2 * max - i - 2` past the end. It is
/// repeated until the index lands in range, so steps longer than one cell still
/// end up inside small grids.
pub fn mirror_index(i: isize, max: usize) -> usize {
    if max <= 1 {
        return 0;
    }
    let max = max as isize;
    let mut i = i;
    while i < 0 || i >= max {
        i = if i < 0 { -i } else { 2 * max - i - 2 };
    }
    i as usize
}

impl EdgeLogic for EdgeKind {
    fn locate(&self, row: isize, col: isize, rows: usize, cols: usize) -> Option<(usize, usize)> {
        if rows == 0 || cols == 0 {
            return None;
        }
        match self {
            EdgeKind::Toroidal => Some((
                row.rem_euclid(rows as isize) as usize,
                col.rem_euclid(cols as isize) as usize,
            )),
            EdgeKind::Mirror => Some((mirror_index(row, rows), mirror_index(col, cols))),
            EdgeKind::Infinite => {
                let in_rows = row >= 0 && (row as usize) < rows;
                let in_cols = col >= 0 && (col as usize) < cols;
                (in_rows && in_cols).then(|| (row as usize, col as usize))
            }
        }
    }

    fn grows(&self) -> bool {
        matches!(self, EdgeKind::Infinite)
    }

    fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "toroidal" | "torus" | "wrap" => EdgeKind::Toroidal,
            "mirror" | "reflect" | "finite" => EdgeKind::Mirror,
            "infinite" | "grow" | "unbounded" => EdgeKind::Infinite,
            other => {
                tracing::warn!(edge = other, "Unknown edge policy, using mirror");
                EdgeKind::Mirror
            }
        }
    }
}
