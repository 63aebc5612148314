use crate::error::{EngineError, Result};
use crate::rules::{CellOf, Ruleset};
use crate::topology::{EdgeLogic, ShapeLogic, Topology};
use cellula_data::{Cell, CellId};

/// Rows and columns added on each side by one growth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Growth {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Growth {
    pub fn is_empty(&self) -> bool {
        self.top == 0 && self.bottom == 0 && self.left == 0 && self.right == 0
    }

    /// Smallest growth that makes `(row, col)` valid in a `rows x cols` grid.
    pub fn to_include(row: isize, col: isize, rows: usize, cols: usize) -> Self {
        let rows = rows as isize;
        let cols = cols as isize;
        Self {
            top: (-row).max(0) as usize,
            bottom: (row - rows + 1).max(0) as usize,
            left: (-col).max(0) as usize,
            right: (col - cols + 1).max(0) as usize,
        }
    }

    /// Rounds the top and left sides up to even counts, so position parity
    /// of existing cells survives the shift.
    pub fn even_leading(self) -> Self {
        Self {
            top: self.top + self.top % 2,
            left: self.left + self.left % 2,
            ..self
        }
    }

    /// Per-side maximum of two growths.
    pub fn union(self, other: Self) -> Self {
        Self {
            top: self.top.max(other.top),
            bottom: self.bottom.max(other.bottom),
            left: self.left.max(other.left),
            right: self.right.max(other.right),
        }
    }
}

/// Dense, row-major cell store plus the topology used to walk it.
///
/// The lattice is what a whole-grid ruleset works on: it can read any cell,
/// resolve neighbors, claim next states and hand agents between cells, but it
/// never runs rules itself.
pub struct Lattice<R: Ruleset> {
    rows: usize,
    cols: usize,
    cells: Vec<CellOf<R>>,
    topology: Topology,
    background: R::State,
    background_site: R::Site,
}

impl<R: Ruleset> Clone for Lattice<R> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.clone(),
            topology: self.topology,
            background: self.background,
            background_site: self.background_site.clone(),
        }
    }
}

impl<R: Ruleset> std::fmt::Debug for Lattice<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lattice")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("topology", &self.topology)
            .finish_non_exhaustive()
    }
}

impl<R: Ruleset> Lattice<R> {
    /// Builds a lattice from row-major cell contents. Ids are assigned here.
    pub fn new(
        rows: usize,
        cols: usize,
        contents: Vec<crate::rules::Populated<R>>,
        topology: Topology,
        ruleset: &R,
    ) -> Result<Self> {
        if contents.len() != rows * cols {
            return Err(EngineError::configuration(format!(
                "grid has {} cells, expected {} ({}x{})",
                contents.len(),
                rows * cols,
                rows,
                cols
            )));
        }
        let cells = contents
            .into_iter()
            .enumerate()
            .map(|(id, (state, agent, site))| Cell::new(id, state, agent, site))
            .collect();
        Ok(Self {
            rows,
            cols,
            cells,
            topology,
            background: ruleset.background(),
            background_site: ruleset.background_site(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    pub fn cells(&self) -> &[CellOf<R>] {
        &self.cells
    }

    /// Mutable access for seeding and edits between generations. Ids and
    /// dimensions stay under the lattice's control.
    pub fn cells_mut(&mut self) -> &mut [CellOf<R>] {
        &mut self.cells
    }

    /// Cell by id. Ids come from this lattice and are valid until it grows.
    #[inline]
    pub fn cell(&self, id: CellId) -> &CellOf<R> {
        &self.cells[id]
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut CellOf<R> {
        &mut self.cells[id]
    }

    #[inline]
    pub fn id_of(&self, row: usize, col: usize) -> CellId {
        row * self.cols + col
    }

    #[inline]
    pub fn position(&self, id: CellId) -> (usize, usize) {
        (id / self.cols, id % self.cols)
    }

    fn checked_id(&self, row: isize, col: isize) -> Result<CellId> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return Err(EngineError::out_of_bounds(row, col, self.rows, self.cols));
        }
        Ok(self.id_of(row as usize, col as usize))
    }

    pub fn cell_at(&self, row: isize, col: isize) -> Result<&CellOf<R>> {
        let id = self.checked_id(row, col)?;
        Ok(&self.cells[id])
    }

    pub fn cell_at_mut(&mut self, row: isize, col: isize) -> Result<&mut CellOf<R>> {
        let id = self.checked_id(row, col)?;
        Ok(&mut self.cells[id])
    }

    /// Maps any absolute position through the edge policy without growing.
    pub fn locate(&self, row: isize, col: isize) -> Option<CellId> {
        self.topology
            .edge
            .locate(row, col, self.rows, self.cols)
            .map(|(r, c)| self.id_of(r, c))
    }

    /// Resolved neighbor ids of a cell, in offset order. Never grows the grid.
    pub fn neighbor_ids(&self, id: CellId) -> Vec<CellId> {
        let (row, col) = self.position(id);
        let offsets = self.topology.offsets(row as isize, col as isize);
        self.topology
            .edge
            .resolve(row, col, &offsets, self.rows, self.cols)
            .into_iter()
            .map(|(r, c)| self.id_of(r, c))
            .collect()
    }

    /// Growth needed so every filtered offset of every cell is in bounds.
    /// Always empty unless the edge policy grows.
    pub fn required_growth(&self) -> Growth {
        if !self.topology.edge.grows() {
            return Growth::default();
        }
        let mut growth = Growth::default();
        for row in 0..self.rows as isize {
            // Interior rows and columns cannot reach past the border.
            let near_row_edge = row < 2 || row >= self.rows as isize - 2;
            for col in 0..self.cols as isize {
                let near_col_edge = col < 2 || col >= self.cols as isize - 2;
                if !near_row_edge && !near_col_edge {
                    continue;
                }
                for (dr, dc) in self.topology.offsets(row, col) {
                    growth = growth.union(Growth::to_include(
                        row + dr,
                        col + dc,
                        self.rows,
                        self.cols,
                    ));
                }
            }
        }
        growth
    }

    /// Grows the grid for the current generation if the edge policy asks for it.
    pub fn prepare_growth(&mut self) -> Growth {
        let growth = self.required_growth();
        if growth.is_empty() {
            return growth;
        }
        self.grow(growth)
    }

    /// Grows minimally so that `(target_row, target_col)` is a valid position.
    /// Returns what was added; existing cells shift down/right by `top`/`left`.
    pub fn expand(&mut self, target_row: isize, target_col: isize) -> Growth {
        let growth = Growth::to_include(target_row, target_col, self.rows, self.cols);
        if growth.is_empty() {
            return growth;
        }
        self.grow(growth)
    }

    /// Adds rows and columns around the grid, reassigning every id.
    /// Returns the growth actually applied, which alternating tilings round
    /// up on the leading sides.
    pub fn grow(&mut self, growth: Growth) -> Growth {
        let growth = if self.topology.shape.alternates() {
            growth.even_leading()
        } else {
            growth
        };
        let new_rows = self.rows + growth.top + growth.bottom;
        let new_cols = self.cols + growth.left + growth.right;
        let mut old = std::mem::take(&mut self.cells).into_iter();
        let mut cells = Vec::with_capacity(new_rows * new_cols);

        for row in 0..new_rows {
            for col in 0..new_cols {
                let id = row * new_cols + col;
                let inside = row >= growth.top
                    && row < growth.top + self.rows
                    && col >= growth.left
                    && col < growth.left + self.cols;
                // Old cells are consumed in row-major order, matching this walk.
                let moved = if inside { old.next() } else { None };
                let cell = match moved {
                    Some(mut cell) => {
                        cell.id = id;
                        cell
                    }
                    None => Cell::new(id, self.background, None, self.background_site.clone()),
                };
                cells.push(cell);
            }
        }

        tracing::debug!(
            from_rows = self.rows,
            from_cols = self.cols,
            to_rows = new_rows,
            to_cols = new_cols,
            "Grid expanded"
        );
        self.rows = new_rows;
        self.cols = new_cols;
        self.cells = cells;
        growth
    }

    /// Write-once assignment of a cell's next state.
    pub fn claim(&mut self, id: CellId, state: R::State) -> Result<()> {
        let cell = &mut self.cells[id];
        if let Some(existing) = cell.next {
            return Err(EngineError::invalid_state(format!(
                "cell {id} already claimed as {existing:?}, refusing {state:?}"
            )));
        }
        cell.next = Some(state);
        Ok(())
    }

    /// Moves the agent out of `from` into `to`, returning whatever `to` held.
    pub fn transfer_agent(&mut self, from: CellId, to: CellId) -> Result<Option<R::Agent>> {
        let agent = self.cells[from]
            .agent
            .take()
            .ok_or_else(|| EngineError::invalid_state(format!("cell {from} has no agent to move")))?;
        Ok(self.cells[to].agent.replace(agent))
    }

    /// Starts a generation: every cell's pre-generation state is exposed
    /// through both `previous` and `current` until commit.
    ///
    /// A lower id read at `previous` and a higher id read at `current` then
    /// see the same values an in-place scan in id order would see.
    pub fn open_generation(&mut self) {
        for cell in &mut self.cells {
            cell.previous = cell.current;
            cell.next = None;
        }
    }

    /// Copies every decided next state into the current state and clears it.
    /// Returns the ids whose state changed.
    pub fn commit(&mut self) -> Vec<CellId> {
        let mut changed = Vec::new();
        for cell in &mut self.cells {
            cell.previous = cell.current;
            if let Some(next) = cell.next.take() {
                cell.current = next;
            }
            if cell.current != cell.previous {
                changed.push(cell.id);
            }
        }
        changed
    }

    /// Drops every pending next state, used when a generation fails midway.
    pub fn discard_pending(&mut self) {
        for cell in &mut self.cells {
            cell.next = None;
        }
    }
}
