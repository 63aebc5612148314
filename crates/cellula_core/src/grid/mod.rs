//! The generation driver.
//!
//! A [`Grid`] owns a [`Lattice`] of cells and the [`Ruleset`] that evolves it.
//! Each call to [`Grid::advance`] runs exactly one generation:
//!
//! 1. Growth: an unbounded edge policy expands the lattice so every filtered
//!    offset of every cell is in bounds.
//! 2. Decision: per-cell rulesets are asked for every cell's next state
//!    (in parallel with the `parallel` feature); whole-grid rulesets run one
//!    coordinating pass that claims next states themselves.
//! 3. Commit: every claimed next state becomes current, all at once.
//!
//! ## Example
//!
//! ```
//! use cellula_core::grid::Grid;
//! use cellula_core::rules::ConwayRules;
//! use cellula_core::state::LifeState;
//! use cellula_core::topology::Topology;
//!
//! let mut blinker = vec!["D"; 25];
//! for id in [7, 12, 17] {
//!     blinker[id] = "A";
//! }
//! let topology = Topology::from_names("rectangle", "extended", "toroidal");
//! let mut grid = Grid::from_symbols(5, 5, &blinker, ConwayRules, topology, 7).unwrap();
//! grid.advance().unwrap();
//! assert_eq!(grid.cell_at(2, 1).unwrap().current, LifeState::Alive);
//! assert_eq!(grid.cell_at(1, 2).unwrap().current, LifeState::Dead);
//! ```

mod lattice;
mod neighbors;

pub use lattice::{Growth, Lattice};
pub use neighbors::{observed_state, Neighbors};

use crate::error::Result;
use crate::metrics::Metrics;
use crate::rules::{CellOf, Ruleset, UpdateMode};
use crate::state::CellState;
use crate::topology::{EdgeKind, EdgeLogic, NeighborhoodKind, ShapeKind, Topology};
use cellula_data::CellId;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;

/// Independent random stream for one cell in one generation.
fn cell_rng(seed: u64, generation: u64, id: CellId) -> ChaCha8Rng {
    let mixed = seed
        ^ generation.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (id as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    ChaCha8Rng::seed_from_u64(mixed)
}

pub struct Grid<R: Ruleset> {
    lattice: Lattice<R>,
    ruleset: R,
    rng: ChaCha8Rng,
    seed: u64,
    generation: u64,
    changed: Vec<CellId>,
    metrics: Metrics,
}

impl<R: Ruleset> std::fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("family", &self.ruleset.family())
            .field("lattice", &self.lattice)
            .field("generation", &self.generation)
            .field("seed", &self.seed)
            .finish()
    }
}

impl<R: Ruleset> Grid<R> {
    pub fn new(lattice: Lattice<R>, ruleset: R, seed: u64) -> Self {
        Self {
            lattice,
            ruleset,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            generation: 0,
            changed: Vec::new(),
            metrics: Metrics::new(),
        }
    }

    /// Builds a grid from row-major configuration symbols of the ruleset's family.
    pub fn from_symbols<S: AsRef<str>>(
        rows: usize,
        cols: usize,
        symbols: &[S],
        ruleset: R,
        topology: Topology,
        seed: u64,
    ) -> Result<Self> {
        let contents = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| {
                ruleset
                    .parse_cell(s.as_ref())
                    .map_err(|e| e.with_context(format!("cell {i}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let lattice = Lattice::new(rows, cols, contents, topology, &ruleset)?;
        Ok(Self::new(lattice, ruleset, seed))
    }

    /// Builds a grid from row-major states, letting the ruleset attach agents.
    pub fn from_states(
        rows: usize,
        cols: usize,
        states: Vec<R::State>,
        ruleset: R,
        topology: Topology,
        seed: u64,
    ) -> Result<Self> {
        let contents = states
            .into_iter()
            .map(|state| {
                let (agent, site) = ruleset.populate(state);
                (state, agent, site)
            })
            .collect();
        let lattice = Lattice::new(rows, cols, contents, topology, &ruleset)?;
        Ok(Self::new(lattice, ruleset, seed))
    }

    /// Runs exactly one generation.
    pub fn advance(&mut self) -> Result<()> {
        let started = Instant::now();

        let growth = self.lattice.prepare_growth();
        if !growth.is_empty() {
            self.metrics.increment_counter("growths");
        }
        self.lattice.open_generation();

        let decided = match R::MODE {
            UpdateMode::PerCell => self.decide_per_cell().inspect_err(|_| {
                self.lattice.discard_pending();
            }),
            UpdateMode::WholeGrid => {
                // Agents and sites move before commit, so a failed pass rolls back.
                let checkpoint = self.lattice.clone();
                self.ruleset
                    .advance_all(&mut self.lattice, &mut self.rng, &self.metrics)
                    .inspect_err(|_| self.lattice = checkpoint)
            }
        };
        if let Err(e) = decided {
            return Err(e.with_context(format!("generation {}", self.generation + 1)));
        }

        self.changed = self.lattice.commit();
        self.generation += 1;
        self.metrics
            .record_generation(started.elapsed(), self.lattice.len(), self.changed.len());
        Ok(())
    }

    fn decide_per_cell(&mut self) -> Result<()> {
        let lattice = &self.lattice;
        let ruleset = &self.ruleset;
        let (seed, generation) = (self.seed, self.generation);

        let decide = |id: CellId| -> Result<R::State> {
            let neighbors = Neighbors::resolve(lattice, id);
            let mut rng = cell_rng(seed, generation, id);
            ruleset.transition(lattice.cell(id), &neighbors, &mut rng)
        };

        #[cfg(feature = "parallel")]
        let decisions: Vec<R::State> = (0..lattice.len())
            .into_par_iter()
            .map(decide)
            .collect::<Result<_>>()?;
        #[cfg(not(feature = "parallel"))]
        let decisions: Vec<R::State> = (0..lattice.len()).map(decide).collect::<Result<_>>()?;

        for (id, state) in decisions.into_iter().enumerate() {
            self.lattice.claim(id, state)?;
        }
        Ok(())
    }

    /// Cell at `(row, col)`, or `OutOfBounds`.
    pub fn cell_at(&self, row: isize, col: isize) -> Result<&CellOf<R>> {
        self.lattice.cell_at(row, col)
    }

    /// Neighbors of `(row, col)` through the full topology pipeline.
    ///
    /// Under an unbounded edge this may grow the grid first, which shifts
    /// every existing cell's position and id.
    pub fn neighbors_of(&mut self, row: isize, col: isize) -> Result<Vec<&CellOf<R>>> {
        self.lattice.cell_at(row, col)?;
        let topology = self.lattice.topology();
        let (mut row, mut col) = (row, col);

        if topology.edge.grows() {
            let growth = topology.offsets(row, col).into_iter().fold(
                Growth::default(),
                |acc, (dr, dc)| {
                    acc.union(Growth::to_include(
                        row + dr,
                        col + dc,
                        self.lattice.rows(),
                        self.lattice.columns(),
                    ))
                },
            );
            if !growth.is_empty() {
                let applied = self.lattice.grow(growth);
                row += applied.top as isize;
                col += applied.left as isize;
                self.metrics.increment_counter("growths");
            }
        }

        let id = self.lattice.id_of(row as usize, col as usize);
        Ok(Neighbors::resolve(&self.lattice, id).cells().to_vec())
    }

    /// Grows the grid so `(target_row, target_col)` becomes valid.
    pub fn expand(&mut self, target_row: isize, target_col: isize) -> Growth {
        let growth = self.lattice.expand(target_row, target_col);
        if !growth.is_empty() {
            self.metrics.increment_counter("growths");
        }
        growth
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.lattice.set_topology(topology);
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        let topology = self.lattice.topology();
        self.lattice.set_topology(Topology { shape, ..topology });
    }

    pub fn set_neighborhood(&mut self, neighborhood: NeighborhoodKind) {
        let topology = self.lattice.topology();
        self.lattice.set_topology(Topology {
            neighborhood,
            ..topology
        });
    }

    pub fn set_edge(&mut self, edge: EdgeKind) {
        let topology = self.lattice.topology();
        self.lattice.set_topology(Topology { edge, ..topology });
    }

    pub fn topology(&self) -> Topology {
        self.lattice.topology()
    }

    pub fn rows(&self) -> usize {
        self.lattice.rows()
    }

    pub fn columns(&self) -> usize {
        self.lattice.columns()
    }

    pub fn len(&self) -> usize {
        self.lattice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lattice.is_empty()
    }

    pub fn cells(&self) -> &[CellOf<R>] {
        self.lattice.cells()
    }

    pub fn lattice(&self) -> &Lattice<R> {
        &self.lattice
    }

    /// Direct lattice access for edits between generations.
    pub fn lattice_mut(&mut self) -> &mut Lattice<R> {
        &mut self.lattice
    }

    pub fn ruleset(&self) -> &R {
        &self.ruleset
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Ids whose state changed in the last generation.
    pub fn changed_cells(&self) -> &[CellId] {
        &self.changed
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Cell count per state, in the family's variant order.
    pub fn population(&self) -> Vec<(R::State, usize)> {
        R::State::variants()
            .iter()
            .map(|v| (*v, self.cells().iter().filter(|c| c.current == *v).count()))
            .collect()
    }
}
