use crate::grid::Lattice;
use crate::rules::{CellOf, Ruleset};
use cellula_data::CellId;

/// Resolved neighbors of one cell, as a per-cell ruleset sees them.
///
/// States are read through the tie-break rule: a neighbor with a lower id
/// than the focal cell is read at its previous state, any other neighbor at
/// its current state. During a generation both hold the state the neighbor
/// had when the generation started, so the scan order never leaks into a
/// decision.
pub struct Neighbors<'a, R: Ruleset> {
    focal: CellId,
    cells: Vec<&'a CellOf<R>>,
}

impl<'a, R: Ruleset> Neighbors<'a, R> {
    pub fn new(focal: CellId, cells: Vec<&'a CellOf<R>>) -> Self {
        Self { focal, cells }
    }

    /// Resolves the neighbors of `focal` in `lattice`.
    pub fn resolve(lattice: &'a Lattice<R>, focal: CellId) -> Self {
        let cells = lattice
            .neighbor_ids(focal)
            .into_iter()
            .map(|id| lattice.cell(id))
            .collect();
        Self { focal, cells }
    }

    pub fn focal(&self) -> CellId {
        self.focal
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[&'a CellOf<R>] {
        &self.cells
    }

    /// State of `neighbor` as seen from the focal cell.
    #[inline]
    pub fn observed(&self, neighbor: &CellOf<R>) -> R::State {
        observed_state(self.focal, neighbor.id, neighbor.previous, neighbor.current)
    }

    /// Observed states of all neighbors, in offset order.
    pub fn states(&self) -> impl Iterator<Item = R::State> + '_ {
        self.cells.iter().map(|n| self.observed(n))
    }

    pub fn count(&self, state: R::State) -> usize {
        self.states().filter(|s| *s == state).count()
    }

    pub fn any(&self, state: R::State) -> bool {
        self.states().any(|s| s == state)
    }
}

/// The tie-break rule on its own: previous state for already-visited ids,
/// current state otherwise.
#[inline]
pub fn observed_state<S: Copy>(focal: CellId, neighbor: CellId, previous: S, current: S) -> S {
    if neighbor < focal {
        previous
    } else {
        current
    }
}
