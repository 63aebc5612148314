use serde::{Deserialize, Serialize};

/// Dense index of a cell: `row * columns + col`.
pub type CellId = usize;

/// Relative `(Δrow, Δcol)` step from a cell to one of its neighbors.
pub type Offset = (isize, isize);

/// Agent type for families without mobile agents. It has no values, so an
/// `Option<NoAgent>` is always `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoAgent {}

/// One site of the grid.
///
/// `S` is the family's state enum, `A` its agent type and `P` any per-site
/// payload the family keeps (the Sugarscape patch, `()` elsewhere).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell<S, A = NoAgent, P = ()> {
    /// Position in the grid's dense array. Reassigned when the grid grows.
    pub id: CellId,
    /// Committed state, visible to every neighbor during the current generation.
    pub current: S,
    /// State at the start of the generation in progress. After commit it
    /// holds the state the last generation started from.
    pub previous: S,
    /// Decided state for the generation in progress. Written at most once.
    pub next: Option<S>,
    /// Mobile agent owned by this cell, if any.
    pub agent: Option<A>,
    /// Per-site payload.
    pub site: P,
}

impl<S: Copy, A, P> Cell<S, A, P> {
    pub fn new(id: CellId, state: S, agent: Option<A>, site: P) -> Self {
        Self {
            id,
            current: state,
            previous: state,
            next: None,
            agent,
            site,
        }
    }

    /// A cell is claimed once its next state has been decided this generation.
    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.next.is_some()
    }
}
