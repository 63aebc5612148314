//! Ruleset families and the contract they share with the grid.
//!
//! A ruleset is either per-cell (a pure transition from a cell and its resolved
//! neighbors to the next state) or whole-grid (one coordinating pass that claims
//! next states itself). The mode is an associated constant, so it cannot change
//! during a run.

pub mod conway;
pub mod fire;
pub mod life_like;
pub mod percolation;
pub mod segregation;
pub mod sugarscape;
pub mod wator;

pub use conway::ConwayRules;
pub use fire::FireRules;
pub use life_like::{LifeLikeRules, RuleString};
pub use percolation::PercolationRules;
pub use segregation::SegregationRules;
pub use sugarscape::SugarscapeRules;
pub use wator::WatorRules;

use crate::error::{EngineError, Result};
use crate::grid::{Lattice, Neighbors};
use crate::metrics::Metrics;
use crate::state::CellState;
use cellula_data::{Cell, Family};
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;

/// Cell type of the grid a ruleset drives.
pub type CellOf<R> = Cell<<R as Ruleset>::State, <R as Ruleset>::Agent, <R as Ruleset>::Site>;

/// Everything a configuration symbol expands to.
pub type Populated<R> = (
    <R as Ruleset>::State,
    Option<<R as Ruleset>::Agent>,
    <R as Ruleset>::Site,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `transition` runs once per cell; the grid claims the returned state.
    PerCell,
    /// `advance_all` runs once per generation and claims states itself.
    WholeGrid,
}

pub trait Ruleset: Send + Sync + Sized {
    type State: CellState;
    type Agent: Clone + Debug + Send + Sync;
    type Site: Clone + Debug + Default + Send + Sync;

    const MODE: UpdateMode;

    fn family(&self) -> Family;

    /// State given to cells created by grid growth.
    fn background(&self) -> Self::State {
        Self::State::background()
    }

    /// Site payload given to cells created by grid growth.
    fn background_site(&self) -> Self::Site {
        Self::Site::default()
    }

    /// Agent and site a freshly placed cell of `state` starts with.
    fn populate(&self, _state: Self::State) -> (Option<Self::Agent>, Self::Site) {
        (None, self.background_site())
    }

    /// Expands one configuration symbol into a cell's contents.
    fn parse_cell(&self, symbol: &str) -> Result<Populated<Self>> {
        let state = Self::State::parse_symbol(symbol)?;
        let (agent, site) = self.populate(state);
        Ok((state, agent, site))
    }

    /// Per-cell decision. Reads neighbors only through `neighbors`, which
    /// applies the previous/current tie-break.
    fn transition(
        &self,
        cell: &CellOf<Self>,
        _neighbors: &Neighbors<'_, Self>,
        _rng: &mut ChaCha8Rng,
    ) -> Result<Self::State> {
        Err(EngineError::invalid_state(format!(
            "{:?} has no per-cell transition (cell {})",
            self.family(),
            cell.id
        )))
    }

    /// Whole-grid decision pass. Must claim a next state only for cells it
    /// changes or deliberately keeps; unclaimed cells keep their state.
    fn advance_all(
        &mut self,
        _lattice: &mut Lattice<Self>,
        _rng: &mut ChaCha8Rng,
        _metrics: &Metrics,
    ) -> Result<()> {
        Err(EngineError::invalid_state(format!(
            "{:?} has no whole-grid pass",
            self.family()
        )))
    }
}
