use crate::error::Result;
use crate::grid::Neighbors;
use crate::rules::{CellOf, Ruleset, UpdateMode};
use crate::state::PercolationState;
use cellula_data::{Family, NoAgent};
use rand_chacha::ChaCha8Rng;

/// Fluid spreading through open sites. Blocked and percolated sites never change.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercolationRules;

impl Ruleset for PercolationRules {
    type State = PercolationState;
    type Agent = NoAgent;
    type Site = ();

    const MODE: UpdateMode = UpdateMode::PerCell;

    fn family(&self) -> Family {
        Family::Percolation
    }

    fn transition(
        &self,
        cell: &CellOf<Self>,
        neighbors: &Neighbors<'_, Self>,
        _rng: &mut ChaCha8Rng,
    ) -> Result<PercolationState> {
        Ok(match cell.current {
            PercolationState::Open if neighbors.any(PercolationState::Percolated) => {
                PercolationState::Percolated
            }
            state => state,
        })
    }
}
