//! Schelling segregation: unhappy residents move to random empty cells.

use crate::config::Parameters;
use crate::error::Result;
use crate::grid::Lattice;
use crate::metrics::Metrics;
use crate::rules::{Ruleset, UpdateMode};
use crate::state::SegregationState;
use cellula_data::{CellId, Family, NoAgent};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegregationRules {
    /// A resident is satisfied when the fraction of like neighbors among
    /// non-empty neighbors is strictly above this value.
    pub similarity_threshold: f64,
}

impl Default for SegregationRules {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
        }
    }
}

impl SegregationRules {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
        }
    }

    pub fn from_parameters(params: &Parameters) -> Self {
        Self::new(params.number("similarityThreshold", Self::default().similarity_threshold))
    }

    /// Whether the resident at `id` is content with its committed surroundings.
    pub fn is_satisfied(&self, lattice: &Lattice<Self>, id: CellId) -> bool {
        let own = lattice.cell(id).current;
        let (same, occupied) = lattice
            .neighbor_ids(id)
            .into_iter()
            .map(|n| lattice.cell(n).current)
            .filter(|s| *s != SegregationState::Empty)
            .fold((0usize, 0usize), |(same, occupied), s| {
                (same + usize::from(s == own), occupied + 1)
            });
        occupied == 0 || same as f64 / occupied as f64 > self.similarity_threshold
    }
}

impl Ruleset for SegregationRules {
    type State = SegregationState;
    type Agent = NoAgent;
    type Site = ();

    const MODE: UpdateMode = UpdateMode::WholeGrid;

    fn family(&self) -> Family {
        Family::Segregation
    }

    fn advance_all(
        &mut self,
        lattice: &mut Lattice<Self>,
        rng: &mut ChaCha8Rng,
        metrics: &Metrics,
    ) -> Result<()> {
        let (mut empties, mut residents): (Vec<CellId>, Vec<CellId>) = (0..lattice.len())
            .partition(|id| lattice.cell(*id).current == SegregationState::Empty);
        residents.shuffle(rng);

        let mut moves = 0u64;
        for id in residents {
            if lattice.cell(id).is_claimed() || self.is_satisfied(lattice, id) {
                continue;
            }
            // Each empty cell is drawn at most once, so no target is claimed twice.
            while !empties.is_empty() {
                let target = empties.swap_remove(rng.gen_range(0..empties.len()));
                if lattice.cell(target).is_claimed() {
                    continue;
                }
                let state = lattice.cell(id).current;
                lattice.claim(target, state)?;
                lattice.claim(id, SegregationState::Empty)?;
                moves += 1;
                break;
            }
            if empties.is_empty() {
                break;
            }
        }

        metrics.add_to_counter("moves", moves);
        Ok(())
    }
}
