use crate::config::Parameters;
use crate::error::Result;
use crate::grid::Neighbors;
use crate::rules::{CellOf, Ruleset, UpdateMode};
use crate::state::FireState;
use cellula_data::{Family, NoAgent};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Forest fire: trees grow on empty ground, catch fire from burning
/// neighbors or spontaneously, and burn out in one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRules {
    /// Chance an empty cell grows a tree.
    pub prob_grow: f64,
    /// Chance a tree with no burning neighbor ignites anyway.
    pub prob_catch: f64,
}

impl Default for FireRules {
    fn default() -> Self {
        Self {
            prob_grow: 0.01,
            prob_catch: 0.0005,
        }
    }
}

impl FireRules {
    pub fn new(prob_grow: f64, prob_catch: f64) -> Self {
        Self {
            prob_grow: prob_grow.clamp(0.0, 1.0),
            prob_catch: prob_catch.clamp(0.0, 1.0),
        }
    }

    pub fn from_parameters(params: &Parameters) -> Self {
        let defaults = Self::default();
        Self::new(
            params.probability("probGrow", defaults.prob_grow),
            params.probability("probCatch", defaults.prob_catch),
        )
    }
}

impl Ruleset for FireRules {
    type State = FireState;
    type Agent = NoAgent;
    type Site = ();

    const MODE: UpdateMode = UpdateMode::PerCell;

    fn family(&self) -> Family {
        Family::Fire
    }

    fn transition(
        &self,
        cell: &CellOf<Self>,
        neighbors: &Neighbors<'_, Self>,
        rng: &mut ChaCha8Rng,
    ) -> Result<FireState> {
        Ok(match cell.current {
            FireState::Burning => FireState::Empty,
            FireState::Empty if rng.gen_bool(self.prob_grow) => FireState::Tree,
            FireState::Empty => FireState::Empty,
            FireState::Tree if neighbors.any(FireState::Burning) => FireState::Burning,
            FireState::Tree if rng.gen_bool(self.prob_catch) => FireState::Burning,
            FireState::Tree => FireState::Tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::topology::Topology;
    use cellula_data::Cell;
    use rand::SeedableRng;

    fn cell(id: usize, state: FireState) -> CellOf<FireRules> {
        Cell::new(id, state, None, ())
    }

    #[test]
    fn test_burning_always_burns_out() {
        let rules = FireRules::new(1.0, 1.0);
        let focal = cell(0, FireState::Burning);
        let fire = cell(1, FireState::Burning);
        let neighbors = Neighbors::new(0, vec![&fire]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(
                rules.transition(&focal, &neighbors, &mut rng).unwrap(),
                FireState::Empty
            );
        }
    }

    #[test]
    fn test_tree_catches_from_burning_neighbor() {
        let rules = FireRules::new(0.0, 0.0);
        let focal = cell(0, FireState::Tree);
        let fire = cell(1, FireState::Burning);
        let neighbors = Neighbors::new(0, vec![&fire]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            rules.transition(&focal, &neighbors, &mut rng).unwrap(),
            FireState::Burning
        );
    }

    #[test]
    fn test_lower_neighbor_burning_at_generation_start_spreads() {
        // Already decided this generation, but burning when it started.
        let rules = FireRules::new(0.0, 0.0);
        let mut spent = cell(0, FireState::Empty);
        spent.previous = FireState::Burning;
        let focal = cell(1, FireState::Tree);
        let neighbors = Neighbors::new(1, vec![&spent]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            rules.transition(&focal, &neighbors, &mut rng).unwrap(),
            FireState::Burning
        );
    }

    #[test]
    fn test_neighbor_burned_out_last_generation_does_not_spread() {
        let topology = Topology::from_names("rectangle", "orthogonal", "mirror");
        let mut grid =
            Grid::from_symbols(1, 2, &["B", "E"], FireRules::new(1.0, 0.0), topology, 5).unwrap();

        grid.advance().unwrap();
        assert_eq!(grid.cell_at(0, 0).unwrap().current, FireState::Empty);
        assert_eq!(grid.cell_at(0, 1).unwrap().current, FireState::Tree);

        grid.advance().unwrap();
        assert_eq!(grid.cell_at(0, 1).unwrap().current, FireState::Tree);
        assert_eq!(grid.cell_at(0, 0).unwrap().current, FireState::Tree);
    }

    #[test]
    fn test_zero_probabilities_are_static() {
        let rules = FireRules::new(0.0, 0.0);
        let empty = cell(0, FireState::Empty);
        let tree = cell(1, FireState::Tree);
        let neighbors = Neighbors::new(0, vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(rules.transition(&empty, &neighbors, &mut rng).unwrap(), FireState::Empty);
        assert_eq!(rules.transition(&tree, &neighbors, &mut rng).unwrap(), FireState::Tree);
    }

    #[test]
    fn test_parameters_are_clamped() {
        let params = Parameters::new()
            .with_number("probGrow", 2.0)
            .with_number("probCatch", -1.0);
        let rules = FireRules::from_parameters(&params);
        assert_eq!(rules.prob_grow, 1.0);
        assert_eq!(rules.prob_catch, 0.0);
        assert_eq!(FireRules::from_parameters(&Parameters::new()), FireRules::default());
    }
}
