use crate::error::Result;
use crate::grid::Neighbors;
use crate::rules::{CellOf, Ruleset, UpdateMode};
use crate::state::LifeState;
use cellula_data::{Family, NoAgent};
use rand_chacha::ChaCha8Rng;

/// Classic Game of Life: birth on 3, survival on 2 or 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConwayRules;

/// The Conway table on its own.
pub fn conway_next(current: LifeState, alive_neighbors: usize) -> LifeState {
    match (current, alive_neighbors) {
        (_, 3) => LifeState::Alive,
        (LifeState::Alive, 2) => LifeState::Alive,
        _ => LifeState::Dead,
    }
}

impl Ruleset for ConwayRules {
    type State = LifeState;
    type Agent = NoAgent;
    type Site = ();

    const MODE: UpdateMode = UpdateMode::PerCell;

    fn family(&self) -> Family {
        Family::Conway
    }

    fn transition(
        &self,
        cell: &CellOf<Self>,
        neighbors: &Neighbors<'_, Self>,
        _rng: &mut ChaCha8Rng,
    ) -> Result<LifeState> {
        Ok(conway_next(cell.current, neighbors.count(LifeState::Alive)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellula_data::Cell;
    use rand::SeedableRng;
    use LifeState::{Alive, Dead};

    fn cell(id: usize, previous: LifeState, current: LifeState) -> CellOf<ConwayRules> {
        let mut c = Cell::new(id, current, None, ());
        c.previous = previous;
        c
    }

    #[test]
    fn test_table() {
        assert_eq!(conway_next(Dead, 3), Alive);
        assert_eq!(conway_next(Alive, 3), Alive);
        assert_eq!(conway_next(Alive, 2), Alive);
        assert_eq!(conway_next(Dead, 2), Dead);
        assert_eq!(conway_next(Alive, 1), Dead);
        assert_eq!(conway_next(Alive, 4), Dead);
        assert_eq!(conway_next(Dead, 0), Dead);
    }

    #[test]
    fn test_lower_ids_read_previous_state() {
        // Ids 0 and 1 are read at their previous state, 3 and 4 at their current one.
        let n0 = cell(0, Alive, Dead);
        let n1 = cell(1, Dead, Alive);
        let n3 = cell(3, Alive, Dead);
        let n4 = cell(4, Dead, Alive);
        let focal = cell(2, Dead, Alive);
        let neighbors = Neighbors::new(2, vec![&n0, &n1, &n3, &n4]);

        let observed: Vec<_> = neighbors.states().collect();
        assert_eq!(observed, vec![Alive, Dead, Dead, Alive]);
        assert_eq!(neighbors.count(Alive), 2);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(ConwayRules.transition(&focal, &neighbors, &mut rng).unwrap(), Alive);

        let dead_focal = cell(2, Alive, Dead);
        assert_eq!(ConwayRules.transition(&dead_focal, &neighbors, &mut rng).unwrap(), Dead);
    }
}
