/// Asserts the number of cells showing `symbol`.
#[macro_export]
macro_rules! assert_population {
    ($sim:expr, $symbol:expr, $count:expr) => {
        let found = $sim
            .population()
            .into_iter()
            .find(|(s, _)| *s == $symbol)
            .map_or(0, |(_, n)| n);
        assert_eq!(
            found,
            $count,
            "Population of {} mismatch at generation {}",
            $symbol,
            $sim.generation()
        );
    };
}

/// Asserts the symbol at a position.
#[macro_export]
macro_rules! assert_symbol {
    ($sim:expr, $row:expr, $col:expr, $symbol:expr) => {
        assert_eq!(
            $sim.symbol_at($row, $col).expect("Position out of bounds"),
            $symbol,
            "Unexpected symbol at ({}, {})",
            $row,
            $col
        );
    };
}

/// Asserts that no cell of a grid holds a pending next state.
#[macro_export]
macro_rules! assert_committed {
    ($grid:expr) => {
        assert!(
            $grid.cells().iter().all(|c| c.next.is_none()),
            "Found a pending next state after commit"
        );
    };
}
