mod common;

use cellula_lib::model::rules::ConwayRules;
use cellula_lib::model::state::LifeState;
use common::GridBuilder;

const BLINKER: [&str; 5] = [
    "D D D D D",
    "D D D D D",
    "D A A A D",
    "D D D D D",
    "D D D D D",
];

#[test]
fn test_infinite_grid_only_grows() {
    let mut sim = GridBuilder::new("conway")
        .with_topology("rectangle", "extended", "infinite")
        .with_rows(&BLINKER)
        .build();
    let (mut rows, mut columns) = (sim.rows(), sim.columns());
    for _ in 0..4 {
        sim.advance().unwrap();
        assert!(sim.rows() >= rows);
        assert!(sim.columns() >= columns);
        assert_eq!(sim.len(), sim.rows() * sim.columns());
        (rows, columns) = (sim.rows(), sim.columns());
        assert_population!(sim, "A", 3);
    }
    assert!(sim.rows() > BLINKER.len());
    assert!(sim.metrics().counter("growths") > 0);
}

#[test]
fn test_blinker_period_survives_growth() {
    let mut sim = GridBuilder::new("conway")
        .with_topology("rectangle", "extended", "infinite")
        .with_rows(&BLINKER)
        .build();
    sim.run(2).unwrap();
    let (top, left) = ((sim.rows() - 5) / 2, (sim.columns() - 5) / 2);
    let (top, left) = (top as isize, left as isize);
    assert_symbol!(sim, top + 2, left + 1, "A");
    assert_symbol!(sim, top + 2, left + 2, "A");
    assert_symbol!(sim, top + 2, left + 3, "A");
    assert_symbol!(sim, top + 1, left + 2, "D");
}

#[test]
fn test_neighbor_lookup_grows_on_demand() {
    let mut grid = GridBuilder::new("conway")
        .with_topology("rectangle", "extended", "infinite")
        .with_rows(&["A D", "D D"])
        .grid(ConwayRules);
    let neighbors = grid.neighbors_of(0, 0).unwrap();
    assert_eq!(neighbors.len(), 8);
    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.columns(), 3);
    assert_eq!(grid.cell_at(1, 1).unwrap().current, LifeState::Alive);
}

#[test]
fn test_triangle_growth_keeps_parity() {
    let mut grid = GridBuilder::new("conway")
        .with_topology("triangle", "extended", "infinite")
        .with_rows(&["D A D D", "D D A D"])
        .grid(ConwayRules);
    let growth = grid.expand(-1, -1);
    assert_eq!(growth.top % 2, 0);
    assert_eq!(growth.left % 2, 0);
    assert_eq!(grid.rows(), 2 + growth.top);
    let alive = grid.cell_at(growth.top as isize, growth.left as isize + 1).unwrap();
    assert_eq!(alive.current, LifeState::Alive);
}

#[test]
fn test_bounded_edges_never_grow() {
    for edge in ["toroidal", "mirror"] {
        let mut sim = GridBuilder::new("conway")
            .with_topology("rectangle", "extended", edge)
            .with_rows(&BLINKER)
            .build();
        sim.run(3).unwrap();
        assert_eq!((sim.rows(), sim.columns()), (5, 5));
        assert_eq!(sim.metrics().counter("growths"), 0);
    }
}
