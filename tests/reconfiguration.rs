mod common;

use cellula_lib::model::topology::{EdgeKind, NeighborhoodKind, ShapeKind, Topology};
use common::GridBuilder;

#[test]
fn test_policies_swap_between_generations() {
    let mut sim = GridBuilder::new("percolation")
        .with_topology("rectangle", "orthogonal", "mirror")
        .with_rows(&["P B", "B O"])
        .build();
    sim.advance().unwrap();
    assert_symbol!(sim, 1, 1, "O");

    sim.set_neighborhood(NeighborhoodKind::Extended);
    assert_eq!(sim.topology().neighborhood, NeighborhoodKind::Extended);
    sim.advance().unwrap();
    assert_symbol!(sim, 1, 1, "P");
}

#[test]
fn test_edge_swap_changes_wraparound() {
    // Column 0 only reaches column 3 through the wrap.
    let mut sim = GridBuilder::new("percolation")
        .with_topology("rectangle", "orthogonal", "mirror")
        .with_rows(&["O B O P"])
        .build();
    sim.advance().unwrap();
    assert_symbol!(sim, 0, 0, "O");

    sim.set_edge(EdgeKind::Toroidal);
    sim.run(2).unwrap();
    assert_symbol!(sim, 0, 0, "P");
}

#[test]
fn test_shape_swap_keeps_cells() {
    let mut sim = GridBuilder::new("conway")
        .with_topology("rectangle", "extended", "toroidal")
        .with_rows(&["D A D D", "D A D D", "D A D D", "D D D D"])
        .build();
    let before = sim.snapshot().cells;
    sim.set_shape(ShapeKind::Pentagon);
    assert_eq!(sim.snapshot().cells, before);
    assert_eq!(sim.topology().shape, ShapeKind::Pentagon);
    sim.advance().unwrap();
    assert_eq!(sim.len(), 16);
}

#[test]
fn test_whole_topology_replacement() {
    let mut sim = GridBuilder::new("fire")
        .with_param("probGrow", 0.0)
        .with_param("probCatch", 0.0)
        .with_rows(&["T T T", "T B T", "T T T"])
        .build();
    sim.set_topology(Topology::new(
        ShapeKind::Rectangle,
        NeighborhoodKind::Orthogonal,
        EdgeKind::Mirror,
    ));
    sim.advance().unwrap();
    // Corners only touch the fire diagonally.
    assert_symbol!(sim, 0, 0, "T");
    assert_symbol!(sim, 2, 1, "B");
    assert_symbol!(sim, 1, 1, "E");
}
