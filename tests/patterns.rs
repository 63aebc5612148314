mod common;

use cellula_lib::model::simulation::Simulation;
use common::GridBuilder;

/// Rows of `side` dead cells with `alive` positions set.
fn board(side: usize, alive: &[(usize, usize)]) -> Vec<String> {
    (0..side)
        .map(|r| {
            (0..side)
                .map(|c| if alive.contains(&(r, c)) { "A" } else { "D" })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn life(family: &str, edge: &str, side: usize, alive: &[(usize, usize)]) -> Simulation {
    let rows = board(side, alive);
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    GridBuilder::new(family)
        .with_topology("rectangle", "extended", edge)
        .with_rows(&rows)
        .build()
}

fn alive_cells(sim: &Simulation) -> Vec<(usize, usize)> {
    let snapshot = sim.snapshot();
    snapshot
        .cells
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == "A")
        .map(|(i, _)| (i / snapshot.columns, i % snapshot.columns))
        .collect()
}

const GLIDER: [(usize, usize); 5] = [(3, 4), (4, 5), (5, 3), (5, 4), (5, 5)];

#[test]
fn test_blinker_has_period_two() {
    let vertical = [(1, 2), (2, 2), (3, 2)];
    for edge in ["toroidal", "mirror"] {
        let mut sim = life("conway", edge, 5, &vertical);
        sim.advance().unwrap();
        assert_eq!(alive_cells(&sim), vec![(2, 1), (2, 2), (2, 3)], "{edge}");
        sim.advance().unwrap();
        assert_eq!(alive_cells(&sim), vertical.to_vec(), "{edge}");
    }
}

#[test]
fn test_block_is_still() {
    let block = [(2, 2), (2, 3), (3, 2), (3, 3)];
    for edge in ["toroidal", "mirror"] {
        let mut sim = life("conway", edge, 6, &block);
        sim.run(3).unwrap();
        assert_eq!(alive_cells(&sim), block.to_vec(), "{edge}");
        assert!(sim.changed_cells().is_empty());
    }
}

#[test]
fn test_glider_translates_diagonally() {
    let moved: Vec<(usize, usize)> = GLIDER.iter().map(|(r, c)| (r + 1, c + 1)).collect();
    for edge in ["toroidal", "mirror"] {
        let mut sim = life("conway", edge, 10, &GLIDER);
        sim.run(4).unwrap();
        assert_eq!(alive_cells(&sim), moved, "{edge}");
    }
}

#[test]
fn test_glider_wraps_around_a_torus() {
    // 4 generations move the glider one cell; 32 bring it back on an 8x8 torus.
    let mut sim = life("conway", "toroidal", 8, &GLIDER);
    sim.run(32).unwrap();
    assert_eq!(alive_cells(&sim), GLIDER.to_vec());
}

#[test]
fn test_life_like_rule_matches_conway_on_a_glider() {
    let mut conway = life("conway", "toroidal", 10, &GLIDER);
    let mut generalized = life("generalized_conway", "toroidal", 10, &GLIDER);
    for _ in 0..6 {
        conway.advance().unwrap();
        generalized.advance().unwrap();
        assert_eq!(alive_cells(&conway), alive_cells(&generalized));
    }
}
