mod common;

use cellula_lib::model::simulation::Simulation;
use common::GridBuilder;
use proptest::prelude::*;

fn counts(sim: &Simulation) -> Vec<(&'static str, usize)> {
    let mut counts = sim.population();
    counts.sort();
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn moves_conserve_every_group(
        seed in any::<u64>(),
        threshold in 0.0f64..1.0,
        empty in 0.05f64..0.5
    ) {
        let mut sim = GridBuilder::new("segregation")
            .with_seed(seed)
            .with_param("similarityThreshold", threshold)
            .with_fill(10, 10, &[("R", 1.0), ("B", 1.0), ("E", empty)])
            .build();
        let before = counts(&sim);
        for _ in 0..5 {
            sim.advance().unwrap();
            prop_assert_eq!(counts(&sim), before.clone());
        }
    }
}

#[test]
fn test_unhappy_resident_moves_to_the_empty_cell() {
    // The lone red resident is surrounded by blues and must relocate.
    let mut sim = GridBuilder::new("segregation")
        .with_param("similarityThreshold", 0.3)
        .with_topology("rectangle", "extended", "mirror")
        .with_rows(&["B B B", "B R B", "B B E"])
        .build();
    sim.advance().unwrap();
    assert_symbol!(sim, 1, 1, "E");
    assert_symbol!(sim, 2, 2, "R");
    assert_eq!(sim.metrics().counter("moves"), 1);
}

#[test]
fn test_content_neighborhood_stays_put() {
    let mut sim = GridBuilder::new("segregation")
        .with_param("similarityThreshold", 0.2)
        .with_topology("rectangle", "extended", "mirror")
        .with_rows(&["R R E", "R R E", "B B B"])
        .build();
    let before = sim.snapshot();
    sim.advance().unwrap();
    assert_eq!(sim.snapshot().cells, before.cells);
    assert!(sim.changed_cells().is_empty());
}
