use cellula_core::config::Parameters;
use cellula_core::grid::Grid;
use cellula_core::rules::{ConwayRules, FireRules, WatorRules};
use cellula_core::state::{FireState, LifeState, WatorState};
use cellula_core::topology::Topology;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIDE: usize = 128;

fn random_states<S: Copy>(choices: &[S], seed: u64) -> Vec<S> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..SIDE * SIDE)
        .map(|_| choices[rng.gen_range(0..choices.len())])
        .collect()
}

/// Benchmark one Conway generation on a toroidal grid.
fn bench_conway_generation(c: &mut Criterion) {
    let states = random_states(&[LifeState::Alive, LifeState::Dead, LifeState::Dead], 42);
    let topology = Topology::from_names("rectangle", "extended", "toroidal");
    let mut grid = Grid::from_states(SIDE, SIDE, states, ConwayRules, topology, 42).unwrap();

    c.bench_function("conway_generation_128", |b| {
        b.iter(|| {
            grid.advance().unwrap();
            black_box(grid.changed_cells().len())
        })
    });
}

/// Benchmark one fire generation on a triangular mirror grid.
fn bench_fire_triangle_generation(c: &mut Criterion) {
    let states = random_states(&[FireState::Tree, FireState::Tree, FireState::Burning], 7);
    let topology = Topology::from_names("triangle", "extended", "mirror");
    let rules = FireRules::from_parameters(&Parameters::new().with_number("probGrow", 0.05));
    let mut grid = Grid::from_states(SIDE, SIDE, states, rules, topology, 7).unwrap();

    c.bench_function("fire_triangle_generation_128", |b| {
        b.iter(|| {
            grid.advance().unwrap();
            black_box(grid.generation())
        })
    });
}

/// Benchmark one Wa-Tor generation, which runs sequentially.
fn bench_wator_generation(c: &mut Criterion) {
    let states = random_states(
        &[WatorState::Fish, WatorState::Shark, WatorState::Water, WatorState::Water],
        3,
    );
    let topology = Topology::from_names("rectangle", "orthogonal", "toroidal");
    let mut grid =
        Grid::from_states(SIDE, SIDE, states, WatorRules::default(), topology, 3).unwrap();

    c.bench_function("wator_generation_128", |b| {
        b.iter(|| {
            grid.advance().unwrap();
            black_box(grid.generation())
        })
    });
}

criterion_group!(
    benches,
    bench_conway_generation,
    bench_fire_triangle_generation,
    bench_wator_generation
);
criterion_main!(benches);
