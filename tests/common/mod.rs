pub mod macros;

use cellula_lib::model::config::{AppConfig, ParamValue};
use cellula_lib::model::error::EngineError;
use cellula_lib::model::grid::Grid;
use cellula_lib::model::simulation::Simulation;
use cellula_lib::model::topology::Topology;
use cellula_lib::model::Ruleset;

#[allow(dead_code)]
pub struct GridBuilder {
    config: AppConfig,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new(family: &str) -> Self {
        let mut config = AppConfig::default();
        config.simulation.family = family.to_string();
        config.simulation.seed = Some(42);
        config.grid.fill.clear();
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Sets the initial state from whitespace-separated rows of symbols.
    pub fn with_rows(mut self, rows: &[&str]) -> Self {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.split_whitespace().map(str::to_string).collect())
            .collect();
        self.config.grid.rows = cells.len();
        self.config.grid.columns = cells.first().map_or(0, Vec::len);
        self.config.grid.initial = Some(cells.into_iter().flatten().collect());
        self
    }

    /// Random initial state drawn from symbol weights.
    pub fn with_fill(mut self, rows: usize, columns: usize, weights: &[(&str, f64)]) -> Self {
        self.config.grid.rows = rows;
        self.config.grid.columns = columns;
        self.config.grid.initial = None;
        self.config.grid.fill = weights
            .iter()
            .map(|(s, w)| (s.to_string(), *w))
            .collect();
        self
    }

    pub fn with_topology(mut self, shape: &str, neighborhood: &str, edge: &str) -> Self {
        self.config.topology.shape = shape.to_string();
        self.config.topology.neighborhood = neighborhood.to_string();
        self.config.topology.edge = edge.to_string();
        self
    }

    pub fn with_param(mut self, key: &str, value: f64) -> Self {
        self.config
            .parameters
            .0
            .insert(key.to_string(), ParamValue::Number(value));
        self
    }

    pub fn with_text_param(mut self, key: &str, value: &str) -> Self {
        self.config
            .parameters
            .0
            .insert(key.to_string(), ParamValue::Text(value.to_string()));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn try_build(self) -> Result<Simulation, EngineError> {
        Simulation::from_config(&self.config)
    }

    pub fn build(self) -> Simulation {
        self.try_build().expect("Failed to build simulation")
    }

    /// Builds a typed grid for `ruleset` from the configured rows.
    pub fn grid<R: Ruleset>(self, ruleset: R) -> Grid<R> {
        let config = self.config;
        let initial = config
            .grid
            .initial
            .expect("grid() needs explicit rows");
        Grid::from_symbols(
            config.grid.rows,
            config.grid.columns,
            &initial,
            ruleset,
            Topology::from_config(&config.topology),
            config.simulation.seed.unwrap_or(0),
        )
        .expect("Failed to build grid")
    }
}
