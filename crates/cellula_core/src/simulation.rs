//! The closed registry of simulation families.
//!
//! A [`Simulation`] is one [`Grid`] of whichever family the configuration
//! names. Family selection is checked: an unknown family has no safe default,
//! because the family decides which symbols a grid may hold.

use crate::config::{AppConfig, Parameters};
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::metrics::Metrics;
use crate::rules::{
    ConwayRules, FireRules, LifeLikeRules, PercolationRules, Ruleset, SegregationRules,
    SugarscapeRules, WatorRules,
};
use crate::state::CellState;
use crate::topology::{EdgeKind, NeighborhoodKind, ShapeKind, Topology};
use cellula_data::{CellId, Family};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// Keeps the random fill stream apart from the generation streams.
const FILL_SALT: u64 = 0x5EED_F111_0000_0001;

pub trait FamilyLogic: Sized {
    /// Resolves a family name. Unknown names are a configuration error.
    fn from_name(name: &str) -> Result<Self>;

    /// Canonical configuration name.
    fn name(&self) -> &'static str;
}

impl FamilyLogic for Family {
    fn from_name(name: &str) -> Result<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "conway" | "life" | "gameoflife" => Ok(Family::Conway),
            "generalizedconway" | "lifelike" | "generalized" => Ok(Family::GeneralizedConway),
            "fire" | "forestfire" | "spreadingfire" => Ok(Family::Fire),
            "percolation" | "percolate" => Ok(Family::Percolation),
            "segregation" | "schelling" => Ok(Family::Segregation),
            "wator" | "predatorprey" => Ok(Family::WaTor),
            "sugarscape" | "sugar" => Ok(Family::Sugarscape),
            _ => Err(EngineError::configuration(format!(
                "unknown simulation family {name:?}"
            ))),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Family::Conway => "conway",
            Family::GeneralizedConway => "generalized_conway",
            Family::Fire => "fire",
            Family::Percolation => "percolation",
            Family::Segregation => "segregation",
            Family::WaTor => "wator",
            Family::Sugarscape => "sugarscape",
        }
    }
}

/// Full row-major picture of one generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub family: Family,
    pub generation: u64,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<&'static str>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns.max(1)) {
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum Simulation {
    Conway(Grid<ConwayRules>),
    GeneralizedConway(Grid<LifeLikeRules>),
    Fire(Grid<FireRules>),
    Percolation(Grid<PercolationRules>),
    Segregation(Grid<SegregationRules>),
    WaTor(Grid<WatorRules>),
    Sugarscape(Grid<SugarscapeRules>),
}

macro_rules! dispatch {
    ($sim:expr, $grid:ident => $body:expr) => {
        match $sim {
            Simulation::Conway($grid) => $body,
            Simulation::GeneralizedConway($grid) => $body,
            Simulation::Fire($grid) => $body,
            Simulation::Percolation($grid) => $body,
            Simulation::Segregation($grid) => $body,
            Simulation::WaTor($grid) => $body,
            Simulation::Sugarscape($grid) => $body,
        }
    };
}

/// Draws `count` symbols from `fill`, weighted by value.
fn random_fill(fill: &BTreeMap<String, f64>, count: usize, seed: u64) -> Result<Vec<String>> {
    let symbols: Vec<&String> = fill.keys().collect();
    let weights = WeightedIndex::new(fill.values())
        .map_err(|e| EngineError::configuration(format!("bad fill weights: {e}")))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ FILL_SALT);
    Ok((0..count)
        .map(|_| symbols[weights.sample(&mut rng)].clone())
        .collect())
}

fn build<R: Ruleset>(ruleset: R, config: &AppConfig, seed: u64) -> Result<Grid<R>> {
    let (rows, cols) = (config.grid.rows, config.grid.columns);
    let topology = Topology::from_config(&config.topology);

    let grid = match &config.grid.initial {
        Some(symbols) => Grid::from_symbols(rows, cols, symbols, ruleset, topology, seed)?,
        None if config.grid.fill.is_empty() => {
            let states = vec![ruleset.background(); rows * cols];
            Grid::from_states(rows, cols, states, ruleset, topology, seed)?
        }
        None => {
            let symbols = random_fill(&config.grid.fill, rows * cols, seed)?;
            Grid::from_symbols(rows, cols, &symbols, ruleset, topology, seed)?
        }
    };
    grid.metrics().set_log_interval(config.logging.log_interval);
    Ok(grid)
}

impl Simulation {
    /// Validates `config` and builds the grid it describes.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let family = Family::from_name(&config.simulation.family)?;
        let seed = config.simulation.seed.unwrap_or_else(|| {
            let seed = rand::random();
            tracing::info!(seed, "No seed configured, drew one from entropy");
            seed
        });
        let params = &config.parameters;

        let sim = match family {
            Family::Conway => Simulation::Conway(build(ConwayRules, config, seed)?),
            Family::GeneralizedConway => Simulation::GeneralizedConway(build(
                LifeLikeRules::from_parameters(params),
                config,
                seed,
            )?),
            Family::Fire => {
                Simulation::Fire(build(FireRules::from_parameters(params), config, seed)?)
            }
            Family::Percolation => Simulation::Percolation(build(PercolationRules, config, seed)?),
            Family::Segregation => Simulation::Segregation(build(
                SegregationRules::from_parameters(params),
                config,
                seed,
            )?),
            Family::WaTor => {
                Simulation::WaTor(build(WatorRules::from_parameters(params), config, seed)?)
            }
            Family::Sugarscape => Simulation::Sugarscape(build(
                SugarscapeRules::from_parameters(params),
                config,
                seed,
            )?),
        };

        tracing::info!(
            family = family.name(),
            rows = config.grid.rows,
            columns = config.grid.columns,
            seed,
            fingerprint = %config.fingerprint(),
            "Simulation ready"
        );
        Ok(sim)
    }

    /// Builds a family from explicit symbols, with default parameters unless
    /// `params` overrides them.
    pub fn from_symbols<S: AsRef<str>>(
        family: Family,
        rows: usize,
        cols: usize,
        symbols: &[S],
        params: &Parameters,
        topology: Topology,
        seed: u64,
    ) -> Result<Self> {
        Ok(match family {
            Family::Conway => Simulation::Conway(Grid::from_symbols(
                rows, cols, symbols, ConwayRules, topology, seed,
            )?),
            Family::GeneralizedConway => Simulation::GeneralizedConway(Grid::from_symbols(
                rows,
                cols,
                symbols,
                LifeLikeRules::from_parameters(params),
                topology,
                seed,
            )?),
            Family::Fire => Simulation::Fire(Grid::from_symbols(
                rows,
                cols,
                symbols,
                FireRules::from_parameters(params),
                topology,
                seed,
            )?),
            Family::Percolation => Simulation::Percolation(Grid::from_symbols(
                rows,
                cols,
                symbols,
                PercolationRules,
                topology,
                seed,
            )?),
            Family::Segregation => Simulation::Segregation(Grid::from_symbols(
                rows,
                cols,
                symbols,
                SegregationRules::from_parameters(params),
                topology,
                seed,
            )?),
            Family::WaTor => Simulation::WaTor(Grid::from_symbols(
                rows,
                cols,
                symbols,
                WatorRules::from_parameters(params),
                topology,
                seed,
            )?),
            Family::Sugarscape => Simulation::Sugarscape(Grid::from_symbols(
                rows,
                cols,
                symbols,
                SugarscapeRules::from_parameters(params),
                topology,
                seed,
            )?),
        })
    }

    pub fn family(&self) -> Family {
        dispatch!(self, grid => grid.ruleset().family())
    }

    /// Runs exactly one generation.
    pub fn advance(&mut self) -> Result<()> {
        dispatch!(self, grid => grid.advance())
    }

    /// Runs `generations` generations, stopping at the first error.
    pub fn run(&mut self, generations: u64) -> Result<()> {
        for _ in 0..generations {
            self.advance()?;
        }
        Ok(())
    }

    pub fn generation(&self) -> u64 {
        dispatch!(self, grid => grid.generation())
    }

    pub fn seed(&self) -> u64 {
        dispatch!(self, grid => grid.seed())
    }

    pub fn rows(&self) -> usize {
        dispatch!(self, grid => grid.rows())
    }

    pub fn columns(&self) -> usize {
        dispatch!(self, grid => grid.columns())
    }

    pub fn len(&self) -> usize {
        dispatch!(self, grid => grid.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbol of the cell at `(row, col)`, or `OutOfBounds`.
    pub fn symbol_at(&self, row: isize, col: isize) -> Result<&'static str> {
        dispatch!(self, grid => grid.cell_at(row, col).map(|c| c.current.symbol()))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            family: self.family(),
            generation: self.generation(),
            rows: self.rows(),
            columns: self.columns(),
            cells: dispatch!(self, grid => grid.cells().iter().map(|c| c.current.symbol()).collect()),
        }
    }

    /// Ids whose state changed in the last generation.
    pub fn changed_cells(&self) -> &[CellId] {
        dispatch!(self, grid => grid.changed_cells())
    }

    /// Cell count per state symbol, in the family's variant order.
    pub fn population(&self) -> Vec<(&'static str, usize)> {
        dispatch!(self, grid => grid
            .population()
            .into_iter()
            .map(|(state, n)| (state.symbol(), n))
            .collect())
    }

    pub fn metrics(&self) -> &Metrics {
        dispatch!(self, grid => grid.metrics())
    }

    pub fn topology(&self) -> Topology {
        dispatch!(self, grid => grid.topology())
    }

    /// Swaps the whole topology between generations.
    pub fn set_topology(&mut self, topology: Topology) {
        dispatch!(self, grid => grid.set_topology(topology))
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        dispatch!(self, grid => grid.set_shape(shape))
    }

    pub fn set_neighborhood(&mut self, neighborhood: NeighborhoodKind) {
        dispatch!(self, grid => grid.set_neighborhood(neighborhood))
    }

    pub fn set_edge(&mut self, edge: EdgeKind) {
        dispatch!(self, grid => grid.set_edge(edge))
    }
}
