//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file consumed by the runner.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults, section by section)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [grid]
//! rows = 3
//! columns = 3
//! initial = ["D", "A", "D",
//!            "D", "A", "D",
//!            "D", "A", "D"]
//!
//! [simulation]
//! family = "conway"
//! seed = 42
//!
//! [topology]
//! shape = "rectangle"
//! neighborhood = "extended"
//! edge = "toroidal"
//!
//! [parameters]
//! probGrow = 0.02
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest accepted grid side, before any growth.
pub const MAX_DIMENSION: usize = 4096;

/// Grid dimensions and initial population.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Row-major cell symbols, `rows * columns` long.
    pub initial: Option<Vec<String>>,
    /// Relative weights per symbol, used to fill the grid randomly when
    /// `initial` is absent. Empty means every cell starts in the background state.
    pub fill: BTreeMap<String, f64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        let mut fill = BTreeMap::new();
        fill.insert("A".to_string(), 1.0);
        fill.insert("D".to_string(), 3.0);
        Self {
            rows: 20,
            columns: 20,
            initial: None,
            fill,
        }
    }
}

/// Family selection and run control.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub family: String,
    /// Seed for every random draw. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Generations the runner advances before stopping.
    pub generations: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            family: "conway".to_string(),
            seed: None,
            generations: 100,
        }
    }
}

/// Names of the three topology policies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TopologyConfig {
    pub shape: String,
    pub neighborhood: String,
    pub edge: String,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            shape: "rectangle".to_string(),
            neighborhood: "extended".to_string(),
            edge: "toroidal".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Generations between summary log lines.
    pub log_interval: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_interval: 100 }
    }
}

/// A single named ruleset parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// Open map of ruleset parameters, keyed by name (`probGrow`, `fishBreedTime`, ...).
///
/// Readers never fail: a missing key yields the default, a key of the wrong
/// kind yields the default and a warning.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Parameters(pub BTreeMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and programmatic setup.
    #[must_use]
    pub fn with(mut self, key: &str, value: ParamValue) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    #[must_use]
    pub fn with_number(self, key: &str, value: f64) -> Self {
        self.with(key, ParamValue::Number(value))
    }

    #[must_use]
    pub fn with_text(self, key: &str, value: &str) -> Self {
        self.with(key, ParamValue::Text(value.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str, default: f64) -> f64 {
        match self.0.get(key) {
            None => default,
            Some(ParamValue::Number(n)) if !n.is_nan() => *n,
            Some(ParamValue::Text(s)) => match s.trim().parse::<f64>() {
                Ok(n) if !n.is_nan() => n,
                _ => {
                    tracing::warn!(key, value = %s, default, "Parameter is not a number, using default");
                    default
                }
            },
            Some(other) => {
                tracing::warn!(key, value = ?other, default, "Parameter is not a number, using default");
                default
            }
        }
    }

    /// Probability in `[0, 1]`.
    pub fn probability(&self, key: &str, default: f64) -> f64 {
        self.number(key, default).clamp(0.0, 1.0)
    }

    /// Non-negative whole number. Infinity and anything above `u32::MAX`
    /// saturate to `u32::MAX`.
    pub fn count(&self, key: &str, default: u32) -> u32 {
        let n = self.number(key, f64::from(default));
        if n <= 0.0 {
            0
        } else if n >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            n.round() as u32
        }
    }

    pub fn text(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            None => default.to_string(),
            Some(ParamValue::Text(s)) => s.clone(),
            Some(other) => {
                tracing::warn!(key, value = ?other, default, "Parameter is not text, using default");
                default.to_string()
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub topology: TopologyConfig,
    pub parameters: Parameters,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure. Symbol membership is checked later, by
    /// the family that owns the symbols.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.grid.rows > 0, "Grid rows must be positive");
        anyhow::ensure!(self.grid.columns > 0, "Grid columns must be positive");
        anyhow::ensure!(
            self.grid.rows <= MAX_DIMENSION,
            "Grid rows too large (max {MAX_DIMENSION})"
        );
        anyhow::ensure!(
            self.grid.columns <= MAX_DIMENSION,
            "Grid columns too large (max {MAX_DIMENSION})"
        );

        if let Some(initial) = &self.grid.initial {
            let expected = self.grid.rows * self.grid.columns;
            anyhow::ensure!(
                initial.len() == expected,
                "Initial state has {} cells, expected {} ({}x{})",
                initial.len(),
                expected,
                self.grid.rows,
                self.grid.columns
            );
        } else if !self.grid.fill.is_empty() {
            anyhow::ensure!(
                self.grid
                    .fill
                    .values()
                    .all(|w| w.is_finite() && *w >= 0.0),
                "Fill weights must be finite and non-negative"
            );
            anyhow::ensure!(
                self.grid.fill.values().sum::<f64>() > 0.0,
                "Fill weights must not all be zero"
            );
        }

        anyhow::ensure!(
            !self.simulation.family.trim().is_empty(),
            "Simulation family must be named"
        );
        anyhow::ensure!(
            self.logging.log_interval > 0,
            "Log interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of everything that influences the outcome of a run.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.grid).as_bytes());
        hasher.update(format!("{:?}", self.simulation.family).as_bytes());
        hasher.update(format!("{:?}", self.simulation.seed).as_bytes());
        hasher.update(format!("{:?}", self.topology).as_bytes());
        hasher.update(format!("{:?}", self.parameters).as_bytes());
        hex::encode(hasher.finalize())
    }
}
