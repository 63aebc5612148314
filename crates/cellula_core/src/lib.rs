//! # Cellula Core
//!
//! A generalized cellular-automaton engine.
//!
//! This crate contains all the logic of the engine:
//! - Topology pipeline (shape, neighborhood filter, edge policy)
//! - Double-buffered grid with a prescribed neighbor tie-break
//! - Per-cell rule families (Conway, life-like rules, fire, percolation)
//! - Whole-grid rule families (segregation, Wa-Tor, Sugarscape)
//! - Configuration, metrics collection and structured logging
//!
//! ## Architecture
//!
//! - **Data/logic split**: cells, agents and selector enums live in
//!   `cellula_data`; behavior is attached here through `*Logic` traits
//! - **Two update modes**: per-cell rulesets decide every cell independently,
//!   whole-grid rulesets run one coordinating pass that claims destinations
//! - **Parallel processing**: the per-cell read phase runs on Rayon
//! - **Deterministic simulation**: seeded ChaCha RNG for reproducible runs
//!
//! ## Example
//!
//! ```
//! use cellula_core::config::Parameters;
//! use cellula_core::simulation::Simulation;
//! use cellula_core::topology::Topology;
//! use cellula_data::Family;
//!
//! let symbols = ["O", "O", "P", "B", "O", "O"];
//! let topology = Topology::from_names("rectangle", "orthogonal", "mirror");
//! let mut sim = Simulation::from_symbols(
//!     Family::Percolation,
//!     2,
//!     3,
//!     &symbols,
//!     &Parameters::new(),
//!     topology,
//!     42,
//! )
//! .unwrap();
//! sim.advance().unwrap();
//! assert_eq!(sim.symbol_at(0, 1).unwrap(), "P");
//! ```

/// Agent preferences and budgets
pub mod agent;
/// Configuration management for simulation parameters
pub mod config;
/// Engine error taxonomy
pub mod error;
/// Cell store, neighbor views and the generation driver
pub mod grid;
/// Performance metrics collection and logging
pub mod metrics;
/// Rule families and the ruleset contract
pub mod rules;
/// Closed family registry built from configuration
pub mod simulation;
/// Per-family state symbol tables
pub mod state;
/// Shape, neighborhood and edge policies
pub mod topology;

pub use error::{EngineError, Result};
pub use grid::Grid;
pub use metrics::{init_logging, Metrics};
pub use rules::{Ruleset, UpdateMode};
pub use simulation::{FamilyLogic, Simulation, Snapshot};
