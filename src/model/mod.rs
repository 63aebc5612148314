pub use cellula_core::{FamilyLogic, Ruleset, UpdateMode};
pub mod agent {
    pub use cellula_core::agent::*;
}
pub mod config {
    pub use cellula_core::config::*;
}
pub mod error {
    pub use cellula_core::error::*;
}
pub mod grid {
    pub use cellula_core::grid::*;
}
pub mod metrics {
    pub use cellula_core::metrics::*;
}
pub mod rules {
    pub use cellula_core::rules::*;
}
pub mod simulation {
    pub use cellula_core::simulation::*;
}
pub mod state {
    pub use cellula_core::state::*;
}
pub mod topology {
    pub use cellula_core::topology::*;
}
pub mod data {
    pub use cellula_data::*;
}
