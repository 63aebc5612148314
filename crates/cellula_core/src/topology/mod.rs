//! Topology pipeline: shape, then neighborhood filter, then edge handling.
//!
//! The three policies are plain values with no grid-specific state, so a grid
//! can swap any of them between generations.

pub mod edge;
pub mod neighborhood;
pub mod shape;

pub use edge::{mirror_index, EdgeKind, EdgeLogic};
pub use neighborhood::{NeighborhoodKind, NeighborhoodLogic};
pub use shape::{ShapeKind, ShapeLogic};

use crate::config::TopologyConfig;
use cellula_data::Offset;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Topology {
    pub shape: ShapeKind,
    pub neighborhood: NeighborhoodKind,
    pub edge: EdgeKind,
}

impl Topology {
    pub fn new(shape: ShapeKind, neighborhood: NeighborhoodKind, edge: EdgeKind) -> Self {
        Self {
            shape,
            neighborhood,
            edge,
        }
    }

    /// Resolves policy names, substituting defaults for unknown ones.
    pub fn from_names(shape: &str, neighborhood: &str, edge: &str) -> Self {
        Self {
            shape: ShapeKind::from_name(shape),
            neighborhood: NeighborhoodKind::from_name(neighborhood),
            edge: EdgeKind::from_name(edge),
        }
    }

    pub fn from_config(config: &TopologyConfig) -> Self {
        Self::from_names(&config.shape, &config.neighborhood, &config.edge)
    }

    /// The shape's offsets at `(row, col)` narrowed by the neighborhood filter.
    pub fn offsets(&self, row: isize, col: isize) -> Vec<Offset> {
        self.neighborhood
            .select(self.shape.neighbor_offsets(row, col))
    }
}
