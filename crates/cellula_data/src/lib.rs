//! Plain data records for the cellula engine.
//!
//! Nothing in this crate knows how a generation is computed. The logic lives in
//! `cellula_core`, attached to these types through `*Logic` traits.

pub mod data;

pub use data::agent::{Fish, Patch, Shark, SugarAgent, WatorAgent};
pub use data::cell::{Cell, CellId, NoAgent, Offset};
pub use data::state::{
    FireState, LifeState, PercolationState, SegregationState, SugarState, WatorState,
};
pub use data::topology::{EdgeKind, Family, NeighborhoodKind, ShapeKind};
