//! Core data structures for the cellula engine.

pub mod agent;
pub mod cell;
pub mod state;
pub mod topology;
