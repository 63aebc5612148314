//! # Cellula
//!
//! Headless runner and public facade for the cellula cellular-automaton engine.

pub mod model;
pub mod runner;
