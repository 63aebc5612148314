//! Per-family symbol tables.
//!
//! Every family parses only its own symbols, so `B` can mean Burning in a fire
//! grid and Blue in a segregation grid without ambiguity.

use crate::error::{EngineError, Result};
pub use cellula_data::{
    FireState, LifeState, PercolationState, SegregationState, SugarState, WatorState,
};
use std::fmt::Debug;
use std::hash::Hash;

pub trait CellState: Copy + Eq + Hash + Debug + Default + Send + Sync + 'static {
    /// Human-readable family name, used in error messages.
    fn family_name() -> &'static str;

    /// Every variant of the family.
    fn variants() -> &'static [Self];

    /// Short configuration symbol.
    fn symbol(&self) -> &'static str;

    /// Full variant name, also accepted by the parser.
    fn name(&self) -> &'static str;

    /// State given to cells created by grid growth.
    fn background() -> Self {
        Self::default()
    }

    /// Parses a symbol or full name, ignoring case and surrounding whitespace.
    fn parse_symbol(raw: &str) -> Result<Self> {
        let wanted = raw.trim();
        Self::variants()
            .iter()
            .copied()
            .find(|v| {
                v.symbol().eq_ignore_ascii_case(wanted) || v.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| {
                let known: Vec<&str> = Self::variants().iter().map(|v| v.symbol()).collect();
                EngineError::configuration(format!(
                    "symbol {raw:?} is not a {} state (expected one of {})",
                    Self::family_name(),
                    known.join(", ")
                ))
            })
    }
}

impl CellState for LifeState {
    fn family_name() -> &'static str {
        "life"
    }

    fn variants() -> &'static [Self] {
        &[LifeState::Alive, LifeState::Dead]
    }

    fn symbol(&self) -> &'static str {
        match self {
            LifeState::Alive => "A",
            LifeState::Dead => "D",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LifeState::Alive => "alive",
            LifeState::Dead => "dead",
        }
    }
}

impl CellState for FireState {
    fn family_name() -> &'static str {
        "fire"
    }

    fn variants() -> &'static [Self] {
        &[FireState::Empty, FireState::Tree, FireState::Burning]
    }

    fn symbol(&self) -> &'static str {
        match self {
            FireState::Empty => "E",
            FireState::Tree => "T",
            FireState::Burning => "B",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FireState::Empty => "empty",
            FireState::Tree => "tree",
            FireState::Burning => "burning",
        }
    }
}

impl CellState for PercolationState {
    fn family_name() -> &'static str {
        "percolation"
    }

    fn variants() -> &'static [Self] {
        &[
            PercolationState::Blocked,
            PercolationState::Open,
            PercolationState::Percolated,
        ]
    }

    fn symbol(&self) -> &'static str {
        match self {
            PercolationState::Blocked => "B",
            PercolationState::Open => "O",
            PercolationState::Percolated => "P",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            PercolationState::Blocked => "blocked",
            PercolationState::Open => "open",
            PercolationState::Percolated => "percolated",
        }
    }
}

impl CellState for SegregationState {
    fn family_name() -> &'static str {
        "segregation"
    }

    fn variants() -> &'static [Self] {
        &[
            SegregationState::Red,
            SegregationState::Blue,
            SegregationState::Empty,
        ]
    }

    fn symbol(&self) -> &'static str {
        match self {
            SegregationState::Red => "R",
            SegregationState::Blue => "B",
            SegregationState::Empty => "E",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SegregationState::Red => "red",
            SegregationState::Blue => "blue",
            SegregationState::Empty => "empty",
        }
    }
}

impl CellState for WatorState {
    fn family_name() -> &'static str {
        "wa-tor"
    }

    fn variants() -> &'static [Self] {
        &[WatorState::Fish, WatorState::Shark, WatorState::Water]
    }

    fn symbol(&self) -> &'static str {
        match self {
            WatorState::Fish => "F",
            WatorState::Shark => "S",
            WatorState::Water => "W",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            WatorState::Fish => "fish",
            WatorState::Shark => "shark",
            WatorState::Water => "water",
        }
    }
}

impl CellState for SugarState {
    fn family_name() -> &'static str {
        "sugarscape"
    }

    fn variants() -> &'static [Self] {
        &[SugarState::Patch, SugarState::Occupied]
    }

    fn symbol(&self) -> &'static str {
        match self {
            SugarState::Patch => "P",
            SugarState::Occupied => "O",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SugarState::Patch => "patch",
            SugarState::Occupied => "occupied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip_per_family() {
        for v in FireState::variants() {
            assert_eq!(FireState::parse_symbol(v.symbol()).unwrap(), *v);
        }
        for v in WatorState::variants() {
            assert_eq!(WatorState::parse_symbol(v.name()).unwrap(), *v);
        }
    }

    #[test]
    fn test_shared_letters_resolve_per_family() {
        assert_eq!(FireState::parse_symbol("B").unwrap(), FireState::Burning);
        assert_eq!(
            SegregationState::parse_symbol("b").unwrap(),
            SegregationState::Blue
        );
        assert_eq!(
            PercolationState::parse_symbol(" B ").unwrap(),
            PercolationState::Blocked
        );
    }

    #[test]
    fn test_out_of_family_symbol_rejected() {
        let err = LifeState::parse_symbol("T").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("life"));
        assert!(WatorState::parse_symbol("A").is_err());
    }

    #[test]
    fn test_background_states() {
        assert_eq!(LifeState::background(), LifeState::Dead);
        assert_eq!(FireState::background(), FireState::Empty);
        assert_eq!(PercolationState::background(), PercolationState::Blocked);
        assert_eq!(SegregationState::background(), SegregationState::Empty);
        assert_eq!(WatorState::background(), WatorState::Water);
        assert_eq!(SugarState::background(), SugarState::Patch);
    }
}
