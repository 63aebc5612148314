//! Behavior of mobile agents.
//!
//! Agents are plain records in `cellula_data`; what they prefer and how they
//! report their budgets is attached here. The rulesets own all grid effects
//! (claims, transfers, births and deaths).

use crate::state::WatorState;
use cellula_data::{SugarAgent, WatorAgent};

pub trait AgentLogic {
    /// What the agent can see of one candidate destination.
    type Sight;

    /// Index of the preferred candidate, or `None` if none is acceptable.
    fn choose_move(&self, candidates: &[Self::Sight]) -> Option<usize>;

    fn has_moved(&self) -> bool;

    /// Remaining energy, for agents that have an energy budget.
    fn energy_level(&self) -> Option<u32>;

    /// Moves left before the next offspring, for agents that breed.
    fn reproduction_countdown(&self) -> Option<u32>;

    /// Clears per-generation flags.
    fn begin_turn(&mut self);
}

impl AgentLogic for WatorAgent {
    type Sight = WatorState;

    fn choose_move(&self, candidates: &[WatorState]) -> Option<usize> {
        let first = |wanted: WatorState| candidates.iter().position(|s| *s == wanted);
        match self {
            WatorAgent::Shark(_) => first(WatorState::Fish).or_else(|| first(WatorState::Water)),
            WatorAgent::Fish(_) => first(WatorState::Water),
        }
    }

    fn has_moved(&self) -> bool {
        match self {
            WatorAgent::Fish(f) => f.moved,
            WatorAgent::Shark(s) => s.moved,
        }
    }

    fn energy_level(&self) -> Option<u32> {
        match self {
            WatorAgent::Fish(_) => None,
            WatorAgent::Shark(s) => Some(s.energy),
        }
    }

    fn reproduction_countdown(&self) -> Option<u32> {
        match self {
            WatorAgent::Fish(f) => Some(f.reproduction_countdown),
            WatorAgent::Shark(s) => Some(s.reproduction_countdown),
        }
    }

    fn begin_turn(&mut self) {
        match self {
            WatorAgent::Fish(f) => f.moved = false,
            WatorAgent::Shark(s) => s.moved = false,
        }
    }
}

/// A patch as a forager sees it along one of its rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchSight {
    pub sugar: u32,
    pub distance: u32,
}

impl AgentLogic for SugarAgent {
    type Sight = PatchSight;

    /// Most sugar wins; ties go to the nearest patch, then to the first seen.
    fn choose_move(&self, candidates: &[PatchSight]) -> Option<usize> {
        candidates
            .iter()
            .enumerate()
            .filter(|(_, s)| s.distance <= self.vision)
            .min_by_key(|(i, s)| (std::cmp::Reverse(s.sugar), s.distance, *i))
            .map(|(i, _)| i)
    }

    fn has_moved(&self) -> bool {
        self.moved
    }

    fn energy_level(&self) -> Option<u32> {
        Some(self.sugar)
    }

    fn reproduction_countdown(&self) -> Option<u32> {
        None
    }

    fn begin_turn(&mut self) {
        self.moved = false;
    }
}
