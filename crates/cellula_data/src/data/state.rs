use serde::{Deserialize, Serialize};

/// Cell state for Conway and generalized (life-like) automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LifeState {
    /// Live cell.
    Alive,
    /// Dead cell, the background.
    #[default]
    Dead,
}

/// Cell state for the forest fire model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FireState {
    /// Bare ground, the background.
    #[default]
    Empty,
    /// Living tree.
    Tree,
    /// Tree on fire; burns out next generation.
    Burning,
}

/// Cell state for site percolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PercolationState {
    /// Closed site, the background.
    #[default]
    Blocked,
    /// Open site not yet reached.
    Open,
    /// Open site reached by the fluid.
    Percolated,
}

/// Cell state for Schelling segregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SegregationState {
    Red,
    Blue,
    /// Vacant lot, the background.
    #[default]
    Empty,
}

/// Cell state for the Wa-Tor predator/prey model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WatorState {
    Fish,
    Shark,
    /// Open water, the background.
    #[default]
    Water,
}

/// Cell state for Sugarscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SugarState {
    /// Patch with no agent on it, the background.
    #[default]
    Patch,
    /// Patch carrying an agent.
    Occupied,
}
