use serde::{Deserialize, Serialize};

/// Wa-Tor prey. Breeds on a fixed period and has no energy budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fish {
    /// Moves left before the next offspring.
    pub reproduction_countdown: u32,
    /// Countdown value restored after breeding.
    pub reproduction_period: u32,
    #[serde(skip)]
    pub moved: bool,
}

impl Fish {
    pub fn new(reproduction_period: u32) -> Self {
        Self {
            reproduction_countdown: reproduction_period,
            reproduction_period,
            moved: false,
        }
    }
}

/// Wa-Tor predator. Starves when its energy reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shark {
    pub energy: u32,
    pub reproduction_countdown: u32,
    pub reproduction_period: u32,
    /// Energy gained from each fish eaten.
    pub energy_gain_per_fish: u32,
    #[serde(skip)]
    pub moved: bool,
}

impl Shark {
    pub fn new(energy: u32, reproduction_period: u32, energy_gain_per_fish: u32) -> Self {
        Self {
            energy,
            reproduction_countdown: reproduction_period,
            reproduction_period,
            energy_gain_per_fish,
            moved: false,
        }
    }
}

/// Agent carried by a Wa-Tor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatorAgent {
    Fish(Fish),
    Shark(Shark),
}

/// Sugarscape forager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SugarAgent {
    /// Sugar carried. The agent dies when it runs out.
    pub sugar: u32,
    /// Sugar burned per generation.
    pub metabolism: u32,
    /// How far the agent looks along each cardinal ray.
    pub vision: u32,
    #[serde(skip)]
    pub moved: bool,
}

impl SugarAgent {
    pub fn new(sugar: u32, metabolism: u32, vision: u32) -> Self {
        Self {
            sugar,
            metabolism,
            vision,
            moved: false,
        }
    }
}

/// Sugar-bearing ground under every Sugarscape cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Patch {
    pub sugar: u32,
    pub max_capacity: u32,
    /// Sugar added per grow-back event.
    pub grow_back_rate: u32,
    /// Generations between grow-back events.
    pub grow_back_interval: u32,
}

impl Patch {
    /// A full patch.
    pub fn new(max_capacity: u32, grow_back_rate: u32, grow_back_interval: u32) -> Self {
        Self {
            sugar: max_capacity,
            max_capacity,
            grow_back_rate,
            grow_back_interval,
        }
    }
}
