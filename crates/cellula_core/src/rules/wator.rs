//! Wa-Tor predator/prey dynamics.
//!
//! Every generation runs a shark pass and then a fish pass, each over the
//! movers in random order. A destination is taken by claiming its next state,
//! so the first claimant wins and later movers only see unclaimed cells.

use crate::agent::AgentLogic;
use crate::config::Parameters;
use crate::error::{EngineError, Result};
use crate::grid::Lattice;
use crate::metrics::Metrics;
use crate::rules::{Ruleset, UpdateMode};
use crate::state::WatorState;
use cellula_data::{CellId, Family, Fish, Shark, WatorAgent};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatorRules {
    pub fish_breed_time: u32,
    pub shark_breed_time: u32,
    pub shark_start_energy: u32,
    pub energy_gain_per_fish: u32,
}

impl Default for WatorRules {
    fn default() -> Self {
        Self {
            fish_breed_time: 3,
            shark_breed_time: 10,
            shark_start_energy: 5,
            energy_gain_per_fish: 2,
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    moves: u64,
    eaten: u64,
    births: u64,
    deaths: u64,
}

fn species(agent: &WatorAgent) -> WatorState {
    match agent {
        WatorAgent::Fish(_) => WatorState::Fish,
        WatorAgent::Shark(_) => WatorState::Shark,
    }
}

/// Counts one move down; true when the countdown expired and was reset.
fn breeds(countdown: &mut u32, period: u32) -> bool {
    *countdown = countdown.saturating_sub(1);
    if *countdown == 0 {
        *countdown = period;
        true
    } else {
        false
    }
}

impl WatorRules {
    pub fn from_parameters(params: &Parameters) -> Self {
        let d = Self::default();
        Self {
            fish_breed_time: params.count("fishBreedTime", d.fish_breed_time),
            shark_breed_time: params.count("sharkBreedTime", d.shark_breed_time),
            shark_start_energy: params.count("sharkStartEnergy", d.shark_start_energy),
            energy_gain_per_fish: params.count("energyGainPerFish", d.energy_gain_per_fish),
        }
    }

    pub fn new_fish(&self) -> WatorAgent {
        WatorAgent::Fish(Fish::new(self.fish_breed_time))
    }

    pub fn new_shark(&self) -> WatorAgent {
        WatorAgent::Shark(Shark::new(
            self.shark_start_energy,
            self.shark_breed_time,
            self.energy_gain_per_fish,
        ))
    }

    /// Applies one completed move to an agent. Returns the agent if it
    /// survived and the offspring it leaves behind, if any.
    fn after_move(&self, agent: WatorAgent, ate: bool) -> (Option<WatorAgent>, Option<WatorAgent>) {
        match agent {
            WatorAgent::Fish(mut fish) => {
                fish.moved = true;
                let baby = breeds(&mut fish.reproduction_countdown, fish.reproduction_period)
                    .then(|| {
                        WatorAgent::Fish(Fish {
                            moved: true,
                            ..Fish::new(fish.reproduction_period)
                        })
                    });
                (Some(WatorAgent::Fish(fish)), baby)
            }
            WatorAgent::Shark(mut shark) => {
                shark.moved = true;
                shark.energy = if ate {
                    shark
                        .energy
                        .saturating_add(shark.energy_gain_per_fish)
                        .saturating_sub(1)
                } else {
                    shark.energy.saturating_sub(1)
                };
                if shark.energy == 0 {
                    return (None, None);
                }
                let baby = breeds(&mut shark.reproduction_countdown, shark.reproduction_period)
                    .then(|| {
                        WatorAgent::Shark(Shark {
                            moved: true,
                            ..Shark::new(
                                self.shark_start_energy,
                                shark.reproduction_period,
                                shark.energy_gain_per_fish,
                            )
                        })
                    });
                (Some(WatorAgent::Shark(shark)), baby)
            }
        }
    }

    fn check_agents(lattice: &Lattice<Self>) -> Result<()> {
        for cell in lattice.cells() {
            let consistent = match (&cell.agent, cell.current) {
                (None, WatorState::Water) => true,
                (Some(agent), state) => species(agent) == state,
                (None, _) => false,
            };
            if !consistent {
                return Err(EngineError::invalid_state(format!(
                    "cell {} is {:?} but holds {:?}",
                    cell.id, cell.current, cell.agent
                )));
            }
        }
        Ok(())
    }

    fn act(
        &self,
        lattice: &mut Lattice<Self>,
        id: CellId,
        rng: &mut ChaCha8Rng,
        tally: &mut Tally,
    ) -> Result<()> {
        let cell = lattice.cell(id);
        let agent = match cell.agent {
            Some(agent) if !agent.has_moved() && !cell.is_claimed() => agent,
            _ => return Ok(()),
        };

        let mut candidates = lattice.neighbor_ids(id);
        candidates.retain(|n| *n != id && !lattice.cell(*n).is_claimed());
        candidates.shuffle(rng);
        let sights: Vec<WatorState> = candidates.iter().map(|n| lattice.cell(*n).current).collect();

        let Some(choice) = agent.choose_move(&sights) else {
            // Nowhere to go: the agent dies where it stands.
            lattice.cell_mut(id).agent = None;
            lattice.claim(id, WatorState::Water)?;
            tally.deaths += 1;
            return Ok(());
        };

        let target = candidates[choice];
        let ate = sights[choice] == WatorState::Fish;
        lattice.transfer_agent(id, target)?;
        tally.moves += 1;
        if ate {
            tally.eaten += 1;
            tally.deaths += 1;
        }

        let (survivor, baby) = self.after_move(agent, ate);
        let arrived = survivor.as_ref().map_or(WatorState::Water, species);
        lattice.cell_mut(target).agent = survivor;
        lattice.claim(target, arrived)?;
        if survivor.is_none() {
            tally.deaths += 1;
        }

        let left = baby.as_ref().map_or(WatorState::Water, species);
        lattice.cell_mut(id).agent = baby;
        lattice.claim(id, left)?;
        if baby.is_some() {
            tally.births += 1;
        }
        Ok(())
    }
}

impl Ruleset for WatorRules {
    type State = WatorState;
    type Agent = WatorAgent;
    type Site = ();

    const MODE: UpdateMode = UpdateMode::WholeGrid;

    fn family(&self) -> Family {
        Family::WaTor
    }

    fn populate(&self, state: WatorState) -> (Option<WatorAgent>, ()) {
        let agent = match state {
            WatorState::Fish => Some(self.new_fish()),
            WatorState::Shark => Some(self.new_shark()),
            WatorState::Water => None,
        };
        (agent, ())
    }

    fn advance_all(
        &mut self,
        lattice: &mut Lattice<Self>,
        rng: &mut ChaCha8Rng,
        metrics: &Metrics,
    ) -> Result<()> {
        Self::check_agents(lattice)?;
        for cell in lattice.cells_mut() {
            if let Some(agent) = cell.agent.as_mut() {
                agent.begin_turn();
            }
        }

        let mut tally = Tally::default();
        // Sharks get first refusal on prey before fish scatter.
        for pass in [WatorState::Shark, WatorState::Fish] {
            let mut movers: Vec<CellId> = (0..lattice.len())
                .filter(|id| lattice.cell(*id).current == pass)
                .collect();
            movers.shuffle(rng);
            for id in movers {
                self.act(lattice, id, rng, &mut tally)?;
            }
        }

        metrics.add_to_counter("moves", tally.moves);
        metrics.add_to_counter("eaten", tally.eaten);
        metrics.add_to_counter("births", tally.births);
        metrics.add_to_counter("deaths", tally.deaths);
        Ok(())
    }
}
