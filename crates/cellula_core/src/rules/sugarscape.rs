//! Sugarscape foraging.
//!
//! Every cell sits on a sugar patch. Patches grow back on their own schedule;
//! agents look along the four cardinal rays, walk to the richest free patch
//! in sight, harvest all of it and burn their metabolism.

use crate::agent::{AgentLogic, PatchSight};
use crate::config::Parameters;
use crate::error::{EngineError, Result};
use crate::grid::Lattice;
use crate::metrics::Metrics;
use crate::rules::{Populated, Ruleset, UpdateMode};
use crate::state::{CellState, SugarState};
use cellula_data::{CellId, Family, Patch, SugarAgent};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

const RAYS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SugarscapeRules {
    pub grow_back_rate: u32,
    pub grow_back_interval: u32,
    pub max_capacity: u32,
    pub agent_sugar: u32,
    pub agent_metabolism: u32,
    pub agent_vision: u32,
    /// Generations run so far, driving the grow-back schedule.
    tick: u64,
}

impl Default for SugarscapeRules {
    fn default() -> Self {
        Self {
            grow_back_rate: 1,
            grow_back_interval: 1,
            max_capacity: 4,
            agent_sugar: 5,
            agent_metabolism: 1,
            agent_vision: 2,
            tick: 0,
        }
    }
}

impl SugarscapeRules {
    pub fn from_parameters(params: &Parameters) -> Self {
        let d = Self::default();
        Self {
            grow_back_rate: params.count("sugarGrowBackRate", d.grow_back_rate),
            grow_back_interval: params.count("sugarGrowBackInterval", d.grow_back_interval),
            max_capacity: params.count("sugarMaxCapacity", d.max_capacity),
            agent_sugar: params.count("agentSugar", d.agent_sugar),
            agent_metabolism: params.count("agentMetabolism", d.agent_metabolism),
            agent_vision: params.count("agentVision", d.agent_vision),
            tick: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn patch(&self, capacity: u32) -> Patch {
        Patch::new(capacity, self.grow_back_rate, self.grow_back_interval)
    }

    pub fn new_agent(&self) -> SugarAgent {
        SugarAgent::new(self.agent_sugar, self.agent_metabolism, self.agent_vision)
    }

    fn grow_back(&self, lattice: &mut Lattice<Self>, tick: u64) {
        for cell in lattice.cells_mut() {
            let patch = &mut cell.site;
            if patch.grow_back_interval > 0 && tick % u64::from(patch.grow_back_interval) == 0 {
                patch.sugar = patch
                    .sugar
                    .saturating_add(patch.grow_back_rate)
                    .min(patch.max_capacity);
            }
        }
    }

    fn check_agents(lattice: &Lattice<Self>) -> Result<()> {
        for cell in lattice.cells() {
            let occupied = cell.current == SugarState::Occupied;
            if occupied != cell.agent.is_some() {
                return Err(EngineError::invalid_state(format!(
                    "cell {} is {:?} but holds {:?}",
                    cell.id, cell.current, cell.agent
                )));
            }
        }
        Ok(())
    }

    /// Free patches along the cardinal rays of `id`, nearest first per ray.
    /// A patch reachable along several rays is listed once, at its shortest
    /// distance.
    fn visible(&self, lattice: &Lattice<Self>, id: CellId, vision: u32) -> Vec<(CellId, PatchSight)> {
        let (row, col) = lattice.position(id);
        let reach = (vision as usize).min(lattice.rows().max(lattice.columns()));
        let mut seen: Vec<(CellId, PatchSight)> = Vec::new();

        for (dr, dc) in RAYS {
            for step in 1..=reach {
                let r = row as isize + dr * step as isize;
                let c = col as isize + dc * step as isize;
                let Some(target) = lattice.locate(r, c) else {
                    break;
                };
                let cell = lattice.cell(target);
                if target == id || cell.agent.is_some() || cell.is_claimed() {
                    continue;
                }
                let sight = PatchSight {
                    sugar: cell.site.sugar,
                    distance: step as u32,
                };
                match seen.iter_mut().find(|(t, _)| *t == target) {
                    Some((_, known)) if known.distance > sight.distance => *known = sight,
                    Some(_) => {}
                    None => seen.push((target, sight)),
                }
            }
        }
        seen
    }

    fn forage(&self, lattice: &mut Lattice<Self>, id: CellId, tally: &mut Tally) -> Result<()> {
        let mut agent = match lattice.cell(id).agent {
            Some(agent) if !agent.has_moved() && !lattice.cell(id).is_claimed() => agent,
            _ => return Ok(()),
        };

        let visible = self.visible(lattice, id, agent.vision);
        let sights: Vec<PatchSight> = visible.iter().map(|(_, s)| *s).collect();
        let destination = match agent.choose_move(&sights) {
            Some(choice) => {
                let target = visible[choice].0;
                lattice.transfer_agent(id, target)?;
                lattice.claim(id, SugarState::Patch)?;
                tally.moves += 1;
                target
            }
            // Nothing better in sight: stay and eat what is here.
            None => id,
        };

        let patch = &mut lattice.cell_mut(destination).site;
        agent.sugar = agent.sugar.saturating_add(patch.sugar);
        tally.harvested += u64::from(patch.sugar);
        patch.sugar = 0;
        agent.sugar = agent.sugar.saturating_sub(agent.metabolism);
        agent.moved = true;

        if agent.sugar == 0 {
            lattice.cell_mut(destination).agent = None;
            lattice.claim(destination, SugarState::Patch)?;
            tally.deaths += 1;
        } else {
            lattice.cell_mut(destination).agent = Some(agent);
            lattice.claim(destination, SugarState::Occupied)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Tally {
    moves: u64,
    deaths: u64,
    harvested: u64,
}

impl Ruleset for SugarscapeRules {
    type State = SugarState;
    type Agent = SugarAgent;
    type Site = Patch;

    const MODE: UpdateMode = UpdateMode::WholeGrid;

    fn family(&self) -> Family {
        Family::Sugarscape
    }

    fn background_site(&self) -> Patch {
        self.patch(self.max_capacity)
    }

    fn populate(&self, state: SugarState) -> (Option<SugarAgent>, Patch) {
        let agent = (state == SugarState::Occupied).then(|| self.new_agent());
        (agent, self.background_site())
    }

    /// `P`/`O`, optionally followed by the patch's capacity (`P3`, `O0`).
    fn parse_cell(&self, symbol: &str) -> Result<Populated<Self>> {
        let symbol = symbol.trim();
        let split = symbol
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(symbol.len());
        let (name, digits) = symbol.split_at(split);
        let state = SugarState::parse_symbol(name)?;
        let (agent, mut site) = self.populate(state);
        if !digits.is_empty() {
            let capacity = digits.parse::<u32>().map_err(|_| {
                EngineError::configuration(format!("bad patch capacity in {symbol:?}"))
            })?;
            site = self.patch(capacity);
        }
        Ok((state, agent, site))
    }

    fn advance_all(
        &mut self,
        lattice: &mut Lattice<Self>,
        rng: &mut ChaCha8Rng,
        metrics: &Metrics,
    ) -> Result<()> {
        Self::check_agents(lattice)?;
        let tick = self.tick + 1;
        self.grow_back(lattice, tick);

        for cell in lattice.cells_mut() {
            if let Some(agent) = cell.agent.as_mut() {
                agent.begin_turn();
            }
        }

        let mut movers: Vec<CellId> = (0..lattice.len())
            .filter(|id| lattice.cell(*id).agent.is_some())
            .collect();
        movers.shuffle(rng);

        let mut tally = Tally::default();
        for id in movers {
            self.forage(lattice, id, &mut tally)?;
        }

        metrics.add_to_counter("moves", tally.moves);
        metrics.add_to_counter("deaths", tally.deaths);
        metrics.add_to_counter("harvested", tally.harvested);
        self.tick = tick;
        Ok(())
    }
}
