//! Life-like automata with arbitrary birth and survival counts.

use crate::config::Parameters;
use crate::error::Result;
use crate::grid::Neighbors;
use crate::rules::{CellOf, Ruleset, UpdateMode};
use crate::state::LifeState;
use cellula_data::{Family, NoAgent};
use rand_chacha::ChaCha8Rng;
use std::fmt;

const PRESETS: &[(&str, &str)] = &[
    ("life", "B3/S23"),
    ("conway", "B3/S23"),
    ("highlife", "B36/S23"),
    ("seeds", "B2/S"),
    ("day_and_night", "B3678/S34678"),
    ("daynight", "B3678/S34678"),
    ("maze", "B3/S12345"),
    ("diamoeba", "B35678/S5678"),
];

/// Birth and survival neighbor counts, one bit per count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleString {
    birth: u16,
    survive: u16,
}

impl Default for RuleString {
    fn default() -> Self {
        Self::life()
    }
}

impl RuleString {
    /// B3/S23.
    pub fn life() -> Self {
        Self::from_counts(&[3], &[2, 3])
    }

    pub fn from_counts(birth: &[u8], survive: &[u8]) -> Self {
        let mask = |counts: &[u8]| {
            counts
                .iter()
                .filter(|c| **c < 16)
                .fold(0u16, |acc, c| acc | (1 << c))
        };
        Self {
            birth: mask(birth),
            survive: mask(survive),
        }
    }

    pub fn born(&self, count: usize) -> bool {
        count < 16 && self.birth & (1 << count) != 0
    }

    pub fn survives(&self, count: usize) -> bool {
        count < 16 && self.survive & (1 << count) != 0
    }

    /// Parses `B3/S23`, `S23/B3`, the classic `23/3` or a preset name.
    pub fn parse(raw: &str) -> Option<Self> {
        let text: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        if let Some((_, rule)) = PRESETS.iter().find(|(name, _)| *name == text) {
            return Self::parse(rule);
        }

        let (first, second) = text.split_once('/')?;
        if text.contains('b') || text.contains('s') {
            let mut birth = None;
            let mut survive = None;
            for part in [first, second] {
                let slot = match part.chars().next()? {
                    'b' => &mut birth,
                    's' => &mut survive,
                    _ => return None,
                };
                if slot.is_some() {
                    return None;
                }
                *slot = Some(digits(&part[1..])?);
            }
            Some(Self::from_counts(&birth?, &survive?))
        } else {
            // Classic notation lists survival first.
            Some(Self::from_counts(&digits(second)?, &digits(first)?))
        }
    }

    /// Parses `raw`, falling back to B3/S23 with a warning.
    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            tracing::warn!(rule = raw, "Malformed rule string, using B3/S23");
            Self::life()
        })
    }

    fn counts(mask: u16) -> impl Iterator<Item = u8> {
        (0..16u8).filter(move |c| mask & (1 << c) != 0)
    }
}

fn digits(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

impl fmt::Display for RuleString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for c in Self::counts(self.birth) {
            write!(f, "{c}")?;
        }
        write!(f, "/S")?;
        for c in Self::counts(self.survive) {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Generalized Conway automaton driven by a [`RuleString`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LifeLikeRules {
    pub rule: RuleString,
}

impl LifeLikeRules {
    pub fn new(rule: RuleString) -> Self {
        Self { rule }
    }

    /// Reads the `rule` parameter.
    pub fn from_parameters(params: &Parameters) -> Self {
        Self::new(RuleString::resolve(&params.text("rule", "B3/S23")))
    }
}

impl Ruleset for LifeLikeRules {
    type State = LifeState;
    type Agent = NoAgent;
    type Site = ();

    const MODE: UpdateMode = UpdateMode::PerCell;

    fn family(&self) -> Family {
        Family::GeneralizedConway
    }

    fn transition(
        &self,
        cell: &CellOf<Self>,
        neighbors: &Neighbors<'_, Self>,
        _rng: &mut ChaCha8Rng,
    ) -> Result<LifeState> {
        let alive = neighbors.count(LifeState::Alive);
        let lives = match cell.current {
            LifeState::Dead => self.rule.born(alive),
            LifeState::Alive => self.rule.survives(alive),
        };
        Ok(if lives {
            LifeState::Alive
        } else {
            LifeState::Dead
        })
    }
}
