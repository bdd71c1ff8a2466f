mod eval;

pub use eval::{PUSH_THRESHOLD, best_contract, contract_strength};

use crate::policy::{HeuristicPolicy, LowestCardPolicy, RandomPolicy};
use core::fmt;
use jass_core::game::policy::{Policy, PolicyTable};
use jass_core::model::mode::Mode;
use std::str::FromStr;
use thiserror::Error;

/// Seat controller selectable from the command line or a table config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotKind {
    Lowest,
    Random,
    Heuristic,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown player kind `{0}` (expected lowest, random or heuristic)")]
pub struct BotKindError(pub String);

impl BotKind {
    pub const ALL: [BotKind; 3] = [BotKind::Lowest, BotKind::Random, BotKind::Heuristic];

    pub const fn as_str(self) -> &'static str {
        match self {
            BotKind::Lowest => "lowest",
            BotKind::Random => "random",
            BotKind::Heuristic => "heuristic",
        }
    }

    /// Builds the policy for one seat. `seed` only matters for random play.
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            BotKind::Lowest => Box::new(LowestCardPolicy::new(Mode::Obeabe)),
            BotKind::Random => Box::new(RandomPolicy::with_seed(seed)),
            BotKind::Heuristic => Box::new(HeuristicPolicy::new()),
        }
    }
}

impl FromStr for BotKind {
    type Err = BotKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowest" | "low" => Ok(BotKind::Lowest),
            "random" | "rand" => Ok(BotKind::Random),
            "heuristic" | "normal" => Ok(BotKind::Heuristic),
            other => Err(BotKindError(other.to_string())),
        }
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One policy per seat; random seats get distinct seeds derived from `seed`.
pub fn build_table(kinds: &[BotKind; 4], seed: u64) -> PolicyTable {
    std::array::from_fn(|seat| kinds[seat].build(seed.wrapping_add(seat as u64)))
}
