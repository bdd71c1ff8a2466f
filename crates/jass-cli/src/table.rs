use anyhow::{Context, Result};
use jass_bot::build_table;
use jass_core::game::policy::run_bidding;
use jass_core::game::replay::{ReplayData, ReplayMode, replay_game};
use jass_core::game::round::play_round;
use jass_core::model::deck;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;
use std::path::{Path, PathBuf};
use tracing::{Level, event};

use crate::config::TableConfig;

/// What a finished deal reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub seed: u64,
    pub mode: Mode,
    /// Seat that named the contract, `None` for a fixed contract.
    pub chooser: Option<PlayerPosition>,
    pub team_points: [u32; 2],
    pub replay_path: Option<PathBuf>,
}

/// Plays one deal with the configured seats, bidding first when the config
/// fixes no contract. Writes a replay file when `replay_out` is given.
pub fn play_table(config: &TableConfig, replay_out: Option<&Path>) -> Result<TableSummary> {
    let kinds = config.player_kinds()?;
    let leader = config.leader_position()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut policies = build_table(&kinds, seed);

    let (mode, chooser) = match config.contract()? {
        Some(mode) => (mode, None),
        None => {
            let hands = deck::deal(seed);
            let bid = run_bidding(&mut policies, leader, &hands).context("bidding failed")?;
            (bid.mode, Some(bid.chooser))
        }
    };

    let result = play_round(&mut policies, mode, seed, leader, &config.rules)
        .with_context(|| format!("playing deal {seed} as {mode}"))?;
    event!(
        target: "jass_cli",
        Level::INFO,
        seed,
        mode = %mode,
        players = ?kinds,
        "table finished"
    );

    let replay_path = match replay_out {
        Some(path) => {
            ReplayData::from_round(&result, seed, leader, config.rules)
                .save(path)
                .with_context(|| format!("writing replay to {}", path.display()))?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(TableSummary {
        seed,
        mode,
        chooser,
        team_points: result.state.team_points(),
        replay_path,
    })
}

/// Loads a replay file and re-applies it through the engine.
pub fn replay_file(path: &Path, mode: ReplayMode) -> Result<[u32; 2]> {
    let replay = ReplayData::load(path)
        .with_context(|| format!("loading replay from {}", path.display()))?;
    let state = replay_game(&replay, mode)
        .with_context(|| format!("replaying {}", path.display()))?;
    Ok(state.team_points())
}
