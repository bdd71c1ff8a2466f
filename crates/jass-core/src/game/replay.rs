//! Replay files: seed, contract and the ordered play log of one deal.
//!
//! Plays are stored as `[seat, suit, rank]` triples so files stay readable,
//! e.g. `[0, "rosen", "J"]`.

use crate::game::round::RoundResult;
use crate::game::state::{GameState, PlayError, TRICKS_PER_DEAL};
use crate::model::card::{Card, CardError};
use crate::model::mode::{Mode, ModeError};
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::model::trick::Play;
use crate::rules::ruleset::{Ruleset, RulesetConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const PLAYS_PER_DEAL: usize = TRICKS_PER_DEAL * 4;

pub type PlayEntry = (usize, String, String);

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("invalid card in play log entry {index}")]
    Card {
        index: usize,
        #[source]
        source: CardError,
    },
    #[error("invalid seat {seat} in play log entry {index}")]
    InvalidSeat { index: usize, seat: usize },
    #[error("invalid leader seat {0}")]
    InvalidLeader(usize),
    #[error(transparent)]
    Mode(#[from] ModeError),
    #[error("play log has {found} plays, expected {expected}")]
    Length { expected: usize, found: usize },
    #[error("replay order mismatch at play {index}: expected {expected}, got {actual}")]
    OrderMismatch {
        index: usize,
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("play {index} rejected")]
    Play {
        index: usize,
        #[source]
        source: PlayError,
    },
    #[error("weis announcement rejected")]
    Announcement(#[source] PlayError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How strictly the logged seat order is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplayMode {
    /// Every play must come from the seat whose turn it is.
    #[default]
    Strict,
    /// Plays are applied in log order; all other rules still hold.
    Relaxed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayData {
    pub mode: Mode,
    pub leader: PlayerPosition,
    pub seed: u64,
    pub play_log: Vec<Play>,
    pub rules: RulesetConfig,
    pub declared_weis: [bool; 4],
}

#[derive(Debug, Serialize, Deserialize)]
struct ReplayFile {
    mode: String,
    #[serde(default)]
    trump_suit: Option<Suit>,
    leader: usize,
    seed: u64,
    #[serde(default = "legacy_rules")]
    rules: RulesetConfig,
    #[serde(default)]
    declared_weis: [bool; 4],
    play_log: Vec<PlayEntry>,
}

/// Files written before rules were recorded scored card points only.
fn legacy_rules() -> RulesetConfig {
    RulesetConfig::cards_only(Ruleset::STANDARD)
}

pub fn encode_play_log(play_log: &[Play]) -> Vec<PlayEntry> {
    play_log
        .iter()
        .map(|play| {
            (
                play.position.index(),
                play.card.suit.as_str().to_string(),
                play.card.rank.as_str().to_string(),
            )
        })
        .collect()
}

pub fn decode_play_log(entries: &[PlayEntry]) -> Result<Vec<Play>, ReplayError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (seat, suit, rank))| {
            let position = PlayerPosition::from_index(*seat).ok_or(ReplayError::InvalidSeat {
                index,
                seat: *seat,
            })?;
            let card =
                Card::parse(suit, rank).map_err(|source| ReplayError::Card { index, source })?;
            Ok(Play::new(position, card))
        })
        .collect()
}

impl ReplayData {
    pub fn from_round(
        result: &RoundResult,
        seed: u64,
        leader: PlayerPosition,
        rules: RulesetConfig,
    ) -> Self {
        Self {
            mode: result.state.mode(),
            leader,
            seed,
            play_log: result.play_log.clone(),
            rules,
            declared_weis: result.declared_weis,
        }
    }

    pub fn to_json(&self) -> Result<String, ReplayError> {
        let file = ReplayFile {
            mode: self.mode.name().to_string(),
            trump_suit: self.mode.trump_suit(),
            leader: self.leader.index(),
            seed: self.seed,
            rules: self.rules,
            declared_weis: self.declared_weis,
            play_log: encode_play_log(&self.play_log),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let file: ReplayFile = serde_json::from_str(json)?;
        let leader =
            PlayerPosition::from_index(file.leader).ok_or(ReplayError::InvalidLeader(file.leader))?;
        Ok(Self {
            mode: Mode::from_parts(&file.mode, file.trump_suit)?,
            leader,
            seed: file.seed,
            play_log: decode_play_log(&file.play_log)?,
            rules: file.rules,
            declared_weis: file.declared_weis,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Re-deals from the recorded seed and re-applies every play through the
/// engine, returning the final state.
pub fn replay_game(replay: &ReplayData, mode: ReplayMode) -> Result<GameState, ReplayError> {
    if replay.play_log.len() != PLAYS_PER_DEAL {
        return Err(ReplayError::Length {
            expected: PLAYS_PER_DEAL,
            found: replay.play_log.len(),
        });
    }

    let mut state = GameState::from_seed(replay.seed, replay.mode, replay.leader, &replay.rules);
    if replay.rules.allow_weis {
        state
            .announce_weis(replay.declared_weis)
            .map_err(ReplayError::Announcement)?;
    }

    for (index, play) in replay.play_log.iter().enumerate() {
        let applied = match mode {
            ReplayMode::Strict => {
                let expected = state.current_player();
                if play.position != expected {
                    return Err(ReplayError::OrderMismatch {
                        index,
                        expected,
                        actual: play.position,
                    });
                }
                state.play_card(play.position, play.card)
            }
            ReplayMode::Relaxed => state.play_card_any_order(play.position, play.card),
        };
        applied.map_err(|source| ReplayError::Play { index, source })?;
    }
    Ok(state)
}
