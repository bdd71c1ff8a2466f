use jass_bot::BotKind;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;
use jass_core::model::suit::Suit;
use jass_core::rules::ruleset::RulesetConfig;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Table configuration loaded from YAML. Every field is optional; command
/// line flags override what the file sets.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Deal seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// Seat index (0..4) that bids first and leads the first trick.
    pub leader: usize,
    /// Fixed contract. Without it the table bids.
    pub mode: Option<String>,
    pub trump_suit: Option<Suit>,
    pub players: Vec<String>,
    pub rules: RulesetConfig,
    pub logging: LoggingConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: None,
            leader: 0,
            mode: None,
            trump_suit: None,
            players: vec!["lowest".to_string(); 4],
            rules: RulesetConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TableConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TableConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.leader_position()?;
        self.contract()?;
        self.player_kinds()?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!("unknown level '{}'", self.logging.level),
            });
        }
        Ok(())
    }

    pub fn leader_position(&self) -> Result<PlayerPosition, ValidationError> {
        PlayerPosition::from_index(self.leader).ok_or_else(|| ValidationError::InvalidField {
            field: "leader".to_string(),
            message: format!("seat {} is outside 0..4", self.leader),
        })
    }

    /// The fixed contract, or `None` when the table should bid.
    pub fn contract(&self) -> Result<Option<Mode>, ValidationError> {
        match self.mode.as_deref() {
            None => {
                if self.trump_suit.is_some() {
                    return Err(ValidationError::InvalidField {
                        field: "trump_suit".to_string(),
                        message: "trump_suit needs mode: trump".to_string(),
                    });
                }
                Ok(None)
            }
            Some(name) => Mode::from_parts(name, self.trump_suit)
                .map(Some)
                .map_err(|err| ValidationError::InvalidField {
                    field: "mode".to_string(),
                    message: err.to_string(),
                }),
        }
    }

    pub fn player_kinds(&self) -> Result<[BotKind; 4], ValidationError> {
        if self.players.len() != 4 {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("expected 4 players, found {}", self.players.len()),
            });
        }
        let mut kinds = [BotKind::Lowest; 4];
        for (seat, name) in self.players.iter().enumerate() {
            kinds[seat] = name.parse().map_err(|err: jass_bot::BotKindError| {
                ValidationError::InvalidField {
                    field: format!("players[{seat}]"),
                    message: err.to_string(),
                }
            })?;
        }
        Ok(kinds)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging block; logs go to stderr unless `file` is set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_tracing_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.level.trim().is_empty() {
            self.level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
