use crate::model::suit::Suit;
use core::fmt;
use thiserror::Error;

pub const MODE_TRUMP: &str = "trump";
pub const MODE_OBEABE: &str = "obeabe";
pub const MODE_UNEUFE: &str = "uneufe";

/// Play mode of a deal. A trump contract always carries its suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Trump(Suit),
    /// Ascending: aces high, no trump suit.
    Obeabe,
    /// Descending: sixes high, no trump suit.
    Uneufe,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("invalid mode: {0}")]
    InvalidMode(String),
    #[error("trump_suit is required for trump mode")]
    MissingTrumpSuit,
    #[error("trump_suit must be absent for {0} mode")]
    UnexpectedTrumpSuit(&'static str),
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Trump(Suit::Schellen),
        Mode::Trump(Suit::Rosen),
        Mode::Trump(Suit::Schilten),
        Mode::Trump(Suit::Eicheln),
        Mode::Obeabe,
        Mode::Uneufe,
    ];

    /// Validates a textual mode plus optional trump suit into a contract.
    pub fn from_parts(name: &str, trump_suit: Option<Suit>) -> Result<Self, ModeError> {
        let mode = match name.trim().to_ascii_lowercase().as_str() {
            MODE_TRUMP => return trump_suit.map(Mode::Trump).ok_or(ModeError::MissingTrumpSuit),
            MODE_OBEABE | "ascending" => Mode::Obeabe,
            MODE_UNEUFE | "descending" => Mode::Uneufe,
            _ => return Err(ModeError::InvalidMode(name.to_string())),
        };
        match trump_suit {
            Some(_) => Err(ModeError::UnexpectedTrumpSuit(mode.name())),
            None => Ok(mode),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Trump(_) => MODE_TRUMP,
            Mode::Obeabe => MODE_OBEABE,
            Mode::Uneufe => MODE_UNEUFE,
        }
    }

    pub const fn trump_suit(self) -> Option<Suit> {
        match self {
            Mode::Trump(suit) => Some(suit),
            Mode::Obeabe | Mode::Uneufe => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Trump(suit) => write!(f, "{MODE_TRUMP}({suit})"),
            other => f.write_str(other.name()),
        }
    }
}
