use crate::model::card::CardError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Suit {
    Schellen = 0,
    Rosen = 1,
    Schilten = 2,
    Eicheln = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Schellen, Suit::Rosen, Suit::Schilten, Suit::Eicheln];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Schellen),
            1 => Some(Suit::Rosen),
            2 => Some(Suit::Schilten),
            3 => Some(Suit::Eicheln),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Schellen => "schellen",
            Suit::Rosen => "rosen",
            Suit::Schilten => "schilten",
            Suit::Eicheln => "eicheln",
        }
    }
}

impl FromStr for Suit {
    type Err = CardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "schellen" => Ok(Suit::Schellen),
            "rosen" => Ok(Suit::Rosen),
            "schilten" => Ok(Suit::Schilten),
            "eicheln" => Ok(Suit::Eicheln),
            _ => Err(CardError::InvalidSuit(value.to_string())),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
