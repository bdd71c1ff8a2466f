use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use thiserror::Error;

pub const DECK_SIZE: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("invalid suit: {0}")]
    InvalidSuit(String),
    #[error("invalid rank: {0}")]
    InvalidRank(String),
    #[error("card index {0} is outside the 36-card deck")]
    InvalidIndex(usize),
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Builds a card from textual suit and rank names, e.g. `("rosen", "K")`.
    pub fn parse(suit: &str, rank: &str) -> Result<Self, CardError> {
        Ok(Self::new(rank.parse()?, suit.parse()?))
    }

    /// Position in the canonical suit-major deck enumeration.
    pub const fn to_id(self) -> usize {
        self.suit.index() * Rank::ORDERED.len() + self.rank.index()
    }

    pub const fn from_id(id: usize) -> Option<Self> {
        match (Suit::from_index(id / 9), Rank::from_index(id % 9)) {
            (Some(suit), Some(rank)) => Some(Self::new(rank, suit)),
            _ => None,
        }
    }

    pub fn try_from_id(id: usize) -> Result<Self, CardError> {
        Self::from_id(id).ok_or(CardError::InvalidIndex(id))
    }

    pub fn is_trump(self, trump: Option<Suit>) -> bool {
        trump == Some(self.suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}
