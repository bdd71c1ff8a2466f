use crate::model::card::Card;
use crate::model::mode::Mode;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::rules::ranking;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

impl Play {
    pub const fn new(position: PlayerPosition, card: Card) -> Self {
        Self { position, card }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(PlayerPosition),
    #[error("trick is not complete")]
    Incomplete,
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> Vec<Card> {
        self.plays.iter().map(|play| play.card).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        self.record(position, card, true)
    }

    /// Records a play without checking seat rotation. A seat still cannot
    /// play twice into the same trick.
    pub fn play_any_order(
        &mut self,
        position: PlayerPosition,
        card: Card,
    ) -> Result<(), TrickError> {
        self.record(position, card, false)
    }

    /// Current best play under `mode`, or `None` for an empty trick.
    pub fn winning_play(&self, mode: Mode) -> Option<Play> {
        let lead_suit = self.lead_suit()?;
        self.plays
            .iter()
            .copied()
            .max_by_key(|play| ranking::strength(play.card, lead_suit, mode))
    }

    pub fn winner(&self, mode: Mode) -> Option<PlayerPosition> {
        if !self.is_complete() {
            return None;
        }
        self.winning_play(mode).map(|play| play.position)
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.leader.offset(self.plays.len())
    }

    fn record(
        &mut self,
        position: PlayerPosition,
        card: Card,
        enforce_turn: bool,
    ) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if enforce_turn && expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.plays.push(Play { position, card });
        Ok(())
    }
}
