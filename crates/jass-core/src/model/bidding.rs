use crate::model::mode::{Mode, ModeError};
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use thiserror::Error;
use tracing::{Level, event};

/// A bidder either names the contract or pushes the choice to the partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidAction {
    Choose(Mode),
    Push,
}

impl BidAction {
    /// Validates loose textual input into an action.
    pub fn from_parts(
        mode: Option<&str>,
        trump_suit: Option<Suit>,
        push: bool,
    ) -> Result<Self, BiddingError> {
        if push {
            if mode.is_some() || trump_suit.is_some() {
                return Err(BiddingError::PushWithContract);
            }
            return Ok(BidAction::Push);
        }
        let name = mode.ok_or(ModeError::InvalidMode(String::new()))?;
        Ok(BidAction::Choose(Mode::from_parts(name, trump_suit)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiddingResult {
    pub mode: Mode,
    pub chooser: PlayerPosition,
    pub pushed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiddingPhase {
    AwaitingStarter,
    AwaitingPartner,
    Resolved(BiddingResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BiddingError {
    #[error("expected {expected} to bid but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("partner may not push")]
    PartnerMayNotPush,
    #[error("push action must not specify mode or trump_suit")]
    PushWithContract,
    #[error("bidding already resolved")]
    AlreadyResolved,
    #[error(transparent)]
    Mode(#[from] ModeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiddingState {
    starter: PlayerPosition,
    phase: BiddingPhase,
}

impl BiddingState {
    pub fn new(starter: PlayerPosition) -> Self {
        Self {
            starter,
            phase: BiddingPhase::AwaitingStarter,
        }
    }

    pub fn starter(&self) -> PlayerPosition {
        self.starter
    }

    pub fn phase(&self) -> BiddingPhase {
        self.phase
    }

    pub fn pushed(&self) -> bool {
        match self.phase {
            BiddingPhase::AwaitingStarter => false,
            BiddingPhase::AwaitingPartner => true,
            BiddingPhase::Resolved(result) => result.pushed,
        }
    }

    /// Seat expected to act, `None` once resolved.
    pub fn current_bidder(&self) -> Option<PlayerPosition> {
        match self.phase {
            BiddingPhase::AwaitingStarter => Some(self.starter),
            BiddingPhase::AwaitingPartner => Some(self.starter.partner()),
            BiddingPhase::Resolved(_) => None,
        }
    }

    pub fn can_push(&self) -> bool {
        matches!(self.phase, BiddingPhase::AwaitingStarter)
    }

    pub fn result(&self) -> Option<BiddingResult> {
        match self.phase {
            BiddingPhase::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Applies one action. Returns the result once the contract is fixed.
    pub fn submit(
        &mut self,
        seat: PlayerPosition,
        action: BidAction,
    ) -> Result<Option<BiddingResult>, BiddingError> {
        let expected = self.current_bidder().ok_or(BiddingError::AlreadyResolved)?;
        if seat != expected {
            return Err(BiddingError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        match action {
            BidAction::Push if !self.can_push() => Err(BiddingError::PartnerMayNotPush),
            BidAction::Push => {
                self.phase = BiddingPhase::AwaitingPartner;
                event!(
                    target: "jass_core::bidding",
                    Level::DEBUG,
                    starter = %self.starter,
                    chooser = %self.starter.partner(),
                    "bid pushed"
                );
                Ok(None)
            }
            BidAction::Choose(mode) => {
                let result = BiddingResult {
                    mode,
                    chooser: seat,
                    pushed: self.pushed(),
                };
                self.phase = BiddingPhase::Resolved(result);
                event!(
                    target: "jass_core::bidding",
                    Level::DEBUG,
                    chooser = %seat,
                    mode = %mode,
                    pushed = result.pushed,
                    "contract chosen"
                );
                Ok(Some(result))
            }
        }
    }
}
