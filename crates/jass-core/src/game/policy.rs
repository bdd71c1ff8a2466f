use crate::game::state::GameState;
use crate::model::bidding::{BidAction, BiddingError, BiddingResult, BiddingState};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;

/// Decision maker for one seat.
pub trait Policy: Send {
    /// Names the contract or pushes it to the partner, looking at the
    /// seat's dealt hand.
    fn choose_bid(
        &mut self,
        bidding: &BiddingState,
        hand: &Hand,
        seat: PlayerPosition,
    ) -> BidAction;

    /// Picks the card to play. Must be one of `state.legal_cards_for(seat)`.
    ///
    /// Only called for the seat on turn in an unfinished deal, so the seat
    /// holds at least one card and the legal set is never empty.
    fn choose_play(&mut self, state: &GameState, seat: PlayerPosition) -> Card;

    /// Whether the seat announces its Weis before the first trick.
    fn declare_weis(&mut self, _state: &GameState, _seat: PlayerPosition) -> bool {
        false
    }
}

/// One policy per seat, indexed by [`PlayerPosition::index`].
pub type PolicyTable = [Box<dyn Policy>; 4];

/// Asks the starter, then the partner if the starter pushed.
pub fn run_bidding(
    policies: &mut PolicyTable,
    starter: PlayerPosition,
    hands: &[Hand; 4],
) -> Result<BiddingResult, BiddingError> {
    let mut bidding = BiddingState::new(starter);
    while let Some(seat) = bidding.current_bidder() {
        let action = policies[seat.index()].choose_bid(&bidding, &hands[seat.index()], seat);
        if let Some(result) = bidding.submit(seat, action)? {
            return Ok(result);
        }
    }
    bidding.result().ok_or(BiddingError::AlreadyResolved)
}
