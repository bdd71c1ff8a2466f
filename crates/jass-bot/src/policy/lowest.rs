use super::log_play_decision;
use jass_core::announce::weis::find_weis;
use jass_core::game::policy::Policy;
use jass_core::game::state::GameState;
use jass_core::model::bidding::{BidAction, BiddingState};
use jass_core::model::card::Card;
use jass_core::model::hand::Hand;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;

/// Deterministic baseline: always names `contract` and plays the legal card
/// with the smallest canonical id.
#[derive(Debug, Clone, Copy)]
pub struct LowestCardPolicy {
    contract: Mode,
}

impl LowestCardPolicy {
    pub fn new(contract: Mode) -> Self {
        Self { contract }
    }
}

impl Policy for LowestCardPolicy {
    fn choose_bid(
        &mut self,
        _bidding: &BiddingState,
        _hand: &Hand,
        _seat: PlayerPosition,
    ) -> BidAction {
        BidAction::Choose(self.contract)
    }

    fn choose_play(&mut self, state: &GameState, seat: PlayerPosition) -> Card {
        let mut legal = state.legal_cards_for(seat);
        legal.sort_by_key(|card| card.to_id());
        let chosen = legal[0];
        log_play_decision("lowest", seat, &legal, chosen, "lowest_id");
        chosen
    }

    fn declare_weis(&mut self, state: &GameState, seat: PlayerPosition) -> bool {
        !find_weis(state.hand(seat).cards()).is_empty()
    }
}
