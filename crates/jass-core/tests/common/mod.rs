#![allow(dead_code)]

use jass_core::game::policy::{Policy, PolicyTable};
use jass_core::game::state::GameState;
use jass_core::model::bidding::{BidAction, BiddingState};
use jass_core::model::card::Card;
use jass_core::model::hand::Hand;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;

/// Plays the legal card with the smallest canonical id and always declares.
pub struct LowestCard {
    pub bid: BidAction,
    pub declare: bool,
}

impl Policy for LowestCard {
    fn choose_bid(
        &mut self,
        _bidding: &BiddingState,
        _hand: &Hand,
        _seat: PlayerPosition,
    ) -> BidAction {
        self.bid
    }

    fn choose_play(&mut self, state: &GameState, seat: PlayerPosition) -> Card {
        let legal = state.legal_cards_for(seat);
        *legal
            .iter()
            .min_by_key(|card| card.to_id())
            .expect("a seat to move always has a legal card")
    }

    fn declare_weis(&mut self, _state: &GameState, _seat: PlayerPosition) -> bool {
        self.declare
    }
}

pub fn lowest_table(declare: bool) -> PolicyTable {
    std::array::from_fn(|_| {
        Box::new(LowestCard {
            bid: BidAction::Choose(Mode::Obeabe),
            declare,
        }) as Box<dyn Policy>
    })
}
