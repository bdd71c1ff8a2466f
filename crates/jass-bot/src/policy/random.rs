use super::log_play_decision;
use jass_core::game::policy::Policy;
use jass_core::game::state::GameState;
use jass_core::model::bidding::{BidAction, BiddingState};
use jass_core::model::card::Card;
use jass_core::model::hand::Hand;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PUSH_PROBABILITY: f64 = 0.25;

/// Uniformly random legal play, reproducible from its seed.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_bid(
        &mut self,
        bidding: &BiddingState,
        _hand: &Hand,
        _seat: PlayerPosition,
    ) -> BidAction {
        if bidding.can_push() && self.rng.gen_bool(PUSH_PROBABILITY) {
            return BidAction::Push;
        }
        BidAction::Choose(Mode::ALL[self.rng.gen_range(0..Mode::ALL.len())])
    }

    fn choose_play(&mut self, state: &GameState, seat: PlayerPosition) -> Card {
        let legal = state.legal_cards_for(seat);
        let chosen = legal[self.rng.gen_range(0..legal.len())];
        log_play_decision("random", seat, &legal, chosen, "uniform");
        chosen
    }

    fn declare_weis(&mut self, _state: &GameState, _seat: PlayerPosition) -> bool {
        self.rng.gen_bool(0.5)
    }
}
