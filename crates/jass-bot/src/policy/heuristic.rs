use super::{log_bid_decision, log_play_decision};
use crate::bot::{PUSH_THRESHOLD, best_contract};
use jass_core::announce::weis::find_weis;
use jass_core::game::policy::Policy;
use jass_core::game::state::GameState;
use jass_core::model::bidding::{BidAction, BiddingState};
use jass_core::model::card::Card;
use jass_core::model::hand::Hand;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;
use jass_core::model::suit::Suit;
use jass_core::rules::ranking;
use jass_core::rules::scoring;

/// Greedy single-trick player.
///
/// Bids the contract its hand evaluates best under, pushing weak hands to
/// the partner. In play it leads its strongest card, ducks cheaply under a
/// winning partner, and otherwise takes the trick with the cheapest
/// winning card when it can.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn choose_bid(
        &mut self,
        bidding: &BiddingState,
        hand: &Hand,
        seat: PlayerPosition,
    ) -> BidAction {
        let (mode, strength) = best_contract(hand);
        let action = if bidding.can_push() && strength < PUSH_THRESHOLD {
            BidAction::Push
        } else {
            BidAction::Choose(mode)
        };
        log_bid_decision("heuristic", seat, action, strength);
        action
    }

    fn choose_play(&mut self, state: &GameState, seat: PlayerPosition) -> Card {
        let legal = state.legal_cards_for(seat);
        let mode = state.mode();
        let trick = state.current_trick();

        let (Some(led), Some(winning)) = (trick.lead_suit(), trick.winning_play(mode)) else {
            let chosen = strongest(&legal, mode);
            log_play_decision("heuristic", seat, &legal, chosen, "lead_strongest");
            return chosen;
        };

        if winning.position == seat.partner() {
            let chosen = cheapest(&legal, mode, led);
            log_play_decision("heuristic", seat, &legal, chosen, "partner_winning");
            return chosen;
        }

        let cheapest_winner = legal
            .iter()
            .copied()
            .filter(|card| ranking::beats(*card, winning.card, led, mode))
            .min_by_key(|card| (ranking::strength(*card, led, mode), card.to_id()));
        match cheapest_winner {
            Some(chosen) => {
                log_play_decision("heuristic", seat, &legal, chosen, "cheapest_winner");
                chosen
            }
            None => {
                let chosen = cheapest(&legal, mode, led);
                log_play_decision("heuristic", seat, &legal, chosen, "cannot_win");
                chosen
            }
        }
    }

    fn declare_weis(&mut self, state: &GameState, seat: PlayerPosition) -> bool {
        !find_weis(state.hand(seat).cards()).is_empty()
    }
}

/// Highest card assuming it is led.
fn strongest(legal: &[Card], mode: Mode) -> Card {
    let mut best = legal[0];
    for card in legal.iter().copied().skip(1) {
        if ranking::strength(card, card.suit, mode) > ranking::strength(best, best.suit, mode) {
            best = card;
        }
    }
    best
}

/// Fewest points, then weakest.
fn cheapest(legal: &[Card], mode: Mode, led: Suit) -> Card {
    let mut best = legal[0];
    let key = |card: Card| (scoring::card_points(card, mode), ranking::strength(card, led, mode));
    for card in legal.iter().copied().skip(1) {
        if key(card) < key(best) {
            best = card;
        }
    }
    best
}
