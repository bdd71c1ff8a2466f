use jass_core::model::bidding::BidAction;
use jass_core::model::card::{Card, DECK_SIZE};
use jass_core::model::mode::Mode;
use jass_core::model::suit::Suit;

/// Actions `0..36` play the card with that canonical id.
pub const CARD_ACTIONS: usize = DECK_SIZE;
/// `36..40` name a trump contract, one per suit in canonical order.
pub const TRUMP_ACTION_BASE: usize = 36;
pub const OBEABE_ACTION: usize = 40;
pub const UNEUFE_ACTION: usize = 41;
pub const PUSH_ACTION: usize = 42;
pub const ANNOUNCE_ACTION: usize = 43;
pub const PASS_ACTION: usize = 44;
pub const ACTION_COUNT: usize = 45;

pub type ActionMask = [bool; ACTION_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(Card),
    Bid(BidAction),
    Announce,
    Pass,
}

impl Action {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0..CARD_ACTIONS => Card::from_id(index).map(Action::Play),
            TRUMP_ACTION_BASE..OBEABE_ACTION => Suit::from_index(index - TRUMP_ACTION_BASE)
                .map(|suit| Action::Bid(BidAction::Choose(Mode::Trump(suit)))),
            OBEABE_ACTION => Some(Action::Bid(BidAction::Choose(Mode::Obeabe))),
            UNEUFE_ACTION => Some(Action::Bid(BidAction::Choose(Mode::Uneufe))),
            PUSH_ACTION => Some(Action::Bid(BidAction::Push)),
            ANNOUNCE_ACTION => Some(Action::Announce),
            PASS_ACTION => Some(Action::Pass),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Action::Play(card) => card.to_id(),
            Action::Bid(BidAction::Choose(Mode::Trump(suit))) => TRUMP_ACTION_BASE + suit.index(),
            Action::Bid(BidAction::Choose(Mode::Obeabe)) => OBEABE_ACTION,
            Action::Bid(BidAction::Choose(Mode::Uneufe)) => UNEUFE_ACTION,
            Action::Bid(BidAction::Push) => PUSH_ACTION,
            Action::Announce => ANNOUNCE_ACTION,
            Action::Pass => PASS_ACTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jass_core::model::rank::Rank;

    #[test]
    fn every_index_decodes() {
        for index in 0..ACTION_COUNT {
            let action = Action::from_index(index).unwrap();
            assert_eq!(action.index(), index);
        }
        assert_eq!(Action::from_index(ACTION_COUNT), None);
    }

    #[test]
    fn layout_matches_contract_slots() {
        assert_eq!(
            Action::from_index(37),
            Some(Action::Bid(BidAction::Choose(Mode::Trump(Suit::Rosen))))
        );
        assert_eq!(Action::from_index(PUSH_ACTION), Some(Action::Bid(BidAction::Push)));
        assert_eq!(
            Action::from_index(35),
            Some(Action::Play(Card::new(Rank::Ace, Suit::Eicheln)))
        );
    }
}
