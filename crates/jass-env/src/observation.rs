use jass_core::game::state::GameState;
use jass_core::model::card::DECK_SIZE;
use jass_core::model::hand::Hand;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;

pub const HAND_OFFSET: usize = 0;
pub const TRICK_OFFSET: usize = HAND_OFFSET + DECK_SIZE;
pub const PLAYED_OFFSET: usize = TRICK_OFFSET + DECK_SIZE;
pub const MODE_OFFSET: usize = PLAYED_OFFSET + DECK_SIZE;
pub const TRUMP_SUIT_OFFSET: usize = MODE_OFFSET + 3;
pub const POINTS_OFFSET: usize = TRUMP_SUIT_OFFSET + 4;
pub const TRICK_INDEX_OFFSET: usize = POINTS_OFFSET + 2;
pub const OBSERVATION_DIM: usize = TRICK_INDEX_OFFSET + 1;

/// Flat per-seat feature vector:
///
/// | range     | features                                   |
/// |-----------|--------------------------------------------|
/// | 0..36     | own hand, one-hot by card id               |
/// | 36..72    | cards in the current trick                 |
/// | 72..108   | every card played this deal                |
/// | 108..111  | mode one-hot: trump, obeabe, uneufe        |
/// | 111..115  | trump suit one-hot                         |
/// | 115..117  | raw team points                            |
/// | 117       | trick index                                |
pub type Observation = [f32; OBSERVATION_DIM];

/// Observation during play.
pub fn encode(state: &GameState, seat: PlayerPosition) -> Observation {
    let mut obs = hand_only(state.hand(seat));

    for play in state.current_trick().plays() {
        obs[TRICK_OFFSET + play.card.to_id()] = 1.0;
    }
    for card in state.played_cards() {
        obs[PLAYED_OFFSET + card.to_id()] = 1.0;
    }

    let mode_slot = match state.mode() {
        Mode::Trump(_) => 0,
        Mode::Obeabe => 1,
        Mode::Uneufe => 2,
    };
    obs[MODE_OFFSET + mode_slot] = 1.0;
    if let Some(trump) = state.mode().trump_suit() {
        obs[TRUMP_SUIT_OFFSET + trump.index()] = 1.0;
    }

    let points = state.team_points();
    obs[POINTS_OFFSET] = points[0] as f32;
    obs[POINTS_OFFSET + 1] = points[1] as f32;
    obs[TRICK_INDEX_OFFSET] = state.trick_index() as f32;
    obs
}

/// Observation before a contract exists: only the dealt hand is set.
pub fn hand_only(hand: &Hand) -> Observation {
    let mut obs = [0.0; OBSERVATION_DIM];
    for card in hand.iter() {
        obs[HAND_OFFSET + card.to_id()] = 1.0;
    }
    obs
}

#[cfg(test)]
mod tests {
    use super::*;
    use jass_core::model::suit::Suit;
    use jass_core::rules::ruleset::RulesetConfig;

    #[test]
    fn layout_is_118_wide() {
        assert_eq!(OBSERVATION_DIM, 118);
        assert_eq!(MODE_OFFSET, 108);
        assert_eq!(TRUMP_SUIT_OFFSET, 111);
        assert_eq!(POINTS_OFFSET, 115);
    }

    #[test]
    fn fresh_deal_shows_hand_and_mode() {
        let config = RulesetConfig::default();
        let mode = Mode::Trump(Suit::Schilten);
        let state = GameState::from_seed(6, mode, PlayerPosition::North, &config);
        let obs = encode(&state, PlayerPosition::East);

        let hand_bits = obs[HAND_OFFSET..TRICK_OFFSET].iter().filter(|v| **v == 1.0).count();
        assert_eq!(hand_bits, 9);
        for card in state.hand(PlayerPosition::East).iter() {
            assert_eq!(obs[card.to_id()], 1.0);
        }
        assert_eq!(obs[MODE_OFFSET], 1.0);
        assert_eq!(obs[TRUMP_SUIT_OFFSET + Suit::Schilten.index()], 1.0);
        assert!(obs[PLAYED_OFFSET..MODE_OFFSET].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn played_cards_show_in_trick_and_history() {
        let config = RulesetConfig::default();
        let mut state = GameState::from_seed(6, Mode::Obeabe, PlayerPosition::North, &config);
        let lead = state.legal_cards_for(PlayerPosition::North)[0];
        state.play_card(PlayerPosition::North, lead).unwrap();

        let obs = encode(&state, PlayerPosition::South);
        assert_eq!(obs[TRICK_OFFSET + lead.to_id()], 1.0);
        assert_eq!(obs[PLAYED_OFFSET + lead.to_id()], 1.0);
        assert_eq!(obs[MODE_OFFSET + 1], 1.0);
        assert!(obs[TRUMP_SUIT_OFFSET..POINTS_OFFSET].iter().all(|v| *v == 0.0));
    }
}
