use jass_core::model::hand::Hand;
use jass_core::model::mode::Mode;
use jass_core::model::rank::Rank;

/// Below this estimate the starter pushes when allowed.
pub const PUSH_THRESHOLD: u32 = 10;

/// Rough trick-taking estimate of `hand` under `mode`.
pub fn contract_strength(hand: &Hand, mode: Mode) -> u32 {
    hand.iter()
        .map(|card| match mode {
            Mode::Trump(trump) if card.suit == trump => match card.rank {
                Rank::Jack => 6,
                Rank::Nine => 5,
                Rank::Ace => 3,
                Rank::King | Rank::Queen => 2,
                _ => 1,
            },
            Mode::Trump(_) => u32::from(card.rank == Rank::Ace) * 2,
            Mode::Obeabe => match card.rank {
                Rank::Ace => 4,
                Rank::King => 2,
                Rank::Queen => 1,
                _ => 0,
            },
            Mode::Uneufe => match card.rank {
                Rank::Six => 4,
                Rank::Seven => 2,
                Rank::Eight => 1,
                _ => 0,
            },
        })
        .sum()
}

/// Strongest contract for `hand`; the first of [`Mode::ALL`] wins ties.
pub fn best_contract(hand: &Hand) -> (Mode, u32) {
    Mode::ALL
        .iter()
        .map(|mode| (*mode, contract_strength(hand, *mode)))
        .fold((Mode::ALL[0], 0), |best, candidate| {
            if candidate.1 > best.1 { candidate } else { best }
        })
}
