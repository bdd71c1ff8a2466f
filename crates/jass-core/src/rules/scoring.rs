use crate::model::card::Card;
use crate::model::mode::Mode;

/// Bonus for taking the ninth trick of a deal.
pub const LAST_TRICK_BONUS: u32 = 5;
/// Card points in a full deck, identical for every mode.
pub const DECK_POINTS: u32 = 152;
/// Card points plus the last-trick bonus.
pub const DEAL_POINTS: u32 = DECK_POINTS + LAST_TRICK_BONUS;

// Indexed by canonical rank: 6, 7, 8, 9, 10, J, Q, K, A.
pub const TRUMP_POINTS: [u32; 9] = [0, 0, 0, 14, 10, 20, 3, 4, 11];
pub const NON_TRUMP_POINTS: [u32; 9] = [0, 0, 0, 0, 10, 2, 3, 4, 11];
pub const OBEABE_POINTS: [u32; 9] = [0, 0, 8, 0, 10, 2, 3, 4, 11];
pub const UNEUFE_POINTS: [u32; 9] = [11, 0, 8, 0, 10, 2, 3, 4, 0];

pub fn card_points(card: Card, mode: Mode) -> u32 {
    let table = match mode {
        Mode::Trump(trump) if card.suit == trump => &TRUMP_POINTS,
        Mode::Trump(_) => &NON_TRUMP_POINTS,
        Mode::Obeabe => &OBEABE_POINTS,
        Mode::Uneufe => &UNEUFE_POINTS,
    };
    table[card.rank.index()]
}

pub fn trick_points<I>(cards: I, mode: Mode, last_trick: bool) -> u32
where
    I: IntoIterator<Item = Card>,
{
    let total: u32 = cards.into_iter().map(|card| card_points(card, mode)).sum();
    if last_trick {
        total + LAST_TRICK_BONUS
    } else {
        total
    }
}
