//! Per-mode total order over the deck. Every trick resolution, overtrump
//! check and replay verification goes through [`strength`].

use crate::model::card::Card;
use crate::model::mode::Mode;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

/// Strongest to weakest inside the trump suit.
pub const TRUMP_ORDER: [Rank; 9] = [
    Rank::Jack,
    Rank::Nine,
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Ten,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
];

pub const OBEABE_ORDER: [Rank; 9] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
];

pub const UNEUFE_ORDER: [Rank; 9] = [
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

const TRUMP_SCORES: [u8; 9] = order_scores(TRUMP_ORDER);
const OBEABE_SCORES: [u8; 9] = order_scores(OBEABE_ORDER);
const UNEUFE_SCORES: [u8; 9] = order_scores(UNEUFE_ORDER);

/// Maps each rank (by canonical index) to `9 - position` in `order`.
const fn order_scores(order: [Rank; 9]) -> [u8; 9] {
    let mut scores = [0u8; 9];
    let mut position = 0;
    while position < order.len() {
        scores[order[position].index()] = (order.len() - position) as u8;
        position += 1;
    }
    scores
}

/// Lexicographic (tier, rank score) key; greater is stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strength {
    pub tier: u8,
    pub score: u8,
}

pub const fn trump_rank_score(rank: Rank) -> u8 {
    TRUMP_SCORES[rank.index()]
}

pub fn strength(card: Card, led_suit: Suit, mode: Mode) -> Strength {
    let tier = |suit: Suit| u8::from(suit == led_suit);
    match mode {
        Mode::Trump(trump) if card.suit == trump => Strength {
            tier: 2,
            score: TRUMP_SCORES[card.rank.index()],
        },
        Mode::Trump(_) | Mode::Obeabe => Strength {
            tier: tier(card.suit),
            score: OBEABE_SCORES[card.rank.index()],
        },
        Mode::Uneufe => Strength {
            tier: tier(card.suit),
            score: UNEUFE_SCORES[card.rank.index()],
        },
    }
}

pub fn beats(a: Card, b: Card, led_suit: Suit, mode: Mode) -> bool {
    strength(a, led_suit, mode) > strength(b, led_suit, mode)
}

/// Strongest card of `cards`; `None` when empty.
pub fn winning_card<I>(cards: I, led_suit: Suit, mode: Mode) -> Option<Card>
where
    I: IntoIterator<Item = Card>,
{
    cards
        .into_iter()
        .max_by_key(|card| strength(*card, led_suit, mode))
}
