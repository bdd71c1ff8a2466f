use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::rank::Rank;
use crate::model::suit::Suit;

pub const STOCK_POINTS: u32 = 20;

pub fn is_stock_card(card: Card, trump: Suit) -> bool {
    card.suit == trump && matches!(card.rank, Rank::King | Rank::Queen)
}

/// True when `card` is the second half of the trump King/Queen pair
/// given the player's earlier plays.
pub fn completes_stock(previous: &[Card], card: Card, trump: Suit) -> bool {
    if !is_stock_card(card, trump) {
        return false;
    }
    let other = match card.rank {
        Rank::King => Rank::Queen,
        _ => Rank::King,
    };
    previous.contains(&Card::new(other, trump))
}

/// Per-seat play history used to award Stock at most once per seat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockTracker {
    played: [Vec<Card>; 4],
    awarded: [bool; 4],
}

impl StockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a play and returns the Stock points it earns.
    pub fn record_play(&mut self, seat: PlayerPosition, card: Card, trump: Suit) -> u32 {
        let idx = seat.index();
        let points = if !self.awarded[idx] && completes_stock(&self.played[idx], card, trump) {
            self.awarded[idx] = true;
            STOCK_POINTS
        } else {
            0
        };
        self.played[idx].push(card);
        points
    }

    pub fn awarded(&self, seat: PlayerPosition) -> bool {
        self.awarded[seat.index()]
    }
}
