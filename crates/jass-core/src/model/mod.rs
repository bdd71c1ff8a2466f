pub mod bidding;
pub mod card;
pub mod deck;
pub mod hand;
pub mod mode;
pub mod player;
pub mod rank;
pub mod suit;
pub mod trick;
