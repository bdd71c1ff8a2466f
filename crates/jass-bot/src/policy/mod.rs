mod heuristic;
mod lowest;
mod random;

pub use heuristic::HeuristicPolicy;
pub use lowest::LowestCardPolicy;
pub use random::RandomPolicy;

use jass_core::model::bidding::BidAction;
use jass_core::model::card::Card;
use jass_core::model::player::PlayerPosition;
use tracing::{Level, event};

fn log_play_decision(
    policy: &'static str,
    seat: PlayerPosition,
    legal: &[Card],
    chosen: Card,
    reason: &'static str,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };

    event!(
        target: "jass_bot::play",
        Level::DEBUG,
        policy,
        seat = %seat,
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        reason,
    );
}

fn log_bid_decision(
    policy: &'static str,
    seat: PlayerPosition,
    action: BidAction,
    strength: u32,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    event!(
        target: "jass_bot::bid",
        Level::DEBUG,
        policy,
        seat = %seat,
        action = ?action,
        strength,
    );
}
