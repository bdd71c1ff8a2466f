pub mod announce;
pub mod game;
pub mod model;
pub mod rules;

pub use game::policy::{Policy, PolicyTable, run_bidding};
pub use game::replay::{ReplayData, ReplayError, ReplayMode, replay_game};
pub use game::round::{RoundResult, play_round};
pub use game::state::{GameState, PlayError, PlayOutcome};
pub use model::deck::deal;
