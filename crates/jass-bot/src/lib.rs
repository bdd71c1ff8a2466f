pub mod bot;
pub mod policy;

pub use bot::{BotKind, BotKindError, build_table};
pub use policy::{HeuristicPolicy, LowestCardPolicy, RandomPolicy};
