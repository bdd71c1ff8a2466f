pub mod legal;
pub mod ranking;
pub mod ruleset;
pub mod scoring;
