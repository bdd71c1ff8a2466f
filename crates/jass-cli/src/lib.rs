//! Command-line table runner: play a deal, replay a saved one, or check a
//! table configuration.

pub mod config;
pub mod logging;
pub mod table;
