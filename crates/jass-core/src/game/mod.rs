pub mod policy;
pub mod replay;
pub mod round;
pub mod state;
