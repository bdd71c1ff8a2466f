//! Turn-based training environment over the Jass engine.
//!
//! Four agents share one fixed action space; [`JassEnv::action_mask`] marks
//! the actions open to a seat at the current decision point.

pub mod action;
pub mod env;
pub mod observation;
pub mod single;

pub use action::{ACTION_COUNT, Action, ActionMask};
pub use env::{EnvConfig, EnvError, JassEnv, Phase, StepResult};
pub use observation::{OBSERVATION_DIM, Observation};
pub use single::{
    ActionPolicy, AgentStep, EvalSummary, LowestAction, RandomAction, SingleAgentEnv, evaluate,
};
