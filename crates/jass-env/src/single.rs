//! One learning seat against scripted opponents.

use crate::action::ActionMask;
use crate::env::{EnvConfig, EnvError, JassEnv};
use crate::observation::{OBSERVATION_DIM, Observation};
use jass_core::model::player::PlayerPosition;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use tracing::{Level, event};

/// Picks an action index for `seat` from the environment's mask.
pub trait ActionPolicy: Send {
    fn act(&mut self, env: &JassEnv, seat: PlayerPosition) -> Option<usize>;
}

fn legal_indices(mask: &ActionMask) -> impl Iterator<Item = usize> + '_ {
    mask.iter()
        .enumerate()
        .filter_map(|(index, legal)| legal.then_some(index))
}

/// Always the lowest legal action index.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowestAction;

impl ActionPolicy for LowestAction {
    fn act(&mut self, env: &JassEnv, seat: PlayerPosition) -> Option<usize> {
        legal_indices(&env.action_mask(seat)).next()
    }
}

/// Uniform over the legal actions.
#[derive(Debug, Clone)]
pub struct RandomAction {
    rng: StdRng,
}

impl RandomAction {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActionPolicy for RandomAction {
    fn act(&mut self, env: &JassEnv, seat: PlayerPosition) -> Option<usize> {
        legal_indices(&env.action_mask(seat)).choose(&mut self.rng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentStep {
    /// Zeroed once the episode is done.
    pub obs: Observation,
    pub reward: f32,
    pub done: bool,
}

/// Wraps [`JassEnv`] so that only `agent` is asked for actions; every other
/// seat is driven by the opponent policy between agent turns.
pub struct SingleAgentEnv {
    env: JassEnv,
    agent: PlayerPosition,
    opponent: Box<dyn ActionPolicy>,
}

impl SingleAgentEnv {
    pub fn new(config: EnvConfig, agent: PlayerPosition, opponent: Box<dyn ActionPolicy>) -> Self {
        Self {
            env: JassEnv::new(config),
            agent,
            opponent,
        }
    }

    pub fn env(&self) -> &JassEnv {
        &self.env
    }

    pub fn agent(&self) -> PlayerPosition {
        self.agent
    }

    pub fn set_opponent(&mut self, opponent: Box<dyn ActionPolicy>) {
        self.opponent = opponent;
    }

    pub fn action_mask(&self) -> ActionMask {
        self.env.action_mask(self.agent)
    }

    /// Starts an episode and plays opponents until the agent is to act.
    /// Rewards earned before the agent's first turn are dropped.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Observation, EnvError> {
        self.env.reset(seed);
        self.advance_to_agent()?;
        Ok(self.observe())
    }

    pub fn step(&mut self, action: usize) -> Result<AgentStep, EnvError> {
        if self.env.is_done() {
            return Err(EnvError::Done);
        }
        let mut reward = self.env.step(action)?.rewards[self.agent.index()];
        reward += self.advance_to_agent()?;
        Ok(AgentStep {
            obs: self.observe(),
            reward,
            done: self.env.is_done(),
        })
    }

    fn observe(&self) -> Observation {
        if self.env.is_done() {
            [0.0; OBSERVATION_DIM]
        } else {
            self.env.observe(self.agent)
        }
    }

    fn advance_to_agent(&mut self) -> Result<f32, EnvError> {
        let mut reward = 0.0;
        while let Some(seat) = self.env.current_player() {
            if seat == self.agent {
                break;
            }
            let action = self
                .opponent
                .act(&self.env, seat)
                .ok_or(EnvError::NoLegalAction(seat))?;
            reward += self.env.step(action)?.rewards[self.agent.index()];
        }
        Ok(reward)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalSummary {
    pub episodes: usize,
    pub wins: usize,
    pub ties: usize,
    /// Mean final points of the agent's team.
    pub mean_points: f64,
}

impl EvalSummary {
    pub fn win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.wins as f64 / self.episodes as f64
        }
    }
}

/// Plays `episodes` deals with `agent` in the agent seat; episode `n` is
/// seeded with `seed + n`, wrapping at `u64::MAX`.
pub fn evaluate(
    single: &mut SingleAgentEnv,
    agent: &mut dyn ActionPolicy,
    episodes: usize,
    seed: u64,
) -> Result<EvalSummary, EnvError> {
    let seat = single.agent();
    let team = seat.team_index();
    let mut wins = 0;
    let mut ties = 0;
    let mut total_points = 0u64;

    for episode in 0..episodes {
        single.reset(Some(seed.wrapping_add(episode as u64)))?;
        while !single.env().is_done() {
            let action = agent
                .act(single.env(), seat)
                .ok_or(EnvError::NoLegalAction(seat))?;
            single.step(action)?;
        }
        let points = single.env().team_points();
        total_points += u64::from(points[team]);
        match points[team].cmp(&points[1 - team]) {
            std::cmp::Ordering::Greater => wins += 1,
            std::cmp::Ordering::Equal => ties += 1,
            std::cmp::Ordering::Less => {}
        }
    }

    let summary = EvalSummary {
        episodes,
        wins,
        ties,
        mean_points: if episodes == 0 {
            0.0
        } else {
            total_points as f64 / episodes as f64
        },
    };
    event!(
        target: "jass_env",
        Level::INFO,
        episodes,
        wins,
        ties,
        mean_points = summary.mean_points,
        "evaluation finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jass_core::model::mode::Mode;
    use jass_core::model::suit::Suit;
    use jass_core::rules::ruleset::RulesetConfig;

    fn schilten_config() -> EnvConfig {
        EnvConfig {
            seed: 3,
            rules: RulesetConfig::cards_only(Default::default()),
            enable_bidding: false,
            mode: Some(Mode::Trump(Suit::Schilten)),
            starter: PlayerPosition::North,
        }
    }

    #[test]
    fn reset_hands_control_to_agent() {
        let mut single = SingleAgentEnv::new(
            schilten_config(),
            PlayerPosition::East,
            Box::new(LowestAction),
        );
        let obs = single.reset(None).unwrap();
        assert_eq!(obs.len(), OBSERVATION_DIM);
        assert_eq!(single.env().current_player(), Some(PlayerPosition::East));
        assert!(single.action_mask().iter().any(|v| *v));
    }

    #[test]
    fn agent_rewards_sum_to_team_points() {
        let mut single = SingleAgentEnv::new(
            schilten_config(),
            PlayerPosition::North,
            Box::new(RandomAction::with_seed(9)),
        );
        single.reset(None).unwrap();
        let mut policy = LowestAction;
        let mut total = 0.0;
        loop {
            let action = policy.act(single.env(), PlayerPosition::North).unwrap();
            let step = single.step(action).unwrap();
            total += step.reward;
            if step.done {
                assert!(step.obs.iter().all(|v| *v == 0.0));
                break;
            }
        }
        assert_eq!(total, single.env().team_points()[0] as f32);
        assert!(matches!(single.step(0), Err(EnvError::Done)));
    }

    #[test]
    fn evaluation_counts_every_episode() {
        let mut single = SingleAgentEnv::new(
            schilten_config(),
            PlayerPosition::North,
            Box::new(LowestAction),
        );
        let summary = evaluate(&mut single, &mut RandomAction::with_seed(1), 5, 100).unwrap();
        assert_eq!(summary.episodes, 5);
        assert!(summary.wins + summary.ties <= 5);
        assert!(summary.mean_points <= 157.0);
    }

    #[test]
    fn evaluation_seeds_wrap_at_the_top_of_the_range() {
        let mut single = SingleAgentEnv::new(
            schilten_config(),
            PlayerPosition::North,
            Box::new(LowestAction),
        );
        let summary = evaluate(&mut single, &mut LowestAction, 2, u64::MAX).unwrap();
        assert_eq!(summary.episodes, 2);

        let mut wrapped = SingleAgentEnv::new(
            schilten_config(),
            PlayerPosition::North,
            Box::new(LowestAction),
        );
        let first = evaluate(&mut wrapped, &mut LowestAction, 1, u64::MAX).unwrap();
        let second = evaluate(&mut wrapped, &mut LowestAction, 1, 0).unwrap();
        assert_eq!(
            summary.mean_points * 2.0,
            first.mean_points + second.mean_points
        );
    }
}
