use crate::action::{ACTION_COUNT, Action, ActionMask, ANNOUNCE_ACTION, PASS_ACTION, PUSH_ACTION};
use crate::action::{OBEABE_ACTION, TRUMP_ACTION_BASE, UNEUFE_ACTION};
use crate::observation::{self, Observation};
use jass_core::game::state::{GameState, PlayError};
use jass_core::model::bidding::{BiddingError, BiddingState};
use jass_core::model::deck;
use jass_core::model::hand::Hand;
use jass_core::model::mode::Mode;
use jass_core::model::player::PlayerPosition;
use jass_core::model::suit::Suit;
use jass_core::rules::ruleset::RulesetConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvConfig {
    pub seed: u64,
    pub rules: RulesetConfig,
    /// When off, the contract comes from `mode` or is drawn at random.
    pub enable_bidding: bool,
    pub mode: Option<Mode>,
    /// Bids first and leads the first trick.
    pub starter: PlayerPosition,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            rules: RulesetConfig::default(),
            enable_bidding: true,
            mode: None,
            starter: PlayerPosition::North,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bidding,
    Announce,
    Play,
    Done,
}

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("action {0} is outside the action space")]
    InvalidAction(usize),
    #[error("action {action} is not available during {phase:?}")]
    WrongPhase { phase: Phase, action: usize },
    #[error("no legal action for {0}")]
    NoLegalAction(PlayerPosition),
    #[error("episode is done")]
    Done,
    #[error(transparent)]
    Bidding(#[from] BiddingError),
    #[error(transparent)]
    Play(#[from] PlayError),
}

/// Points earned by each seat during one step. Both members of a team are
/// credited with the team's gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub rewards: [f32; 4],
    pub done: bool,
}

/// Four-seat turn-based environment. Exactly one seat acts at a time; ask
/// [`JassEnv::current_player`] who, and [`JassEnv::action_mask`] what.
#[derive(Debug, Clone)]
pub struct JassEnv {
    config: EnvConfig,
    rng: StdRng,
    phase: Phase,
    hands: [Hand; 4],
    bidding: BiddingState,
    state: Option<GameState>,
    announce_step: usize,
    declared: [bool; 4],
}

impl JassEnv {
    /// Builds the environment and deals the first episode.
    pub fn new(config: EnvConfig) -> Self {
        let mut env = Self {
            config,
            rng: StdRng::seed_from_u64(config.seed),
            phase: Phase::Bidding,
            hands: Default::default(),
            bidding: BiddingState::new(config.starter),
            state: None,
            announce_step: 0,
            declared: [false; 4],
        };
        env.start_episode();
        env
    }

    /// Starts a new episode, re-seeding first when `seed` is given.
    pub fn reset(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.start_episode();
    }

    fn start_episode(&mut self) {
        let deal_seed = self.rng.next_u64();
        self.hands = deck::deal(deal_seed);
        self.bidding = BiddingState::new(self.config.starter);
        self.state = None;
        self.announce_step = 0;
        self.declared = [false; 4];

        event!(
            target: "jass_env",
            Level::DEBUG,
            deal_seed,
            bidding = self.config.enable_bidding,
            "episode reset"
        );

        if self.config.enable_bidding {
            self.phase = Phase::Bidding;
            return;
        }
        let mode = match self.config.mode {
            Some(mode) => mode,
            None => self.draw_mode(),
        };
        self.start_play(mode);
    }

    /// Trump, Obeabe and Uneufe are equally likely; a trump draw then picks
    /// its suit.
    fn draw_mode(&mut self) -> Mode {
        match self.rng.gen_range(0..3) {
            0 => Suit::ALL
                .choose(&mut self.rng)
                .map_or(Mode::Obeabe, |suit| Mode::Trump(*suit)),
            1 => Mode::Obeabe,
            _ => Mode::Uneufe,
        }
    }

    fn start_play(&mut self, mode: Mode) {
        let state = GameState::new(
            self.hands.clone(),
            mode,
            self.config.starter,
            self.config.rules.legal_moves,
        );
        self.state = Some(if self.config.rules.allow_stock {
            state.with_stock()
        } else {
            state
        });
        self.phase = if self.config.rules.allow_weis {
            Phase::Announce
        } else {
            Phase::Play
        };
        event!(target: "jass_env", Level::DEBUG, mode = %mode, "contract fixed");
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Engine state once the contract is fixed.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        match &self.state {
            Some(state) => state.hand(seat),
            None => &self.hands[seat.index()],
        }
    }

    pub fn team_points(&self) -> [u32; 2] {
        self.state
            .as_ref()
            .map_or([0, 0], GameState::team_points)
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Seat expected to act, `None` once the episode is done.
    pub fn current_player(&self) -> Option<PlayerPosition> {
        match self.phase {
            Phase::Bidding => self.bidding.current_bidder(),
            Phase::Announce => Some(self.config.starter.offset(self.announce_step)),
            Phase::Play => self.state.as_ref().map(GameState::current_player),
            Phase::Done => None,
        }
    }

    /// Legal actions for `seat`. All false unless `seat` is to act.
    pub fn action_mask(&self, seat: PlayerPosition) -> ActionMask {
        let mut mask = [false; ACTION_COUNT];
        if self.current_player() != Some(seat) {
            return mask;
        }
        match self.phase {
            Phase::Bidding => {
                mask[TRUMP_ACTION_BASE..OBEABE_ACTION].fill(true);
                mask[OBEABE_ACTION] = true;
                mask[UNEUFE_ACTION] = true;
                mask[PUSH_ACTION] = self.bidding.can_push();
            }
            Phase::Announce => {
                mask[ANNOUNCE_ACTION] = true;
                mask[PASS_ACTION] = true;
            }
            Phase::Play => {
                if let Some(state) = &self.state {
                    for card in state.legal_cards_for(seat) {
                        mask[card.to_id()] = true;
                    }
                }
            }
            Phase::Done => {}
        }
        mask
    }

    pub fn observe(&self, seat: PlayerPosition) -> Observation {
        match &self.state {
            Some(state) => observation::encode(state, seat),
            None => observation::hand_only(&self.hands[seat.index()]),
        }
    }

    /// Applies `action` for the current seat. A rejected action leaves the
    /// environment untouched.
    pub fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        let decoded = Action::from_index(action).ok_or(EnvError::InvalidAction(action))?;
        let seat = self.current_player().ok_or(EnvError::Done)?;
        let before = self.team_points();

        match (self.phase, decoded) {
            (Phase::Bidding, Action::Bid(bid)) => {
                if let Some(result) = self.bidding.submit(seat, bid)? {
                    self.start_play(result.mode);
                }
            }
            (Phase::Announce, Action::Announce | Action::Pass) => {
                let mut declared = self.declared;
                declared[seat.index()] = decoded == Action::Announce;
                if self.announce_step + 1 == 4 {
                    if let Some(state) = self.state.as_mut() {
                        state.announce_weis(declared)?;
                    }
                    self.phase = Phase::Play;
                }
                self.declared = declared;
                self.announce_step += 1;
            }
            (Phase::Play, Action::Play(card)) => {
                if let Some(state) = self.state.as_mut() {
                    state.play_card(seat, card)?;
                    if state.is_complete() {
                        self.phase = Phase::Done;
                        event!(
                            target: "jass_env",
                            Level::DEBUG,
                            team_points = ?state.team_points(),
                            "episode done"
                        );
                    }
                }
            }
            (phase, _) => return Err(EnvError::WrongPhase { phase, action }),
        }

        let after = self.team_points();
        let mut rewards = [0.0; 4];
        for seat in PlayerPosition::LOOP {
            let team = seat.team_index();
            rewards[seat.index()] = (after[team] - before[team]) as f32;
        }
        Ok(StepResult {
            rewards,
            done: self.is_done(),
        })
    }
}
