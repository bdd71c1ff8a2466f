use crate::game::policy::PolicyTable;
use crate::game::state::{GameState, PlayError, PlayOutcome};
use crate::model::mode::Mode;
use crate::model::player::PlayerPosition;
use crate::model::trick::Play;
use crate::rules::ruleset::RulesetConfig;
use tracing::{Level, event};

/// Final state of a deal plus every play in order.
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub state: GameState,
    pub play_log: Vec<Play>,
    /// Seats that announced Weis, indexed by seat.
    pub declared_weis: [bool; 4],
}

/// Deals from `seed` and lets the policies play all nine tricks.
pub fn play_round(
    policies: &mut PolicyTable,
    mode: Mode,
    seed: u64,
    leader: PlayerPosition,
    config: &RulesetConfig,
) -> Result<RoundResult, PlayError> {
    let mut state = GameState::from_seed(seed, mode, leader, config);
    let mut declared_weis = [false; 4];

    if config.allow_weis {
        for step in 0..4 {
            let seat = leader.offset(step);
            declared_weis[seat.index()] = policies[seat.index()].declare_weis(&state, seat);
        }
        state.announce_weis(declared_weis)?;
    }

    let mut play_log = Vec::with_capacity(36);
    while !state.is_complete() {
        let seat = state.current_player();
        let card = policies[seat.index()].choose_play(&state, seat);
        let outcome = state.play_card(seat, card)?;
        play_log.push(Play::new(seat, card));
        if let PlayOutcome::TrickCompleted { winner, points, .. } = outcome {
            event!(
                target: "jass_core::round",
                Level::TRACE,
                winner = %winner,
                points,
                "trick taken"
            );
        }
    }

    event!(
        target: "jass_core::round",
        Level::INFO,
        seed,
        mode = %mode,
        team_points = ?state.team_points(),
        "round complete"
    );

    Ok(RoundResult {
        state,
        play_log,
        declared_weis,
    })
}
