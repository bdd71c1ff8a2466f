use crate::announce::stock::StockTracker;
use crate::announce::weis::{self, WeisOutcome};
use crate::model::card::Card;
use crate::model::deck;
use crate::model::hand::Hand;
use crate::model::mode::Mode;
use crate::model::player::PlayerPosition;
use crate::model::trick::{Play, Trick, TrickError};
use crate::rules::legal;
use crate::rules::ruleset::{Ruleset, RulesetConfig};
use crate::rules::scoring;
use thiserror::Error;
use tracing::{Level, event};

pub const TRICKS_PER_DEAL: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickResult {
    pub plays: Vec<Play>,
    pub winner: PlayerPosition,
    /// Card points, including the last-trick bonus.
    pub points: u32,
    pub last_trick: bool,
}

impl TrickResult {
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusKind {
    Weis,
    Stock(PlayerPosition),
}

/// Meld points credited outside of trick taking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    pub team: usize,
    pub kind: BonusKind,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// `stock` holds the Stock points the play earned, usually zero.
    Played { stock: u32 },
    TrickCompleted {
        winner: PlayerPosition,
        points: u32,
        stock: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("round is already complete")]
    RoundComplete,
    #[error("not {actual}'s turn, expected {expected}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{card} is not in {seat}'s hand")]
    CardNotInHand { seat: PlayerPosition, card: Card },
    #[error("illegal card {card}")]
    IllegalCard { card: Card, legal: Vec<Card> },
    #[error("announcements are only possible once before the first card")]
    AnnouncementClosed,
    #[error(transparent)]
    Trick(#[from] TrickError),
}

/// One deal in progress. Every mutation goes through [`GameState::play_card`]
/// (or its relaxed variant) and the one-shot [`GameState::announce_weis`];
/// a failed call leaves the state untouched.
#[derive(Debug, Clone)]
pub struct GameState {
    hands: [Hand; 4],
    mode: Mode,
    ruleset: Ruleset,
    leader: PlayerPosition,
    trick: Trick,
    trick_index: usize,
    team_points: [u32; 2],
    completed_tricks: Vec<TrickResult>,
    bonuses: Vec<Bonus>,
    stock: Option<StockTracker>,
    weis_announced: bool,
}

impl GameState {
    pub fn new(hands: [Hand; 4], mode: Mode, leader: PlayerPosition, ruleset: Ruleset) -> Self {
        Self {
            hands,
            mode,
            ruleset,
            leader,
            trick: Trick::new(leader),
            trick_index: 0,
            team_points: [0, 0],
            completed_tricks: Vec::with_capacity(TRICKS_PER_DEAL),
            bonuses: Vec::new(),
            stock: None,
            weis_announced: false,
        }
    }

    /// Deals from `seed` and applies the table rules. Stock tracking is
    /// only active for trump contracts.
    pub fn from_seed(
        seed: u64,
        mode: Mode,
        leader: PlayerPosition,
        config: &RulesetConfig,
    ) -> Self {
        let state = Self::new(deck::deal(seed), mode, leader, config.legal_moves);
        if config.allow_stock {
            state.with_stock()
        } else {
            state
        }
    }

    pub fn with_stock(mut self) -> Self {
        if self.mode.trump_suit().is_some() {
            self.stock = Some(StockTracker::new());
        }
        self
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn current_trick(&self) -> &Trick {
        &self.trick
    }

    pub fn trick_index(&self) -> usize {
        self.trick_index
    }

    pub fn team_points(&self) -> [u32; 2] {
        self.team_points
    }

    pub fn completed_tricks(&self) -> &[TrickResult] {
        &self.completed_tricks
    }

    pub fn bonuses(&self) -> &[Bonus] {
        &self.bonuses
    }

    pub fn stock_enabled(&self) -> bool {
        self.stock.is_some()
    }

    pub fn weis_announced(&self) -> bool {
        self.weis_announced
    }

    pub fn is_complete(&self) -> bool {
        self.trick_index >= TRICKS_PER_DEAL
    }

    /// Every card played so far, completed tricks first.
    pub fn played_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.completed_tricks
            .iter()
            .flat_map(TrickResult::cards)
            .chain(self.trick.plays().iter().map(|play| play.card))
    }

    pub fn current_player(&self) -> PlayerPosition {
        self.trick.expected_position()
    }

    pub fn current_winning_player(&self) -> Option<PlayerPosition> {
        self.trick.winning_play(self.mode).map(|play| play.position)
    }

    pub fn legal_cards_for(&self, seat: PlayerPosition) -> Vec<Card> {
        let partner_is_winning = self.current_winning_player() == Some(seat.partner());
        legal::legal_cards(
            self.hands[seat.index()].cards(),
            &self.trick.cards(),
            self.mode,
            partner_is_winning,
            &self.ruleset,
        )
    }

    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        self.apply_play(seat, card, true)
    }

    /// Like [`GameState::play_card`] but without the seat-rotation check.
    /// Hand membership and legality are still enforced.
    pub fn play_card_any_order(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        self.apply_play(seat, card, false)
    }

    /// Credits Weis for the seats in `declared` (indexed by seat). Only
    /// possible once and only before the first card.
    pub fn announce_weis(&mut self, declared: [bool; 4]) -> Result<WeisOutcome, PlayError> {
        if self.weis_announced || self.trick_index > 0 || !self.trick.is_empty() {
            return Err(PlayError::AnnouncementClosed);
        }

        let pooled = |team: usize| -> Vec<Card> {
            PlayerPosition::members_of(team)
                .into_iter()
                .filter(|seat| declared[seat.index()])
                .flat_map(|seat| self.hands[seat.index()].cards().iter().copied())
                .collect()
        };
        let outcome = weis::resolve_weis(&pooled(0), &pooled(1));

        self.weis_announced = true;
        if let Some(team) = outcome.winner {
            let points = outcome.points[team];
            self.team_points[team] += points;
            self.bonuses.push(Bonus {
                team,
                kind: BonusKind::Weis,
                points,
            });
            event!(
                target: "jass_core::round",
                Level::INFO,
                team,
                points,
                best = ?outcome.best,
                "weis awarded"
            );
        }
        Ok(outcome)
    }

    fn apply_play(
        &mut self,
        seat: PlayerPosition,
        card: Card,
        enforce_turn: bool,
    ) -> Result<PlayOutcome, PlayError> {
        if self.is_complete() {
            return Err(PlayError::RoundComplete);
        }

        let expected = self.current_player();
        if enforce_turn && seat != expected {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        if !self.hands[seat.index()].contains(card) {
            return Err(PlayError::CardNotInHand { seat, card });
        }

        let legal = self.legal_cards_for(seat);
        if !legal.contains(&card) {
            return Err(PlayError::IllegalCard { card, legal });
        }

        if enforce_turn {
            self.trick.play(seat, card)?;
        } else {
            self.trick.play_any_order(seat, card)?;
        }
        self.hands[seat.index()].remove(card);

        let stock = self.record_stock(seat, card);

        if !self.trick.is_complete() {
            return Ok(PlayOutcome::Played { stock });
        }
        let (winner, points) = self.resolve_trick()?;
        Ok(PlayOutcome::TrickCompleted {
            winner,
            points,
            stock,
        })
    }

    fn record_stock(&mut self, seat: PlayerPosition, card: Card) -> u32 {
        let (Some(tracker), Some(trump)) = (self.stock.as_mut(), self.mode.trump_suit()) else {
            return 0;
        };
        let points = tracker.record_play(seat, card, trump);
        if points > 0 {
            let team = seat.team_index();
            self.team_points[team] += points;
            self.bonuses.push(Bonus {
                team,
                kind: BonusKind::Stock(seat),
                points,
            });
            event!(
                target: "jass_core::round",
                Level::INFO,
                seat = %seat,
                team,
                points,
                "stock awarded"
            );
        }
        points
    }

    fn resolve_trick(&mut self) -> Result<(PlayerPosition, u32), PlayError> {
        let winning = self
            .trick
            .winning_play(self.mode)
            .ok_or(TrickError::Incomplete)?;
        let winner = winning.position;
        let last_trick = self.trick_index == TRICKS_PER_DEAL - 1;
        let points = scoring::trick_points(self.trick.cards(), self.mode, last_trick);
        let team = winner.team_index();
        self.team_points[team] += points;

        let finished = std::mem::replace(&mut self.trick, Trick::new(winner));
        event!(
            target: "jass_core::round",
            Level::DEBUG,
            trick = self.trick_index,
            winner = %winner,
            card = %winning.card,
            points,
            team_points = ?self.team_points,
            "trick resolved"
        );
        self.completed_tricks.push(TrickResult {
            plays: finished.plays().to_vec(),
            winner,
            points,
            last_trick,
        });
        self.leader = winner;
        self.trick_index += 1;
        Ok((winner, points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn hand(cards: &[Card]) -> Hand {
        Hand::with_cards(cards.to_vec())
    }

    /// One card each: North leads.
    fn single_trick_state(mode: Mode) -> GameState {
        let hands = [
            hand(&[card(Rank::Ace, Suit::Rosen)]),
            hand(&[card(Rank::Six, Suit::Rosen)]),
            hand(&[card(Rank::Ten, Suit::Rosen)]),
            hand(&[card(Rank::Six, Suit::Eicheln)]),
        ];
        GameState::new(hands, mode, PlayerPosition::North, Ruleset::STANDARD)
    }

    #[test]
    fn out_of_turn_leaves_state_untouched() {
        let config = RulesetConfig::default();
        let mut state = GameState::from_seed(3, Mode::Obeabe, PlayerPosition::East, &config);
        let before = state.hand(PlayerPosition::North).clone();
        let card = before.cards()[0];
        assert_eq!(
            state.play_card(PlayerPosition::North, card),
            Err(PlayError::OutOfTurn {
                expected: PlayerPosition::East,
                actual: PlayerPosition::North,
            })
        );
        assert_eq!(state.hand(PlayerPosition::North), &before);
        assert!(state.current_trick().is_empty());
    }

    #[test]
    fn card_not_in_hand_is_rejected() {
        let mut state = single_trick_state(Mode::Obeabe);
        let foreign = card(Rank::Six, Suit::Rosen);
        assert_eq!(
            state.play_card(PlayerPosition::North, foreign),
            Err(PlayError::CardNotInHand {
                seat: PlayerPosition::North,
                card: foreign,
            })
        );
    }

    #[test]
    fn illegal_card_reports_legal_set() {
        let hands = [
            hand(&[card(Rank::Ace, Suit::Rosen)]),
            hand(&[card(Rank::Six, Suit::Rosen), card(Rank::Ace, Suit::Eicheln)]),
            hand(&[card(Rank::Ten, Suit::Rosen)]),
            hand(&[card(Rank::Six, Suit::Eicheln)]),
        ];
        let mut state = GameState::new(hands, Mode::Obeabe, PlayerPosition::North, Ruleset::STANDARD);
        state.play_card(PlayerPosition::North, card(Rank::Ace, Suit::Rosen)).unwrap();
        let err = state
            .play_card(PlayerPosition::East, card(Rank::Ace, Suit::Eicheln))
            .unwrap_err();
        assert_eq!(
            err,
            PlayError::IllegalCard {
                card: card(Rank::Ace, Suit::Eicheln),
                legal: vec![card(Rank::Six, Suit::Rosen)],
            }
        );
        assert_eq!(state.hand(PlayerPosition::East).len(), 2);
        assert_eq!(state.current_trick().plays().len(), 1);
    }

    #[test]
    fn completed_trick_credits_winner_team() {
        let mut state = single_trick_state(Mode::Obeabe);
        for seat in PlayerPosition::LOOP {
            let card = state.hand(seat).cards()[0];
            let outcome = state.play_card(seat, card).unwrap();
            if seat == PlayerPosition::West {
                assert_eq!(
                    outcome,
                    PlayOutcome::TrickCompleted {
                        winner: PlayerPosition::North,
                        points: 21,
                        stock: 0,
                    }
                );
            }
        }
        assert_eq!(state.team_points(), [21, 0]);
        assert_eq!(state.leader(), PlayerPosition::North);
        assert_eq!(state.trick_index(), 1);
        assert_eq!(state.completed_tricks().len(), 1);
        assert!(!state.completed_tricks()[0].last_trick);
    }

    #[test]
    fn partner_winning_relaxes_must_trump() {
        let hands = [
            hand(&[card(Rank::Ace, Suit::Schilten)]),
            hand(&[card(Rank::Six, Suit::Schilten)]),
            hand(&[card(Rank::Six, Suit::Rosen), card(Rank::Seven, Suit::Eicheln)]),
            hand(&[card(Rank::Seven, Suit::Schilten)]),
        ];
        let mut state = GameState::new(
            hands,
            Mode::Trump(Suit::Rosen),
            PlayerPosition::North,
            Ruleset::STANDARD,
        );
        state.play_card(PlayerPosition::North, card(Rank::Ace, Suit::Schilten)).unwrap();
        state.play_card(PlayerPosition::East, card(Rank::Six, Suit::Schilten)).unwrap();
        assert_eq!(state.current_winning_player(), Some(PlayerPosition::North));
        assert_eq!(state.legal_cards_for(PlayerPosition::South).len(), 2);
    }

    #[test]
    fn weis_only_before_first_card_and_once() {
        let config = RulesetConfig::default();
        let mut state = GameState::from_seed(11, Mode::Obeabe, PlayerPosition::North, &config);
        assert!(state.announce_weis([true; 4]).is_ok());
        assert_eq!(
            state.announce_weis([true; 4]),
            Err(PlayError::AnnouncementClosed)
        );

        let mut late = GameState::from_seed(11, Mode::Obeabe, PlayerPosition::North, &config);
        let first = late.legal_cards_for(PlayerPosition::North)[0];
        late.play_card(PlayerPosition::North, first).unwrap();
        assert_eq!(late.announce_weis([true; 4]), Err(PlayError::AnnouncementClosed));
    }

    #[test]
    fn weis_pools_declaring_partners() {
        let hands = [
            hand(&[card(Rank::Jack, Suit::Schellen), card(Rank::Jack, Suit::Rosen)]),
            hand(&[card(Rank::Six, Suit::Eicheln)]),
            hand(&[card(Rank::Jack, Suit::Schilten), card(Rank::Jack, Suit::Eicheln)]),
            hand(&[card(Rank::Seven, Suit::Eicheln)]),
        ];
        let base = GameState::new(hands, Mode::Obeabe, PlayerPosition::North, Ruleset::STANDARD);

        let mut both = base.clone();
        let outcome = both.announce_weis([true, false, true, false]).unwrap();
        assert_eq!(outcome.points, [200, 0]);
        assert_eq!(both.team_points(), [200, 0]);
        assert_eq!(both.bonuses()[0].kind, BonusKind::Weis);

        let mut one = base;
        let outcome = one.announce_weis([true, false, false, false]).unwrap();
        assert_eq!(outcome.winner, None);
        assert_eq!(one.team_points(), [0, 0]);
    }

    #[test]
    fn stock_credits_twenty_on_second_half() {
        let trump = Suit::Rosen;
        let hands = [
            hand(&[card(Rank::King, trump), card(Rank::Queen, trump)]),
            hand(&[card(Rank::Six, trump), card(Rank::Seven, trump)]),
            hand(&[card(Rank::Eight, trump), card(Rank::Ten, trump)]),
            hand(&[card(Rank::Six, Suit::Eicheln), card(Rank::Seven, Suit::Eicheln)]),
        ];
        let mut state =
            GameState::new(hands, Mode::Trump(trump), PlayerPosition::North, Ruleset::STANDARD)
                .with_stock();

        assert_eq!(
            state.play_card(PlayerPosition::North, card(Rank::King, trump)),
            Ok(PlayOutcome::Played { stock: 0 })
        );
        state.play_card(PlayerPosition::East, card(Rank::Six, trump)).unwrap();
        state.play_card(PlayerPosition::South, card(Rank::Ten, trump)).unwrap();
        state.play_card(PlayerPosition::West, card(Rank::Six, Suit::Eicheln)).unwrap();
        let before = state.team_points();

        let leader = state.leader();
        assert_eq!(leader, PlayerPosition::North);
        let outcome = state.play_card(PlayerPosition::North, card(Rank::Queen, trump)).unwrap();
        assert_eq!(outcome, PlayOutcome::Played { stock: 20 });
        assert_eq!(state.team_points()[0], before[0] + 20);
        assert!(matches!(
            state.bonuses().last().map(|b| b.kind),
            Some(BonusKind::Stock(PlayerPosition::North))
        ));
    }

    #[test]
    fn stock_ignored_outside_trump() {
        let config = RulesetConfig::default();
        let state = GameState::from_seed(1, Mode::Uneufe, PlayerPosition::North, &config);
        assert!(!state.stock_enabled());
        let trump_mode = Mode::Trump(Suit::Schellen);
        let trump = GameState::from_seed(1, trump_mode, PlayerPosition::North, &config);
        assert!(trump.stock_enabled());
    }

    #[test]
    fn relaxed_play_skips_turn_check_only() {
        let mut state = single_trick_state(Mode::Obeabe);
        state
            .play_card_any_order(PlayerPosition::North, card(Rank::Ace, Suit::Rosen))
            .unwrap();
        state
            .play_card_any_order(PlayerPosition::South, card(Rank::Ten, Suit::Rosen))
            .unwrap();
        assert!(matches!(
            state.play_card_any_order(PlayerPosition::South, card(Rank::Six, Suit::Rosen)),
            Err(PlayError::CardNotInHand { .. })
        ));
    }

    #[test]
    fn finished_round_rejects_plays() {
        let mut state = single_trick_state(Mode::Obeabe);
        for seat in PlayerPosition::LOOP {
            let card = state.hand(seat).cards()[0];
            state.play_card(seat, card).unwrap();
        }
        assert_eq!(state.played_cards().count(), 4);
        // A one-card deal is not nine tricks; force completion by index.
        state.trick_index = TRICKS_PER_DEAL;
        assert_eq!(
            state.play_card(PlayerPosition::North, card(Rank::Ace, Suit::Rosen)),
            Err(PlayError::RoundComplete)
        );
    }
}
