//! Legal-move cascade.
//!
//! Each rule inspects the situation and either restricts the candidate set
//! or abstains. Rules run in priority order; the first restriction wins and
//! the whole hand is the fallback.

use crate::model::card::Card;
use crate::model::mode::Mode;
use crate::model::suit::Suit;
use crate::rules::ranking;
use crate::rules::ruleset::Ruleset;

/// Inputs shared by every rule of the cascade. `trick` is never empty.
#[derive(Debug, Clone, Copy)]
pub struct LegalContext<'a> {
    pub hand: &'a [Card],
    pub trick: &'a [Card],
    pub led_suit: Suit,
    pub mode: Mode,
    pub partner_is_winning: bool,
    pub ruleset: &'a Ruleset,
}

type Rule = fn(&LegalContext<'_>) -> Option<Vec<Card>>;

const CASCADE: [Rule; 2] = [follow_suit, must_trump];

/// Cards of `hand` that may be played into `trick`.
///
/// Returns every card of a non-empty hand when the trick is empty, and is
/// never empty for a non-empty hand.
pub fn legal_cards(
    hand: &[Card],
    trick: &[Card],
    mode: Mode,
    partner_is_winning: bool,
    ruleset: &Ruleset,
) -> Vec<Card> {
    let Some(led) = trick.first() else {
        return hand.to_vec();
    };
    if hand.is_empty() {
        return Vec::new();
    }

    let ctx = LegalContext {
        hand,
        trick,
        led_suit: led.suit,
        mode,
        partner_is_winning,
        ruleset,
    };

    CASCADE
        .iter()
        .find_map(|rule| rule(&ctx))
        .unwrap_or_else(|| hand.to_vec())
}

/// Holding the led suit restricts play to it. When trump is led and
/// overtrumping is mandatory the suited cards are overtrump-filtered.
pub fn follow_suit(ctx: &LegalContext<'_>) -> Option<Vec<Card>> {
    if !ctx.ruleset.must_follow_suit {
        return None;
    }
    let suited = cards_of_suit(ctx.hand, ctx.led_suit);
    if suited.is_empty() {
        return None;
    }
    match ctx.mode {
        Mode::Trump(trump) if trump == ctx.led_suit && ctx.ruleset.must_overtrump => {
            Some(overtrump_filter(suited, ctx.trick, trump))
        }
        _ => Some(suited),
    }
}

/// In a trump contract a player who reached this rule must trump when able,
/// unless the partner is winning and the ruleset waives the obligation.
pub fn must_trump(ctx: &LegalContext<'_>) -> Option<Vec<Card>> {
    let Mode::Trump(trump) = ctx.mode else {
        return None;
    };
    if !ctx.ruleset.must_trump {
        return None;
    }
    if ctx.partner_is_winning && !ctx.ruleset.must_trump_if_partner_winning {
        return None;
    }
    let trumps = cards_of_suit(ctx.hand, trump);
    if trumps.is_empty() {
        return None;
    }
    if ctx.ruleset.must_overtrump {
        Some(overtrump_filter(trumps, ctx.trick, trump))
    } else {
        Some(trumps)
    }
}

/// Keeps the trumps that beat the highest trump already in the trick. If
/// none can, every candidate stays legal.
pub fn overtrump_filter(candidates: Vec<Card>, trick: &[Card], trump: Suit) -> Vec<Card> {
    let mode = Mode::Trump(trump);
    let trick_trumps = trick.iter().copied().filter(|card| card.suit == trump);
    let Some(highest) = ranking::winning_card(trick_trumps, trump, mode) else {
        return candidates;
    };
    let overtrumps: Vec<Card> = candidates
        .iter()
        .copied()
        .filter(|card| ranking::beats(*card, highest, trump, mode))
        .collect();
    if overtrumps.is_empty() {
        candidates
    } else {
        overtrumps
    }
}

fn cards_of_suit(hand: &[Card], suit: Suit) -> Vec<Card> {
    hand.iter().copied().filter(|card| card.suit == suit).collect()
}
