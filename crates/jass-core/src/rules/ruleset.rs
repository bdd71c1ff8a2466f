use serde::{Deserialize, Serialize};

/// Trick-legality toggles. Each flag switches one rule of the legal-move
/// cascade on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ruleset {
    pub must_follow_suit: bool,
    pub must_trump: bool,
    pub must_overtrump: bool,
    /// When false, a player whose partner currently wins the trick may
    /// discard instead of trumping.
    pub must_trump_if_partner_winning: bool,
}

impl Ruleset {
    pub const STANDARD: Ruleset = Ruleset {
        must_follow_suit: true,
        must_trump: true,
        must_overtrump: true,
        must_trump_if_partner_winning: false,
    };
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Table-level rules: legal-move toggles plus which bonuses are in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesetConfig {
    pub allow_weis: bool,
    pub allow_stock: bool,
    pub legal_moves: Ruleset,
}

impl RulesetConfig {
    /// Card points only: no Weis, no Stock.
    pub const fn cards_only(legal_moves: Ruleset) -> Self {
        Self {
            allow_weis: false,
            allow_stock: false,
            legal_moves,
        }
    }
}

impl Default for RulesetConfig {
    fn default() -> Self {
        Self {
            allow_weis: true,
            allow_stock: true,
            legal_moves: Ruleset::STANDARD,
        }
    }
}
