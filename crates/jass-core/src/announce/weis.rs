//! Weis: sequences and four-of-a-kind melds declared before the first card.

use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::rules::ranking;
use std::cmp::Ordering;

const MIN_SEQUENCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeisKind {
    Sequence,
    FourOfAKind,
}

/// A single meld. For sequences `rank` is the top card and `suit` is set;
/// for four-of-a-kind `rank` is the shared rank and `suit` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeisCombo {
    pub kind: WeisKind,
    pub length: usize,
    pub rank: Rank,
    pub suit: Option<Suit>,
    pub points: u32,
}

impl WeisCombo {
    pub fn sequence(suit: Suit, top: Rank, length: usize) -> Self {
        Self {
            kind: WeisKind::Sequence,
            length,
            rank: top,
            suit: Some(suit),
            points: sequence_points(length),
        }
    }

    /// `None` for ranks that cannot score as four-of-a-kind.
    pub fn four_of_a_kind(rank: Rank) -> Option<Self> {
        let points = four_kind_points(rank)?;
        Some(Self {
            kind: WeisKind::FourOfAKind,
            length: 4,
            rank,
            suit: None,
            points,
        })
    }

    /// Announcement strength. Sequences of equal length and top rank in
    /// different suits compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.points
            .cmp(&other.points)
            .then(self.kind.cmp(&other.kind))
            .then_with(|| match self.kind {
                WeisKind::Sequence => self
                    .length
                    .cmp(&other.length)
                    .then(self.rank.cmp(&other.rank)),
                WeisKind::FourOfAKind => ranking::trump_rank_score(self.rank)
                    .cmp(&ranking::trump_rank_score(other.rank)),
            })
    }
}

pub const fn sequence_points(length: usize) -> u32 {
    match length {
        0..=2 => 0,
        3 => 20,
        4 => 50,
        _ => 100,
    }
}

pub const fn four_kind_points(rank: Rank) -> Option<u32> {
    match rank {
        Rank::Jack => Some(200),
        Rank::Nine => Some(150),
        Rank::Ace | Rank::King | Rank::Queen | Rank::Ten => Some(100),
        Rank::Six | Rank::Seven | Rank::Eight => None,
    }
}

/// Every meld in `cards`: maximal runs first (suit order), then
/// four-of-a-kinds (rank order). Runs use the canonical rank order whatever
/// the contract.
pub fn find_weis(cards: &[Card]) -> Vec<WeisCombo> {
    let mut present = [[false; 9]; 4];
    for card in cards {
        present[card.suit.index()][card.rank.index()] = true;
    }

    let mut combos = Vec::new();
    for suit in Suit::ALL {
        let mut run = 0usize;
        for rank in Rank::ORDERED {
            if present[suit.index()][rank.index()] {
                run += 1;
                continue;
            }
            push_run(&mut combos, suit, rank.index(), run);
            run = 0;
        }
        push_run(&mut combos, suit, Rank::ORDERED.len(), run);
    }

    for rank in Rank::ORDERED {
        if Suit::ALL.iter().all(|suit| present[suit.index()][rank.index()]) {
            combos.extend(WeisCombo::four_of_a_kind(rank));
        }
    }
    combos
}

/// Records a run that ended just below rank index `end`.
fn push_run(combos: &mut Vec<WeisCombo>, suit: Suit, end: usize, length: usize) {
    if length < MIN_SEQUENCE {
        return;
    }
    if let Some(top) = Rank::from_index(end - 1) {
        combos.push(WeisCombo::sequence(suit, top, length));
    }
}

/// Strongest combo; the earliest wins among equals.
pub fn best_weis(combos: &[WeisCombo]) -> Option<WeisCombo> {
    combos.iter().copied().fold(None, |best, combo| match best {
        Some(current) if combo.compare(&current) != Ordering::Greater => Some(current),
        _ => Some(combo),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeisOutcome {
    /// Points awarded per team (index = team).
    pub points: [u32; 2],
    pub winner: Option<usize>,
    pub best: Option<WeisCombo>,
}

impl WeisOutcome {
    const NONE: WeisOutcome = WeisOutcome {
        points: [0, 0],
        winner: None,
        best: None,
    };

    fn awarded(team: usize, combos: &[WeisCombo], best: WeisCombo) -> Self {
        let mut points = [0, 0];
        points[team] = combos.iter().map(|combo| combo.points).sum();
        Self {
            points,
            winner: Some(team),
            best: Some(best),
        }
    }
}

/// Compares each team's best meld; the stronger team scores all of its
/// melds. An exact tie scores nothing for either side.
pub fn resolve_weis(team_a_cards: &[Card], team_b_cards: &[Card]) -> WeisOutcome {
    let combos_a = find_weis(team_a_cards);
    let combos_b = find_weis(team_b_cards);

    match (best_weis(&combos_a), best_weis(&combos_b)) {
        (None, None) => WeisOutcome::NONE,
        (Some(best), None) => WeisOutcome::awarded(0, &combos_a, best),
        (None, Some(best)) => WeisOutcome::awarded(1, &combos_b, best),
        (Some(a), Some(b)) => match a.compare(&b) {
            Ordering::Greater => WeisOutcome::awarded(0, &combos_a, a),
            Ordering::Less => WeisOutcome::awarded(1, &combos_b, b),
            Ordering::Equal => WeisOutcome::NONE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(suit: Suit, ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|rank| Card::new(*rank, suit)).collect()
    }

    fn four_of(rank: Rank) -> Vec<Card> {
        Suit::ALL.iter().map(|suit| Card::new(rank, *suit)).collect()
    }

    #[test]
    fn three_card_run_scores_twenty() {
        let hand = cards(Suit::Schilten, &[Rank::Six, Rank::Seven, Rank::Eight]);
        let combos = find_weis(&hand);
        assert_eq!(combos, vec![WeisCombo::sequence(Suit::Schilten, Rank::Eight, 3)]);
        assert_eq!(combos[0].points, 20);
    }

    #[test]
    fn runs_are_maximal_and_split_by_gaps() {
        let hand = cards(
            Suit::Rosen,
            &[
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
                Rank::Nine,
                Rank::Jack,
                Rank::Queen,
                Rank::King,
                Rank::Ace,
            ],
        );
        let combos = find_weis(&hand);
        assert_eq!(
            combos,
            vec![
                WeisCombo::sequence(Suit::Rosen, Rank::Nine, 4),
                WeisCombo::sequence(Suit::Rosen, Rank::Ace, 4),
            ]
        );
        assert!(combos.iter().all(|c| c.points == 50));
    }

    #[test]
    fn long_runs_cap_at_one_hundred() {
        let hand = cards(Suit::Eicheln, &Rank::ORDERED);
        let combos = find_weis(&hand);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].length, 9);
        assert_eq!(combos[0].points, 100);
    }

    #[test]
    fn four_jacks_score_two_hundred() {
        let combos = find_weis(&four_of(Rank::Jack));
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].kind, WeisKind::FourOfAKind);
        assert_eq!(combos[0].points, 200);
    }

    #[test]
    fn low_four_of_a_kind_does_not_score() {
        assert!(find_weis(&four_of(Rank::Eight)).is_empty());
        assert_eq!(find_weis(&four_of(Rank::Nine))[0].points, 150);
    }

    #[test]
    fn comparator_prefers_four_kind_on_equal_points() {
        let run = WeisCombo::sequence(Suit::Rosen, Rank::Ace, 5);
        let kings = WeisCombo::four_of_a_kind(Rank::King).unwrap();
        assert_eq!(run.points, kings.points);
        assert_eq!(kings.compare(&run), Ordering::Greater);
    }

    #[test]
    fn comparator_orders_sequences_by_length_then_top() {
        let long = WeisCombo::sequence(Suit::Rosen, Rank::Ten, 6);
        let short = WeisCombo::sequence(Suit::Rosen, Rank::Ace, 5);
        assert_eq!(long.compare(&short), Ordering::Greater);

        let high = WeisCombo::sequence(Suit::Rosen, Rank::King, 3);
        let low = WeisCombo::sequence(Suit::Schellen, Rank::Nine, 3);
        assert_eq!(high.compare(&low), Ordering::Greater);

        let other_suit = WeisCombo::sequence(Suit::Eicheln, Rank::King, 3);
        assert_eq!(high.compare(&other_suit), Ordering::Equal);
    }

    #[test]
    fn comparator_ranks_four_kinds_by_priority() {
        let order = [Rank::Jack, Rank::Nine, Rank::Ace, Rank::King, Rank::Queen, Rank::Ten];
        for pair in order.windows(2) {
            let stronger = WeisCombo::four_of_a_kind(pair[0]).unwrap();
            let weaker = WeisCombo::four_of_a_kind(pair[1]).unwrap();
            assert_eq!(stronger.compare(&weaker), Ordering::Greater);
        }
    }

    #[test]
    fn winning_team_scores_all_of_its_melds() {
        let mut team_a = cards(Suit::Schilten, &[Rank::Six, Rank::Seven, Rank::Eight]);
        team_a.extend(four_of(Rank::Jack));
        let team_b = cards(
            Suit::Rosen,
            &[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace],
        );

        let outcome = resolve_weis(&team_a, &team_b);
        assert_eq!(outcome.winner, Some(0));
        assert_eq!(outcome.points, [220, 0]);
        assert_eq!(outcome.best.map(|b| b.kind), Some(WeisKind::FourOfAKind));
    }

    #[test]
    fn exact_tie_awards_nothing() {
        let team_a = cards(Suit::Schilten, &[Rank::Six, Rank::Seven, Rank::Eight]);
        let team_b = cards(Suit::Rosen, &[Rank::Six, Rank::Seven, Rank::Eight]);
        let outcome = resolve_weis(&team_a, &team_b);
        assert_eq!(outcome.points, [0, 0]);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.best, None);
    }

    #[test]
    fn lone_declaring_team_wins() {
        let team_b = cards(Suit::Rosen, &[Rank::Queen, Rank::King, Rank::Ace]);
        let outcome = resolve_weis(&[], &team_b);
        assert_eq!(outcome.points, [0, 20]);
        assert_eq!(outcome.winner, Some(1));
    }
}
