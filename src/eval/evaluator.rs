use super::hand_rank::{Category, HandRank};
use crate::cards::{Card, Rank};
use crate::error::Error;
use std::collections::HashMap;

/// Evaluates exactly 5 cards into a `HandRank`.
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let flush = cards.windows(2).all(|w| w[0].suit() == w[1].suit());

    let mut distinct_ranks: Vec<i8> = cards.iter().map(|c| c.rank() as i8).collect();
    distinct_ranks.sort_unstable();
    distinct_ranks.dedup();
    distinct_ranks.reverse(); // descending

    let straight_high = find_straight_high(&distinct_ranks);

    if let Some(high) = straight_high {
        if flush {
            return HandRank::new(Category::StraightFlush, vec![Rank::from(high as u8)], vec![]);
        }
    }
    if flush {
        let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        return HandRank::new(Category::Flush, vec![], ranks);
    }
    if let Some(high) = straight_high {
        return HandRank::new(Category::Straight, vec![Rank::from(high as u8)], vec![]);
    }

    // histogram, sorted by (count desc, rank desc)
    let mut counts: HashMap<i8, u8> = HashMap::new();
    for c in cards {
        *counts.entry(c.rank() as i8).or_insert(0) += 1;
    }
    let mut histogram: Vec<(u8, i8)> = counts.into_iter().map(|(r, n)| (n, r)).collect();
    histogram.sort_unstable_by(|a, b| b.cmp(a));

    let pattern: Vec<u8> = histogram.iter().map(|(n, _)| *n).collect();
    let rank_at = |i: usize| Rank::from(histogram[i].1 as u8);

    match pattern.as_slice() {
        [4, 1] => HandRank::new(Category::Quads, vec![rank_at(0)], vec![rank_at(1)]),
        [3, 2] => HandRank::new(Category::FullHouse, vec![rank_at(0), rank_at(1)], vec![]),
        [3, 1, 1] => HandRank::new(
            Category::Trips,
            vec![rank_at(0)],
            vec![rank_at(1), rank_at(2)],
        ),
        [2, 2, 1] => HandRank::new(
            Category::TwoPair,
            vec![rank_at(0), rank_at(1)],
            vec![rank_at(2)],
        ),
        [2, 1, 1, 1] => HandRank::new(
            Category::Pair,
            vec![rank_at(0)],
            vec![rank_at(1), rank_at(2), rank_at(3)],
        ),
        _ => {
            let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
            ranks.sort_unstable_by(|a, b| b.cmp(a));
            HandRank::new(Category::HighCard, vec![], ranks)
        }
    }
}

/// `ranks` is sorted descending and deduplicated. Returns the straight's
/// high rank value, treating `{A,5,4,3,2}` as 5-high (the wheel).
fn find_straight_high(ranks: &[i8]) -> Option<i8> {
    const ACE: i8 = Rank::Ace as i8;
    const FIVE: i8 = Rank::Five as i8;
    const WHEEL: [i8; 5] = [ACE, FIVE, 3, 2, 0]; // A,5,4,3,2 as rank values, descending

    // A straight needs 5 distinct ranks; `ranks` is already deduped, so a
    // 5-card hand can only form one if nothing paired.
    if ranks.len() != 5 {
        return None;
    }
    if ranks[0] - ranks[4] == 4 {
        return Some(ranks[0]);
    }
    if ranks == WHEEL {
        return Some(FIVE);
    }
    None
}

/// Evaluates the best 5-card hand out of 5–7 cards by trying every 5-card
/// combination and keeping the maximum.
pub fn best_hand_rank(cards: &[Card]) -> Result<HandRank, Error> {
    if cards.len() < 5 || cards.len() > 7 {
        return Err(Error::InvalidAction(format!(
            "hand evaluation requires 5-7 cards, got {}",
            cards.len()
        )));
    }
    let mut best: Option<HandRank> = None;
    for combo in combinations(cards.len(), 5) {
        let hand: [Card; 5] = [
            cards[combo[0]],
            cards[combo[1]],
            cards[combo[2]],
            cards[combo[3]],
            cards[combo[4]],
        ];
        let rank = evaluate_five(&hand);
        best = Some(match best {
            Some(current) if current >= rank => current,
            _ => rank,
        });
    }
    Ok(best.expect("at least one 5-card combination exists"))
}

/// All index combinations of size `k` out of `0..n`.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut results = Vec::new();
    let mut current = Vec::with_capacity(k);
    fn recurse(
        start: usize,
        n: usize,
        k: usize,
        current: &mut Vec<usize>,
        results: &mut Vec<Vec<usize>>,
    ) {
        if current.len() == k {
            results.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            recurse(i + 1, n, k, current, results);
            current.pop();
        }
    }
    recurse(0, n, k, &mut current, &mut results);
    results
}

/// Result of comparing every player's best hand at showdown.
pub struct ShowdownResult<T> {
    pub ranked: Vec<(T, HandRank)>,
    pub winners: Vec<T>,
    pub split: bool,
}

/// Evaluates every player's best hand from their hole cards plus the board
/// and returns the winner set (best-first is not implied; `winners` is
/// unordered). Fails `InvalidAction` if there are no players or the board
/// size is not 3, 4, or 5.
pub fn determine_winners<T: Clone + Eq>(
    players: &[(T, [Card; 2])],
    board: &[Card],
) -> Result<ShowdownResult<T>, Error> {
    if players.is_empty() {
        return Err(Error::InvalidAction(
            "determine_winners requires at least one player".into(),
        ));
    }
    if !matches!(board.len(), 3 | 4 | 5) {
        return Err(Error::InvalidAction(format!(
            "board must have 3, 4, or 5 cards, got {}",
            board.len()
        )));
    }

    let mut ranked = Vec::with_capacity(players.len());
    for (id, hole) in players {
        let mut cards = Vec::with_capacity(7);
        cards.push(hole[0]);
        cards.push(hole[1]);
        cards.extend_from_slice(board);
        let rank = best_hand_rank(&cards)?;
        ranked.push((id.clone(), rank));
    }

    let best = ranked.iter().map(|(_, r)| r).max().unwrap().clone();
    let winners: Vec<T> = ranked
        .iter()
        .filter(|(_, r)| *r == best)
        .map(|(id, _)| id.clone())
        .collect();
    let split = winners.len() > 1;

    Ok(ShowdownResult {
        ranked,
        winners,
        split,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn high_card() {
        let hand = [
            card(Rank::Ace, Suit::Spade),
            card(Rank::King, Suit::Heart),
            card(Rank::Queen, Suit::Diamond),
            card(Rank::Jack, Suit::Club),
            card(Rank::Nine, Suit::Spade),
        ];
        assert_eq!(evaluate_five(&hand).category, Category::HighCard);
    }

    #[test]
    fn wheel_is_five_high_straight() {
        let hand = [
            card(Rank::Ace, Suit::Spade),
            card(Rank::Two, Suit::Heart),
            card(Rank::Three, Suit::Diamond),
            card(Rank::Four, Suit::Club),
            card(Rank::Five, Suit::Spade),
        ];
        let rank = evaluate_five(&hand);
        assert_eq!(rank.category, Category::Straight);
        assert_eq!(rank.primary_ranks, vec![Rank::Five as i8]);
    }

    #[test]
    fn wheel_loses_to_six_high_straight() {
        let wheel = evaluate_five(&[
            card(Rank::Ace, Suit::Spade),
            card(Rank::Two, Suit::Heart),
            card(Rank::Three, Suit::Diamond),
            card(Rank::Four, Suit::Club),
            card(Rank::Five, Suit::Spade),
        ]);
        let six_high = evaluate_five(&[
            card(Rank::Two, Suit::Spade),
            card(Rank::Three, Suit::Heart),
            card(Rank::Four, Suit::Diamond),
            card(Rank::Five, Suit::Club),
            card(Rank::Six, Suit::Spade),
        ]);
        assert!(six_high > wheel);
    }

    #[test]
    fn wheel_flush_is_five_high_straight_flush() {
        let hand = [
            card(Rank::Ace, Suit::Spade),
            card(Rank::Two, Suit::Spade),
            card(Rank::Three, Suit::Spade),
            card(Rank::Four, Suit::Spade),
            card(Rank::Five, Suit::Spade),
        ];
        let rank = evaluate_five(&hand);
        assert_eq!(rank.category, Category::StraightFlush);
        assert_eq!(rank.primary_ranks, vec![Rank::Five as i8]);
    }

    #[test]
    fn straight_flush_beats_quads() {
        let sf = evaluate_five(&[
            card(Rank::Ten, Suit::Spade),
            card(Rank::Jack, Suit::Spade),
            card(Rank::Queen, Suit::Spade),
            card(Rank::King, Suit::Spade),
            card(Rank::Ace, Suit::Spade),
        ]);
        let quads = evaluate_five(&[
            card(Rank::Ace, Suit::Spade),
            card(Rank::Ace, Suit::Heart),
            card(Rank::Ace, Suit::Diamond),
            card(Rank::Ace, Suit::Club),
            card(Rank::King, Suit::Spade),
        ]);
        assert!(sf > quads);
    }

    #[test]
    fn seven_card_hand_picks_best_five() {
        let cards = vec![
            card(Rank::Ace, Suit::Spade),
            card(Rank::Ace, Suit::Heart),
            card(Rank::King, Suit::Diamond),
            card(Rank::King, Suit::Club),
            card(Rank::Queen, Suit::Spade),
            card(Rank::Jack, Suit::Heart),
            card(Rank::Nine, Suit::Diamond),
        ];
        let rank = best_hand_rank(&cards).unwrap();
        assert_eq!(rank.category, Category::TwoPair);
        assert_eq!(
            rank.primary_ranks,
            vec![Rank::Ace as i8, Rank::King as i8]
        );
    }

    #[test]
    fn determine_winners_rejects_bad_board_size() {
        let players = vec![(
            "p1",
            [card(Rank::Ace, Suit::Spade), card(Rank::King, Suit::Spade)],
        )];
        let board = vec![card(Rank::Two, Suit::Club), card(Rank::Three, Suit::Club)];
        assert!(determine_winners(&players, &board).is_err());
    }

    #[test]
    fn determine_winners_detects_split() {
        let board = vec![
            card(Rank::Two, Suit::Club),
            card(Rank::Seven, Suit::Diamond),
            card(Rank::Nine, Suit::Heart),
            card(Rank::Jack, Suit::Spade),
            card(Rank::King, Suit::Club),
        ];
        let players = vec![
            (
                "p1",
                [card(Rank::Ace, Suit::Heart), card(Rank::Four, Suit::Spade)],
            ),
            (
                "p2",
                [card(Rank::Ace, Suit::Diamond), card(Rank::Five, Suit::Club)],
            ),
        ];
        let result = determine_winners(&players, &board).unwrap();
        assert!(result.split);
        assert_eq!(result.winners.len(), 2);
    }
}
