use super::card::Card;
use crate::error::Error;
use crate::rng::RandomSource;

/// 52 distinct cards plus a dealt cursor in `[0, 52]`.
///
/// Invariants: every card appears exactly once; cards at indices
/// `[0, cursor)` are dealt; `shuffle` permutes `[cursor, 52)` only.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: [Card; 52],
    cursor: usize,
}

impl Deck {
    /// Canonical ordering: card `n` is `Card::from(n)`.
    pub fn new() -> Self {
        let mut cards = [Card::from(0u8); 52];
        for (n, slot) in cards.iter_mut().enumerate() {
            *slot = Card::from(n as u8);
        }
        Self { cards, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        52 - self.cursor
    }

    /// Resets the dealt cursor to 0 without reordering cards.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Fisher–Yates over `[cursor, 52)`: for `i = 51 downto cursor+1`, pick
    /// `j = cursor + rng.next_int(i - cursor + 1)`, swap `cards[i]`/`cards[j]`.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) -> Result<(), Error> {
        let mut i = 51usize;
        while i > self.cursor {
            let span = (i - self.cursor + 1) as u32;
            let j = self.cursor + rng.next_int(span)? as usize;
            self.cards.swap(i, j);
            i -= 1;
        }
        Ok(())
    }

    /// Deals the next `n` cards and advances the cursor.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, Error> {
        if self.cursor + n > 52 {
            return Err(Error::InvalidCard(format!(
                "out of cards: cursor={}, requested={n}",
                self.cursor
            )));
        }
        let dealt = self.cards[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(dealt)
    }

    /// Round-robin deal: one card to each of `k` seats, then a second card
    /// to each, returning `k` pairs in seat order.
    pub fn deal_hole_cards(&mut self, k: usize) -> Result<Vec<(Card, Card)>, Error> {
        if 2 * k > self.remaining() {
            return Err(Error::InvalidCard(format!(
                "out of cards dealing hole cards: remaining={}, need={}",
                self.remaining(),
                2 * k
            )));
        }
        let firsts = self.deal(k)?;
        let seconds = self.deal(k)?;
        Ok(firsts.into_iter().zip(seconds).collect())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;
    use std::collections::HashSet;

    #[test]
    fn new_deck_has_all_52_unique_cards() {
        let deck = Deck::new();
        let set: HashSet<u8> = deck.cards.iter().map(|c| c.to_int()).collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn deal_advances_cursor_and_out_of_cards_fails() {
        let mut deck = Deck::new();
        let first = deck.deal(5).unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(deck.cursor(), 5);
        assert!(deck.deal(48).is_ok());
        assert!(deck.deal(1).is_err());
    }

    #[test]
    fn shuffle_only_permutes_undealt_region() {
        let mut deck = Deck::new();
        deck.deal(10).unwrap();
        let dealt_before = deck.cards[..10].to_vec();
        let mut rng = SeededRng::new(1);
        deck.shuffle(&mut rng).unwrap();
        assert_eq!(deck.cards[..10].to_vec(), dealt_before);
    }

    #[test]
    fn same_seed_yields_identical_order() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle(&mut SeededRng::new(42)).unwrap();
        b.shuffle(&mut SeededRng::new(42)).unwrap();
        assert_eq!(
            a.cards.iter().map(|c| c.to_int()).collect::<Vec<_>>(),
            b.cards.iter().map(|c| c.to_int()).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn deal_hole_cards_is_round_robin() {
        let mut deck = Deck::new();
        let pairs = deck.deal_hole_cards(3).unwrap();
        assert_eq!(pairs.len(), 3);
        // first card of each seat dealt before any second card
        assert_eq!(pairs[0].0, Card::from(0));
        assert_eq!(pairs[1].0, Card::from(1));
        assert_eq!(pairs[2].0, Card::from(2));
        assert_eq!(pairs[0].1, Card::from(3));
        assert_eq!(pairs[1].1, Card::from(4));
        assert_eq!(pairs[2].1, Card::from(5));
    }

    #[test]
    fn reset_cursor_keeps_order() {
        let mut deck = Deck::new();
        deck.deal(5).unwrap();
        let snapshot = deck.cards;
        deck.reset_cursor();
        assert_eq!(deck.cursor(), 0);
        assert_eq!(deck.cards, snapshot);
    }
}
