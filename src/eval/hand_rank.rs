use crate::cards::Rank;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Hand categories, weakest to strongest — derive order gives the total
/// order (`HighCard < Pair < ... < StraightFlush`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard,
    Pair,
    TwoPair,
    Trips,
    Straight,
    Flush,
    FullHouse,
    Quads,
    StraightFlush,
}

/// `(category, primaryRanks, kickers)`, compared lexicographically with
/// missing slots treated as -1.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub primary_ranks: Vec<i8>,
    pub kickers: Vec<i8>,
}

impl HandRank {
    pub fn new(category: Category, primary_ranks: Vec<Rank>, kickers: Vec<Rank>) -> Self {
        Self {
            category,
            primary_ranks: primary_ranks.into_iter().map(|r| r as i8).collect(),
            kickers: kickers.into_iter().map(|r| r as i8).collect(),
        }
    }

    fn padded_cmp(a: &[i8], b: &[i8]) -> Ordering {
        let len = a.len().max(b.len());
        for i in 0..len {
            let av = a.get(i).copied().unwrap_or(-1);
            let bv = b.get(i).copied().unwrap_or(-1);
            match av.cmp(&bv) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl Ord for HandRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| Self::padded_cmp(&self.primary_ranks, &other.primary_ranks))
            .then_with(|| Self::padded_cmp(&self.kickers, &other.kickers))
    }
}

impl PartialOrd for HandRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
