//! Pot layering, rake, and distribution.

use crate::eval::HandRank;
use crate::money::Chips;
use crate::table::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotState {
    pub total: Chips,
    pub participants: BTreeSet<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RakeConfig {
    /// Fixed-point at 4 decimal digits (`percentage * 10_000`, rounded),
    /// so rake is computed with integer division instead of floating point.
    pub basis_points: u32,
    pub cap: Chips,
}

impl RakeConfig {
    pub fn from_percentage(percentage: f64, cap: Chips) -> Self {
        let basis_points = (percentage * 10_000.0).round() as u32;
        Self { basis_points, cap }
    }

    pub fn rake_on(&self, total: Chips) -> Chips {
        let raw = total.mul(self.basis_points as u128).div(10_000).0;
        raw.min(self.cap)
    }
}

/// Layers a vector of `(player, amount contributed, still eligible to win)`
/// into main/side pots. Zero-amount contributions are dropped. Participants
/// exclude ineligible (folded) contributors even
/// though their chips still count toward `total` — their money stays dead
/// in the pot they helped build.
pub fn layer_pots(contributions: &[(PlayerId, Chips, bool)]) -> Vec<PotState> {
    let mut remaining: Vec<(PlayerId, Chips, bool)> = contributions
        .iter()
        .cloned()
        .filter(|(_, amount, _)| !amount.is_zero())
        .collect();
    remaining.sort_by_key(|(_, amount, _)| *amount);

    let mut pots = Vec::new();
    while !remaining.is_empty() {
        let min_amount = remaining[0].1;
        let count = remaining.len() as u128;
        let participants: BTreeSet<PlayerId> = remaining
            .iter()
            .filter(|(_, _, eligible)| *eligible)
            .map(|(id, _, _)| id.clone())
            .collect();
        pots.push(PotState {
            total: min_amount.mul(count),
            participants,
        });
        for entry in remaining.iter_mut() {
            entry.1 = entry.1.saturating_sub(min_amount);
        }
        remaining.retain(|(_, amount, _)| !amount.is_zero());
    }
    pots
}

pub struct Payout {
    pub rake: Chips,
    pub payouts: Vec<(PlayerId, Chips)>,
    /// Set when a pot's eligible-winner filter came back empty — should
    /// only arise from caller misuse, defended against rather than
    /// panicking.
    pub forfeited: Chips,
}

/// Distributes every pot to its own best-hand tier among `ranked` (every
/// showdown participant's hand, seat-ordered among rank ties so the odd
/// chip goes to the lowest seat). Each pot is filtered to its own
/// `participants`, then the winner(s) are whoever has the best hand within
/// that filtered subset — a side pot's winner can differ from the overall
/// best hand when that player isn't eligible for the side pot.
/// `rake_config` applies only to `pots[0]`.
pub fn distribute_all_pots(
    pots: &[PotState],
    rake_config: Option<&RakeConfig>,
    ranked: &[(PlayerId, HandRank)],
) -> Payout {
    let mut total_rake = Chips::ZERO;
    let mut carry = Chips::ZERO;
    let mut ledger: Vec<(PlayerId, Chips)> = Vec::new();
    let mut forfeited = Chips::ZERO;

    for (i, pot) in pots.iter().enumerate() {
        let rake = if i == 0 {
            rake_config.map(|r| r.rake_on(pot.total)).unwrap_or(Chips::ZERO)
        } else {
            Chips::ZERO
        };
        total_rake = total_rake.add(rake);
        let payable = pot.total.saturating_sub(rake).add(carry);
        carry = Chips::ZERO;

        let eligible: Vec<&(PlayerId, HandRank)> = ranked
            .iter()
            .filter(|(id, _)| pot.participants.contains(id))
            .collect();

        if eligible.is_empty() {
            if i + 1 < pots.len() {
                carry = payable;
            } else {
                forfeited = payable;
            }
            continue;
        }

        let best = eligible.iter().map(|(_, rank)| rank).max().unwrap().clone();
        let winners: Vec<&PlayerId> = eligible
            .iter()
            .filter(|(_, rank)| *rank == best)
            .map(|(id, _)| id)
            .collect();

        let (per_winner, remainder) = payable.div(winners.len() as u128);
        for (idx, id) in winners.iter().enumerate() {
            let share = if idx == 0 {
                per_winner.add(remainder)
            } else {
                per_winner
            };
            ledger.push(((*id).clone(), share));
        }
    }

    Payout {
        rake: total_rake,
        payouts: ledger,
        forfeited,
    }
}
