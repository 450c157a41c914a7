//! Round-complete detection and minimum-raise tracking.

use crate::money::Chips;
use crate::table::player::{PlayerState, PlayerStatus};
use crate::table::player::PlayerId;
use std::collections::BTreeSet;

/// Per-street betting state. Reset at the start of every betting round.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Size of the last bet-or-raise increment this round; the floor for
    /// the next raise.
    pub last_raise: Chips,
    /// Players who have acted since the last aggressive action.
    pub acted: BTreeSet<PlayerId>,
}

impl RoundState {
    pub fn new(big_blind: Chips) -> Self {
        Self {
            last_raise: big_blind.max(Chips::new(1)),
            acted: BTreeSet::new(),
        }
    }

    pub fn mark_acted(&mut self, id: PlayerId) {
        self.acted.insert(id);
    }

    /// A short all-in reopens action only if its increment reaches the
    /// current minimum raise; otherwise acted-flags of other players are
    /// left untouched.
    pub fn register_raise(&mut self, increment: Chips, reopens: bool) {
        if reopens {
            self.last_raise = increment;
            self.acted.clear();
        }
    }
}

pub fn current_bet(seats: &[Option<PlayerState>]) -> Chips {
    seats
        .iter()
        .flatten()
        .map(|p| p.committed)
        .fold(Chips::ZERO, Chips::max)
}

/// Complete when at most one `Active` player remains, or every `Active`
/// player has matched `currentBet` and has acted since the last
/// aggression.
pub fn is_round_complete(seats: &[Option<PlayerState>], round: &RoundState) -> bool {
    let active: Vec<&PlayerState> = seats
        .iter()
        .flatten()
        .filter(|p| p.status == PlayerStatus::Active)
        .collect();
    if active.len() <= 1 {
        return true;
    }
    let bet = current_bet(seats);
    active
        .iter()
        .all(|p| p.committed == bet && round.acted.contains(&p.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::player::PlayerStatus;

    fn player(id: &str, seat: usize, committed: u128, status: PlayerStatus) -> PlayerState {
        let mut p = PlayerState::new(PlayerId::new(id), seat, Chips::new(1000));
        p.committed = Chips::new(committed);
        p.status = status;
        p
    }

    #[test]
    fn round_complete_when_one_active_remains() {
        let seats = vec![
            Some(player("a", 0, 10, PlayerStatus::Active)),
            Some(player("b", 1, 10, PlayerStatus::Folded)),
        ];
        let round = RoundState::new(Chips::new(2));
        assert!(is_round_complete(&seats, &round));
    }

    #[test]
    fn round_incomplete_until_all_acted() {
        let seats = vec![
            Some(player("a", 0, 10, PlayerStatus::Active)),
            Some(player("b", 1, 10, PlayerStatus::Active)),
        ];
        let mut round = RoundState::new(Chips::new(2));
        round.mark_acted(PlayerId::new("a"));
        assert!(!is_round_complete(&seats, &round));
        round.mark_acted(PlayerId::new("b"));
        assert!(is_round_complete(&seats, &round));
    }

    #[test]
    fn round_incomplete_while_committed_mismatched() {
        let seats = vec![
            Some(player("a", 0, 20, PlayerStatus::Active)),
            Some(player("b", 1, 10, PlayerStatus::Active)),
        ];
        let mut round = RoundState::new(Chips::new(2));
        round.mark_acted(PlayerId::new("a"));
        round.mark_acted(PlayerId::new("b"));
        assert!(!is_round_complete(&seats, &round));
    }
}
