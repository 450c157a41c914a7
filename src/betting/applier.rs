//! Mutates a table snapshot for a validated action; all-in downgrade;
//! turn advance.

use super::action::{Action, ActionKind};
use super::round::{current_bet, RoundState};
use super::validator::{self, call_amount};
use crate::error::Error;
use crate::money::Chips;
use crate::table::player::{PlayerId, PlayerState, PlayerStatus};

/// Validates then applies `action`. Returns the amount of chips moved from
/// the acting player's stack into the pot.
pub fn apply(
    seats: &mut [Option<PlayerState>],
    round: &mut RoundState,
    current_player_id: &mut Option<PlayerId>,
    id: &PlayerId,
    action: Action,
) -> Result<Chips, Error> {
    validator::validate(seats, round, current_player_id.as_ref(), id, &action)?;

    let bet = current_bet(seats);
    let kind = action.kind();
    let mut reopened = false;

    let moved = {
        let player = seats
            .iter_mut()
            .flatten()
            .find(|p| &p.id == id)
            .ok_or_else(|| Error::PlayerNotFound(id.to_string()))?;
        let call = call_amount(player, bet);

        match action {
            Action::Fold => {
                player.status = PlayerStatus::Folded;
                Chips::ZERO
            }
            Action::Check => Chips::ZERO,
            Action::Call { .. } => {
                let m = call.min(player.stack);
                player.stack = player.stack.sub(m)?;
                player.committed = player.committed.add(m);
                if player.stack.is_zero() {
                    player.status = PlayerStatus::AllIn;
                }
                m
            }
            Action::Bet { amount } => {
                let m = amount.min(player.stack);
                player.stack = player.stack.sub(m)?;
                player.committed = player.committed.add(m);
                if player.stack.is_zero() {
                    player.status = PlayerStatus::AllIn;
                }
                reopened = true;
                m
            }
            Action::Raise { amount } => {
                let m = call.add(amount).min(player.stack);
                player.stack = player.stack.sub(m)?;
                player.committed = player.committed.add(m);
                if player.stack.is_zero() {
                    player.status = PlayerStatus::AllIn;
                }
                reopened = true;
                m
            }
            Action::AllIn { .. } => {
                let m = player.stack;
                player.committed = player.committed.add(m);
                player.stack = Chips::ZERO;
                player.status = PlayerStatus::AllIn;
                let increment = player.committed.saturating_sub(bet);
                reopened = increment >= round.last_raise;
                m
            }
        }
    };

    if matches!(kind, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn) {
        let new_committed = seats
            .iter()
            .flatten()
            .find(|p| &p.id == id)
            .map(|p| p.committed)
            .unwrap_or(Chips::ZERO);
        let increment = new_committed.saturating_sub(bet);
        if reopened && !increment.is_zero() {
            round.register_raise(increment, true);
        }
    }
    round.mark_acted(id.clone());

    advance_turn(seats, current_player_id, id);

    Ok(moved)
}

fn advance_turn(
    seats: &[Option<PlayerState>],
    current_player_id: &mut Option<PlayerId>,
    from: &PlayerId,
) {
    let from_seat = seats
        .iter()
        .flatten()
        .find(|p| &p.id == from)
        .map(|p| p.seat)
        .unwrap_or(0);
    let len = seats.len();
    for step in 1..=len {
        let seat = (from_seat + step) % len;
        if let Some(Some(p)) = seats.get(seat) {
            if p.status == PlayerStatus::Active && !p.stack.is_zero() {
                *current_player_id = Some(p.id.clone());
                return;
            }
        }
    }
    *current_player_id = None;
}
