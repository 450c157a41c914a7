//! Legality of a proposed action against a table snapshot.

use super::action::{Action, ActionKind};
use super::round::{current_bet, RoundState};
use crate::error::Error;
use crate::money::Chips;
use crate::table::player::{PlayerId, PlayerState, PlayerStatus};

pub fn call_amount(player: &PlayerState, current_bet: Chips) -> Chips {
    current_bet.saturating_sub(player.committed)
}

fn find<'a>(seats: &'a [Option<PlayerState>], id: &PlayerId) -> Result<&'a PlayerState, Error> {
    seats
        .iter()
        .flatten()
        .find(|p| &p.id == id)
        .ok_or_else(|| Error::PlayerNotFound(id.to_string()))
}

fn check_preconditions(
    seats: &[Option<PlayerState>],
    current_player_id: Option<&PlayerId>,
    id: &PlayerId,
) -> Result<(), Error> {
    let player = find(seats, id)?;
    if current_player_id != Some(id) {
        return Err(Error::NotPlayerTurn(id.to_string()));
    }
    if player.status != PlayerStatus::Active {
        return Err(Error::InvalidState(format!(
            "player {id} is not active"
        )));
    }
    Ok(())
}

/// Validates `action` for `id` against the current table/round snapshot.
pub fn validate(
    seats: &[Option<PlayerState>],
    round: &RoundState,
    current_player_id: Option<&PlayerId>,
    id: &PlayerId,
    action: &Action,
) -> Result<(), Error> {
    check_preconditions(seats, current_player_id, id)?;
    let player = find(seats, id)?;
    let bet = current_bet(seats);
    let call = call_amount(player, bet);

    match action {
        Action::Fold => Ok(()),
        Action::Check => {
            if call.is_zero() {
                Ok(())
            } else {
                Err(Error::InvalidAction("cannot check facing a bet".into()))
            }
        }
        Action::Call { amount } => {
            if call.is_zero() {
                return Err(Error::InvalidAction("nothing to call".into()));
            }
            if let Some(amount) = amount {
                if *amount != call {
                    return Err(Error::InvalidBetAmount(format!(
                        "call amount {amount} does not match required {call}"
                    )));
                }
            }
            Ok(())
        }
        Action::Bet { amount } => {
            if !bet.is_zero() {
                return Err(Error::InvalidAction("cannot bet, a bet is already open".into()));
            }
            if amount.is_zero() {
                return Err(Error::InvalidBetAmount("bet must be positive".into()));
            }
            if *amount > player.stack {
                return Err(Error::InvalidBetAmount(format!(
                    "bet {amount} exceeds stack {}",
                    player.stack
                )));
            }
            Ok(())
        }
        Action::Raise { amount } => {
            if bet.is_zero() {
                return Err(Error::InvalidAction("cannot raise, no bet is open".into()));
            }
            if amount.is_zero() {
                return Err(Error::InvalidRaiseAmount("raise increment must be positive".into()));
            }
            if call.add(*amount) > player.stack {
                return Err(Error::InvalidRaiseAmount(format!(
                    "raise of {amount} over call {call} exceeds stack {}",
                    player.stack
                )));
            }
            if *amount < round.last_raise {
                return Err(Error::InvalidRaiseAmount(format!(
                    "raise increment {amount} below minimum {}",
                    round.last_raise
                )));
            }
            Ok(())
        }
        Action::AllIn { amount } => {
            if player.stack.is_zero() {
                return Err(Error::InsufficientStack("no chips left to go all-in".into()));
            }
            if let Some(amount) = amount {
                if *amount != player.stack {
                    return Err(Error::InvalidBetAmount(format!(
                        "all-in amount {amount} does not match stack {}",
                        player.stack
                    )));
                }
            }
            Ok(())
        }
    }
}

/// Enumerates every action kind currently legal for `id`, or none if it
/// isn't their turn.
pub fn legal_actions(
    seats: &[Option<PlayerState>],
    round: &RoundState,
    current_player_id: Option<&PlayerId>,
    id: &PlayerId,
) -> Vec<ActionKind> {
    if current_player_id != Some(id) {
        return Vec::new();
    }
    let Ok(player) = find(seats, id) else {
        return Vec::new();
    };
    if player.status != PlayerStatus::Active {
        return Vec::new();
    }
    let bet = current_bet(seats);
    let call = call_amount(player, bet);

    let mut kinds = vec![ActionKind::Fold];
    if call.is_zero() {
        kinds.push(ActionKind::Check);
    } else if !player.stack.is_zero() {
        kinds.push(ActionKind::Call);
    }
    if bet.is_zero() && !player.stack.is_zero() {
        kinds.push(ActionKind::Bet);
    }
    if !bet.is_zero() && player.stack >= round.last_raise.add(call) {
        kinds.push(ActionKind::Raise);
    }
    if !player.stack.is_zero() {
        kinds.push(ActionKind::AllIn);
    }
    kinds
}
