//! Typed error taxonomy for every fallible public operation.
//!
//! No `thiserror` dependency: errors implement `Display` by hand, the same
//! way the smaller error-ish types elsewhere in this crate do.

use std::fmt;

/// Every fallible public operation returns one of these instead of
/// panicking or using exceptions across the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidAction(String),
    InvalidBetAmount(String),
    InvalidRaiseAmount(String),
    InsufficientStack(String),
    InvalidState(String),
    PlayerNotFound(String),
    NotPlayerTurn(String),
    TableFull,
    TableEmpty,
    SeatOccupied(String),
    InvalidSeat(String),
    GameAlreadyStarted,
    GameNotStarted,
    NotEnoughPlayers { have: usize, need: usize },
    InvalidCard(String),
    InvalidConfig(String),
    InternalError(String),
}

impl Error {
    /// Stable string tag for wire-level serialization without committing to
    /// `serde(tag)` gymnastics.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidAction(_) => "InvalidAction",
            Error::InvalidBetAmount(_) => "InvalidBetAmount",
            Error::InvalidRaiseAmount(_) => "InvalidRaiseAmount",
            Error::InsufficientStack(_) => "InsufficientStack",
            Error::InvalidState(_) => "InvalidState",
            Error::PlayerNotFound(_) => "PlayerNotFound",
            Error::NotPlayerTurn(_) => "NotPlayerTurn",
            Error::TableFull => "TableFull",
            Error::TableEmpty => "TableEmpty",
            Error::SeatOccupied(_) => "SeatOccupied",
            Error::InvalidSeat(_) => "InvalidSeat",
            Error::GameAlreadyStarted => "GameAlreadyStarted",
            Error::GameNotStarted => "GameNotStarted",
            Error::NotEnoughPlayers { .. } => "NotEnoughPlayers",
            Error::InvalidCard(_) => "InvalidCard",
            Error::InvalidConfig(_) => "InvalidConfig",
            Error::InternalError(_) => "InternalError",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidAction(msg) => write!(f, "invalid action: {msg}"),
            Error::InvalidBetAmount(msg) => write!(f, "invalid bet amount: {msg}"),
            Error::InvalidRaiseAmount(msg) => write!(f, "invalid raise amount: {msg}"),
            Error::InsufficientStack(msg) => write!(f, "insufficient stack: {msg}"),
            Error::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Error::PlayerNotFound(id) => write!(f, "player not found: {id}"),
            Error::NotPlayerTurn(id) => write!(f, "not player's turn: {id}"),
            Error::TableFull => write!(f, "table is full"),
            Error::TableEmpty => write!(f, "table is empty"),
            Error::SeatOccupied(id) => write!(f, "seat already occupied: {id}"),
            Error::InvalidSeat(msg) => write!(f, "invalid seat: {msg}"),
            Error::GameAlreadyStarted => write!(f, "a hand is already in progress"),
            Error::GameNotStarted => write!(f, "no hand is in progress"),
            Error::NotEnoughPlayers { have, need } => {
                write!(f, "not enough players: have {have}, need {need}")
            }
            Error::InvalidCard(msg) => write!(f, "invalid card: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid table config: {msg}"),
            Error::InternalError(msg) => write!(f, "internal error (this is a bug): {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
