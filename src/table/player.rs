use crate::cards::Card;
use crate::money::Chips;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, unique-per-table player identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        PlayerId(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    SittingOut,
}

/// `status = AllIn ⇒ stack = 0 ∧ committed > 0` is maintained by the
/// betting applier; this struct does not enforce it at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub seat: usize,
    pub stack: Chips,
    pub committed: Chips,
    pub status: PlayerStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hole_cards: Option<(Card, Card)>,
}

impl PlayerState {
    pub fn new(id: PlayerId, seat: usize, stack: Chips) -> Self {
        Self {
            id,
            seat,
            stack,
            committed: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active && !self.stack.is_zero()
    }
}
