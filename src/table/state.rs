use super::player::{PlayerId, PlayerState};
use crate::cards::Card;
use crate::pot::PotState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TablePhase {
    Idle,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// A fully independent snapshot: `get_state` deep-copies players, community
/// cards, and pots so a caller can retain it past further engine mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub phase: TablePhase,
    pub hand_id: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dealer_seat: Option<usize>,
    pub players: Vec<PlayerState>,
    pub community_cards: Vec<Card>,
    pub pots: Vec<PotState>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_player_id: Option<PlayerId>,
}

impl TableState {
    pub fn empty() -> Self {
        Self {
            phase: TablePhase::Idle,
            hand_id: 0,
            dealer_seat: None,
            players: Vec::new(),
            community_cards: Vec::new(),
            pots: Vec::new(),
            current_player_id: None,
        }
    }
}
