//! Append-only event log.

use crate::betting::Action;
use crate::cards::Card;
use crate::eval::HandRank;
use crate::money::Chips;
use crate::table::config::TableConfig;
use crate::table::player::PlayerId;
use crate::table::state::TablePhase;
use serde::{Deserialize, Serialize};

/// Emission order per hand: `HandStarted -> BlindsPosted -> CardsDealt ->
/// (ActionTaken*, StreetEnded)* -> Showdown? -> PotDistributed -> HandEnded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HandEventKind {
    /// Recorded first, before any chip moves, so a replay knows who was
    /// seated and how deep they were stacked before blinds and cards touch
    /// anything.
    HandStarted {
        hand_id: u64,
        dealer_seat: Option<usize>,
        seats: Vec<(PlayerId, usize, Chips)>,
    },
    BlindsPosted {
        contributions: Vec<(PlayerId, Chips)>,
    },
    /// Carries the dealt pairs themselves so a replay can reconstruct hole
    /// cards from the log alone, without touching the deck or RNG again.
    CardsDealt {
        hole_cards: Vec<(PlayerId, Card, Card)>,
    },
    ActionTaken {
        player: PlayerId,
        action: Action,
        moved: Chips,
    },
    StreetEnded {
        phase: TablePhase,
        community_cards: Vec<Card>,
    },
    Showdown {
        ranked: Vec<(PlayerId, HandRank)>,
    },
    PotDistributed {
        payouts: Vec<(PlayerId, Chips)>,
        rake: Chips,
    },
    HandEnded {
        hand_id: u64,
    },
}

/// `timestamp` is a monotonic logical counter, not wall-clock time, so
/// replay is fully deterministic and independent of when it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandEvent {
    pub timestamp: u64,
    #[serde(flatten)]
    pub kind: HandEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandHistory {
    pub hand_id: u64,
    pub table_config: TableConfig,
    pub events: Vec<HandEvent>,
    pub start_time: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<u64>,
}
