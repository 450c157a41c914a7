//! Hand-history JSON codec. `HandHistory` already derives
//! `serde::{Serialize, Deserialize}`; these are the named entry points
//! callers use, plus the round-trip guarantee they rely on.

use crate::error::Error;
use crate::events::HandHistory;

pub fn to_json(history: &HandHistory) -> Result<String, Error> {
    serde_json::to_string(history).map_err(|e| Error::InvalidState(format!("history serialize failed: {e}")))
}

pub fn from_json(json: &str) -> Result<HandHistory, Error> {
    serde_json::from_str(json).map_err(|e| Error::InvalidState(format!("history parse failed: {e}")))
}
