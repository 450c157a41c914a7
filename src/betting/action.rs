use crate::money::Chips;
use serde::{Deserialize, Serialize};

/// A player's proposed action. `Raise`'s amount is the increment *above*
/// the call, matching its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call { amount: Option<Chips> },
    Bet { amount: Chips },
    Raise { amount: Chips },
    AllIn { amount: Option<Chips> },
}

/// The action types alone, with no amount — what legality checks hand back
/// to a caller asking what's currently playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call { .. } => ActionKind::Call,
            Action::Bet { .. } => ActionKind::Bet,
            Action::Raise { .. } => ActionKind::Raise,
            Action::AllIn { .. } => ActionKind::AllIn,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ActionWire {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Chips>,
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wire = match self {
            Action::Fold => ActionWire { kind: "FOLD".into(), amount: None },
            Action::Check => ActionWire { kind: "CHECK".into(), amount: None },
            Action::Call { amount } => ActionWire { kind: "CALL".into(), amount: *amount },
            Action::Bet { amount } => ActionWire { kind: "BET".into(), amount: Some(*amount) },
            Action::Raise { amount } => ActionWire { kind: "RAISE".into(), amount: Some(*amount) },
            Action::AllIn { amount } => ActionWire { kind: "ALL_IN".into(), amount: *amount },
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = ActionWire::deserialize(deserializer)?;
        let action = match wire.kind.to_ascii_uppercase().as_str() {
            "FOLD" => Action::Fold,
            "CHECK" => Action::Check,
            "CALL" => Action::Call { amount: wire.amount },
            "BET" => Action::Bet {
                amount: wire.amount.ok_or_else(|| serde::de::Error::custom("BET requires amount"))?,
            },
            "RAISE" => Action::Raise {
                amount: wire.amount.ok_or_else(|| serde::de::Error::custom("RAISE requires amount"))?,
            },
            "ALL_IN" => Action::AllIn { amount: wire.amount },
            other => return Err(serde::de::Error::custom(format!("unknown action type: {other}"))),
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roundtrip() {
        let action = Action::Raise { amount: Chips::new(20) };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("RAISE"));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn fold_has_no_amount() {
        let json = serde_json::to_string(&Action::Fold).unwrap();
        assert_eq!(json, r#"{"type":"FOLD"}"#);
    }
}
