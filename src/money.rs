//! Exact integer chip arithmetic. Never floating point.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// A non-negative chip amount. Backed by `u128` so that `total * percentage`
/// in the rake computation cannot overflow even for absurd stakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Chips(u128);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u128) -> Self {
        Chips(amount)
    }

    pub fn get(self) -> u128 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn add(self, other: Chips) -> Chips {
        Chips(self.0 + other.0)
    }

    /// Precondition: `self >= other`. Returns `Error::InternalError` if
    /// violated — this should never be reachable from validated input; it
    /// signals a bug in the engine.
    pub fn sub(self, other: Chips) -> Result<Chips, Error> {
        self.0.checked_sub(other.0).map(Chips).ok_or_else(|| {
            Error::InternalError(format!(
                "arithmetic underflow: {} - {}",
                self.0, other.0
            ))
        })
    }

    /// Saturating subtraction for call sites that have already proven
    /// `self >= other` via a `min`/`max` clamp and don't want to thread a
    /// `Result` through straight-line arithmetic.
    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    pub fn mul(self, factor: u128) -> Chips {
        Chips(self.0 * factor)
    }

    /// Returns `(quotient, remainder)`.
    pub fn div(self, divisor: u128) -> (Chips, Chips) {
        assert!(divisor > 0, "division by zero");
        (Chips(self.0 / divisor), Chips(self.0 % divisor))
    }

    pub fn min(self, other: Chips) -> Chips {
        std::cmp::min(self, other)
    }

    pub fn max(self, other: Chips) -> Chips {
        std::cmp::max(self, other)
    }
}

impl Add for Chips {
    type Output = Chips;
    fn add(self, rhs: Chips) -> Chips {
        Chips::add(self, rhs)
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, Chips::add)
    }
}

impl From<u128> for Chips {
    fn from(n: u128) -> Self {
        Chips(n)
    }
}
impl From<u64> for Chips {
    fn from(n: u64) -> Self {
        Chips(n as u128)
    }
}
impl From<u32> for Chips {
    fn from(n: u32) -> Self {
        Chips(n as u128)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chip amounts serialize as decimal strings so precision survives JSON
/// round-tripping even past the 2^53 float boundary.
impl Serialize for Chips {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Chips {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ChipsVisitor;
        impl<'de> serde::de::Visitor<'de> for ChipsVisitor {
            type Value = Chips;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal string or non-negative integer")
            }
            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Chips, E> {
                v.parse::<u128>()
                    .map(Chips)
                    .map_err(|_| E::custom(format!("invalid chip amount: {v}")))
            }
            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Chips, E> {
                Ok(Chips(v as u128))
            }
            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Chips, E> {
                if v < 0 {
                    return Err(E::custom("chip amount must be non-negative"));
                }
                Ok(Chips(v as u128))
            }
        }
        deserializer.deserialize_any(ChipsVisitor)
    }
}
