use super::rank::Rank;
use super::suit::Suit;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

/// A value in `[0, 52)`: `rank * 4 + suit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn to_int(self) -> u8 {
        (self.rank as u8) * 4 + (self.suit as u8)
    }

    /// Parses the two-character text form (`Ah`, `2c`, `Ts`), case-insensitive.
    pub fn parse(s: &str) -> std::result::Result<Card, Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(Error::InvalidCard(format!(
                "expected exactly two characters, got {s:?}"
            )));
        }
        let rank = Rank::from_char(chars[0])
            .ok_or_else(|| Error::InvalidCard(format!("unknown rank in {s:?}")))?;
        let suit = Suit::from_char(chars[1])
            .ok_or_else(|| Error::InvalidCard(format!("unknown suit in {s:?}")))?;
        Ok(Card::new(rank, suit))
    }
}

impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52, "card index out of range: {n}");
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.to_int()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Card::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Card::parse("ah").unwrap(), Card::parse("AH").unwrap());
        assert_eq!(Card::parse("2c").unwrap(), Card::new(Rank::Two, Suit::Club));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Card::parse("").is_err());
        assert!(Card::parse("Ahh").is_err());
        assert!(Card::parse("Xh").is_err());
        assert!(Card::parse("Az").is_err());
    }

    #[test]
    fn int_roundtrip_covers_all_52() {
        for n in 0..52u8 {
            let card = Card::from(n);
            assert_eq!(card.to_int(), n);
        }
    }

    #[test]
    fn display_matches_parse() {
        let card = Card::new(Rank::Ten, Suit::Spade);
        assert_eq!(card.to_string(), "Ts");
        assert_eq!(Card::parse("Ts").unwrap(), card);
    }
}
