//! Configuration validation.

use crate::error::Error;
use crate::money::Chips;
use crate::pot::RakeConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RakeSetting {
    pub percentage: f64,
    pub cap: Chips,
}

impl RakeSetting {
    pub fn to_rake_config(self) -> RakeConfig {
        RakeConfig::from_percentage(self.percentage, self.cap)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ante: Option<Chips>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub straddle: Option<Chips>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rake: Option<RakeSetting>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rng_seed: Option<u32>,
}

impl TableConfig {
    pub fn new(
        min_players: usize,
        max_players: usize,
        small_blind: Chips,
        big_blind: Chips,
        ante: Option<Chips>,
        straddle: Option<Chips>,
        rake: Option<RakeSetting>,
        rng_seed: Option<u32>,
    ) -> Result<Self, Error> {
        let config = Self {
            min_players,
            max_players,
            small_blind,
            big_blind,
            ante,
            straddle,
            rake,
            rng_seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.min_players < 2 {
            return Err(Error::InvalidConfig("minPlayers must be at least 2".into()));
        }
        if !(2..=23).contains(&self.max_players) {
            return Err(Error::InvalidConfig("maxPlayers must be within 2..=23".into()));
        }
        if self.max_players < self.min_players {
            return Err(Error::InvalidConfig("maxPlayers must be >= minPlayers".into()));
        }
        if self.small_blind.is_zero() {
            return Err(Error::InvalidConfig("smallBlind must be positive".into()));
        }
        if self.big_blind <= self.small_blind {
            return Err(Error::InvalidConfig("bigBlind must exceed smallBlind".into()));
        }
        if let Some(ante) = self.ante {
            if ante.is_zero() {
                return Err(Error::InvalidConfig("configured ante must be positive".into()));
            }
        }
        if let Some(straddle) = self.straddle {
            if straddle.is_zero() {
                return Err(Error::InvalidConfig("configured straddle must be positive".into()));
            }
        }
        if let Some(rake) = self.rake {
            if !(0.0..=1.0).contains(&rake.percentage) {
                return Err(Error::InvalidConfig("rake percentage must be within [0, 1]".into()));
            }
            if rake.cap.is_zero() {
                return Err(Error::InvalidConfig("rake cap must be positive".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> TableConfig {
        TableConfig::new(2, 9, Chips::new(1), Chips::new(2), None, None, None, Some(42)).unwrap()
    }

    #[test]
    fn valid_config_constructs() {
        assert_eq!(base().max_players, 9);
    }

    #[test]
    fn rejects_big_blind_not_exceeding_small_blind() {
        let result = TableConfig::new(2, 9, Chips::new(2), Chips::new(2), None, None, None, None);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_max_players_out_of_range() {
        let result = TableConfig::new(2, 30, Chips::new(1), Chips::new(2), None, None, None, None);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_rake_percentage() {
        let rake = RakeSetting { percentage: 1.5, cap: Chips::new(100) };
        let result = TableConfig::new(2, 9, Chips::new(1), Chips::new(2), None, None, Some(rake), None);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
