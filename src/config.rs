//! Tunable battle and AI constants.
//!
//! Defaults reproduce the reference game. A config can be loaded from RON,
//! with any omitted field falling back to its default.

use crate::errors::ConfigError;
use schema::BattleFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub format: BattleFormat,
    /// Paralysed combatants have their speed divided by this.
    pub paralysis_speed_divisor: u16,
    pub ai: AiConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            format: BattleFormat::Single,
            paralysis_speed_divisor: 4,
            ai: AiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub status_move_score: i32,
    pub ineffective_score: i32,
    pub fast_kill_bonus: i32,
    pub slow_kill_bonus: i32,
    pub knockout_ability_bonus: i32,
    pub priority_bonus: i32,
    /// A move scoring at or below this is considered clearly bad.
    pub switch_threshold: i32,
    /// Percent chance of switching once every switch condition holds.
    pub switch_chance: u8,
    pub matchup: MatchupBonuses,
    /// Species that never score below `floor_bonus` as a switch-in.
    pub floor_species: Vec<String>,
    pub floor_bonus: i32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            status_move_score: 6,
            ineffective_score: -10,
            fast_kill_bonus: 12,
            slow_kill_bonus: 9,
            knockout_ability_bonus: 1,
            priority_bonus: 11,
            switch_threshold: -5,
            switch_chance: 50,
            matchup: MatchupBonuses::default(),
            floor_species: vec!["Ditto".into(), "Wobbuffet".into(), "Wynaut".into()],
            floor_bonus: 2,
        }
    }
}

/// Post-switch matchup scores, checked in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchupBonuses {
    pub faster_ohko: i32,
    pub slower_ohko_survives: i32,
    pub faster_outdamages: i32,
    pub slower_outdamages: i32,
    pub faster: i32,
}

impl Default for MatchupBonuses {
    fn default() -> Self {
        Self {
            faster_ohko: 5,
            slower_ohko_survives: 4,
            faster_outdamages: 3,
            slower_outdamages: 2,
            faster: 1,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig =
            ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paralysis_speed_divisor == 0 {
            return Err(ConfigError::InvalidValue(
                "paralysis_speed_divisor must be positive".into(),
            ));
        }
        if self.ai.switch_chance > 100 {
            return Err(ConfigError::InvalidValue(format!(
                "switch_chance {} is above 100",
                self.ai.switch_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = BattleConfig::from_ron_str("(ai: (fast_kill_bonus: 20))").unwrap();
        assert_eq!(config.ai.fast_kill_bonus, 20);
        assert_eq!(config.ai.slow_kill_bonus, 9);
        assert_eq!(config.paralysis_speed_divisor, 4);
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let result = BattleConfig::from_ron_str("(paralysis_speed_divisor: 0)");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            BattleConfig::from_ron_str("not ron at all ("),
            Err(ConfigError::Parse(_))
        ));
    }
}
