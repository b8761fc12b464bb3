//! Match configuration
//!
//! `MatchSettings` is the raw, serializable form handed over by a
//! [`ConfigurationSource`]. It is only trusted once converted into a
//! [`MatchConfig`], which is the frozen, validated form the engine runs on.

use crate::core::Difficulty;
use crate::{CurlingError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PIECES_PER_SIDE: i64 = 8;
pub const DEFAULT_SETS_PER_MATCH: i64 = 3;

/// Unvalidated settings as read from a file, the CLI, or a settings screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub difficulty: String,
    pub pieces_per_side: i64,
    pub sets_per_match: i64,
    /// Seed for side selection and AI noise; entropy when absent
    pub seed: Option<u64>,
}

impl Default for MatchSettings {
    fn default() -> Self {
        MatchSettings {
            difficulty: Difficulty::default().to_string(),
            pieces_per_side: DEFAULT_PIECES_PER_SIDE,
            sets_per_match: DEFAULT_SETS_PER_MATCH,
            seed: None,
        }
    }
}

impl MatchSettings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Supplies match settings at the moment a match starts
pub trait ConfigurationSource {
    fn settings(&self) -> MatchSettings;
}

impl ConfigurationSource for MatchSettings {
    fn settings(&self) -> MatchSettings {
        self.clone()
    }
}

/// Validated configuration, frozen for the lifetime of one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub difficulty: Difficulty,
    pub pieces_per_side: u32,
    pub sets_per_match: u32,
    pub seed: Option<u64>,
}

impl MatchConfig {
    pub fn from_source(source: &dyn ConfigurationSource) -> Result<Self> {
        MatchConfig::try_from(source.settings())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            difficulty: Difficulty::default(),
            pieces_per_side: DEFAULT_PIECES_PER_SIDE as u32,
            sets_per_match: DEFAULT_SETS_PER_MATCH as u32,
            seed: None,
        }
    }
}

impl TryFrom<MatchSettings> for MatchConfig {
    type Error = CurlingError;

    fn try_from(settings: MatchSettings) -> Result<Self> {
        let difficulty = settings.difficulty.parse::<Difficulty>()?;
        let pieces_per_side = positive_count("pieces_per_side", settings.pieces_per_side)?;
        let sets_per_match = positive_count("sets_per_match", settings.sets_per_match)?;
        Ok(MatchConfig {
            difficulty,
            pieces_per_side,
            sets_per_match,
            seed: settings.seed,
        })
    }
}

fn positive_count(name: &str, value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(CurlingError::InvalidConfig(format!(
            "{name} must be positive, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| CurlingError::InvalidConfig(format!("{name} is too large: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let config = MatchConfig::try_from(MatchSettings::default()).unwrap();
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.pieces_per_side, 8);
        assert_eq!(config.sets_per_match, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unsupported_difficulty_fails_fast() {
        let settings = MatchSettings {
            difficulty: "impossible".to_string(),
            ..MatchSettings::default()
        };
        let err = MatchConfig::from_source(&settings).unwrap_err();
        assert!(matches!(err, CurlingError::UnsupportedDifficulty(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_non_positive_counts_rejected() {
        for (pieces, sets) in [(0, 1), (-3, 1), (8, 0), (8, -1)] {
            let settings = MatchSettings {
                pieces_per_side: pieces,
                sets_per_match: sets,
                ..MatchSettings::default()
            };
            let err = MatchConfig::try_from(settings).unwrap_err();
            assert!(matches!(err, CurlingError::InvalidConfig(_)), "{pieces}/{sets}");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = MatchSettings::from_json(r#"{ "difficulty": "hard", "seed": 7 }"#).unwrap();
        assert_eq!(settings.difficulty, "hard");
        assert_eq!(settings.pieces_per_side, DEFAULT_PIECES_PER_SIDE);
        assert_eq!(settings.seed, Some(7));

        let config = MatchConfig::try_from(settings).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            MatchSettings::from_json("{ not json"),
            Err(CurlingError::Json(_))
        ));
    }
}
