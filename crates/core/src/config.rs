use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::types::{Difficulty, DifficultyRules, DEFAULT_MAX_SHUFFLE_ATTEMPTS};

/// Session configuration, loadable from TOML.
///
/// `moves` and `target` override the difficulty preset when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub seed: u32,
    pub moves: Option<u32>,
    pub target: Option<u32>,
    /// Permutations tried before a deadlocked board is regenerated
    pub max_shuffle_attempts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            difficulty: Difficulty::default(),
            seed: 1,
            moves: None,
            target: None,
            max_shuffle_attempts: DEFAULT_MAX_SHUFFLE_ATTEMPTS,
        }
    }
}

impl SessionConfig {
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        SessionConfig {
            difficulty,
            seed,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moves == Some(0) {
            return Err(ConfigError::Validation("moves must be > 0".into()));
        }
        if self.target == Some(0) {
            return Err(ConfigError::Validation("target must be > 0".into()));
        }
        if self.max_shuffle_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_shuffle_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Preset rules with the overrides applied
    pub fn rules(&self) -> DifficultyRules {
        let mut rules = self.difficulty.rules();
        if let Some(moves) = self.moves {
            rules.moves = moves;
        }
        if let Some(target) = self.target {
            rules.target = target;
        }
        rules
    }
}
