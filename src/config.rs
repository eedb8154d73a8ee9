//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Most attacks an AI player makes in one attack phase.
pub const DEFAULT_MAX_AI_ATTACKS: u32 = 20;

/// Countries an AI player considers when spreading its draft.
pub const DEFAULT_AI_DRAFT_CANDIDATES: usize = 10;

/// Wild cards added to a fresh deck.
pub const DEFAULT_WILD_CARDS: usize = 2;

/// Errors that can occur while loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for AI choices and deck shuffling; entropy when absent.
    pub seed: Option<u64>,
    pub max_ai_attacks: u32,
    pub ai_draft_candidates: usize,
    /// When set, AI players call `next_phase` themselves after acting.
    /// Otherwise the host advances their phases like a human's.
    pub ai_auto_advance: bool,
    /// Completed turns after which AI players stop advancing phases.
    pub max_turns: Option<u32>,
    pub wild_cards: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seed: None,
            max_ai_attacks: DEFAULT_MAX_AI_ATTACKS,
            ai_draft_candidates: DEFAULT_AI_DRAFT_CANDIDATES,
            ai_auto_advance: false,
            max_turns: None,
            wild_cards: DEFAULT_WILD_CARDS,
        }
    }
}

impl GameConfig {
    /// Default config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Loads a config from a JSON file.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    GameConfig::from_json(&data)
}
