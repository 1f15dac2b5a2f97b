use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ranker::RankerConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub ranker: RankerConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Word list locations. The bundled corpus is used when `words` is unset.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Candidate words (JSON array, `{words, solutions}` object, or one word per line)
    #[serde(default)]
    pub words: Option<PathBuf>,
    /// Words allowed as guesses; defaults to the candidate corpus
    #[serde(default)]
    pub allowed: Option<PathBuf>,
}

/// Game session settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    #[serde(default)]
    pub hard_mode: bool,
    /// Suggestions returned when the caller does not ask for a count
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            hard_mode: false,
            top_n: default_top_n(),
        }
    }
}

fn default_max_turns() -> usize {
    6
}

fn default_top_n() -> usize {
    5
}
