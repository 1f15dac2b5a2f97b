//! Error types for the solving engine.

use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by corpus loading, feedback matching and ranking.
///
/// An empty candidate set after applying feedback is not an error; check
/// [`Dictionary::remaining_count`](crate::Dictionary::remaining_count).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Word list is empty, or its entries do not share one length.
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    /// A word contains a character outside `a`-`z`.
    #[error("Invalid character {character:?} in word {word:?}")]
    InvalidCharacter { word: String, character: char },

    /// Two words (or a word and a pattern) differ in length.
    #[error("Length mismatch: expected {expected} letters, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// The ranker was asked for suggestions with no live candidates.
    #[error("No candidates remaining")]
    NoCandidatesRemaining,

    /// I/O error while reading a word list.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The word list is not valid JSON in either accepted shape.
    #[error("Failed to parse word list: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Creates a new malformed input error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Creates a new length mismatch error.
    pub fn length_mismatch(expected: usize, got: usize) -> Self {
        Self::LengthMismatch { expected, got }
    }
}
