//! Validated puzzle words.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Number of letters in the alphabet (`a`-`z`).
pub const ALPHABET_SIZE: usize = 26;

/// Longest word accepted. A feedback pattern of this length still fits a
/// base-3 `u64` code.
pub const MAX_WORD_LENGTH: usize = 40;

/// A lowercase word over `a`-`z`.
///
/// Words are immutable once constructed. Ordering is lexicographic, which
/// the ranker relies on for deterministic tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(Box<str>);

impl Word {
    /// Validate and case-normalise a word.
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(EngineError::malformed("empty word"));
        }
        if let Some(character) = raw.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(EngineError::InvalidCharacter {
                word: raw.to_string(),
                character,
            });
        }
        if raw.len() > MAX_WORD_LENGTH {
            return Err(EngineError::malformed(format!(
                "word {:?} is longer than {} letters",
                raw, MAX_WORD_LENGTH
            )));
        }
        Ok(Self(raw.to_ascii_lowercase().into_boxed_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Letters as ASCII bytes.
    pub fn letters(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed word.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Index of an ASCII lowercase letter in `0..ALPHABET_SIZE`.
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

impl FromStr for Word {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Word {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0.into()
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
