//! Feedback calculation for guesses.
//!
//! This module computes the per-letter feedback (exact/present/absent) a
//! guess receives against an answer, and tests candidates for consistency
//! with observed feedback.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::word::{letter_index, Word, ALPHABET_SIZE, MAX_WORD_LENGTH};

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Exact,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word (gray)
    Absent,
}

impl Feedback {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Exact => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Compact letter used when a pattern is written as text.
    pub fn to_letter(self) -> char {
        match self {
            Feedback::Exact => 'g',
            Feedback::Present => 'y',
            Feedback::Absent => 'b',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | 'e' | '2' => Some(Feedback::Exact),
            'y' | 'p' | '1' => Some(Feedback::Present),
            'b' | 'a' | 'x' | '0' => Some(Feedback::Absent),
            _ => None,
        }
    }

    fn digit(self) -> u64 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Exact => 2,
        }
    }

    fn from_digit(digit: u64) -> Self {
        match digit {
            0 => Feedback::Absent,
            1 => Feedback::Present,
            _ => Feedback::Exact,
        }
    }
}

/// A complete feedback pattern, one symbol per letter.
///
/// Encoded as a base-3 code: position `i` contributes `digit * 3^i`, where
/// absent = 0, present = 1 and exact = 2. Two patterns are equal only when
/// both the code and the length match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackPattern {
    code: u64,
    len: u8,
}

impl FeedbackPattern {
    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: &[Feedback]) -> Result<Self> {
        if feedbacks.len() > MAX_WORD_LENGTH {
            return Err(EngineError::malformed(format!(
                "pattern is longer than {} symbols",
                MAX_WORD_LENGTH
            )));
        }
        let mut code: u64 = 0;
        let mut multiplier: u64 = 1;
        for fb in feedbacks {
            code += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Ok(Self {
            code,
            len: feedbacks.len() as u8,
        })
    }

    /// The winning pattern for words of `len` letters.
    pub fn all_exact(len: usize) -> Result<Self> {
        Self::new(&vec![Feedback::Exact; len])
    }

    /// Number of distinct patterns for words of `len` letters, if it fits.
    pub fn num_patterns(len: usize) -> Option<usize> {
        3usize.checked_pow(u32::try_from(len).ok()?)
    }

    /// The base-3 code of this pattern.
    pub fn code(self) -> u64 {
        self.code
    }

    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Symbol at `position`, if in range.
    pub fn get(self, position: usize) -> Option<Feedback> {
        if position >= self.len() {
            return None;
        }
        Some(Feedback::from_digit(
            (self.code / 3u64.pow(position as u32)) % 3,
        ))
    }

    /// Convert pattern to a vector of feedbacks
    pub fn to_feedbacks(self) -> Vec<Feedback> {
        let mut code = self.code;
        let mut feedbacks = Vec::with_capacity(self.len());
        for _ in 0..self.len {
            feedbacks.push(Feedback::from_digit(code % 3));
            code /= 3;
        }
        feedbacks
    }

    /// Check if this pattern represents a win (all exact)
    pub fn is_win(self) -> bool {
        // All-exact is the largest code for a given length: 3^len - 1.
        self.len > 0 && self.code == 3u64.pow(self.len as u32) - 1
    }

    /// Parse a pattern from a string like "gybbb" or "21000"
    pub fn parse(s: &str) -> Option<Self> {
        let feedbacks: Option<Vec<_>> = s.chars().map(Feedback::from_char).collect();
        let feedbacks = feedbacks?;
        if feedbacks.is_empty() {
            return None;
        }
        Self::new(&feedbacks).ok()
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_char()).collect()
    }

    /// Display as compact letters, e.g. "gybbb"
    pub fn to_letter_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_letter()).collect()
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

impl TryFrom<String> for FeedbackPattern {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
            .ok_or_else(|| EngineError::malformed(format!("invalid feedback pattern {:?}", value)))
    }
}

impl From<FeedbackPattern> for String {
    fn from(pattern: FeedbackPattern) -> Self {
        pattern.to_letter_string()
    }
}

/// Calculate the feedback pattern for a guess against an answer.
///
/// Standard multi-occurrence rules: exact matches consume their letter
/// first, then each remaining guess letter is marked present only while the
/// answer still has an unconsumed copy of it.
pub fn compute_feedback(guess: &Word, answer: &Word) -> Result<FeedbackPattern> {
    if guess.len() != answer.len() {
        return Err(EngineError::length_mismatch(answer.len(), guess.len()));
    }
    Ok(compute_unchecked(guess.letters(), answer.letters()))
}

/// Returns true iff `guess` played against `candidate` yields `observed`.
pub fn is_consistent(candidate: &Word, guess: &Word, observed: FeedbackPattern) -> bool {
    candidate.len() == observed.len()
        && compute_feedback(guess, candidate).is_ok_and(|pattern| pattern == observed)
}

/// Feedback for two validated words of equal length.
pub(crate) fn compute_unchecked(guess: &[u8], answer: &[u8]) -> FeedbackPattern {
    debug_assert_eq!(guess.len(), answer.len());

    let mut exact: u64 = 0;
    let mut answer_remaining = [0u8; ALPHABET_SIZE];

    for (i, (&g, &a)) in guess.iter().zip(answer).enumerate() {
        if g == a {
            exact |= 1 << i;
        } else {
            answer_remaining[letter_index(a)] += 1;
        }
    }

    let mut code: u64 = 0;
    let mut multiplier: u64 = 1;
    for (i, &g) in guess.iter().enumerate() {
        if exact & (1 << i) != 0 {
            code += 2 * multiplier;
        } else {
            let remaining = &mut answer_remaining[letter_index(g)];
            if *remaining > 0 {
                code += multiplier;
                *remaining -= 1;
            }
        }
        multiplier *= 3;
    }

    FeedbackPattern {
        code,
        len: guess.len() as u8,
    }
}
