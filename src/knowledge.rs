//! Constraints accumulated from feedback.
//!
//! Hard mode requires every new guess to reuse revealed hints: exact letters
//! stay in place and present letters must appear again. [`Knowledge`] tracks
//! those hints along with the negative information (excluded positions and
//! letter count caps) a round reveals.

use crate::feedback::{Feedback, FeedbackPattern};
use crate::word::{letter_index, Word, ALPHABET_SIZE};

/// What is known about the answer after some rounds.
#[derive(Debug, Clone)]
pub struct Knowledge {
    /// Letters that must be in specific positions (exact)
    fixed: Vec<Option<u8>>,
    /// Per position, a bitmask of letters known not to be there
    excluded: Vec<u32>,
    /// Minimum number of copies of each letter
    min_counts: [u8; ALPHABET_SIZE],
    /// Exact number of copies, once an absent mark caps a letter
    exact_counts: [Option<u8>; ALPHABET_SIZE],
}

impl Knowledge {
    pub fn new(word_length: usize) -> Self {
        Self {
            fixed: vec![None; word_length],
            excluded: vec![0; word_length],
            min_counts: [0; ALPHABET_SIZE],
            exact_counts: [None; ALPHABET_SIZE],
        }
    }

    /// Update constraints based on a guess and its feedback.
    ///
    /// Ignored when the guess or pattern length does not match.
    pub fn update(&mut self, guess: &Word, pattern: FeedbackPattern) {
        if guess.len() != self.fixed.len() || pattern.len() != self.fixed.len() {
            return;
        }

        let mut matched = [0u8; ALPHABET_SIZE];
        let mut capped = [false; ALPHABET_SIZE];

        for (i, (&letter, fb)) in guess.letters().iter().zip(pattern.to_feedbacks()).enumerate() {
            let idx = letter_index(letter);
            match fb {
                Feedback::Exact => {
                    self.fixed[i] = Some(letter);
                    matched[idx] += 1;
                }
                Feedback::Present => {
                    self.excluded[i] |= 1 << idx;
                    matched[idx] += 1;
                }
                Feedback::Absent => {
                    self.excluded[i] |= 1 << idx;
                    capped[idx] = true;
                }
            }
        }

        for idx in 0..ALPHABET_SIZE {
            self.min_counts[idx] = self.min_counts[idx].max(matched[idx]);
            if capped[idx] {
                self.exact_counts[idx] = Some(matched[idx]);
            }
        }
    }

    /// Check if a guess satisfies hard mode: exact letters kept in place and
    /// every revealed letter used at least as often as it was matched.
    pub fn allows_guess(&self, word: &Word) -> bool {
        if word.len() != self.fixed.len() {
            return false;
        }
        let letters = word.letters();

        let fixed_ok = self
            .fixed
            .iter()
            .zip(letters)
            .all(|(required, &letter)| required.map_or(true, |c| c == letter));

        fixed_ok && {
            let counts = letter_counts(letters);
            counts
                .iter()
                .zip(&self.min_counts)
                .all(|(&have, &need)| have >= need)
        }
    }

    /// Check a word against everything known, including exclusions and caps.
    ///
    /// Every word consistent with the feedback so far is admitted.
    pub fn admits(&self, word: &Word) -> bool {
        if !self.allows_guess(word) {
            return false;
        }
        let letters = word.letters();

        let positions_ok = letters.iter().zip(&self.fixed).zip(&self.excluded).all(
            |((&letter, fixed), &excluded)| {
                fixed.is_some() || excluded & (1 << letter_index(letter)) == 0
            },
        );

        positions_ok
            && letter_counts(letters)
                .iter()
                .zip(&self.exact_counts)
                .all(|(&have, cap)| cap.map_or(true, |exact| have == exact))
    }

    pub fn is_empty(&self) -> bool {
        self.fixed.iter().all(Option::is_none)
            && self.min_counts.iter().all(|&c| c == 0)
            && self.excluded.iter().all(|&mask| mask == 0)
    }

    /// Letters known to be at each position.
    pub fn fixed_letters(&self) -> impl Iterator<Item = Option<char>> + '_ {
        self.fixed.iter().map(|slot| slot.map(char::from))
    }

    /// Letters known to be in the answer, with their minimum counts.
    pub fn required_letters(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        (b'a'..=b'z')
            .zip(self.min_counts.iter())
            .filter(|(_, &count)| count > 0)
            .map(|(letter, &count)| (char::from(letter), count))
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.fixed.len());
    }
}

fn letter_counts(letters: &[u8]) -> [u8; ALPHABET_SIZE] {
    let mut counts = [0u8; ALPHABET_SIZE];
    for &letter in letters {
        counts[letter_index(letter)] += 1;
    }
    counts
}
