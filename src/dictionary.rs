//! The live candidate set.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::corpus::Corpus;
use crate::error::{EngineError, Result};
use crate::feedback::{compute_unchecked, FeedbackPattern};
use crate::word::Word;

/// Words from a [`Corpus`] still consistent with every round of feedback.
///
/// The live set starts as the whole corpus, only shrinks as feedback is
/// applied, and returns to the whole corpus on [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct Dictionary {
    corpus: Arc<Corpus>,
    /// Indices into the corpus, in corpus order
    live: Vec<usize>,
    live_mask: Vec<bool>,
    history: Vec<(Word, FeedbackPattern)>,
}

impl Dictionary {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            live: (0..corpus.len()).collect(),
            live_mask: vec![true; corpus.len()],
            history: Vec::new(),
            corpus,
        }
    }

    /// Keep only the words that would have produced `observed` for `guess`.
    ///
    /// Returns how many words were eliminated. An empty live set afterwards
    /// is a valid outcome; check [`remaining_count`](Self::remaining_count).
    pub fn apply_feedback(&mut self, guess: &Word, observed: FeedbackPattern) -> Result<usize> {
        let expected = self.corpus.word_length();
        if guess.len() != expected {
            return Err(EngineError::length_mismatch(expected, guess.len()));
        }
        if observed.len() != expected {
            return Err(EngineError::length_mismatch(expected, observed.len()));
        }

        let before = self.live.len();
        let words = self.corpus.words();
        let live_mask = &mut self.live_mask;
        self.live.retain(|&index| {
            let keep = compute_unchecked(guess.letters(), words[index].letters()) == observed;
            if !keep {
                live_mask[index] = false;
            }
            keep
        });
        self.history.push((guess.clone(), observed));

        let after = self.live.len();
        debug!(
            guess = %guess,
            pattern = %observed.to_letter_string(),
            before,
            after,
            "Applied feedback"
        );
        if after == 0 {
            warn!(guess = %guess, "No words match the feedback so far");
        }

        Ok(before - after)
    }

    pub fn remaining_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live words in corpus order. The iterator is `Clone`, so it can be
    /// restarted.
    pub fn remaining_words(&self) -> impl Iterator<Item = &Word> + Clone + '_ {
        let words = self.corpus.words();
        self.live.iter().map(move |&index| &words[index])
    }

    /// Whether `word` is still a possible answer.
    pub fn is_candidate(&self, word: &Word) -> bool {
        self.corpus
            .index_of(word)
            .is_some_and(|index| self.live_mask[index])
    }

    pub(crate) fn live_indices(&self) -> &[usize] {
        &self.live
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn word_length(&self) -> usize {
        self.corpus.word_length()
    }

    /// Rounds applied since construction or the last reset.
    pub fn history(&self) -> &[(Word, FeedbackPattern)] {
        &self.history
    }

    /// Restore the live set to the full corpus.
    pub fn reset(&mut self) {
        self.live.clear();
        self.live.extend(0..self.corpus.len());
        self.live_mask.fill(true);
        self.history.clear();
    }
}
