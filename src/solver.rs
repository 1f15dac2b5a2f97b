//! Game sessions on top of the dictionary and ranker.
//!
//! A [`Solver`] holds one puzzle's state: the live candidates, the words
//! allowed as guesses, the ranker and the hints collected so far. It also
//! plays whole games against a known answer, which the benchmark uses to
//! measure how many guesses the strategy needs.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::dictionary::Dictionary;
use crate::error::{EngineError, Result};
use crate::feedback::{compute_unchecked, FeedbackPattern};
use crate::knowledge::Knowledge;
use crate::ranker::{GuessRanker, RankedGuess};
use crate::word::Word;

/// Default number of turns in a game
pub const DEFAULT_MAX_TURNS: usize = 6;

/// The main puzzle solver
#[derive(Debug, Clone)]
pub struct Solver {
    dictionary: Dictionary,
    allowed: Arc<Corpus>,
    ranker: GuessRanker,
    knowledge: Knowledge,
    hard_mode: bool,
    max_turns: usize,
}

impl Solver {
    /// A solver that guesses from the same corpus it narrows.
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            knowledge: Knowledge::new(corpus.word_length()),
            dictionary: Dictionary::new(corpus.clone()),
            allowed: corpus,
            ranker: GuessRanker::default(),
            hard_mode: false,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// A solver that narrows `corpus` but may guess any word in `allowed`.
    pub fn with_allowed(corpus: Arc<Corpus>, allowed: Arc<Corpus>) -> Result<Self> {
        if allowed.word_length() != corpus.word_length() {
            return Err(EngineError::length_mismatch(
                corpus.word_length(),
                allowed.word_length(),
            ));
        }
        let mut solver = Self::new(corpus);
        solver.allowed = allowed;
        Ok(solver)
    }

    /// Build a solver with ranker and game settings from `config`.
    pub fn from_config(
        config: &EngineConfig,
        corpus: Arc<Corpus>,
        allowed: Option<Arc<Corpus>>,
    ) -> Result<Self> {
        let solver = match allowed {
            Some(allowed) => Self::with_allowed(corpus, allowed)?,
            None => Self::new(corpus),
        };
        let mut solver = solver
            .with_ranker(GuessRanker::new(config.ranker.clone()))
            .with_max_turns(config.game.max_turns);
        solver.set_hard_mode(config.game.hard_mode);
        Ok(solver)
    }

    pub fn with_ranker(mut self, ranker: GuessRanker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    pub fn set_hard_mode(&mut self, enabled: bool) {
        self.hard_mode = enabled;
    }

    pub fn is_hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn remaining_count(&self) -> usize {
        self.dictionary.remaining_count()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn allowed(&self) -> &Arc<Corpus> {
        &self.allowed
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    pub fn reset(&mut self) {
        self.dictionary.reset();
        self.knowledge.clear();
    }

    /// Narrow the candidates with one round of feedback.
    ///
    /// Returns how many candidates were eliminated.
    pub fn apply_feedback(&mut self, guess: &Word, pattern: FeedbackPattern) -> Result<usize> {
        let eliminated = self.dictionary.apply_feedback(guess, pattern)?;
        self.knowledge.update(guess, pattern);
        Ok(eliminated)
    }

    /// Ranked suggestions for the next guess. In hard mode only guesses
    /// that reuse every revealed hint are considered; when no allowed word
    /// does, the live candidates themselves are ranked.
    pub fn suggest(&self, top_n: usize) -> Result<Vec<RankedGuess>> {
        if !self.hard_mode || self.knowledge.is_empty() {
            return self.ranker.suggest(&self.dictionary, &self.allowed, top_n);
        }

        let ranked = self
            .ranker
            .suggest_filtered(&self.dictionary, &self.allowed, top_n, |word| {
                self.knowledge.allows_guess(word)
            })?;
        if !ranked.is_empty() || top_n == 0 {
            return Ok(ranked);
        }

        // Every live candidate satisfies the hints.
        debug!(
            remaining = self.remaining_count(),
            "No allowed guess keeps the hints, ranking candidates"
        );
        self.ranker.suggest_filtered(
            &self.dictionary,
            self.dictionary.corpus(),
            top_n,
            |word| self.dictionary.is_candidate(word),
        )
    }

    pub fn best_guess(&self) -> Result<RankedGuess> {
        self.suggest(1)?
            .into_iter()
            .next()
            .ok_or(EngineError::NoCandidatesRemaining)
    }

    /// Play a game, asking `get_feedback` for the pattern of each guess.
    ///
    /// Stops on a win, after `max_turns` guesses, or when no candidate is
    /// left. Returns the guesses made.
    pub fn solve_with_feedback<F>(&mut self, mut get_feedback: F) -> Result<Vec<(Word, FeedbackPattern)>>
    where
        F: FnMut(&Word) -> FeedbackPattern,
    {
        let mut guesses = Vec::new();

        for _ in 0..self.max_turns {
            let best = match self.best_guess() {
                Ok(g) => g,
                Err(EngineError::NoCandidatesRemaining) => break,
                Err(e) => return Err(e),
            };

            let pattern = get_feedback(&best.word);
            guesses.push((best.word.clone(), pattern));

            if pattern.is_win() {
                break;
            }

            self.apply_feedback(&best.word, pattern)?;
        }

        Ok(guesses)
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(&mut self, target: &Word) -> Result<Vec<(Word, FeedbackPattern)>> {
        let expected = self.dictionary.word_length();
        if target.len() != expected {
            return Err(EngineError::length_mismatch(expected, target.len()));
        }
        let guesses =
            self.solve_with_feedback(|guess| compute_unchecked(guess.letters(), target.letters()))?;
        debug!(target = %target, guesses = guesses.len(), "Finished game");
        Ok(guesses)
    }

    /// Play every answer-eligible word (the solutions subset, or the whole
    /// corpus without one) from a fresh state and count the guesses needed.
    ///
    /// Returns `(guesses, games)` pairs in ascending order of guesses.
    /// Unsolved games are counted under `max_turns + 1`.
    pub fn benchmark_distribution(&self) -> Result<Vec<(usize, usize)>> {
        let corpus = self.dictionary.corpus();
        let targets: Vec<&Word> = if corpus.has_solutions() {
            corpus.solutions().collect()
        } else {
            corpus.iter().collect()
        };
        info!(games = targets.len(), "Running benchmark");

        let guess_counts: Vec<usize> = targets
            .par_iter()
            .map(|target| -> Result<usize> {
                let mut solver = self.clone();
                solver.reset();
                let guesses = solver.solve_for_target(target)?;
                let solved = guesses.last().is_some_and(|(_, pattern)| pattern.is_win());
                Ok(if solved {
                    guesses.len()
                } else {
                    self.max_turns + 1
                })
            })
            .collect::<Result<_>>()?;

        let mut distribution = vec![0usize; self.max_turns + 2];
        for count in guess_counts {
            distribution[count] += 1;
        }

        Ok(distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect())
    }

    /// Average number of guesses over the benchmark games.
    pub fn benchmark_average(&self) -> Result<f64> {
        let distribution = self.benchmark_distribution()?;
        let games: usize = distribution.iter().map(|(_, c)| c).sum();
        let total: usize = distribution.iter().map(|(g, c)| g * c).sum();
        Ok(total as f64 / games.max(1) as f64)
    }
}
