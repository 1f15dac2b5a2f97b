//! Entropy-based guess ranking.
//!
//! Each allowed guess is scored by the entropy of the partition it induces
//! on the live candidates: candidates are bucketed by the feedback pattern
//! they would give for that guess, and
//! `score = -Σ p_b · log2(p_b)` over the buckets. A higher score means the
//! feedback splits the candidates more evenly, so fewer words are expected
//! to remain after the guess.

use std::cmp::Ordering;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::Corpus;
use crate::dictionary::Dictionary;
use crate::error::{EngineError, Result};
use crate::feedback::{compute_unchecked, FeedbackPattern};
use crate::word::Word;

/// Grid step for comparing scores: each score is rounded to the nearest
/// multiple before ordering, and scores on the same step tie.
pub const SCORE_TOLERANCE: f64 = 1e-9;

/// Largest pattern space bucketed in a flat table (3^8).
const DENSE_TABLE_LIMIT: usize = 6561;

/// How the optional solutions subset influences ranking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SolutionBias {
    /// Every live candidate weighs the same; solutions are ignored.
    #[default]
    Uniform,
    /// Uniform scoring, but solution words win ties after live candidates.
    PreferSolutions,
    /// Candidates that are not solutions weigh `non_solution_weight`
    /// (solutions weigh 1) when computing the entropy. Also prefers
    /// solutions on ties.
    Prior { non_solution_weight: f64 },
}

impl SolutionBias {
    fn prefers_solutions(self) -> bool {
        !matches!(self, SolutionBias::Uniform)
    }
}

/// Ranker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Score guesses on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Stop after scanning this many guesses (live candidates are scanned first)
    #[serde(default)]
    pub max_guesses_scanned: Option<usize>,
    #[serde(default)]
    pub solution_bias: SolutionBias,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            max_guesses_scanned: None,
            solution_bias: SolutionBias::default(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

/// A scored guess suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGuess {
    pub word: Word,
    /// Entropy of the feedback distribution, in bits
    pub score: f64,
    /// Expected number of candidates left after this guess
    pub expected_remaining: f64,
    /// The guess could itself be the answer
    pub is_candidate: bool,
    /// The guess is in the corpus' solutions subset
    pub is_solution: bool,
}

/// Per-guess bucket accumulator, reused across guesses on one worker.
enum Buckets {
    /// `(weight, count)` indexed by pattern code
    Dense(Vec<(f64, u32)>),
    /// `(code, weight)` pairs, sorted by code before summing
    Sparse(Vec<(u64, f64)>),
}

impl Buckets {
    fn new(word_length: usize, candidates: usize) -> Self {
        match FeedbackPattern::num_patterns(word_length) {
            Some(size) if size <= DENSE_TABLE_LIMIT => Buckets::Dense(vec![(0.0, 0); size]),
            _ => Buckets::Sparse(Vec::with_capacity(candidates)),
        }
    }

    /// Bucket `candidates` by their pattern against `guess` and return
    /// `(entropy, expected_remaining)`.
    ///
    /// Buckets are summed in ascending pattern code, and weights within a
    /// bucket in candidate order, so the result does not depend on which
    /// thread runs it.
    fn score(&mut self, guess: &[u8], candidates: &[&[u8]], weights: &[f64], total: f64) -> (f64, f64) {
        let mut entropy: f64 = 0.0;
        let mut expected: f64 = 0.0;
        let mut add_bucket = |weight: f64, count: u32| {
            if weight > 0.0 {
                let p = weight / total;
                entropy -= p * p.log2();
                expected += p * count as f64;
            }
        };

        match self {
            Buckets::Dense(table) => {
                for (candidate, &weight) in candidates.iter().zip(weights) {
                    let slot = &mut table[compute_unchecked(guess, candidate).code() as usize];
                    slot.0 += weight;
                    slot.1 += 1;
                }
                for slot in table.iter_mut() {
                    if slot.1 > 0 {
                        add_bucket(slot.0, slot.1);
                        *slot = (0.0, 0);
                    }
                }
            }
            Buckets::Sparse(pairs) => {
                pairs.clear();
                pairs.extend(
                    candidates
                        .iter()
                        .zip(weights)
                        .map(|(candidate, &weight)| (compute_unchecked(guess, candidate).code(), weight)),
                );
                pairs.sort_by_key(|&(code, _)| code);
                for run in pairs.chunk_by(|a, b| a.0 == b.0) {
                    let weight: f64 = run.iter().map(|&(_, w)| w).sum();
                    add_bucket(weight, run.len() as u32);
                }
            }
        }

        // Rounding can leave a tiny negative value for a single bucket.
        (entropy.max(0.0), expected)
    }
}

/// Ranks allowed guesses against a [`Dictionary`]'s live candidates.
#[derive(Debug, Clone, Default)]
pub struct GuessRanker {
    config: RankerConfig,
}

impl GuessRanker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Return up to `top_n` guesses from `allowed`, best first.
    pub fn suggest(
        &self,
        dictionary: &Dictionary,
        allowed: &Corpus,
        top_n: usize,
    ) -> Result<Vec<RankedGuess>> {
        self.suggest_filtered(dictionary, allowed, top_n, |_| true)
    }

    /// Like [`suggest`](Self::suggest), but only scores guesses accepted by
    /// `accept` (used for hard mode).
    pub fn suggest_filtered<F>(
        &self,
        dictionary: &Dictionary,
        allowed: &Corpus,
        top_n: usize,
        accept: F,
    ) -> Result<Vec<RankedGuess>>
    where
        F: Fn(&Word) -> bool,
    {
        let live = dictionary.live_indices();
        if live.is_empty() {
            return Err(EngineError::NoCandidatesRemaining);
        }
        if allowed.word_length() != dictionary.word_length() {
            return Err(EngineError::length_mismatch(
                dictionary.word_length(),
                allowed.word_length(),
            ));
        }
        if top_n == 0 {
            return Ok(Vec::new());
        }

        let corpus = dictionary.corpus();
        if let [only] = live {
            return Ok(vec![RankedGuess {
                word: corpus.words()[*only].clone(),
                score: 0.0,
                expected_remaining: 1.0,
                is_candidate: true,
                is_solution: corpus.is_solution(*only),
            }]);
        }

        let start = Instant::now();
        let candidates: Vec<&[u8]> = live.iter().map(|&i| corpus.words()[i].letters()).collect();
        let weights = self.candidate_weights(corpus, live);
        let total: f64 = weights.iter().sum();
        let guesses = self.guesses_to_scan(dictionary, allowed, &accept);
        let word_length = dictionary.word_length();

        let scores: Vec<(f64, f64)> = if self.config.parallel {
            guesses
                .par_iter()
                .map_init(
                    || Buckets::new(word_length, candidates.len()),
                    |buckets, guess| buckets.score(guess.letters(), &candidates, &weights, total),
                )
                .collect()
        } else {
            let mut buckets = Buckets::new(word_length, candidates.len());
            guesses
                .iter()
                .map(|guess| buckets.score(guess.letters(), &candidates, &weights, total))
                .collect()
        };

        let mut ranked: Vec<RankedGuess> = guesses
            .into_iter()
            .zip(scores)
            .map(|(word, (score, expected_remaining))| RankedGuess {
                is_candidate: dictionary.is_candidate(word),
                is_solution: corpus.index_of(word).is_some_and(|i| corpus.is_solution(i)),
                word: word.clone(),
                score,
                expected_remaining,
            })
            .collect();

        let prefer_solutions = self.config.solution_bias.prefers_solutions();
        ranked.sort_by(|a, b| compare(a, b, prefer_solutions));
        let scanned = ranked.len();
        ranked.truncate(top_n);

        debug!(
            scanned,
            candidates = live.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            best = ranked.first().map(|g| g.word.as_str()).unwrap_or(""),
            "Ranked guesses"
        );

        Ok(ranked)
    }

    /// Entropy of the live candidate distribution for a single guess.
    pub fn score_guess(&self, dictionary: &Dictionary, guess: &Word) -> Result<f64> {
        let live = dictionary.live_indices();
        if live.is_empty() {
            return Err(EngineError::NoCandidatesRemaining);
        }
        if guess.len() != dictionary.word_length() {
            return Err(EngineError::length_mismatch(dictionary.word_length(), guess.len()));
        }
        let corpus = dictionary.corpus();
        let candidates: Vec<&[u8]> = live.iter().map(|&i| corpus.words()[i].letters()).collect();
        let weights = self.candidate_weights(corpus, live);
        let total: f64 = weights.iter().sum();
        let mut buckets = Buckets::new(guess.len(), candidates.len());
        Ok(buckets.score(guess.letters(), &candidates, &weights, total).0)
    }

    fn candidate_weights(&self, corpus: &Corpus, live: &[usize]) -> Vec<f64> {
        match self.config.solution_bias {
            SolutionBias::Prior { non_solution_weight } if corpus.has_solutions() => {
                let weights: Vec<f64> = live
                    .iter()
                    .map(|&i| if corpus.is_solution(i) { 1.0 } else { non_solution_weight })
                    .collect();
                if weights.iter().any(|&w| w > 0.0) {
                    return weights;
                }
                vec![1.0; live.len()]
            }
            _ => vec![1.0; live.len()],
        }
    }

    fn guesses_to_scan<'a, F>(
        &self,
        dictionary: &'a Dictionary,
        allowed: &'a Corpus,
        accept: &F,
    ) -> Vec<&'a Word>
    where
        F: Fn(&Word) -> bool,
    {
        match self.config.max_guesses_scanned {
            None => allowed.iter().filter(|word| accept(*word)).collect(),
            Some(cap) => dictionary
                .remaining_words()
                .filter(|word| allowed.contains(word))
                .chain(allowed.iter().filter(|word| !dictionary.is_candidate(word)))
                .filter(|word| accept(*word))
                .take(cap.max(1))
                .collect(),
        }
    }
}

/// Best first: higher score, then live candidates, then (optionally)
/// solution words, then alphabetical.
fn compare(a: &RankedGuess, b: &RankedGuess, prefer_solutions: bool) -> Ordering {
    score_key(b.score)
        .cmp(&score_key(a.score))
        .then_with(|| b.is_candidate.cmp(&a.is_candidate))
        .then_with(|| {
            if prefer_solutions {
                b.is_solution.cmp(&a.is_solution)
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| a.word.cmp(&b.word))
}

/// Index of the [`SCORE_TOLERANCE`] step nearest to `score`. Two scores
/// within the tolerance usually, but not always, share a step.
fn score_key(score: f64) -> i64 {
    (score / SCORE_TOLERANCE).round() as i64
}
