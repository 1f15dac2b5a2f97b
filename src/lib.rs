//! # Wordle Engine
//!
//! A word-puzzle solving engine using entropy-based information theory.
//!
//! A [`Corpus`] of equal-length words is loaded once. A [`Dictionary`]
//! narrows it to the words consistent with each round of feedback, and the
//! [`GuessRanker`] scores every allowed guess by the expected information
//! gain of its feedback, recommending the guesses that split the remaining
//! candidates most evenly.
//!
//! ```
//! use std::sync::Arc;
//! use wordle_engine::{compute_feedback, Corpus, Dictionary, GuessRanker, Word};
//!
//! let corpus = Arc::new(Corpus::load(["crane", "trace", "crate", "slate"])?);
//! let mut dictionary = Dictionary::new(corpus.clone());
//!
//! let guess = Word::new("crane")?;
//! let answer = Word::new("crate")?;
//! dictionary.apply_feedback(&guess, compute_feedback(&guess, &answer)?)?;
//!
//! let best = GuessRanker::default().suggest(&dictionary, &corpus, 1)?;
//! assert_eq!(best[0].word, answer);
//! # Ok::<(), wordle_engine::EngineError>(())
//! ```

pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod feedback;
pub mod knowledge;
pub mod ranker;
pub mod service;
pub mod solver;
pub mod word;

pub use config::{load_config, validate_config, ConfigError, EngineConfig};
pub use corpus::{Corpus, CorpusBuilder};
pub use dictionary::Dictionary;
pub use error::{EngineError, Result};
pub use feedback::{compute_feedback, is_consistent, Feedback, FeedbackPattern};
pub use knowledge::Knowledge;
pub use ranker::{GuessRanker, RankedGuess, RankerConfig, SolutionBias};
pub use service::{Request, Response, Session};
pub use solver::Solver;
pub use word::{Word, MAX_WORD_LENGTH};

/// Load the bundled word list (guessable words plus a solutions subset)
pub fn default_corpus() -> Result<Corpus> {
    Corpus::from_json_str(include_str!("../dictionary/words.json"))
}
