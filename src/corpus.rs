//! Word corpus loading.
//!
//! A [`CorpusBuilder`] accumulates words at load time; [`CorpusBuilder::build`]
//! freezes them into an immutable [`Corpus`]. The corpus never changes after
//! that; narrowing candidates is the job of [`Dictionary`](crate::Dictionary).

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::slice;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{EngineError, Result};
use crate::word::Word;

/// Accepted JSON shapes for a word list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCorpus {
    /// `["crane", "slate", ...]`
    List(Vec<String>),
    /// `{"words": [...], "solutions": [...]}`
    Split {
        words: Vec<String>,
        #[serde(default)]
        solutions: Vec<String>,
    },
}

/// Load-time accumulator for a [`Corpus`].
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    words: Vec<Word>,
    index: HashMap<Word, usize>,
    solutions: Vec<bool>,
    word_length: Option<usize>,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word. Returns `false` if it was already present.
    pub fn add(&mut self, raw: &str) -> Result<bool> {
        let word = Word::new(raw)?;
        self.insert(word).map(|(_, added)| added)
    }

    /// Add a word and mark it as an eligible answer.
    pub fn add_solution(&mut self, raw: &str) -> Result<bool> {
        let word = Word::new(raw)?;
        let (index, added) = self.insert(word)?;
        self.solutions[index] = true;
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn insert(&mut self, word: Word) -> Result<(usize, bool)> {
        match self.word_length {
            Some(expected) if expected != word.len() => {
                return Err(EngineError::malformed(format!(
                    "word {:?} has {} letters, expected {}",
                    word.as_str(),
                    word.len(),
                    expected
                )));
            }
            Some(_) => {}
            None => self.word_length = Some(word.len()),
        }

        if let Some(&index) = self.index.get(&word) {
            debug!(word = %word, "Skipping duplicate word");
            return Ok((index, false));
        }

        let index = self.words.len();
        self.index.insert(word.clone(), index);
        self.words.push(word);
        self.solutions.push(false);
        Ok((index, true))
    }

    /// Freeze the accumulated words.
    pub fn build(self) -> Result<Corpus> {
        let word_length = match self.word_length {
            Some(len) if !self.words.is_empty() => len,
            _ => return Err(EngineError::malformed("word list is empty")),
        };
        let solution_count = self.solutions.iter().filter(|&&s| s).count();

        info!(
            words = self.words.len(),
            solutions = solution_count,
            word_length,
            "Loaded corpus"
        );

        Ok(Corpus {
            words: self.words,
            index: self.index,
            solutions: self.solutions,
            solution_count,
            word_length,
        })
    }
}

/// An immutable set of unique words sharing one length, with an optional
/// subset of words eligible to be the answer.
#[derive(Debug, Clone)]
pub struct Corpus {
    words: Vec<Word>,
    index: HashMap<Word, usize>,
    solutions: Vec<bool>,
    solution_count: usize,
    word_length: usize,
}

impl Corpus {
    /// Build a corpus from a flat list of words.
    pub fn load<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = CorpusBuilder::new();
        for word in raw {
            builder.add(word.as_ref())?;
        }
        builder.build()
    }

    /// Build a corpus from guessable words plus a separate list of answers.
    ///
    /// Answers missing from `words` are added to the corpus.
    pub fn load_with_solutions<I, S, J, T>(words: I, solutions: J) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut builder = CorpusBuilder::new();
        for word in words {
            builder.add(word.as_ref())?;
        }
        for word in solutions {
            builder.add_solution(word.as_ref())?;
        }
        builder.build()
    }

    /// Parse either a JSON array of words or a `{"words", "solutions"}` object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_raw(serde_json::from_reader(reader)?)
    }

    /// Newline-separated words. Anything after the first whitespace on a line
    /// (such as a frequency column) is ignored.
    pub fn from_lines(text: &str) -> Result<Self> {
        Self::load(text.lines().filter_map(|line| line.split_whitespace().next()))
    }

    /// Load a word list from disk: `.json` files as JSON, anything else as lines.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Reading word list");
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&contents),
            _ => Self::from_lines(&contents),
        }
    }

    fn from_raw(raw: RawCorpus) -> Result<Self> {
        match raw {
            RawCorpus::List(words) => Self::load(words),
            RawCorpus::Split { words, solutions } => Self::load_with_solutions(words, solutions),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: an empty corpus cannot be built.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Letters per word.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains_key(word)
    }

    /// Like [`contains`](Self::contains), but for unvalidated input.
    pub fn contains_str(&self, raw: &str) -> bool {
        Word::new(raw).is_ok_and(|word| self.contains(&word))
    }

    pub fn index_of(&self, word: &Word) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// Words in load order. The iterator is `Clone`, so it can be restarted.
    pub fn iter(&self) -> slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn has_solutions(&self) -> bool {
        self.solution_count > 0
    }

    pub fn solution_count(&self) -> usize {
        self.solution_count
    }

    pub fn is_solution(&self, index: usize) -> bool {
        self.solutions.get(index).copied().unwrap_or(false)
    }

    /// Answer-eligible words, in load order.
    pub fn solutions(&self) -> impl Iterator<Item = &Word> + Clone + '_ {
        self.words
            .iter()
            .zip(&self.solutions)
            .filter_map(|(word, &is_solution)| is_solution.then_some(word))
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Word;
    type IntoIter = slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
