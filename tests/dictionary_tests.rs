use std::sync::Arc;

use wordle_engine::{
    compute_feedback, default_corpus, Corpus, Dictionary, EngineError, FeedbackPattern, GuessRanker,
    Knowledge, Word,
};

fn word(s: &str) -> Word {
    Word::new(s).unwrap()
}

fn test_corpus() -> Arc<Corpus> {
    Arc::new(
        Corpus::load([
            "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
        ])
        .unwrap(),
    )
}

fn feedback(guess: &str, answer: &str) -> FeedbackPattern {
    compute_feedback(&word(guess), &word(answer)).unwrap()
}

fn remaining(dictionary: &Dictionary) -> Vec<String> {
    dictionary.remaining_words().map(|w| w.to_string()).collect()
}

#[test]
fn test_new_dictionary_holds_whole_corpus() {
    let corpus = test_corpus();
    let dictionary = Dictionary::new(corpus.clone());
    assert_eq!(dictionary.remaining_count(), corpus.len());
    assert!(dictionary.history().is_empty());
    assert!(dictionary.remaining_words().eq(corpus.iter()));
}

#[test]
fn test_apply_feedback() {
    let mut dictionary = Dictionary::new(test_corpus());

    let eliminated = dictionary
        .apply_feedback(&word("roast"), feedback("roast", "crate"))
        .unwrap();

    assert_eq!(remaining(&dictionary), vec!["trace", "crate"]);
    assert_eq!(eliminated, 8);
    assert!(dictionary.is_candidate(&word("crate")));
    assert!(!dictionary.is_candidate(&word("roast")));
    assert!(!dictionary.is_candidate(&word("zzzzz")));
    assert_eq!(dictionary.history().len(), 1);
}

#[test]
fn test_guess_outside_corpus() {
    let mut dictionary = Dictionary::new(test_corpus());
    dictionary
        .apply_feedback(&word("chart"), feedback("chart", "crate"))
        .unwrap();
    assert!(dictionary.is_candidate(&word("crate")));
    assert!(dictionary.remaining_count() < 10);
}

#[test]
fn test_reset_restores_corpus() {
    let corpus = test_corpus();
    let mut dictionary = Dictionary::new(corpus.clone());

    dictionary
        .apply_feedback(&word("crane"), feedback("crane", "toast"))
        .unwrap();
    assert_eq!(remaining(&dictionary), vec!["toast"]);

    dictionary.reset();
    assert_eq!(dictionary.remaining_count(), corpus.len());
    assert!(dictionary.is_candidate(&word("crane")));
    assert!(dictionary.history().is_empty());
}

#[test]
fn test_remaining_count_is_monotonic() {
    let corpus = Arc::new(default_corpus().unwrap());
    let mut dictionary = Dictionary::new(corpus);
    let answer = word("fuzzy");

    let mut previous = dictionary.remaining_count();
    for guess in ["trace", "pound", "sixth", "fully", "fuzzy"] {
        let guess = word(guess);
        dictionary
            .apply_feedback(&guess, compute_feedback(&guess, &answer).unwrap())
            .unwrap();
        let current = dictionary.remaining_count();
        assert!(current <= previous, "{} grew from {} to {}", guess, previous, current);
        assert!(dictionary.is_candidate(&answer));
        previous = current;
    }
    assert_eq!(remaining(&dictionary), vec!["fuzzy"]);
}

#[test]
fn test_apply_feedback_is_idempotent() {
    let mut dictionary = Dictionary::new(Arc::new(default_corpus().unwrap()));
    let guess = word("slate");
    let pattern = feedback("slate", "beach");

    dictionary.apply_feedback(&guess, pattern).unwrap();
    let once = remaining(&dictionary);

    let eliminated = dictionary.apply_feedback(&guess, pattern).unwrap();
    assert_eq!(eliminated, 0);
    assert_eq!(remaining(&dictionary), once);
}

#[test]
fn test_live_set_is_subset_of_corpus() {
    let corpus = Arc::new(default_corpus().unwrap());
    let mut dictionary = Dictionary::new(corpus.clone());
    dictionary
        .apply_feedback(&word("arise"), feedback("arise", "storm"))
        .unwrap();
    assert!(dictionary.remaining_words().all(|w| corpus.contains(w)));
}

#[test]
fn test_empty_intersection_is_not_an_error() {
    let mut dictionary = Dictionary::new(test_corpus());

    let eliminated = dictionary
        .apply_feedback(&word("zzzzz"), FeedbackPattern::all_exact(5).unwrap())
        .unwrap();

    assert_eq!(eliminated, 10);
    assert_eq!(dictionary.remaining_count(), 0);
    assert!(dictionary.is_empty());

    let result = GuessRanker::default().suggest(&dictionary, dictionary.corpus(), 5);
    assert!(matches!(result, Err(EngineError::NoCandidatesRemaining)));
}

#[test]
fn test_length_mismatch_leaves_live_set_untouched() {
    let mut dictionary = Dictionary::new(test_corpus());

    let result = dictionary.apply_feedback(&word("cranes"), FeedbackPattern::all_exact(6).unwrap());
    assert!(matches!(
        result,
        Err(EngineError::LengthMismatch { expected: 5, got: 6 })
    ));

    let result = dictionary.apply_feedback(&word("crane"), FeedbackPattern::parse("ggg").unwrap());
    assert!(matches!(
        result,
        Err(EngineError::LengthMismatch { expected: 5, got: 3 })
    ));

    assert_eq!(dictionary.remaining_count(), 10);
    assert!(dictionary.history().is_empty());
}

#[test]
fn test_remaining_words_is_restartable() {
    let mut dictionary = Dictionary::new(test_corpus());
    dictionary
        .apply_feedback(&word("roast"), feedback("roast", "crate"))
        .unwrap();

    let words = dictionary.remaining_words();
    assert_eq!(words.clone().count(), 2);
    assert_eq!(words.count(), 2);
}

#[test]
fn test_knowledge_admits_every_live_word() {
    let corpus = Arc::new(default_corpus().unwrap());
    let mut dictionary = Dictionary::new(corpus.clone());
    let mut knowledge = Knowledge::new(corpus.word_length());
    let answer = word("sheep");

    for guess in ["erase", "speed", "sleep"] {
        let guess = word(guess);
        let pattern = compute_feedback(&guess, &answer).unwrap();
        dictionary.apply_feedback(&guess, pattern).unwrap();
        knowledge.update(&guess, pattern);

        for live in dictionary.remaining_words() {
            assert!(knowledge.admits(live), "{} should be admitted", live);
            assert!(knowledge.allows_guess(live), "{} should be allowed", live);
        }
    }
}

#[test]
fn test_knowledge_constraints() {
    let mut knowledge = Knowledge::new(5);
    assert!(knowledge.is_empty());

    // ROAST against CRATE: R present, A exact, T present, O and S absent.
    knowledge.update(&word("roast"), feedback("roast", "crate"));
    assert!(!knowledge.is_empty());

    let fixed: Vec<Option<char>> = knowledge.fixed_letters().collect();
    assert_eq!(fixed, vec![None, None, Some('a'), None, None]);
    let required: Vec<(char, u8)> = knowledge.required_letters().collect();
    assert_eq!(required, vec![('a', 1), ('r', 1), ('t', 1)]);

    assert!(knowledge.allows_guess(&word("stare")));
    assert!(!knowledge.allows_guess(&word("crane")));
    assert!(!knowledge.admits(&word("stare")));
    assert!(knowledge.admits(&word("trace")));

    knowledge.clear();
    assert!(knowledge.is_empty());
}
