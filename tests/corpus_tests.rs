use std::io::Write;

use tempfile::Builder;
use wordle_engine::{default_corpus, Corpus, CorpusBuilder, EngineError, Word};

#[test]
fn test_load_normalizes_and_deduplicates() {
    let corpus = Corpus::load(["Crane", "SLATE", "crane", "trace"]).unwrap();

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.word_length(), 5);
    assert!(corpus.contains(&Word::new("crane").unwrap()));
    assert!(corpus.contains_str("SLATE"));
    assert!(!corpus.contains_str("crate"));
    assert!(!corpus.contains_str("cr4ne"));

    let words: Vec<&str> = corpus.iter().map(Word::as_str).collect();
    assert_eq!(words, vec!["crane", "slate", "trace"]);
}

#[test]
fn test_load_empty_input() {
    let result = Corpus::load(Vec::<String>::new());
    assert!(matches!(result, Err(EngineError::MalformedInput { .. })));
}

#[test]
fn test_load_inconsistent_lengths() {
    let result = Corpus::load(["crane", "slates"]);
    assert!(matches!(result, Err(EngineError::MalformedInput { .. })));
}

#[test]
fn test_load_empty_word() {
    let result = Corpus::load(["crane", ""]);
    assert!(matches!(result, Err(EngineError::MalformedInput { .. })));
}

#[test]
fn test_load_invalid_character() {
    let result = Corpus::load(["crane", "cr-te"]);
    match result {
        Err(EngineError::InvalidCharacter { word, character }) => {
            assert_eq!(word, "cr-te");
            assert_eq!(character, '-');
        }
        other => panic!("expected InvalidCharacter, got {:?}", other),
    }

    assert!(matches!(
        Corpus::load(["crâne"]),
        Err(EngineError::InvalidCharacter { character: 'â', .. })
    ));
}

#[test]
fn test_iter_is_restartable() {
    let corpus = Corpus::load(["crane", "slate", "trace"]).unwrap();
    let iter = corpus.iter();
    let first: Vec<_> = iter.clone().collect();
    let second: Vec<_> = iter.collect();
    assert_eq!(first, second);
    assert_eq!((&corpus).into_iter().count(), 3);
}

#[test]
fn test_index_lookup() {
    let corpus = Corpus::load(["crane", "slate", "trace"]).unwrap();
    let slate = Word::new("slate").unwrap();
    assert_eq!(corpus.index_of(&slate), Some(1));
    assert_eq!(corpus.get(1), Some(&slate));
    assert_eq!(corpus.get(3), None);
}

#[test]
fn test_builder() {
    let mut builder = CorpusBuilder::new();
    assert!(builder.is_empty());
    assert!(builder.add("crane").unwrap());
    assert!(!builder.add("CRANE").unwrap());
    assert!(builder.add_solution("slate").unwrap());
    assert!(!builder.add_solution("crane").unwrap());
    assert_eq!(builder.len(), 2);

    let corpus = builder.build().unwrap();
    assert!(corpus.has_solutions());
    assert_eq!(corpus.solution_count(), 2);
    assert!(corpus.is_solution(0));
    assert!(corpus.is_solution(1));
    assert!(!corpus.is_solution(2));
}

#[test]
fn test_builder_empty() {
    let result = CorpusBuilder::new().build();
    assert!(matches!(result, Err(EngineError::MalformedInput { .. })));
}

#[test]
fn test_from_json_array() {
    let corpus = Corpus::from_json_str(r#"["crane", "slate", "trace"]"#).unwrap();
    assert_eq!(corpus.len(), 3);
    assert!(!corpus.has_solutions());
    assert_eq!(corpus.solutions().count(), 0);
}

#[test]
fn test_from_json_with_solutions() {
    let json = r#"{
        "words": ["crane", "slate", "trace", "roast"],
        "solutions": ["trace", "crate"]
    }"#;
    let corpus = Corpus::from_json_str(json).unwrap();

    // Answers missing from the guess list join the corpus.
    assert_eq!(corpus.len(), 5);
    assert!(corpus.contains_str("crate"));

    let solutions: Vec<&str> = corpus.solutions().map(Word::as_str).collect();
    assert_eq!(solutions, vec!["trace", "crate"]);
}

#[test]
fn test_from_json_without_solutions_key() {
    let corpus = Corpus::from_json_str(r#"{"words": ["crane", "slate"]}"#).unwrap();
    assert_eq!(corpus.len(), 2);
    assert!(!corpus.has_solutions());
}

#[test]
fn test_from_json_invalid() {
    assert!(matches!(
        Corpus::from_json_str("{\"guesses\": 3}"),
        Err(EngineError::Json(_))
    ));
    assert!(matches!(
        Corpus::from_json_str("[]"),
        Err(EngineError::MalformedInput { .. })
    ));
    assert!(matches!(
        Corpus::from_json_str(r#"{"words": ["crane"], "solutions": ["cranes"]}"#),
        Err(EngineError::MalformedInput { .. })
    ));
}

#[test]
fn test_from_lines_ignores_frequency_column() {
    let corpus = Corpus::from_lines("crane 1200\nslate 800\n\ntrace 40\n").unwrap();
    assert_eq!(corpus.len(), 3);
    assert!(corpus.contains_str("trace"));
}

#[test]
fn test_from_path_json() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"words": ["crane", "slate"], "solutions": ["slate"]}}"#).unwrap();

    let corpus = Corpus::from_path(file.path()).unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.solution_count(), 1);
}

#[test]
fn test_from_path_lines() {
    let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "crane\nslate\ntrace").unwrap();

    let corpus = Corpus::from_path(file.path()).unwrap();
    assert_eq!(corpus.len(), 3);
}

#[test]
fn test_from_path_missing() {
    let result = Corpus::from_path(std::path::Path::new("/nonexistent/words.json"));
    assert!(matches!(result, Err(EngineError::Io(_))));
}

#[test]
fn test_default_corpus() {
    let corpus = default_corpus().unwrap();
    assert_eq!(corpus.word_length(), 5);
    assert!(corpus.len() > 500);
    assert!(corpus.has_solutions());
    assert!(corpus.solutions().all(|w| corpus.contains(w)));
    assert!(corpus.contains_str("crane"));
}
