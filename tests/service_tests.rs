use std::sync::Arc;
use std::thread;

use serde_json::Value;
use wordle_engine::{Corpus, FeedbackPattern, Request, Response, Session, Solver};

fn test_session() -> Session {
    let corpus = Corpus::load([
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ])
    .unwrap();
    Session::new(Solver::new(Arc::new(corpus)), 5)
}

fn call(session: &Session, line: &str) -> Value {
    serde_json::from_str(&session.handle_json(line)).unwrap()
}

#[test]
fn test_submit_narrows_candidates() {
    let session = test_session();

    let response = call(&session, r#"{"type":"submit","guess":"roast","feedback":"ybgby"}"#);
    assert_eq!(response["type"], "submitted");
    assert_eq!(response["eliminated"], 8);
    assert_eq!(response["remaining"], 2);
    assert_eq!(response["solved"], false);
}

#[test]
fn test_submit_win() {
    let session = test_session();
    let response = session.handle(Request::Submit {
        guess: "CRANE".to_string(),
        feedback: FeedbackPattern::all_exact(5).unwrap(),
    });
    match response {
        Response::Submitted {
            remaining, solved, ..
        } => {
            assert_eq!(remaining, 1);
            assert!(solved);
        }
        other => panic!("expected Submitted, got {:?}", other),
    }
}

#[test]
fn test_suggest_uses_default_count() {
    let session = test_session();

    let response = call(&session, r#"{"type":"suggest"}"#);
    assert_eq!(response["type"], "suggestions");
    assert_eq!(response["remaining"], 10);
    let suggestions = response["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 5);
    assert_eq!(suggestions[0]["word"], "crane");
    assert_eq!(suggestions[0]["is_candidate"], true);

    let response = call(&session, r#"{"type":"suggest","top_n":2}"#);
    assert_eq!(response["suggestions"].as_array().unwrap().len(), 2);
}

#[test]
fn test_status_and_reset() {
    let session = test_session();
    call(&session, r#"{"type":"submit","guess":"roast","feedback":"ybgby"}"#);

    let status = call(&session, r#"{"type":"status"}"#);
    assert_eq!(status["type"], "status");
    assert_eq!(status["remaining"], 2);
    assert_eq!(status["rounds"], 1);
    assert_eq!(status["hard_mode"], false);
    assert_eq!(status["sample"], serde_json::json!(["trace", "crate"]));

    let reset = call(&session, r#"{"type":"reset"}"#);
    assert_eq!(reset["type"], "reset");
    assert_eq!(reset["remaining"], 10);
}

#[test]
fn test_invalid_requests_become_errors() {
    let session = test_session();

    let response = call(&session, "not json");
    assert_eq!(response["type"], "error");
    assert!(response["message"].as_str().unwrap().starts_with("Invalid request"));

    let response = call(&session, r#"{"type":"submit","guess":"roast","feedback":"xyz!"}"#);
    assert_eq!(response["type"], "error");

    let response = call(&session, r#"{"type":"submit","guess":"cranes","feedback":"gggggg"}"#);
    assert_eq!(response["type"], "error");

    let response = call(&session, r#"{"type":"submit","guess":"cr4ne","feedback":"ggggg"}"#);
    assert_eq!(response["type"], "error");

    let status = call(&session, r#"{"type":"status"}"#);
    assert_eq!(status["remaining"], 10);
    assert_eq!(status["rounds"], 0);
}

#[test]
fn test_suggest_with_no_candidates() {
    let session = test_session();
    call(&session, r#"{"type":"submit","guess":"zzzzz","feedback":"ggggg"}"#);

    let response = call(&session, r#"{"type":"suggest"}"#);
    assert_eq!(response["type"], "error");
}

#[test]
fn test_clones_share_state() {
    let session = test_session();
    let other = session.clone();

    let handle = thread::spawn(move || {
        other.handle_json(r#"{"type":"submit","guess":"crane","feedback":"gggbg"}"#)
    });
    handle.join().unwrap();

    match session.status() {
        Response::Status {
            remaining, sample, ..
        } => {
            assert_eq!(remaining, 1);
            assert_eq!(sample[0].as_str(), "crate");
        }
        other => panic!("expected Status, got {:?}", other),
    }
}
