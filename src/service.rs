//! Request/response access to a shared solver.
//!
//! A [`Session`] can be cloned and handed to several callers. Submitting
//! feedback or resetting takes the write lock; suggestions and status take
//! the read lock, so a ranking never observes a half-applied round.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::feedback::FeedbackPattern;
use crate::ranker::RankedGuess;
use crate::solver::Solver;
use crate::word::Word;

/// Words listed in a status response
const STATUS_SAMPLE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Report the feedback observed for a guess
    Submit {
        guess: String,
        feedback: FeedbackPattern,
    },
    /// Fetch ranked suggestions for the next guess
    Suggest {
        #[serde(default)]
        top_n: Option<usize>,
    },
    Status,
    Reset,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Submitted {
        eliminated: usize,
        remaining: usize,
        solved: bool,
    },
    Suggestions {
        remaining: usize,
        suggestions: Vec<RankedGuess>,
    },
    Status {
        remaining: usize,
        rounds: usize,
        hard_mode: bool,
        sample: Vec<Word>,
    },
    Reset {
        remaining: usize,
    },
    Error {
        message: String,
    },
}

/// A solver shared behind a reader/writer lock.
#[derive(Debug, Clone)]
pub struct Session {
    solver: Arc<RwLock<Solver>>,
    default_top_n: usize,
}

impl Session {
    pub fn new(solver: Solver, default_top_n: usize) -> Self {
        Self {
            solver: Arc::new(RwLock::new(solver)),
            default_top_n: default_top_n.max(1),
        }
    }

    /// Handle one request. Engine errors become [`Response::Error`].
    pub fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::Submit { guess, feedback } => self.submit(&guess, feedback),
            Request::Suggest { top_n } => self.suggest(top_n.unwrap_or(self.default_top_n)),
            Request::Status => Ok(self.status()),
            Request::Reset => Ok(self.reset()),
        };
        result.unwrap_or_else(|e| {
            warn!(error = %e, "Request failed");
            Response::Error {
                message: e.to_string(),
            }
        })
    }

    /// Handle one JSON-encoded request and encode the response.
    pub fn handle_json(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => {
                debug!(?request, "Handling request");
                self.handle(request)
            }
            Err(e) => Response::Error {
                message: format!("Invalid request: {}", e),
            },
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(r#"{{"type":"error","message":"failed to encode response: {}"}}"#, e)
        })
    }

    pub fn submit(&self, guess: &str, feedback: FeedbackPattern) -> Result<Response> {
        let guess = Word::new(guess)?;
        let mut solver = self.write();
        let eliminated = solver.apply_feedback(&guess, feedback)?;
        Ok(Response::Submitted {
            eliminated,
            remaining: solver.remaining_count(),
            solved: feedback.is_win(),
        })
    }

    pub fn suggest(&self, top_n: usize) -> Result<Response> {
        let solver = self.read();
        let suggestions = solver.suggest(top_n)?;
        Ok(Response::Suggestions {
            remaining: solver.remaining_count(),
            suggestions,
        })
    }

    pub fn status(&self) -> Response {
        let solver = self.read();
        let dictionary = solver.dictionary();
        Response::Status {
            remaining: dictionary.remaining_count(),
            rounds: dictionary.history().len(),
            hard_mode: solver.is_hard_mode(),
            sample: dictionary
                .remaining_words()
                .take(STATUS_SAMPLE_SIZE)
                .cloned()
                .collect(),
        }
    }

    pub fn reset(&self) -> Response {
        let mut solver = self.write();
        solver.reset();
        Response::Reset {
            remaining: solver.remaining_count(),
        }
    }

    // A panic while holding the lock cannot leave the solver half-updated:
    // every mutation either completes or returns an error first.
    fn read(&self) -> RwLockReadGuard<'_, Solver> {
        self.solver.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Solver> {
        self.solver.write().unwrap_or_else(PoisonError::into_inner)
    }
}
