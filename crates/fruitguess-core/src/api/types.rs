//! Wire types for the game server JSON API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskBody<'a> {
    pub session_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessBody<'a> {
    pub session_id: &'a str,
    pub guess: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReply {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskReply {
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GuessReply {
    #[serde(default)]
    pub correct: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HealthReply {
    #[serde(default)]
    pub ok: bool,
}

/// Error body shape shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct ErrorReply {
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of checking a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

impl From<bool> for GuessOutcome {
    fn from(correct: bool) -> Self {
        if correct {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Incorrect
        }
    }
}
