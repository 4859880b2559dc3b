use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-issued token identifying one in-progress game.
///
/// Never empty: construction trims and rejects blank identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phase of the client game flow.
///
/// `Playing` and `Finished` are only reachable while a session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Title screen, no active session.
    #[default]
    Start,
    /// Questions and guesses are accepted.
    Playing,
    /// The last guess was correct.
    Finished,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::Playing => "playing",
            Stage::Finished => "finished",
        }
    }
}
