//! Game session controller.
//!
//! Owns the session identity, the stage and the transcript, and is the only
//! place they change. Operations return the request to execute (or `None`
//! when the call is a no-op); results come back through `complete`.
//!
//! ```text
//! start ──start ok──▶ playing ──correct guess──▶ finished
//!   ▲                    │                          │
//!   └──invalid session───┘                          │
//!   └──────────────return_to_title──────────────────┘
//! ```

use tracing::{debug, info, warn};

use super::request::{GameRequest, GameResponse, RequestId, RequestSeq, RequestSlot};
use super::{SessionId, Stage, Transcript};
use crate::api::{ApiError, ApiErrorKind, GuessOutcome};

/// Shown in place of an answer the server did not provide.
pub const NO_ANSWER_PLACEHOLDER: &str = "(no answer)";

/// Outcome worth telling the user about, returned by `complete`.
///
/// Notices are not stored in the controller; the UI decides how to show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameNotice {
    /// A new session is active.
    GameStarted,
    /// The guess matched the server's answer.
    Correct { answer: String },
    /// The guess was wrong; the game goes on.
    IncorrectGuess { guess: String },
    /// The server rejected the session; the game went back to the title.
    SessionExpired { message: String },
    /// A request failed; `message` is also kept as the current error.
    Failed { message: String },
}

#[derive(Debug, Default)]
pub struct GameController {
    stage: Stage,
    session: Option<SessionId>,
    transcript: Transcript,
    chosen_answer: Option<String>,
    error: Option<String>,
    seq: RequestSeq,
    start: RequestSlot,
    ask: RequestSlot,
    guess: RequestSlot,
}

impl GameController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn chosen_answer(&self) -> Option<&str> {
        self.chosen_answer.as_deref()
    }

    /// Last user-visible error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A start request is in flight.
    pub fn is_loading(&self) -> bool {
        self.start.is_in_flight()
    }

    pub fn is_asking(&self) -> bool {
        self.ask.is_in_flight()
    }

    pub fn is_guessing(&self) -> bool {
        self.guess.is_in_flight()
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.is_asking() || self.is_guessing()
    }

    /// Whether `ask_question` would accept a non-blank question right now.
    pub fn can_ask(&self) -> bool {
        self.in_play() && !self.ask.is_in_flight()
    }

    /// Whether `submit_guess` would accept a non-blank guess right now.
    pub fn can_guess(&self) -> bool {
        self.in_play() && !self.guess.is_in_flight()
    }

    fn in_play(&self) -> bool {
        self.stage == Stage::Playing && self.session.is_some()
    }

    /// Requests a new session. No-op while a start is already in flight.
    pub fn start_game(&mut self) -> Option<GameRequest> {
        if self.start.is_in_flight() {
            return None;
        }
        let id = self.seq.next_id();
        self.start.begin(id);
        self.error = None;
        debug!(request = id.0, "requesting new game");
        Some(GameRequest::Start { id })
    }

    pub fn ask_question(&mut self, question: &str) -> Option<GameRequest> {
        let question = question.trim();
        if question.is_empty() || !self.can_ask() {
            return None;
        }
        let session = self.session.clone()?;
        let id = self.seq.next_id();
        self.ask.begin(id);
        self.error = None;
        debug!(request = id.0, "asking question");
        Some(GameRequest::Ask {
            id,
            session,
            question: question.to_string(),
        })
    }

    pub fn submit_guess(&mut self, guess: &str) -> Option<GameRequest> {
        let guess = guess.trim();
        if guess.is_empty() || !self.can_guess() {
            return None;
        }
        let session = self.session.clone()?;
        let id = self.seq.next_id();
        self.guess.begin(id);
        self.error = None;
        debug!(request = id.0, "submitting guess");
        Some(GameRequest::Guess {
            id,
            session,
            guess: guess.to_string(),
        })
    }

    /// Drops the session and everything tied to it. Late responses are ignored.
    pub fn return_to_title(&mut self) {
        if self.stage != Stage::Start {
            info!(from = self.stage.label(), "returning to title");
        }
        self.stage = Stage::Start;
        self.session = None;
        self.chosen_answer = None;
        self.transcript.clear();
        self.error = None;
        self.start.clear();
        self.ask.clear();
        self.guess.clear();
    }

    /// Applies the result of a request issued by this controller.
    pub fn complete(&mut self, response: GameResponse) -> Option<GameNotice> {
        match response {
            GameResponse::Started { id, result } => {
                if !self.start.finish_if_active(id) {
                    log_stale(id, "start");
                    return None;
                }
                match result {
                    Ok(session) => {
                        self.begin_session(session);
                        Some(GameNotice::GameStarted)
                    }
                    Err(err) => {
                        warn!(error = %err, "start failed");
                        let message = format!("Could not start a game: {err}");
                        self.error = Some(message.clone());
                        Some(GameNotice::Failed { message })
                    }
                }
            }
            GameResponse::Answered {
                id,
                session,
                question,
                result,
            } => {
                if !self.ask.finish_if_active(id) || !self.is_current(&session) {
                    log_stale(id, "ask");
                    return None;
                }
                match result {
                    Ok(answer) => {
                        let answer = answer
                            .as_deref()
                            .map(str::trim)
                            .filter(|a| !a.is_empty())
                            .unwrap_or(NO_ANSWER_PLACEHOLDER);
                        self.transcript.push_exchange(&question, answer);
                        None
                    }
                    Err(err) => Some(self.fail_in_play(err, "Could not send the question")),
                }
            }
            GameResponse::Guessed {
                id,
                session,
                guess,
                result,
            } => {
                if !self.guess.finish_if_active(id) || !self.is_current(&session) {
                    log_stale(id, "guess");
                    return None;
                }
                match result {
                    Ok(GuessOutcome::Correct) => {
                        info!("guess was correct");
                        self.stage = Stage::Finished;
                        self.chosen_answer = Some(guess.clone());
                        self.ask.clear();
                        Some(GameNotice::Correct { answer: guess })
                    }
                    Ok(GuessOutcome::Incorrect) => Some(GameNotice::IncorrectGuess { guess }),
                    Err(err) => Some(self.fail_in_play(err, "Could not submit the guess")),
                }
            }
        }
    }

    fn is_current(&self, session: &SessionId) -> bool {
        self.stage == Stage::Playing && self.session.as_ref() == Some(session)
    }

    fn begin_session(&mut self, session: SessionId) {
        info!(session = %session, "game started");
        self.session = Some(session);
        self.stage = Stage::Playing;
        self.transcript.clear();
        self.chosen_answer = None;
        self.error = None;
        self.ask.clear();
        self.guess.clear();
    }

    fn fail_in_play(&mut self, err: ApiError, context: &str) -> GameNotice {
        if err.is_invalid_session() {
            warn!(error = %err, "session rejected by server");
            self.return_to_title();
            self.error = Some(err.message.clone());
            return GameNotice::SessionExpired {
                message: err.message,
            };
        }

        warn!(error = %err, "{context}");
        let message = if err.kind == ApiErrorKind::Validation {
            err.message
        } else {
            format!("{context}: {err}")
        };
        self.error = Some(message.clone());
        GameNotice::Failed { message }
    }
}

fn log_stale(id: RequestId, kind: &str) {
    debug!(request = id.0, kind, "ignoring stale response");
}
