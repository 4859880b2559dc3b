//! HTTP client for the game server.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::errors::ApiError;
use super::types::{AskBody, AskReply, GuessBody, GuessOutcome, GuessReply, HealthReply, StartReply};
use crate::game::{GameRequest, GameResponse, SessionId};

/// Standard User-Agent header for game server requests.
pub const USER_AGENT: &str = concat!("fruitguess/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
struct Endpoints {
    start: Url,
    ask: Url,
    guess: Url,
    health: Url,
}

impl Endpoints {
    fn new(base: &Url) -> Result<Self> {
        // Join relative to the base path, so `http://host/api` keeps `/api`.
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let join = |name: &str| {
            base.join(name)
                .with_context(|| format!("Failed to build /{name} URL from {base}"))
        };
        Ok(Self {
            start: join("start")?,
            ask: join("ask")?,
            guess: join("guess")?,
            health: join("health")?,
        })
    }
}

/// Client for the `/start`, `/ask`, `/guess` and `/health` endpoints.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GameClient {
    http: reqwest::Client,
    base_url: Url,
    endpoints: Endpoints,
}

impl GameClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        let endpoints = Endpoints::new(&base_url)?;
        Ok(Self {
            http,
            base_url,
            endpoints,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Creates a session. Fails with a `Parse` error if no id comes back.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport, status and body failures.
    pub async fn start(&self) -> Result<SessionId, ApiError> {
        let response = self
            .http
            .post(self.endpoints.start.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let reply: StartReply = read_json(response).await?;
        reply
            .session_id
            .as_deref()
            .and_then(SessionId::new)
            .ok_or_else(|| ApiError::parse("Response did not include a session id"))
    }

    /// Asks a yes/no question. `Ok(None)` means the server sent no answer.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport, status and body failures.
    pub async fn ask(&self, session: &SessionId, question: &str) -> Result<Option<String>, ApiError> {
        let body = AskBody {
            session_id: session.as_str(),
            question,
        };
        let response = self
            .http
            .post(self.endpoints.ask.clone())
            .json(&body)
            .send()
            .await?;
        let reply: AskReply = read_json(response).await?;
        Ok(reply.answer)
    }

    /// # Errors
    /// Returns an `ApiError` for transport, status and body failures.
    pub async fn guess(&self, session: &SessionId, guess: &str) -> Result<GuessOutcome, ApiError> {
        let body = GuessBody {
            session_id: session.as_str(),
            guess,
        };
        let response = self
            .http
            .post(self.endpoints.guess.clone())
            .json(&body)
            .send()
            .await?;
        let reply: GuessReply = read_json(response).await?;
        reply
            .correct
            .map(GuessOutcome::from)
            .ok_or_else(|| ApiError::parse("Response did not include a verdict"))
    }

    /// Returns whether the server reports itself healthy.
    ///
    /// # Errors
    /// Returns an `ApiError` for transport, status and body failures.
    pub async fn health(&self) -> Result<bool, ApiError> {
        let response = self.http.get(self.endpoints.health.clone()).send().await?;
        let reply: HealthReply = read_json(response).await?;
        Ok(reply.ok)
    }

    /// Executes a controller request and packages the result for `complete`.
    pub async fn execute(&self, request: GameRequest) -> GameResponse {
        debug!(request = request.id().0, kind = ?request.kind(), "sending request");
        match request {
            GameRequest::Start { id } => GameResponse::Started {
                id,
                result: self.start().await,
            },
            GameRequest::Ask {
                id,
                session,
                question,
            } => {
                let result = self.ask(&session, &question).await;
                GameResponse::Answered {
                    id,
                    session,
                    question,
                    result,
                }
            }
            GameRequest::Guess { id, session, guess } => {
                let result = self.guess(&session, &guess).await;
                GameResponse::Guessed {
                    id,
                    session,
                    guess,
                    result,
                }
            }
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::http_status(status.as_u16(), &body));
    }
    serde_json::from_str(&body).map_err(|e| ApiError::parse(format!("Invalid response body: {e}")))
}
