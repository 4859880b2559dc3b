//! Request descriptors and in-flight tracking.
//!
//! The controller never performs I/O. It hands out `GameRequest`s, the
//! caller executes them and feeds the matching `GameResponse` back. Each
//! request carries a `RequestId`; a response is applied only while its id
//! is still the active one in the slot that issued it.

use crate::api::{ApiError, GuessOutcome};
use crate::game::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Default)]
pub struct RequestSeq {
    next: u64,
}

impl RequestSeq {
    pub fn next_id(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Tracks the single in-flight request of one kind.
#[derive(Debug, Default, Clone)]
pub struct RequestSlot {
    active: Option<RequestId>,
}

impl RequestSlot {
    pub fn is_in_flight(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, id: RequestId) {
        self.active = Some(id);
    }

    /// Clears the slot if `id` is the active request. Returns false for stale ids.
    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Start,
    Ask,
    Guess,
}

/// A remote call the controller wants executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameRequest {
    Start {
        id: RequestId,
    },
    Ask {
        id: RequestId,
        session: SessionId,
        question: String,
    },
    Guess {
        id: RequestId,
        session: SessionId,
        guess: String,
    },
}

impl GameRequest {
    pub fn id(&self) -> RequestId {
        match self {
            GameRequest::Start { id }
            | GameRequest::Ask { id, .. }
            | GameRequest::Guess { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            GameRequest::Start { .. } => RequestKind::Start,
            GameRequest::Ask { .. } => RequestKind::Ask,
            GameRequest::Guess { .. } => RequestKind::Guess,
        }
    }
}

/// Result of an executed `GameRequest`, echoing what was sent.
#[derive(Debug)]
pub enum GameResponse {
    Started {
        id: RequestId,
        result: Result<SessionId, ApiError>,
    },
    Answered {
        id: RequestId,
        session: SessionId,
        question: String,
        /// `None` when the server replied without an answer.
        result: Result<Option<String>, ApiError>,
    },
    Guessed {
        id: RequestId,
        session: SessionId,
        guess: String,
        result: Result<GuessOutcome, ApiError>,
    },
}
