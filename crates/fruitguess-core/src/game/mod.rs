//! Client-side game model: session, stage, transcript and the controller
//! that moves between them.

mod controller;
mod request;
mod session;
mod transcript;

pub use controller::{GameController, GameNotice, NO_ANSWER_PLACEHOLDER};
pub use request::{GameRequest, GameResponse, RequestId, RequestKind, RequestSeq, RequestSlot};
pub use session::{SessionId, Stage};
pub use transcript::{Role, Transcript, TranscriptEntry};
