//! Game server API: client, wire types and error taxonomy.

mod client;
mod errors;
mod types;

pub use client::{GameClient, USER_AGENT};
pub use errors::{ApiError, ApiErrorKind};
pub use types::GuessOutcome;
