//! Transcript feature slice: Q/A log layout and its scroll position.

mod render;
mod scroll;

pub use render::{EMPTY_HINT, render_transcript, render_transcript_pane, transcript_viewport};
pub use scroll::{ScrollMode, ScrollState};
