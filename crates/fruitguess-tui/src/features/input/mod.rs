//! Input feature slice: the question and answer entry fields.

mod render;
mod state;

pub use render::{INPUT_HEIGHT, render_input};
pub use state::{InputKind, InputState};
