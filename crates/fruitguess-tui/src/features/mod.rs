//! Feature slices for the TUI (state/render per slice).

pub mod input;
pub mod statusline;
pub mod title;
pub mod transcript;
