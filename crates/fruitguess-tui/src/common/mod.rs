//! Shared helpers used across feature slices.

pub mod text;

pub use text::{truncate_with_ellipsis, wrap_words};
