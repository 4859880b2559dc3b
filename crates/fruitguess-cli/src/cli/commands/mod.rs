//! CLI command handlers.

pub mod config;
pub mod health;
pub mod plain;
pub mod play;
