//! Core library for fruitguess: game session state machine, game server
//! client, configuration and logging setup.

pub mod api;
pub mod config;
pub mod game;
pub mod logging;
