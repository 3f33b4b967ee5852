//! Countdown Timer - a countdown controller served over a small HTTP shell
//!
//! This library provides a one-second countdown with a completion counter,
//! a randomly drawn congratulation and background theme on every completion,
//! and a username persisted through an injected key-value store.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, CountdownController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
