//! State management module
//!
//! This module contains the countdown controller, its value types and the
//! shared application state that schedules its ticks.

pub mod app_state;
pub mod controller;
pub mod timer_config;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use controller::{CountdownController, TickOutcome};
pub use timer_config::{TimerConfig, DEFAULT_DURATION_SECONDS, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS};
pub use timer_state::{Phase, TimerSnapshot, TimerState};
