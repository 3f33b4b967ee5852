//! Background tasks module
//!
//! This module contains the ticker that drives the countdown once per second.

pub mod ticker;

// Re-export main items
pub use ticker::{spawn_ticker, TickerHandle, TICK_PERIOD};
