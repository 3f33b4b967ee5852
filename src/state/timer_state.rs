//! Countdown state and the snapshot handed to observers

use serde::{Deserialize, Serialize};

/// Where the countdown is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    /// Stopped at zero after a natural finish
    Completed,
}

/// Mutable countdown progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub completion_count: u64,
    /// Set on reaching zero, cleared by the next start or reset
    pub just_completed: bool,
}

impl TimerState {
    /// Create an idle state holding a full countdown
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            remaining_seconds: duration_seconds,
            is_running: false,
            completion_count: 0,
            just_completed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_running {
            Phase::Running
        } else if self.just_completed && self.remaining_seconds == 0 {
            Phase::Completed
        } else {
            Phase::Idle
        }
    }
}

/// Everything a presentation shell needs to render the countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub duration_seconds: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
    pub just_completed: bool,
    pub completion_count: u64,
    pub username: String,
    pub display_name: String,
    pub show_message: bool,
    pub message: Option<String>,
    pub theme: String,
    pub greeting: String,
    pub countdown_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_flags() {
        let mut state = TimerState::new(10);
        assert_eq!(state.phase(), Phase::Idle);

        state.is_running = true;
        assert_eq!(state.phase(), Phase::Running);

        state.is_running = false;
        state.just_completed = true;
        assert_eq!(state.phase(), Phase::Idle);

        state.remaining_seconds = 0;
        assert_eq!(state.phase(), Phase::Completed);
    }

    #[test]
    fn phase_serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Phase::Completed).unwrap(), "\"completed\"");
    }
}
