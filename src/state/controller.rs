//! Countdown controller: configuration, transitions and derived presentation

use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

use crate::services::{
    display_name, render_message, ColorToken, CompletionPicker, KeyValueStore, USERNAME_KEY,
};
use super::{Phase, TimerConfig, TimerSnapshot, TimerState};

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down
    Continue,
    /// Reached zero on this tick
    Completed,
    /// Not running, nothing changed
    Ignored,
}

/// Owns the countdown and everything derived from it.
///
/// The controller never schedules anything itself; whoever drives it calls
/// [`tick`](Self::tick) once per second while it is running.
pub struct CountdownController {
    config: TimerConfig,
    state: TimerState,
    username: String,
    theme: ColorToken,
    phrase: Option<&'static str>,
    store: Arc<dyn KeyValueStore>,
    picker: Box<dyn CompletionPicker>,
}

impl CountdownController {
    /// Create an idle controller, reading the username from `store`
    pub fn new(
        config: TimerConfig,
        store: Arc<dyn KeyValueStore>,
        picker: Box<dyn CompletionPicker>,
    ) -> Self {
        let username = store.get(USERNAME_KEY).unwrap_or_default();
        debug!("Controller created: duration={}s, username={:?}", config.duration_seconds(), username);

        Self {
            state: TimerState::new(config.duration_seconds()),
            config,
            username,
            theme: ColorToken::default(),
            phrase: None,
            store,
            picker,
        }
    }

    /// Set the duration from an integer; ignored while running
    pub fn configure(&mut self, seconds: i64) -> bool {
        self.apply_config(TimerConfig::from_seconds(seconds))
    }

    /// Set the duration from raw field text; ignored while running
    pub fn configure_text(&mut self, input: &str) -> bool {
        self.apply_config(TimerConfig::from_text(input))
    }

    /// Apply an already validated config; ignored while running
    pub fn apply_config(&mut self, config: TimerConfig) -> bool {
        if self.state.is_running {
            debug!("Ignoring configure while running");
            return false;
        }

        self.config = config;
        self.state.remaining_seconds = config.duration_seconds();
        info!("Countdown configured to {}s", config.duration_seconds());
        true
    }

    /// Begin a full countdown; ignored while already running
    pub fn start(&mut self) -> bool {
        if self.state.is_running {
            debug!("Ignoring start while already running");
            return false;
        }

        self.state.remaining_seconds = self.config.duration_seconds();
        self.state.is_running = true;
        self.state.just_completed = false;
        info!("Countdown started for {}s", self.config.duration_seconds());
        true
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome::Ignored;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        if self.state.remaining_seconds > 0 {
            debug!("Tick: {}s remaining", self.state.remaining_seconds);
            return TickOutcome::Continue;
        }

        self.state.is_running = false;
        self.state.just_completed = true;
        self.state.completion_count += 1;
        self.theme = self.picker.pick_theme();
        self.phrase = Some(self.picker.pick_phrase());
        info!(
            "Countdown completed (#{}), theme {}",
            self.state.completion_count,
            self.theme.hex()
        );
        TickOutcome::Completed
    }

    /// Stop and refill the countdown; the completion count is kept
    pub fn reset(&mut self) {
        self.state.remaining_seconds = self.config.duration_seconds();
        self.state.is_running = false;
        self.state.just_completed = false;
        info!("Countdown reset to {}s", self.config.duration_seconds());
    }

    /// Update the username and mirror it into the store
    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
        if let Err(e) = self.store.set(USERNAME_KEY, username) {
            warn!("Failed to persist username: {}", e);
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn theme(&self) -> ColorToken {
        self.theme
    }

    /// Completion message, only while the last completion is still showing
    pub fn message(&self) -> Option<String> {
        if !self.state.just_completed {
            return None;
        }
        self.phrase.map(|phrase| render_message(phrase, &self.username))
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let name = display_name(&self.username).to_string();

        TimerSnapshot {
            phase: self.phase(),
            duration_seconds: self.config.duration_seconds(),
            remaining_seconds: self.state.remaining_seconds,
            is_running: self.state.is_running,
            just_completed: self.state.just_completed,
            completion_count: self.state.completion_count,
            username: self.username.clone(),
            greeting: format!("{}, you have:", name),
            display_name: name,
            show_message: self.state.just_completed,
            message: self.message(),
            theme: self.theme.hex().to_string(),
            countdown_label: format!("{} sec", self.state.remaining_seconds),
        }
    }
}

impl fmt::Debug for CountdownController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("username", &self.username)
            .field("theme", &self.theme)
            .field("phrase", &self.phrase)
            .finish_non_exhaustive()
    }
}
