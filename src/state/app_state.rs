//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::tasks::{spawn_ticker, TickerHandle, TICK_PERIOD};
use super::{CountdownController, TickOutcome, TimerConfig, TimerSnapshot};

/// Controller plus the single ticker allowed to drive it
#[derive(Debug)]
struct TimerSlot {
    controller: CountdownController,
    ticker: Option<TickerHandle>,
    /// Bumped whenever a ticker is replaced or cancelled
    generation: u64,
}

impl TimerSlot {
    fn cancel_ticker(&mut self) {
        self.generation += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

/// Shared state behind the presentation shell
#[derive(Debug)]
pub struct AppState {
    timer: Mutex<TimerSlot>,
    tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Snapshot published after every change
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl AppState {
    /// Create the state around an idle controller
    pub fn new(controller: CountdownController, port: u16, host: String) -> Self {
        Self::with_tick_period(controller, port, host, TICK_PERIOD)
    }

    pub fn with_tick_period(
        controller: CountdownController,
        port: u16,
        host: String,
        tick_period: Duration,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(controller.snapshot());

        Self {
            timer: Mutex::new(TimerSlot {
                controller,
                ticker: None,
                generation: 0,
            }),
            tick_period,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            snapshot_tx,
        }
    }

    /// Start the countdown and its ticker, replacing any previous ticker
    pub fn start(self: &Arc<Self>) -> Result<TimerSnapshot, String> {
        let snapshot = {
            let mut slot = self.timer.lock()
                .map_err(|e| format!("Failed to lock timer: {}", e))?;

            if !slot.controller.start() {
                return Ok(slot.controller.snapshot());
            }

            slot.cancel_ticker();
            let generation = slot.generation;
            slot.ticker = Some(spawn_ticker(self, generation, self.tick_period));
            debug!("Ticker generation {} scheduled", generation);
            slot.controller.snapshot()
        };

        self.record_action("start");
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Stop the countdown and cancel its ticker
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.update("reset", |slot| {
            slot.controller.reset();
            slot.cancel_ticker();
        })
    }

    /// Set the duration from an integer, ignored while running
    pub fn configure(&self, seconds: i64) -> Result<TimerSnapshot, String> {
        self.update("configure", |slot| {
            slot.controller.configure(seconds);
        })
    }

    /// Apply an already validated config, ignored while running
    pub fn configure_with(&self, config: TimerConfig) -> Result<TimerSnapshot, String> {
        self.update("configure", |slot| {
            slot.controller.apply_config(config);
        })
    }

    /// Set the duration from raw text, ignored while running
    pub fn configure_text(&self, input: &str) -> Result<TimerSnapshot, String> {
        self.update("configure", |slot| {
            slot.controller.configure_text(input);
        })
    }

    /// Update the username, persisting it through the controller's store
    pub fn set_username(&self, username: &str) -> Result<TimerSnapshot, String> {
        self.update("username", |slot| {
            slot.controller.set_username(username);
        })
    }

    /// Apply one tick if `generation` still owns the countdown
    pub fn apply_tick(&self, generation: u64) -> Result<TickOutcome, String> {
        let (outcome, snapshot) = {
            let mut slot = self.timer.lock()
                .map_err(|e| format!("Failed to lock timer: {}", e))?;

            if slot.generation != generation {
                debug!("Discarding tick from stale generation {}", generation);
                return Ok(TickOutcome::Ignored);
            }

            let outcome = slot.controller.tick();
            if outcome == TickOutcome::Completed {
                // The ticker task exits right after this returns
                slot.ticker = None;
            }
            (outcome, slot.controller.snapshot())
        };

        if outcome != TickOutcome::Ignored {
            self.publish(snapshot);
        }
        Ok(outcome)
    }

    /// Cancel any live ticker, used on shutdown
    pub fn shutdown(&self) {
        match self.timer.lock() {
            Ok(mut slot) => {
                slot.cancel_ticker();
                info!("Countdown ticker stopped for shutdown");
            }
            Err(e) => warn!("Failed to lock timer during shutdown: {}", e),
        }
    }

    /// Get the current snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|slot| slot.controller.snapshot())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    /// Subscribe to snapshots published after every change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Whether a ticker task is currently scheduled
    pub fn is_ticking(&self) -> bool {
        self.timer.lock()
            .map(|slot| slot.ticker.as_ref().is_some_and(|ticker| !ticker.is_finished()))
            .unwrap_or(false)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn update<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut TimerSlot),
    {
        let mut slot = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        updater(&mut *slot);
        let snapshot = slot.controller.snapshot();
        drop(slot); // Release the lock early

        self.record_action(action);
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        // send_replace never fails, even with no subscribers
        self.snapshot_tx.send_replace(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{ColorToken, FixedPicker, MemoryStore},
        state::Phase,
    };

    fn app_state(seconds: i64) -> Arc<AppState> {
        let controller = CountdownController::new(
            TimerConfig::from_seconds(seconds),
            Arc::new(MemoryStore::new()),
            Box::new(FixedPicker::new("URAHHHH", ColorToken::Mint)),
        );
        Arc::new(AppState::new(controller, 0, "127.0.0.1".to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_runs_countdown_to_completion() {
        let state = app_state(3);
        state.start().unwrap();
        assert!(state.is_ticking());

        tokio::time::sleep(Duration::from_millis(3500)).await;

        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.phase, Phase::Completed);
        assert_eq!(snapshot.remaining_seconds, 0);
        assert_eq!(snapshot.completion_count, 1);
        assert_eq!(snapshot.theme, "#e8f5e9");
        assert!(!state.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn one_decrement_per_second() {
        let state = app_state(10);
        state.start().unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(state.snapshot().unwrap().remaining_seconds, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_keeps_a_single_ticker() {
        let state = app_state(10);
        state.start().unwrap();
        state.start().unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(state.snapshot().unwrap().remaining_seconds, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_ticker() {
        let state = app_state(5);
        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let snapshot = state.reset().unwrap();
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.remaining_seconds, 5);
        assert!(!state.is_ticking());

        tokio::time::sleep(Duration::from_secs(10)).await;
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.remaining_seconds, 5);
        assert_eq!(snapshot.completion_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_after_reset_ignores_old_generation() {
        let state = app_state(5);
        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        state.reset().unwrap();
        state.start().unwrap();

        // A tick tagged with the cancelled generation changes nothing
        assert_eq!(state.apply_tick(1).unwrap(), TickOutcome::Ignored);
        assert_eq!(state.snapshot().unwrap().remaining_seconds, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_every_change() {
        let state = app_state(2);
        let mut rx = state.subscribe();

        state.configure_text("4").unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().duration_seconds, 4);

        state.start().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_running);

        tokio::time::sleep(Duration::from_millis(4500)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().phase, Phase::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_ticking() {
        let state = app_state(5);
        state.start().unwrap();
        state.shutdown();
        assert!(!state.is_ticking());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(state.snapshot().unwrap().remaining_seconds, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_state_ends_ticker() {
        let state = app_state(5);
        state.start().unwrap();
        let weak = Arc::downgrade(&state);
        drop(state);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn last_action_is_recorded() {
        let state = app_state(5);
        state.set_username("dan").unwrap();

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("username"));
        assert!(time.is_some());
        assert_eq!(state.snapshot().unwrap().display_name, "dan");
    }
}
