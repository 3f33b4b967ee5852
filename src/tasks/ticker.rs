//! Periodic tick driver for the countdown

use std::{
    sync::{Arc, Weak},
    time::Duration,
};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome};

/// Period between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owning handle of a running ticker task; dropping it cancels the task
#[derive(Debug)]
pub struct TickerHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Whether the task has stopped on its own or been cancelled
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the task now
    pub fn cancel(self) {
        debug!("Cancelling ticker generation {}", self.generation);
        // Drop aborts
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a ticker that drives `state` once per `period` until the countdown stops.
///
/// The task only holds a weak reference, so it ends once the state is gone.
pub fn spawn_ticker(state: &Arc<AppState>, generation: u64, period: Duration) -> TickerHandle {
    let state = Arc::downgrade(state);
    let task = tokio::spawn(async move {
        ticker_task(state, generation, period).await;
    });

    TickerHandle { generation, task }
}

async fn ticker_task(state: Weak<AppState>, generation: u64, period: Duration) {
    info!("Starting ticker generation {}", generation);

    // First tick lands one full period after start
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(strong) = state.upgrade() else {
            debug!("Countdown state dropped, stopping ticker generation {}", generation);
            break;
        };

        match strong.apply_tick(generation) {
            Ok(TickOutcome::Continue) => {}
            Ok(TickOutcome::Completed) => {
                info!("Ticker generation {} finished with completion", generation);
                break;
            }
            Ok(TickOutcome::Ignored) => {
                debug!("Ticker generation {} is stale, stopping", generation);
                break;
            }
            Err(e) => {
                error!("Failed to apply tick: {}", e);
                break;
            }
        }
    }
}
