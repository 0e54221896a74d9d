// src/tasks/mod.rs

//! Background task management: the periodic today-list refill and an hourly
//! heartbeat.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use crate::config::CardtrackConfig;
use crate::state::AppState;

/// Manages all background tasks for the tracker.
pub struct TaskManager {
    state: AppState,
    refill_interval: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl TaskManager {
    pub fn new(state: AppState, config: &CardtrackConfig) -> Self {
        Self {
            state,
            refill_interval: Duration::from_secs(config.refill_interval_secs),
            handles: Vec::new(),
        }
    }

    /// Starts all background tasks.
    pub fn start(&mut self) {
        info!("Starting background task manager");

        let handle = self.spawn_refill_loop();
        self.handles.push(handle);

        let handle = self.spawn_heartbeat();
        self.handles.push(handle);

        info!("Started {} background tasks", self.handles.len());
    }

    /// Spawns the periodic today-list refill. The first tick fires
    /// immediately, so the list is seeded at startup.
    fn spawn_refill_loop(&self) -> JoinHandle<()> {
        let today = self.state.today.clone();
        let interval = self.refill_interval;

        tokio::spawn(async move {
            info!("Today-list refill started (interval: {:?})", interval);

            let mut interval_timer = time::interval(interval);
            interval_timer.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

            loop {
                interval_timer.tick().await;
                today.refill();
                debug!("Today list refilled with {} cards", today.list().len());
            }
        })
    }

    fn spawn_heartbeat(&self) -> JoinHandle<()> {
        let registry = self.state.registry.clone();
        let today = self.state.today.clone();
        let interval = Duration::from_secs(3600); // 1 hour

        tokio::spawn(async move {
            let mut interval_timer = time::interval(interval);
            interval_timer.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

            loop {
                interval_timer.tick().await;
                info!(
                    "Tracker heartbeat: {} cards registered, {} on the today list",
                    registry.count(),
                    today.list().len()
                );
            }
        })
    }

    /// Gracefully shuts down all tasks.
    pub fn shutdown(self) {
        info!("Shutting down {} background tasks", self.handles.len());

        for handle in self.handles {
            handle.abort();
        }

        info!("All background tasks terminated");
    }
}
