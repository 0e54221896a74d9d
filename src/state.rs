// src/state.rs

use std::sync::Arc;

use crate::config::CardtrackConfig;
use crate::error::Result;
use crate::registry::{CardRegistry, InMemoryCardRegistry};
use crate::schedule::{InMemoryUpdateScheduler, UpdateScheduler};
use crate::today::{InMemoryTodayService, TodayService};

/// Explicitly-owned application state: the registry is constructed once at
/// startup and threaded through every component, never a process-wide
/// singleton.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn CardRegistry>,
    pub scheduler: Arc<dyn UpdateScheduler>,
    pub today: Arc<dyn TodayService>,
}

impl AppState {
    pub fn new(config: &CardtrackConfig) -> Self {
        let registry: Arc<dyn CardRegistry> = Arc::new(InMemoryCardRegistry::new());
        let scheduler =
            InMemoryUpdateScheduler::new(registry.clone(), config.default_update_schedule());
        let today: Arc<dyn TodayService> = Arc::new(InMemoryTodayService::new(
            registry.clone(),
            config.max_cards_for_today,
        ));
        Self { registry, scheduler, today }
    }

    /// The composed "new card" flow the adapter layer performs: register the
    /// card and put it on the default escalation cadence.
    pub fn create_tracked_card(&self, title: &str) -> Result<()> {
        self.registry.create(title)?;
        self.scheduler.schedule_default(title)?;
        Ok(())
    }
}
