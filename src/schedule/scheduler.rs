// src/schedule/scheduler.rs

//! Time-bucketed priority-update scheduler.
//!
//! Cards whose computed next-update timestamps coincide after truncation are
//! grouped into one bucket serviced by a single deferred timer, so the number
//! of outstanding timers is bounded by the number of distinct bucket
//! timestamps rather than the number of cards.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Weak};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::domain::UpdateSchedule;
use crate::error::{CardError, Result};
use crate::registry::CardRegistry;
use crate::schedule::calendar::next_update_from;

/// Capability interface over the perpetual priority-update scheduling.
pub trait UpdateScheduler: Send + Sync {
    /// Schedules the card on the default update cadence.
    fn schedule_default(&self, title: &str) -> Result<()>;

    /// Schedules the card on a custom cadence.
    fn schedule_with(&self, title: &str, schedule: UpdateSchedule) -> Result<()>;

    /// Titles of the pending bucket at `at`, empty when none is armed there.
    fn active_schedule_for(&self, at: NaiveDateTime) -> HashSet<String>;
}

/// A pending bucket: every member fires at the bucket's timestamp, but each
/// keeps the schedule it was armed with for its own next cycle.
#[derive(Default)]
struct Bucket {
    members: HashMap<String, UpdateSchedule>,
}

/// Production scheduler backed by a tokio timer per pending bucket.
///
/// Removing a card does not cancel its timer; the fire handler discovers the
/// absence, drops the title and never re-arms it, so an orphaned title costs
/// at most one extra no-op firing.
pub struct InMemoryUpdateScheduler {
    registry: Arc<dyn CardRegistry>,
    default_schedule: UpdateSchedule,
    buckets: Mutex<HashMap<NaiveDateTime, Bucket>>,
    // Handle to ourselves for the spawned timer callbacks.
    me: Weak<InMemoryUpdateScheduler>,
}

impl InMemoryUpdateScheduler {
    pub fn new(
        registry: Arc<dyn CardRegistry>,
        default_schedule: UpdateSchedule,
    ) -> Arc<Self> {
        debug!("Default card priority update schedule: {default_schedule} was configured");
        Arc::new_cyclic(|me| Self {
            registry,
            default_schedule,
            buckets: Mutex::new(HashMap::new()),
            me: me.clone(),
        })
    }

    /// Schedules `title` for its next update computed from an explicit
    /// starting point. The public entry points pass "now"; tests pass fixed
    /// timestamps to make bucket placement deterministic.
    pub fn schedule_from(
        &self,
        from: NaiveDateTime,
        title: &str,
        schedule: UpdateSchedule,
    ) -> Result<()> {
        if !self.registry.exists(title) {
            return Err(CardError::NotFound(title.to_string()));
        }
        self.join_or_arm(from, title, schedule);
        Ok(())
    }

    /// Fires the bucket at `at`: escalates every member still in the registry
    /// and re-enters each survivor into its next bucket, computed from the
    /// fired timestamp. Directly callable so tests can fire a bucket without
    /// waiting on real time; a no-op when no bucket is pending at `at`.
    pub fn run_due_bucket(&self, at: NaiveDateTime) {
        let bucket = {
            let mut buckets = self.buckets.lock().expect("bucket map lock poisoned");
            // Fired buckets are not persisted.
            buckets.remove(&at)
        };
        let Some(bucket) = bucket else {
            return;
        };
        debug!(
            "Cards sync started at {at} for: {}",
            bucket.members.keys().cloned().collect::<Vec<_>>().join(",")
        );
        for (title, schedule) in bucket.members {
            match self.registry.increase_priority(&title) {
                Ok(()) => {
                    debug!("Card: {title} priority was updated");
                    self.join_or_arm(at, &title, schedule);
                }
                Err(CardError::NotFound(_)) => {
                    // Card was removed between scheduling and firing; drop it
                    // from further scheduling.
                    debug!("Unable to update card {title} priority, because it was not found");
                }
                Err(e) => {
                    debug!("Unable to update card {title} priority: {e}");
                }
            }
        }
        info!("Cards sync at {at} ended");
    }

    /// Adds the title to the pending bucket at its computed timestamp, arming
    /// a timer only when the bucket did not exist yet.
    fn join_or_arm(&self, from: NaiveDateTime, title: &str, schedule: UpdateSchedule) {
        let at = next_update_from(&schedule, from);
        let mut buckets = self.buckets.lock().expect("bucket map lock poisoned");
        match buckets.entry(at) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                entry.get_mut().members.insert(title.to_string(), schedule);
                debug!("Card with title: {title} was added to scheduled execution at: {at}");
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                let mut bucket = Bucket::default();
                bucket.members.insert(title.to_string(), schedule);
                entry.insert(bucket);
                let delay = (at - from).to_std().unwrap_or_default();
                self.arm_timer(at, delay);
                debug!("Card with title: {title} was scheduled to execute at: {at}");
            }
        }
    }

    fn arm_timer(&self, at: NaiveDateTime, delay: std::time::Duration) {
        let Some(this) = self.me.upgrade() else {
            return;
        };
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.run_due_bucket(at);
        });
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl UpdateScheduler for InMemoryUpdateScheduler {
    fn schedule_default(&self, title: &str) -> Result<()> {
        self.schedule_from(self.now(), title, self.default_schedule)
    }

    fn schedule_with(&self, title: &str, schedule: UpdateSchedule) -> Result<()> {
        self.schedule_from(self.now(), title, schedule)
    }

    fn active_schedule_for(&self, at: NaiveDateTime) -> HashSet<String> {
        let buckets = self.buckets.lock().expect("bucket map lock poisoned");
        buckets
            .get(&at)
            .map(|bucket| bucket.members.keys().cloned().collect())
            .unwrap_or_default()
    }
}
