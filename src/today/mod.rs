// src/today/mod.rs

//! The today-list curator: the bounded, ordered subset of cards a user works
//! on today. A curated view over the registry, mutable independently of it
//! between refills.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::error::{CardError, Result};
use crate::registry::CardRegistry;

pub mod util;

use util::{first_distinct, first_duplicate};

/// Capability interface over the curated today list.
pub trait TodayService: Send + Sync {
    /// Rebuilds the list from the registry's prioritized view, truncated to
    /// the configured cap. The only operation that replaces the list
    /// wholesale; everything else mutates it incrementally.
    fn refill(&self);

    /// Defensive copy of the current list.
    fn list(&self) -> Vec<String>;

    /// Appends a card past the cap; the cap only governs automatic refill.
    /// A no-op when the card is already listed.
    fn add_extra(&self, title: &str) -> Result<()>;

    /// Removes the card from the list and bottoms its registry priority.
    fn complete(&self, title: &str) -> Result<()>;

    /// Replaces the list order with a validated permutation of itself.
    fn reshuffle(&self, new_order: Vec<String>) -> Result<()>;
}

/// Production curator over an in-memory list.
///
/// The list is owned exclusively by this service; the scheduler never touches
/// it. A card deleted from the registry may linger here until the next refill
/// or an explicit completion.
pub struct InMemoryTodayService {
    registry: Arc<dyn CardRegistry>,
    max_cards_for_today: usize,
    cards_for_today: Mutex<Vec<String>>,
}

impl InMemoryTodayService {
    pub fn new(registry: Arc<dyn CardRegistry>, max_cards_for_today: usize) -> Self {
        debug!("Today max cards number: {max_cards_for_today} was configured");
        Self {
            registry,
            max_cards_for_today,
            cards_for_today: Mutex::new(Vec::new()),
        }
    }
}

impl TodayService for InMemoryTodayService {
    fn refill(&self) {
        debug!(
            "List of cards for today with a limit of: {} started being formed",
            self.max_cards_for_today
        );
        let refilled: Vec<String> = self
            .registry
            .prioritized_list()
            .into_iter()
            .take(self.max_cards_for_today)
            .map(|card| card.title().to_string())
            .collect();
        let mut cards = self.cards_for_today.lock().expect("today list lock poisoned");
        *cards = refilled;
        info!("Cards for today were formed with {} cards", cards.len());
    }

    fn list(&self) -> Vec<String> {
        self.cards_for_today
            .lock()
            .expect("today list lock poisoned")
            .clone()
    }

    fn add_extra(&self, title: &str) -> Result<()> {
        debug!("Attempt to add an additional card with title: {title} for today");
        if !self.registry.exists(title) {
            debug!("Card with title: {title} does not exist");
            return Err(CardError::NotFound(title.to_string()));
        }
        let mut cards = self.cards_for_today.lock().expect("today list lock poisoned");
        if cards.iter().any(|card| card == title) {
            debug!("Card with title: {title} already exists in the today cards list");
            return Ok(());
        }
        cards.push(title.to_string());
        info!("Card with title: {title} was added for today");
        Ok(())
    }

    fn complete(&self, title: &str) -> Result<()> {
        debug!("Attempt to complete today card with title: {title}");
        {
            let mut cards = self.cards_for_today.lock().expect("today list lock poisoned");
            let Some(position) = cards.iter().position(|card| card == title) else {
                debug!("Card with title: {title} does not exist in the today cards list");
                return Err(CardError::NotFound(title.to_string()));
            };
            cards.remove(position);
        }
        if let Err(CardError::NotFound(_)) = self.registry.bottom_priority(title) {
            // Deleted from the registry while still on the list; completion
            // still succeeds.
            debug!("Card with title: {title} does not exist in the registry");
        }
        info!("Today card with title: {title} was completed");
        Ok(())
    }

    fn reshuffle(&self, new_order: Vec<String>) -> Result<()> {
        debug!(
            "Attempt to reshuffle today cards with a new order: {}",
            new_order.join(", ")
        );
        if let Some(duplicate) = first_duplicate(&new_order) {
            debug!("Card with title: {duplicate} is duplicated");
            return Err(CardError::DuplicateTitle(duplicate.clone()));
        }
        let mut cards = self.cards_for_today.lock().expect("today list lock poisoned");
        if let Some(distinct) = first_distinct(&cards, &new_order) {
            debug!("Card with title: {distinct} does not exist");
            return Err(CardError::NotFound(distinct.clone()));
        }
        *cards = new_order;
        info!(
            "Today cards have been reshuffled with a new order: {}",
            cards.join(", ")
        );
        Ok(())
    }
}
