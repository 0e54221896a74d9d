// src/registry/mod.rs

//! The card registry: the single source of truth for every tracked card and
//! its current priority level.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::{debug, info};

use crate::domain::{Card, CardPriority};
use crate::error::{CardError, Result};

/// Capability interface over the authoritative card store.
///
/// One production implementation ([`InMemoryCardRegistry`]); the trait seam
/// keeps the adapter layer decoupled and allows test doubles.
pub trait CardRegistry: Send + Sync {
    /// Creates a card at the initial priority level.
    fn create(&self, title: &str) -> Result<Card>;

    /// Pure lookup, never fails.
    fn exists(&self, title: &str) -> bool;

    fn get(&self, title: &str) -> Result<Card>;

    /// All cards, most urgent first. Cards of equal priority keep their
    /// insertion order (tracked via a per-card sequence number), so the
    /// result is deterministic.
    fn prioritized_list(&self) -> Vec<Card>;

    /// Advances the card one priority tier, saturating at the maximum.
    fn increase_priority(&self, title: &str) -> Result<()>;

    /// Unconditionally resets the card to the initial priority.
    fn bottom_priority(&self, title: &str) -> Result<()>;

    /// Number of registered cards.
    fn count(&self) -> usize;

    /// Idempotent: removing an absent card is a no-op.
    fn remove(&self, title: &str);
}

struct StoredCard {
    priority: CardPriority,
    // Monotonic insertion sequence, the tie-break for equal priorities.
    seq: u64,
}

/// In-memory production registry.
///
/// The card map is the only resource shared between the scheduler callbacks
/// and the curator; a `RwLock` makes every mutation immediately visible to
/// concurrent readers, and no lock is ever held across an await point.
#[derive(Default)]
pub struct InMemoryCardRegistry {
    cards: RwLock<HashMap<String, StoredCard>>,
    next_seq: AtomicU64,
}

impl InMemoryCardRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardRegistry for InMemoryCardRegistry {
    fn create(&self, title: &str) -> Result<Card> {
        debug!("Attempt to create a new card with title: {title}");
        let card = Card::new(title, CardPriority::INITIAL)?;
        let mut cards = self.cards.write().expect("card map lock poisoned");
        if cards.contains_key(title) {
            debug!("Card with title: {title} already exists");
            return Err(CardError::AlreadyExists(title.to_string()));
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        cards.insert(
            title.to_string(),
            StoredCard { priority: CardPriority::INITIAL, seq },
        );
        info!("New card created with title: {title}");
        Ok(card)
    }

    fn exists(&self, title: &str) -> bool {
        self.cards
            .read()
            .expect("card map lock poisoned")
            .contains_key(title)
    }

    fn get(&self, title: &str) -> Result<Card> {
        let cards = self.cards.read().expect("card map lock poisoned");
        let stored = cards
            .get(title)
            .ok_or_else(|| CardError::NotFound(title.to_string()))?;
        Card::new(title, stored.priority)
    }

    fn prioritized_list(&self) -> Vec<Card> {
        let cards = self.cards.read().expect("card map lock poisoned");
        let mut entries: Vec<(&String, &StoredCard)> = cards.iter().collect();
        entries.sort_by(|(_, a), (_, b)| {
            b.priority.cmp(&a.priority).then(a.seq.cmp(&b.seq))
        });
        entries
            .into_iter()
            .filter_map(|(title, stored)| Card::new(title.clone(), stored.priority).ok())
            .collect()
    }

    fn increase_priority(&self, title: &str) -> Result<()> {
        debug!("Attempt to increase card priority with title: {title}");
        let mut cards = self.cards.write().expect("card map lock poisoned");
        let stored = cards
            .get_mut(title)
            .ok_or_else(|| CardError::NotFound(title.to_string()))?;
        let next = stored.priority.escalated();
        if next == stored.priority {
            debug!("Card max possible priority has been achieved");
        }
        stored.priority = next;
        info!(
            "Card with title: {title} priority was increased to: {}",
            next.as_str()
        );
        Ok(())
    }

    fn bottom_priority(&self, title: &str) -> Result<()> {
        debug!("Attempt to bottom card priority with title: {title}");
        let mut cards = self.cards.write().expect("card map lock poisoned");
        let stored = cards
            .get_mut(title)
            .ok_or_else(|| CardError::NotFound(title.to_string()))?;
        stored.priority = CardPriority::INITIAL;
        info!(
            "Card with title: {title} priority was bottomed to: {}",
            CardPriority::INITIAL.as_str()
        );
        Ok(())
    }

    fn count(&self) -> usize {
        self.cards.read().expect("card map lock poisoned").len()
    }

    fn remove(&self, title: &str) {
        debug!("Attempt to remove card with title: {title}");
        let mut cards = self.cards.write().expect("card map lock poisoned");
        if cards.remove(title).is_none() {
            debug!("Card with title: {title} was not found and does not need to be removed");
            return;
        }
        info!("Card with title: {title} was removed");
    }
}
