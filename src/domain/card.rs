// src/domain/card.rs

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// Urgency tier assigned to a card, ascending order. Escalates over time and
/// resets to [`CardPriority::Normal`] on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPriority {
    Normal,
    Overdue,
    Critical,
}

impl CardPriority {
    /// Priority assigned to freshly created and completed cards.
    pub const INITIAL: CardPriority = CardPriority::Normal;

    /// Ceiling that escalation never exceeds.
    pub const MAX: CardPriority = CardPriority::Critical;

    /// Next tier up, saturating at [`CardPriority::MAX`].
    pub fn escalated(self) -> CardPriority {
        match self {
            CardPriority::Normal => CardPriority::Overdue,
            CardPriority::Overdue => CardPriority::Critical,
            CardPriority::Critical => CardPriority::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardPriority::Normal => "normal",
            CardPriority::Overdue => "overdue",
            CardPriority::Critical => "critical",
        }
    }
}

/// A user-tracked task, identified by its title.
///
/// A card is a value: once constructed it is never mutated in place, the
/// registry replaces it wholesale on every priority change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    title: String,
    priority: CardPriority,
}

impl Card {
    /// Builds a card, rejecting empty or whitespace-only titles.
    pub fn new(title: impl Into<String>, priority: CardPriority) -> Result<Card> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CardError::InvalidTitle(title));
        }
        Ok(Card { title, priority })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn priority(&self) -> CardPriority {
        self.priority
    }
}
