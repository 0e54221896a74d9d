// src/domain/mod.rs

//! Immutable value types shared across the registry, scheduler and curator.

pub mod card;
pub mod schedule;

pub use card::{Card, CardPriority};
pub use schedule::{TimeUnit, UpdateSchedule};
