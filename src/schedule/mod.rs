// src/schedule/mod.rs

//! When and how card priorities escalate: the pure bucket-time calendar and
//! the timer-backed update scheduler built on top of it.

pub mod calendar;
pub mod scheduler;

pub use calendar::next_update_from;
pub use scheduler::{InMemoryUpdateScheduler, UpdateScheduler};
