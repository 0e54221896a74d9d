// src/lib.rs

pub mod config;
pub mod domain;
pub mod error;
pub mod registry;
pub mod schedule;
pub mod state;
pub mod tasks;
pub mod today;

pub use error::{CardError, Result};
pub use state::AppState;
