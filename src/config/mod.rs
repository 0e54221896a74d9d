// src/config/mod.rs

//! Environment-driven configuration. No CLI surface: the adapter layer owns
//! that; this core reads its knobs from the environment once at startup.

use once_cell::sync::Lazy;
use std::str::FromStr;

use crate::domain::{TimeUnit, UpdateSchedule};

const MAX_CARDS_FOR_TODAY_DEFAULT: usize = 5;
const REFILL_INTERVAL_SECS_DEFAULT: u64 = 60;
const UPDATE_PERIOD_DEFAULT: u32 = 1;

#[derive(Debug, Clone)]
pub struct CardtrackConfig {
    /// Cap applied to the automatic today-list refill (manual additions may
    /// exceed it).
    pub max_cards_for_today: usize,

    /// How often the today list is rebuilt from the prioritized registry view.
    pub refill_interval_secs: u64,

    /// Default cadence for cards scheduled without an explicit schedule.
    pub default_update_unit: TimeUnit,
    pub default_update_period: u32,

    pub log_level: String,
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {key} = '{val}' (parse failed, using default)");
                    default
                }
            }
        }
        Err(_) => default,
    }
}

/// Max-cards cap outside 1..=100 falls back to the default with a warning.
fn validated_max_cards(raw: usize) -> usize {
    if raw == 0 || raw > 100 {
        eprintln!(
            "Config: CARDTRACK_MAX_CARDS_FOR_TODAY out of range, using default: {MAX_CARDS_FOR_TODAY_DEFAULT}"
        );
        return MAX_CARDS_FOR_TODAY_DEFAULT;
    }
    raw
}

fn validated_refill_interval(raw: u64) -> u64 {
    if raw == 0 {
        eprintln!(
            "Config: CARDTRACK_REFILL_INTERVAL_SECS must be positive, using default: {REFILL_INTERVAL_SECS_DEFAULT}"
        );
        return REFILL_INTERVAL_SECS_DEFAULT;
    }
    raw
}

fn validated_update_period(raw: u32) -> u32 {
    if raw == 0 {
        eprintln!(
            "Config: CARDTRACK_UPDATE_PERIOD must be positive, using default: {UPDATE_PERIOD_DEFAULT}"
        );
        return UPDATE_PERIOD_DEFAULT;
    }
    raw
}

impl CardtrackConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            max_cards_for_today: validated_max_cards(env_var_or(
                "CARDTRACK_MAX_CARDS_FOR_TODAY",
                MAX_CARDS_FOR_TODAY_DEFAULT,
            )),
            refill_interval_secs: validated_refill_interval(env_var_or(
                "CARDTRACK_REFILL_INTERVAL_SECS",
                REFILL_INTERVAL_SECS_DEFAULT,
            )),
            default_update_unit: env_var_or("CARDTRACK_UPDATE_UNIT", TimeUnit::Days),
            default_update_period: validated_update_period(env_var_or(
                "CARDTRACK_UPDATE_PERIOD",
                UPDATE_PERIOD_DEFAULT,
            )),
            log_level: env_var_or("CARDTRACK_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Default schedule assembled from the validated config values.
    pub fn default_update_schedule(&self) -> UpdateSchedule {
        UpdateSchedule::new(self.default_update_unit, self.default_update_period)
            .expect("config validation guarantees a positive period")
    }
}

pub static CONFIG: Lazy<CardtrackConfig> = Lazy::new(CardtrackConfig::from_env);
