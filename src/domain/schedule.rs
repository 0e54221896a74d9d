// src/domain/schedule.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// Resolution a schedule is expressed in.
///
/// Week- and month-scale units are deliberately absent: their truncation
/// semantics are calendar-dependent and any added unit must define its own
/// rule in the priority calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" => Ok(TimeUnit::Seconds),
            "minutes" | "minute" | "mins" | "min" => Ok(TimeUnit::Minutes),
            "hours" | "hour" => Ok(TimeUnit::Hours),
            "days" | "day" => Ok(TimeUnit::Days),
            other => Err(format!("unknown time unit: {other}")),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        };
        f.write_str(s)
    }
}

/// How often a card's priority should be escalated.
///
/// Deserialization funnels through [`UpdateSchedule::new`], so an invalid
/// period can never enter the system from the adapter layer either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScheduleParts")]
pub struct UpdateSchedule {
    unit: TimeUnit,
    period: u32,
}

#[derive(Deserialize)]
struct ScheduleParts {
    unit: TimeUnit,
    period: u32,
}

impl TryFrom<ScheduleParts> for UpdateSchedule {
    type Error = CardError;

    fn try_from(parts: ScheduleParts) -> Result<UpdateSchedule> {
        UpdateSchedule::new(parts.unit, parts.period)
    }
}

impl UpdateSchedule {
    /// Builds a schedule; a zero period fails fast and is never stored.
    pub fn new(unit: TimeUnit, period: u32) -> Result<UpdateSchedule> {
        if period == 0 {
            return Err(CardError::InvalidSchedule(period));
        }
        Ok(UpdateSchedule { unit, period })
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn period(&self) -> u32 {
        self.period
    }
}

impl fmt::Display for UpdateSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {} {}", self.period, self.unit)
    }
}
