// src/schedule/calendar.rs

//! Pure bucket-time computation: when is a card's next priority update due.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use crate::domain::{TimeUnit, UpdateSchedule};

/// Computes the next priority-update timestamp: `from` plus the schedule's
/// period, truncated down to the resolution of the schedule's unit (days to
/// midnight, hours to the top of the hour, and so on).
///
/// The truncation is deliberate coalescing, not an approximation artifact:
/// independently scheduled cards whose computed times coincide after
/// truncation land on one shared bucket and fire together. Sub-second
/// precision is always dropped.
pub fn next_update_from(schedule: &UpdateSchedule, from: NaiveDateTime) -> NaiveDateTime {
    let period = i64::from(schedule.period());
    match schedule.unit() {
        TimeUnit::Days => truncate_to_day(saturating_add(from, Duration::days(period))),
        TimeUnit::Hours => truncate_to_hour(saturating_add(from, Duration::hours(period))),
        TimeUnit::Minutes => truncate_to_minute(saturating_add(from, Duration::minutes(period))),
        TimeUnit::Seconds => truncate_to_second(saturating_add(from, Duration::seconds(period))),
    }
}

// A period large enough to overflow the representable range saturates at the
// maximum timestamp instead of panicking.
fn saturating_add(from: NaiveDateTime, delta: Duration) -> NaiveDateTime {
    from.checked_add_signed(delta).unwrap_or(NaiveDateTime::MAX)
}

fn truncate_to_day(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_time(NaiveTime::MIN)
}

fn truncate_to_hour(at: NaiveDateTime) -> NaiveDateTime {
    truncate_to_second(at)
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .unwrap_or(at)
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    truncate_to_second(at).with_second(0).unwrap_or(at)
}

fn truncate_to_second(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}
