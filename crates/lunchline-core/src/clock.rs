//! Clock reader.
//!
//! The only place that looks at the wall clock. A sample is a plain value:
//! calendar facts, the schedule classification for that minute and display
//! labels. It carries no session context.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::schedule::{is_weekend, BandId, Schedule};

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Interpret a naive wall-clock reading in the local time zone.
    ///
    /// Readings that fall into a DST gap are taken as UTC; only the epoch
    /// timestamp depends on the offset.
    pub fn from_naive(naive: NaiveDateTime) -> Self {
        let at = Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.fixed_offset())
            .unwrap_or_else(|| naive.and_utc().fixed_offset());
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Immutable reading of the clock plus its schedule classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSnapshot {
    pub hour: u32,
    pub minute: u32,
    pub minutes_of_day: u32,
    /// 0 = Sunday ... 6 = Saturday.
    pub weekday: u8,
    pub band: Option<BandId>,
    pub base_score: u32,
    pub next_dispatch_minutes: Option<u32>,
    pub is_weekend: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// `DD/MM/YYYY`
    pub date_label: String,
    /// `HH:MM`, 24h
    pub time_label: String,
}

impl TimeSnapshot {
    /// Build a snapshot for a given instant, using its own wall-clock fields.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>, schedule: &Schedule) -> Self {
        let local = now.naive_local();
        let hour = local.hour();
        let minute = local.minute();
        let minutes_of_day = hour * 60 + minute;
        // num_days_from_sunday is always 0..=6
        let weekday = local.weekday().num_days_from_sunday() as u8;
        let classification = schedule.classify(minutes_of_day);

        Self {
            hour,
            minute,
            minutes_of_day,
            weekday,
            band: classification.band,
            base_score: classification.base_score,
            next_dispatch_minutes: classification.next_dispatch_minutes,
            is_weekend: is_weekend(weekday),
            timestamp: now.timestamp_millis(),
            date_label: local.format("%d/%m/%Y").to_string(),
            time_label: local.format("%H:%M").to_string(),
        }
    }
}

/// Samples a clock against a schedule.
#[derive(Debug, Clone)]
pub struct ClockReader<C: Clock = SystemClock> {
    clock: C,
    schedule: Schedule,
}

impl ClockReader<SystemClock> {
    /// Wall clock with the default schedule.
    pub fn system() -> Self {
        Self::new(SystemClock, Schedule::default())
    }
}

impl<C: Clock> ClockReader<C> {
    pub fn new(clock: C, schedule: Schedule) -> Self {
        Self { clock, schedule }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn sample(&self) -> TimeSnapshot {
        TimeSnapshot::at(&self.clock.now(), &self.schedule)
    }
}

/// Sample the local wall clock with the default schedule.
pub fn sample() -> TimeSnapshot {
    ClockReader::system().sample()
}
