//! Service-day schedule: time bands and dispatch slots.
//!
//! The classifier answers three independent questions about a minute of the
//! day: which band it falls in (and that band's base score), which dispatch
//! slot comes next, and whether the weekday is a weekend. It knows nothing
//! about the session context.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Last valid minute of a day (23:59).
pub const LAST_MINUTE_OF_DAY: u32 = 24 * 60 - 1;

/// Named time-of-day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandId {
    Early,
    Standard,
    Late,
}

impl BandId {
    pub fn as_str(self) -> &'static str {
        match self {
            BandId::Early => "EARLY",
            BandId::Standard => "STANDARD",
            BandId::Late => "LATE",
        }
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous band of minutes, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub id: BandId,
    pub start_minute: u32,
    pub end_minute: u32,
    pub base_score: u32,
}

impl Band {
    pub fn contains(&self, minutes_of_day: u32) -> bool {
        (self.start_minute..=self.end_minute).contains(&minutes_of_day)
    }
}

/// What the classifier knows about one minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub band: Option<BandId>,
    pub base_score: u32,
    pub next_dispatch_minutes: Option<u32>,
}

/// Band table plus ascending dispatch slots.
///
/// Bands are checked in order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub bands: Vec<Band>,
    /// Minutes of day, strictly ascending.
    pub dispatch_slots: Vec<u32>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            bands: vec![
                // 07:00 - 10:59
                Band {
                    id: BandId::Early,
                    start_minute: 420,
                    end_minute: 659,
                    base_score: 3,
                },
                // 11:00 - 11:59
                Band {
                    id: BandId::Standard,
                    start_minute: 660,
                    end_minute: 719,
                    base_score: 1,
                },
                // 12:00 - 14:00
                Band {
                    id: BandId::Late,
                    start_minute: 720,
                    end_minute: 840,
                    base_score: 0,
                },
            ],
            // 12:00, 12:30, 13:00, 13:30, 14:00
            dispatch_slots: vec![720, 750, 780, 810, 840],
        }
    }
}

impl Schedule {
    /// First band containing `minutes_of_day`, if any.
    pub fn band_at(&self, minutes_of_day: u32) -> Option<&Band> {
        self.bands.iter().find(|b| b.contains(minutes_of_day))
    }

    /// First dispatch slot strictly after `minutes_of_day`.
    pub fn next_dispatch(&self, minutes_of_day: u32) -> Option<u32> {
        self.dispatch_slots
            .iter()
            .copied()
            .find(|&slot| slot > minutes_of_day)
    }

    pub fn classify(&self, minutes_of_day: u32) -> Classification {
        let band = self.band_at(minutes_of_day);
        Classification {
            band: band.map(|b| b.id),
            base_score: band.map(|b| b.base_score).unwrap_or(0),
            next_dispatch_minutes: self.next_dispatch(minutes_of_day),
        }
    }

    /// Check an operator-supplied table.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidSchedule` if a band is inverted or out of
    /// range, bands overlap or are out of order, or dispatch slots are not
    /// strictly ascending within the day.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |msg: String| -> Result<(), ValidationError> {
            Err(ValidationError::InvalidSchedule(msg))
        };

        for band in &self.bands {
            if band.start_minute > band.end_minute {
                return invalid(format!(
                    "band {} starts at {} after it ends at {}",
                    band.id,
                    format_hhmm(band.start_minute),
                    format_hhmm(band.end_minute)
                ));
            }
            if band.end_minute > LAST_MINUTE_OF_DAY {
                return invalid(format!("band {} ends past 23:59", band.id));
            }
        }
        for pair in self.bands.windows(2) {
            if pair[1].start_minute <= pair[0].end_minute {
                return invalid(format!(
                    "band {} overlaps or precedes band {}",
                    pair[1].id, pair[0].id
                ));
            }
        }

        if let Some(&slot) = self.dispatch_slots.iter().find(|&&s| s > LAST_MINUTE_OF_DAY) {
            return invalid(format!("dispatch slot {slot} is past 23:59"));
        }
        if self.dispatch_slots.windows(2).any(|w| w[1] <= w[0]) {
            return invalid("dispatch slots must be strictly ascending".into());
        }
        Ok(())
    }
}

/// Saturday or Sunday, with 0 = Sunday.
pub fn is_weekend(weekday: u8) -> bool {
    weekday == 0 || weekday == 6
}

/// Render minutes of day as zero-padded 24h `HH:MM`.
pub fn format_hhmm(minutes_of_day: u32) -> String {
    format!("{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60)
}
