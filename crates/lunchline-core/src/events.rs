use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::{MarketState, ReasonCode, SessionMode};

/// Every cycle of the session controller produces an Event.
/// The renderer hook receives them; the CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        mode: SessionMode,
        at: DateTime<Utc>,
    },
    /// One sample -> evaluate cycle finished.
    Evaluated {
        market_state: MarketState,
        reason: Option<ReasonCode>,
        assigned_dispatch: Option<String>,
        points: u32,
        at: DateTime<Utc>,
    },
    OrderChanged {
        lines: usize,
        total_items: u64,
        extras: usize,
        at: DateTime<Utc>,
    },
    /// Blocked order and the confirmation gate said no.
    SendDeclined {
        reason: Option<ReasonCode>,
        at: DateTime<Utc>,
    },
    /// Send attempted with nothing ordered.
    SendSkippedEmpty {
        at: DateTime<Utc>,
    },
    OrderSent {
        link: String,
        opened: bool,
        at: DateTime<Utc>,
    },
}
