//! Rule evaluator.
//!
//! Turns a clock sample and the session context into a verdict. Executability
//! only depends on the calendar and the schedule; points are informational
//! and never feed back into it. The evaluator does not block anything, the
//! send flow decides what to do with a blocked verdict.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::clock::TimeSnapshot;
use crate::order::Order;
use crate::schedule::{format_hhmm, BandId};

/// Points granted to onsite customers whenever the market is open.
pub const ONSITE_POINTS: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Delivery.
    #[default]
    Normal,
    /// Customer is physically at the venue.
    Onsite,
}

/// Per-session context, fixed when the session starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionContext {
    pub mode: SessionMode,
}

impl SessionContext {
    pub const NORMAL: Self = Self {
        mode: SessionMode::Normal,
    };
    pub const ONSITE: Self = Self {
        mode: SessionMode::Onsite,
    };

    /// Normalize an external mode signal. Anything unrecognized is `Normal`.
    pub fn from_signal(signal: Option<&str>) -> Self {
        match signal.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("inhouse") | Some("onsite") => Self::ONSITE,
            _ => Self::NORMAL,
        }
    }

    /// Read the `modo` (or `mode`) query parameter of a session link.
    pub fn from_url(link: &str) -> Self {
        let Ok(url) = url::Url::parse(link) else {
            return Self::NORMAL;
        };
        let value = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        };
        Self::from_signal(value("modo").or_else(|| value("mode")).as_deref())
    }

    pub fn is_onsite(&self) -> bool {
        self.mode == SessionMode::Onsite
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Executability {
    Executable,
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    Weekend,
    OutOfHours,
    NoDispatch,
}

impl ReasonCode {
    /// Customer-facing explanation shown before a blocked order is sent.
    pub fn advisory(self) -> &'static str {
        match self {
            ReasonCode::OutOfHours => {
                "We are outside service hours. Your order can still be registered."
            }
            ReasonCode::NoDispatch => "There are no dispatch slots left today.",
            ReasonCode::Weekend => "We do not serve on Saturdays or Sundays.",
        }
    }
}

/// `CLOSED` or `OPEN_<band>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketState {
    Closed,
    Open(BandId),
}

impl MarketState {
    pub fn is_open(self) -> bool {
        matches!(self, MarketState::Open(_))
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketState::Closed => f.write_str("CLOSED"),
            MarketState::Open(band) => write!(f, "OPEN_{band}"),
        }
    }
}

impl FromStr for MarketState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLOSED" => Ok(MarketState::Closed),
            "OPEN_EARLY" => Ok(MarketState::Open(BandId::Early)),
            "OPEN_STANDARD" => Ok(MarketState::Open(BandId::Standard)),
            "OPEN_LATE" => Ok(MarketState::Open(BandId::Late)),
            other => Err(format!("unknown market state: {other}")),
        }
    }
}

impl Serialize for MarketState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MarketState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Verdict for one order at one instant in one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub executability: Executability,
    pub reason: Option<ReasonCode>,
    /// `HH:MM`; never set for onsite sessions.
    pub assigned_dispatch: Option<String>,
    pub market_state: MarketState,
    pub points: u32,
}

impl Evaluation {
    pub fn is_executable(&self) -> bool {
        self.executability == Executability::Executable
    }

    fn blocked(reason: ReasonCode) -> Self {
        Self {
            executability: Executability::Blocked,
            reason: Some(reason),
            assigned_dispatch: None,
            market_state: MarketState::Closed,
            points: 0,
        }
    }
}

/// Evaluate an order against a clock sample and the session context.
///
/// The order is accepted for signature symmetry with the composer; the verdict
/// does not depend on its content.
pub fn evaluate(_order: &Order, snapshot: &TimeSnapshot, context: &SessionContext) -> Evaluation {
    if snapshot.is_weekend {
        return Evaluation::blocked(ReasonCode::Weekend);
    }
    let Some(band) = snapshot.band else {
        return Evaluation::blocked(ReasonCode::OutOfHours);
    };
    let Some(next_dispatch) = snapshot.next_dispatch_minutes else {
        return Evaluation::blocked(ReasonCode::NoDispatch);
    };

    let market_state = MarketState::Open(band);
    let (assigned_dispatch, points) = if context.is_onsite() {
        (None, ONSITE_POINTS)
    } else {
        (Some(format_hhmm(next_dispatch)), snapshot.base_score)
    };

    Evaluation {
        executability: Executability::Executable,
        reason: None,
        assigned_dispatch,
        market_state,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        band: Option<BandId>,
        base_score: u32,
        next: Option<u32>,
        weekend: bool,
    ) -> TimeSnapshot {
        TimeSnapshot {
            hour: 10,
            minute: 30,
            minutes_of_day: 630,
            weekday: if weekend { 6 } else { 1 },
            band,
            base_score,
            next_dispatch_minutes: next,
            is_weekend: weekend,
            timestamp: 0,
            date_label: "15/01/2026".into(),
            time_label: "10:30".into(),
        }
    }

    fn order() -> Order {
        Order::new().set_quantity("A", 1)
    }

    #[test]
    fn from_signal_normalizes() {
        assert_eq!(SessionContext::from_signal(Some("inhouse")), SessionContext::ONSITE);
        assert_eq!(SessionContext::from_signal(Some(" OnSite ")), SessionContext::ONSITE);
        assert_eq!(SessionContext::from_signal(Some("delivery")), SessionContext::NORMAL);
        assert_eq!(SessionContext::from_signal(Some("")), SessionContext::NORMAL);
        assert_eq!(SessionContext::from_signal(None), SessionContext::NORMAL);
    }

    #[test]
    fn from_url_reads_query_parameter() {
        assert!(SessionContext::from_url("https://lunch.example/?modo=inhouse").is_onsite());
        assert!(SessionContext::from_url("https://lunch.example/?table=4&mode=onsite").is_onsite());
        assert!(!SessionContext::from_url("https://lunch.example/?modo=garden").is_onsite());
        assert!(!SessionContext::from_url("https://lunch.example/").is_onsite());
        assert!(!SessionContext::from_url("not a url").is_onsite());
    }

    #[test]
    fn weekend_beats_everything() {
        let snap = snapshot(Some(BandId::Early), 3, Some(720), true);
        for ctx in [SessionContext::NORMAL, SessionContext::ONSITE] {
            let eval = evaluate(&order(), &snap, &ctx);
            assert_eq!(eval.executability, Executability::Blocked);
            assert_eq!(eval.reason, Some(ReasonCode::Weekend));
            assert_eq!(eval.market_state, MarketState::Closed);
            assert_eq!(eval.points, 0);
        }
    }

    #[test]
    fn no_band_is_out_of_hours() {
        let snap = snapshot(None, 0, Some(720), false);
        let eval = evaluate(&order(), &snap, &SessionContext::ONSITE);
        assert_eq!(eval.reason, Some(ReasonCode::OutOfHours));
        assert_eq!(eval.points, 0);
    }

    #[test]
    fn no_slot_left_is_no_dispatch() {
        let eval = evaluate(
            &order(),
            &snapshot(Some(BandId::Late), 0, None, false),
            &SessionContext::NORMAL,
        );
        assert_eq!(eval.executability, Executability::Blocked);
        assert_eq!(eval.reason, Some(ReasonCode::NoDispatch));
        assert_eq!(eval.assigned_dispatch, None);
    }

    #[test]
    fn normal_mode_gets_dispatch_and_base_score() {
        let eval = evaluate(
            &order(),
            &snapshot(Some(BandId::Standard), 1, Some(720), false),
            &SessionContext::NORMAL,
        );
        assert!(eval.is_executable());
        assert_eq!(eval.reason, None);
        assert_eq!(eval.assigned_dispatch.as_deref(), Some("12:00"));
        assert_eq!(eval.market_state, MarketState::Open(BandId::Standard));
        assert_eq!(eval.points, 1);
    }

    #[test]
    fn onsite_gets_max_points_and_no_dispatch() {
        let snap = snapshot(Some(BandId::Late), 0, Some(780), false);
        let eval = evaluate(&order(), &snap, &SessionContext::ONSITE);
        assert!(eval.is_executable());
        assert_eq!(eval.assigned_dispatch, None);
        assert_eq!(eval.market_state, MarketState::Open(BandId::Late));
        assert_eq!(eval.points, ONSITE_POINTS);
        // the snapshot keeps its own score
        assert_eq!(snap.base_score, 0);
    }

    #[test]
    fn market_state_serializes_as_tag() {
        let json = serde_json::to_string(&MarketState::Open(BandId::Early)).unwrap();
        assert_eq!(json, "\"OPEN_EARLY\"");
        let back: MarketState = serde_json::from_str("\"CLOSED\"").unwrap();
        assert_eq!(back, MarketState::Closed);
        assert!(serde_json::from_str::<MarketState>("\"OPEN_NIGHT\"").is_err());
    }

    #[test]
    fn every_reason_has_an_advisory() {
        for reason in [ReasonCode::Weekend, ReasonCode::OutOfHours, ReasonCode::NoDispatch] {
            assert!(!reason.advisory().is_empty());
        }
    }
}
