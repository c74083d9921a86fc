//! Property tests for the clock -> rules pipeline.

use chrono::{Duration, NaiveDate};
use lunchline_core::{
    evaluate, BandId, Executability, MarketState, Order, ReasonCode, Schedule, SessionContext,
    TimeSnapshot,
};
use proptest::prelude::*;

/// 2026-01-11 is a Sunday; adding `weekday` days gives 0 = Sunday ... 6 = Saturday.
fn snapshot_at(weekday: u8, minutes_of_day: u32) -> TimeSnapshot {
    let at = NaiveDate::from_ymd_opt(2026, 1, 11)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(i64::from(weekday))
        + Duration::minutes(i64::from(minutes_of_day));
    TimeSnapshot::at(&at.and_utc(), &Schedule::default())
}

fn any_context() -> impl Strategy<Value = SessionContext> {
    prop_oneof![Just(SessionContext::NORMAL), Just(SessionContext::ONSITE)]
}

fn order() -> Order {
    Order::new().set_quantity("A", 1)
}

proptest! {
    #[test]
    fn outside_every_band_has_no_band_and_zero_score(
        minutes in prop_oneof![0u32..420, 841u32..1440],
        weekday in 0u8..7,
    ) {
        let snap = snapshot_at(weekday, minutes);
        prop_assert_eq!(snap.band, None);
        prop_assert_eq!(snap.base_score, 0);
    }

    #[test]
    fn past_last_slot_has_no_dispatch(minutes in 840u32..1440) {
        prop_assert_eq!(snapshot_at(1, minutes).next_dispatch_minutes, None);
    }

    #[test]
    fn evaluate_is_pure(minutes in 0u32..1440, weekday in 0u8..7, ctx in any_context()) {
        let snap = snapshot_at(weekday, minutes);
        let order = order();
        let snap_before = snap.clone();
        let order_before = order.clone();

        let first = evaluate(&order, &snap, &ctx);
        let second = evaluate(&order, &snap, &ctx);

        prop_assert_eq!(first, second);
        prop_assert_eq!(snap, snap_before);
        prop_assert_eq!(order, order_before);
    }

    #[test]
    fn weekend_is_always_blocked(
        minutes in 0u32..1440,
        weekend in prop_oneof![Just(0u8), Just(6u8)],
        ctx in any_context(),
    ) {
        let eval = evaluate(&order(), &snapshot_at(weekend, minutes), &ctx);
        prop_assert_eq!(eval.executability, Executability::Blocked);
        prop_assert_eq!(eval.reason, Some(ReasonCode::Weekend));
        prop_assert_eq!(eval.points, 0);
    }

    #[test]
    fn onsite_open_market_has_max_points_and_no_dispatch(minutes in 0u32..1440, weekday in 1u8..6) {
        let eval = evaluate(&order(), &snapshot_at(weekday, minutes), &SessionContext::ONSITE);
        if eval.market_state.is_open() {
            prop_assert_eq!(eval.assigned_dispatch, None);
            prop_assert_eq!(eval.points, 3);
        } else {
            prop_assert_eq!(eval.points, 0);
        }
    }

    #[test]
    fn normal_open_market_points_equal_base_score(minutes in 0u32..1440, weekday in 1u8..6) {
        let snap = snapshot_at(weekday, minutes);
        let eval = evaluate(&order(), &snap, &SessionContext::NORMAL);
        if eval.market_state.is_open() {
            prop_assert_eq!(eval.points, snap.base_score);
            prop_assert!(eval.assigned_dispatch.is_some());
        } else {
            prop_assert_eq!(eval.points, 0);
            prop_assert_eq!(eval.assigned_dispatch, None);
        }
    }

    #[test]
    fn executability_ignores_mode(minutes in 0u32..1440, weekday in 0u8..7) {
        let snap = snapshot_at(weekday, minutes);
        let normal = evaluate(&order(), &snap, &SessionContext::NORMAL);
        let onsite = evaluate(&order(), &snap, &SessionContext::ONSITE);
        prop_assert_eq!(normal.executability, onsite.executability);
        prop_assert_eq!(normal.reason, onsite.reason);
        prop_assert_eq!(normal.market_state, onsite.market_state);
    }
}

#[test]
fn fourteen_hundred_is_late_band_without_dispatch() {
    // 14:00 is still in the late band but the last slot is not strictly after it.
    let snap = snapshot_at(2, 840);
    assert_eq!(snap.band, Some(BandId::Late));
    let eval = evaluate(&order(), &snap, &SessionContext::NORMAL);
    assert_eq!(eval.reason, Some(ReasonCode::NoDispatch));
    assert_eq!(eval.market_state, MarketState::Closed);
}

#[test]
fn every_open_band_maps_to_its_market_state() {
    for (minutes, band) in [(480, BandId::Early), (690, BandId::Standard), (750, BandId::Late)] {
        let eval = evaluate(&order(), &snapshot_at(3, minutes), &SessionContext::NORMAL);
        assert_eq!(eval.market_state, MarketState::Open(band));
        assert_eq!(eval.market_state.to_string(), format!("OPEN_{band}"));
    }
}
