//! Hooks the session controller calls out to.

use crate::catalog::Catalog;
use crate::clock::TimeSnapshot;
use crate::events::Event;
use crate::order::Order;
use crate::rules::{Evaluation, ReasonCode};

/// State handed to the renderer after every cycle.
#[derive(Debug, Clone, Copy)]
pub struct UiUpdate<'a> {
    pub order: &'a Order,
    pub evaluation: &'a Evaluation,
    pub snapshot: &'a TimeSnapshot,
    pub catalog: &'a Catalog,
}

/// Renderer side of the session. Never reads or writes core state.
pub trait UiHook {
    fn on_update(&mut self, update: UiUpdate<'_>);

    fn on_event(&mut self, _event: &Event) {}
}

/// No renderer attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl UiHook for NoopHook {
    fn on_update(&mut self, _update: UiUpdate<'_>) {}
}

/// Asks whether a blocked order should be sent anyway.
pub trait ConfirmationGate {
    fn confirm(&mut self, reason: Option<ReasonCode>, advisory: &str) -> bool;
}

/// Sends blocked orders without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&mut self, _reason: Option<ReasonCode>, _advisory: &str) -> bool {
        true
    }
}

/// Never sends blocked orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmationGate for NeverConfirm {
    fn confirm(&mut self, _reason: Option<ReasonCode>, _advisory: &str) -> bool {
        false
    }
}
