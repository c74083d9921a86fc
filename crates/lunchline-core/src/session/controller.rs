//! Session controller.
//!
//! The only stateful piece. It owns the order, the frozen session context and
//! the latest sample/evaluation, and runs the sample -> evaluate -> notify
//! cycle after every mutation and on every tick. All the logic it calls into
//! is pure.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hooks::{ConfirmationGate, NoopHook, UiHook, UiUpdate};
use crate::catalog::Catalog;
use crate::clock::{Clock, ClockReader, SystemClock, TimeSnapshot};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::message::compose;
use crate::order::Order;
use crate::rules::{evaluate, Evaluation, SessionContext};
use crate::transport::{Delivery, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Init,
    Ready,
    Sending,
    Sent,
    Error,
}

/// Result of a send attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing ordered; nothing transmitted.
    EmptyOrder,
    /// Blocked order and the gate declined.
    Declined(Evaluation),
    Sent(Delivery),
}

pub struct SessionController<C: Clock = SystemClock, H: UiHook = NoopHook> {
    status: SessionStatus,
    context: SessionContext,
    catalog: Catalog,
    reader: ClockReader<C>,
    hook: H,
    order: Order,
    snapshot: TimeSnapshot,
    evaluation: Evaluation,
}

impl<C: Clock, H: UiHook> SessionController<C, H> {
    /// Freeze the context, start with an empty order and run the first cycle.
    pub fn start(
        context: SessionContext,
        catalog: Catalog,
        reader: ClockReader<C>,
        hook: H,
    ) -> Self {
        let order = Order::new();
        let snapshot = reader.sample();
        let evaluation = evaluate(&order, &snapshot, &context);
        let mut session = Self {
            status: SessionStatus::Init,
            context,
            catalog,
            reader,
            hook,
            order,
            snapshot,
            evaluation,
        };
        tracing::info!(mode = ?context.mode, "session started");
        session.emit(Event::SessionStarted {
            mode: context.mode,
            at: Utc::now(),
        });
        session.notify();
        session.status = SessionStatus::Ready;
        session
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn context(&self) -> SessionContext {
        self.context
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn snapshot(&self) -> &TimeSnapshot {
        &self.snapshot
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Sample the clock, re-evaluate and notify the renderer.
    pub fn refresh(&mut self) -> &Evaluation {
        self.snapshot = self.reader.sample();
        self.evaluation = evaluate(&self.order, &self.snapshot, &self.context);
        self.notify();
        &self.evaluation
    }

    /// Change an item's quantity by `delta` (the +/- buttons).
    pub fn adjust_item(&mut self, item_id: &str, delta: i64) -> Result<()> {
        self.require_item(item_id)?;
        let order = self.order.adjust(item_id, delta);
        self.replace_order(order);
        Ok(())
    }

    /// Add `quantity` more of an item. On overflow the order is left as is.
    pub fn add_item(&mut self, item_id: &str, quantity: u32) -> Result<()> {
        self.require_item(item_id)?;
        let order = self.order.add_quantity(item_id, quantity)?;
        self.replace_order(order);
        Ok(())
    }

    pub fn set_item(&mut self, item_id: &str, quantity: u32) -> Result<()> {
        self.require_item(item_id)?;
        let order = self.order.set_quantity(item_id, quantity);
        self.replace_order(order);
        Ok(())
    }

    pub fn toggle_extra(&mut self, extra_id: &str) -> Result<()> {
        if self.catalog.extra(extra_id).is_none() {
            return Err(ValidationError::UnknownExtra(extra_id.to_string()).into());
        }
        let order = self.order.toggle_extra(extra_id);
        self.replace_order(order);
        Ok(())
    }

    pub fn reset(&mut self) {
        let order = self.order.reset();
        self.replace_order(order);
    }

    /// Message for the current state, if the order has lines.
    pub fn message(&self) -> Option<String> {
        compose(
            &self.order,
            &self.evaluation,
            &self.snapshot,
            &self.catalog,
            &self.context,
        )
    }

    /// Re-evaluate and hand the message to the transport.
    ///
    /// A blocked order goes through the confirmation gate first; the
    /// evaluator itself never refuses.
    ///
    /// # Errors
    ///
    /// Returns the transport's error; the session moves to `Error`.
    pub fn send(
        &mut self,
        transport: &dyn Transport,
        gate: &mut dyn ConfirmationGate,
    ) -> Result<SendOutcome> {
        self.refresh();

        if self.order.is_empty() {
            tracing::warn!("send requested with an empty order");
            self.emit(Event::SendSkippedEmpty { at: Utc::now() });
            return Ok(SendOutcome::EmptyOrder);
        }

        if !self.evaluation.is_executable() {
            let reason = self.evaluation.reason;
            let advisory = reason
                .map(|r| r.advisory())
                .unwrap_or("Order placed outside regular hours.");
            if !gate.confirm(reason, advisory) {
                tracing::warn!(?reason, "blocked order not confirmed");
                self.emit(Event::SendDeclined {
                    reason,
                    at: Utc::now(),
                });
                return Ok(SendOutcome::Declined(self.evaluation.clone()));
            }
            tracing::warn!(?reason, "sending blocked order after confirmation");
        }

        self.status = SessionStatus::Sending;
        let Some(message) = self.message() else {
            self.status = SessionStatus::Error;
            return Err(CoreError::Custom("failed to compose order message".into()));
        };

        match transport.send(&message) {
            Ok(delivery) => {
                self.status = SessionStatus::Sent;
                tracing::info!(opened = delivery.opened, "order sent");
                self.emit(Event::OrderSent {
                    link: delivery.link.clone(),
                    opened: delivery.opened,
                    at: Utc::now(),
                });
                Ok(SendOutcome::Sent(delivery))
            }
            Err(e) => {
                self.status = SessionStatus::Error;
                tracing::error!(error = %e, "order transport failed");
                Err(e)
            }
        }
    }

    fn require_item(&self, item_id: &str) -> Result<(), ValidationError> {
        match self.catalog.item(item_id) {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownItem(item_id.to_string())),
        }
    }

    fn replace_order(&mut self, order: Order) {
        self.order = order;
        self.emit(Event::OrderChanged {
            lines: self.order.lines().len(),
            total_items: self.order.total_items(),
            extras: self.order.extra_ids().len(),
            at: Utc::now(),
        });
        self.refresh();
    }

    fn notify(&mut self) {
        tracing::debug!(
            time = %self.snapshot.time_label,
            market = %self.evaluation.market_state,
            points = self.evaluation.points,
            "evaluated"
        );
        self.hook.on_update(UiUpdate {
            order: &self.order,
            evaluation: &self.evaluation,
            snapshot: &self.snapshot,
            catalog: &self.catalog,
        });
        self.emit(Event::Evaluated {
            market_state: self.evaluation.market_state,
            reason: self.evaluation.reason,
            assigned_dispatch: self.evaluation.assigned_dispatch.clone(),
            points: self.evaluation.points,
            at: Utc::now(),
        });
    }

    fn emit(&mut self, event: Event) {
        self.hook.on_event(&event);
    }
}
