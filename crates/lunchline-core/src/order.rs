//! Order aggregate.
//!
//! A plain value. Every operation returns a new `Order`; the caller swaps it in.
//! Lines are kept sorted by item id so two orders with the same content compare
//! equal regardless of the order in which items were picked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ValidationError;

/// One menu item and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: String,
    /// Always > 0; a zero quantity removes the line.
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    lines: Vec<OrderLine>,
    extra_ids: BTreeSet<String>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn extra_ids(&self) -> &BTreeSet<String> {
        &self.extra_ids
    }

    /// Set the quantity of an item. Zero removes the line.
    pub fn set_quantity(&self, item_id: &str, quantity: u32) -> Self {
        let mut lines: Vec<OrderLine> = self
            .lines
            .iter()
            .filter(|l| l.item_id != item_id)
            .cloned()
            .collect();
        if quantity > 0 {
            let at = lines.partition_point(|l| l.item_id.as_str() < item_id);
            lines.insert(
                at,
                OrderLine {
                    item_id: item_id.to_string(),
                    quantity,
                },
            );
        }
        Self {
            lines,
            extra_ids: self.extra_ids.clone(),
        }
    }

    /// Add `quantity` more of an item.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidValue` if the new quantity does not fit
    /// in a `u32`.
    pub fn add_quantity(&self, item_id: &str, quantity: u32) -> Result<Self, ValidationError> {
        let total = self
            .quantity_of(item_id)
            .checked_add(quantity)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: item_id.to_string(),
                message: format!("quantity overflows (max {})", u32::MAX),
            })?;
        Ok(self.set_quantity(item_id, total))
    }

    /// Add `delta` to the current quantity, clamped to `0..=u32::MAX`.
    pub fn adjust(&self, item_id: &str, delta: i64) -> Self {
        let current = i64::from(self.quantity_of(item_id));
        let next = (current + delta).clamp(0, i64::from(u32::MAX));
        // clamped into u32 range above
        self.set_quantity(item_id, next as u32)
    }

    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item_id == item_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Select the extra if absent, deselect it if present.
    pub fn toggle_extra(&self, extra_id: &str) -> Self {
        let mut extra_ids = self.extra_ids.clone();
        if !extra_ids.remove(extra_id) {
            extra_ids.insert(extra_id.to_string());
        }
        Self {
            lines: self.lines.clone(),
            extra_ids,
        }
    }

    pub fn has_extra(&self, extra_id: &str) -> bool {
        self.extra_ids.contains(extra_id)
    }

    /// An order with no lines is empty even if extras are selected.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }
}
