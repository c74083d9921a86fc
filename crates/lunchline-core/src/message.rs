//! Message composer.
//!
//! Renders an order and its evaluation as the plain-text chat message sent
//! to the kitchen. The composer decides what to print from the evaluation
//! (e.g. whether a dispatch time exists) and uses the session context only
//! for the location tag and for suppressing the out-of-hours note onsite.

use std::fmt::{self, Write};

use crate::catalog::Catalog;
use crate::clock::TimeSnapshot;
use crate::order::Order;
use crate::rules::{Evaluation, SessionContext};

const TITLE: &str = "*🍽️ LUNCH ORDER*";
const ONSITE_TAG: &str = "🏠 IN THE HOUSE";
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━";
const OUT_OF_HOURS_NOTE: &str = "⚠️ *Note:* Order placed outside regular hours";
const SIGNATURE: &str = "_Sent from the lunch order app_";

/// Compose the order message, or `None` if there is nothing to announce.
///
/// The returned text is already normalized for transport.
pub fn compose(
    order: &Order,
    evaluation: &Evaluation,
    snapshot: &TimeSnapshot,
    catalog: &Catalog,
    context: &SessionContext,
) -> Option<String> {
    if order.is_empty() {
        return None;
    }
    let mut out = String::new();
    write_message(&mut out, order, evaluation, snapshot, catalog, context).ok()?;
    Some(normalize(out.trim()))
}

fn write_message(
    out: &mut impl Write,
    order: &Order,
    evaluation: &Evaluation,
    snapshot: &TimeSnapshot,
    catalog: &Catalog,
    context: &SessionContext,
) -> fmt::Result {
    writeln!(out, "{TITLE}")?;
    if context.is_onsite() {
        writeln!(out, "{ONSITE_TAG}")?;
    }

    writeln!(out)?;
    writeln!(out, "📅 Date: {}", snapshot.date_label)?;
    writeln!(out, "⏰ Time: {}", snapshot.time_label)?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "*📦 ORDER:*")?;

    let mut lines: Vec<_> = order.lines().iter().collect();
    lines.sort_by_key(|l| {
        (
            catalog.item_position(&l.item_id).unwrap_or(usize::MAX),
            l.item_id.clone(),
        )
    });
    for line in lines {
        match catalog.item(&line.item_id) {
            Some(item) => {
                write!(out, "• {} × {} {}", line.quantity, item.icon, item.name)?;
                match item.todays_detail.as_deref().filter(|d| !d.is_empty()) {
                    Some(detail) => writeln!(out, " — {detail}")?,
                    None => writeln!(out)?,
                }
            }
            None => writeln!(out, "• {} × {}", line.quantity, line.item_id)?,
        }
    }

    if !order.extra_ids().is_empty() {
        writeln!(out)?;
        writeln!(out, "*➕ EXTRAS:*")?;
        let mut extras: Vec<_> = order.extra_ids().iter().collect();
        extras.sort_by_key(|id| {
            (
                catalog.extra_position(id).unwrap_or(usize::MAX),
                id.to_string(),
            )
        });
        for id in extras {
            match catalog.extra(id) {
                Some(extra) => writeln!(out, "• {} {}", extra.icon, extra.name)?,
                None => writeln!(out, "• {id}")?,
            }
        }
    }

    if let Some(dispatch) = &evaluation.assigned_dispatch {
        writeln!(out)?;
        writeln!(out, "🚚 *Estimated dispatch:* {dispatch}")?;
    } else if !context.is_onsite() {
        writeln!(out)?;
        writeln!(out, "{OUT_OF_HOURS_NOTE}")?;
    }

    if evaluation.points > 0 {
        writeln!(out, "⭐ *Points:* {}", evaluation.points)?;
    }

    writeln!(out)?;
    write!(out, "{SIGNATURE}")
}

/// Make text transport-safe: no-break spaces become spaces and the
/// box-drawing rule becomes ASCII dashes.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{00A0}' => ' ',
            '━' => '-',
            other => other,
        })
        .collect()
}
