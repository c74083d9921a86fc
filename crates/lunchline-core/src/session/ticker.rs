//! Periodic re-evaluation.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::controller::SessionController;
use super::hooks::UiHook;
use crate::clock::Clock;

/// Re-run the evaluation cycle every `period` until `shutdown` resolves.
///
/// The first cycle is assumed to have run already (`SessionController::start`
/// does it), so the first refresh happens one full period in. Returns the
/// number of ticks performed.
pub async fn run_ticker<C, H, F>(
    controller: &mut SessionController<C, H>,
    period: Duration,
    shutdown: F,
) -> u64
where
    C: Clock,
    H: UiHook,
    F: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval() fires immediately once
    interval.tick().await;

    tokio::pin!(shutdown);
    let mut ticks = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!(ticks, "ticker stopped");
                break;
            }
            _ = interval.tick() => {
                controller.refresh();
                ticks += 1;
            }
        }
    }
    ticks
}
