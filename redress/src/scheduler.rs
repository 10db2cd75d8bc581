//! Recurring sweep scheduling.
//!
//! One task, one loop: the next tick is not processed until the previous
//! sweep finished, so sweeps never overlap.

use std::time::Duration;

use tokio::sync::watch;

use crate::escalation::EscalationSweeper;

/// Run `sweeper` once per `interval` until `shutdown` flips to true.
///
/// The first sweep runs immediately on startup; missed ticks are delayed
/// rather than bursted.
pub async fn run_sweep_loop(
    sweeper: EscalationSweeper,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match sweeper.sweep(chrono::Utc::now()) {
                    Ok(report) if report.escalated > 0 => {
                        tracing::info!(
                            "escalation sweep: {} of {} overdue complaints escalated",
                            report.escalated,
                            report.examined
                        );
                    }
                    Ok(_) => {
                        tracing::debug!("escalation sweep: nothing to escalate");
                    }
                    Err(e) => {
                        tracing::warn!("escalation sweep failed: {}", e);
                    }
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow_and_update() {
                    tracing::info!("sweep loop shutting down");
                    break;
                }
            }
        }
    }
}
