//! Background removal of expired refresh tokens
//!
//! Expired tokens are already rejected and deleted when presented; the sweep
//! only reclaims rows that are never presented again.

use std::time::Duration;

use blog_service::{AuthService, ServiceContext};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Spawn the periodic sweep
///
/// The task runs until `shutdown` changes or its sender is dropped.
pub fn spawn_token_sweeper(
    ctx: ServiceContext,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = AuthService::new(&ctx).purge_expired_tokens().await {
                        tracing::warn!(error = %e, "Expired token sweep failed");
                    }
                }
                _ = shutdown.changed() => {
                    tracing::debug!("Token sweeper stopping");
                    break;
                }
            }
        }
    })
}
