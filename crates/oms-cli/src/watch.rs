//! Periodic dashboard refresh.

use std::time::Duration;

use oms_core::Store;
use oms_sheets::SheetClient;
use serde::Serialize;

use crate::orders::StatsReport;
use crate::print_json;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    fetched_at: String,
    stores: Vec<Store>,
    #[serde(flatten)]
    stats: StatsReport,
}

/// Prints a fresh snapshot every `interval_secs` until Ctrl-C.
///
/// A failed refresh is logged and retried on the next tick.
///
/// # Errors
///
/// Returns an error if `interval_secs` is zero or the Ctrl-C handler cannot
/// be installed.
pub(crate) async fn run_watch(client: &SheetClient, interval_secs: u64) -> anyhow::Result<()> {
    if interval_secs == 0 {
        anyhow::bail!("refresh interval must be at least one second");
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tracing::info!(interval_secs, "watching dashboard; press Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match refresh(client).await {
                    Ok(snapshot) => print_json(&snapshot)?,
                    Err(e) => tracing::warn!(error = %e, "refresh failed"),
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("received ctrl-c, stopping watch");
                return Ok(());
            }
        }
    }
}

async fn refresh(client: &SheetClient) -> Result<Snapshot, oms_sheets::SheetError> {
    let (stores, orders) = tokio::join!(client.get_stores(), client.get_orders());
    let stores = stores?;
    let orders = orders?;
    tracing::debug!(stores = stores.len(), orders = orders.len(), "refreshed");

    Ok(Snapshot {
        fetched_at: chrono::Utc::now().to_rfc3339(),
        stores,
        stats: StatsReport::from_orders(&orders),
    })
}
