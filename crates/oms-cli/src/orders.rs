//! Order and dashboard-statistics command handlers.

use clap::ValueEnum;
use oms_core::{DailyRevenue, DashboardMetrics, NewOrder, OrderStatus};
use oms_sheets::{daily_revenue, dashboard_metrics, SheetClient};
use serde::Serialize;

use crate::print_json;

/// Order status as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl From<StatusArg> for OrderStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Processing => Self::Processing,
            StatusArg::Completed => Self::Completed,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

/// What `stats` prints: the stat cards and the revenue chart series.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsReport {
    pub metrics: DashboardMetrics,
    pub daily_revenue: Vec<DailyRevenue>,
}

impl StatsReport {
    pub(crate) fn from_orders(orders: &[oms_core::Order]) -> Self {
        Self {
            metrics: dashboard_metrics(orders),
            daily_revenue: daily_revenue(orders),
        }
    }
}

/// Today's local date as `YYYY-MM-DD`.
pub(crate) fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

pub(crate) async fn run_orders_list(client: &SheetClient) -> anyhow::Result<()> {
    let orders = client.get_orders().await?;
    tracing::info!(count = orders.len(), "orders loaded");
    print_json(&orders)
}

pub(crate) async fn run_stats(client: &SheetClient) -> anyhow::Result<()> {
    let orders = client.get_orders().await?;
    print_json(&StatsReport::from_orders(&orders))
}

/// Records an order and prints it with its assigned id.
///
/// # Errors
///
/// Returns an error if the customer is blank, the date is not `YYYY-MM-DD`,
/// or the script call fails.
pub(crate) async fn run_order_add(client: &SheetClient, order: NewOrder) -> anyhow::Result<()> {
    if order.customer_name.trim().is_empty() {
        anyhow::bail!("customer name must not be empty");
    }
    chrono::NaiveDate::parse_from_str(&order.date, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid order date '{}': {e}", order.date))?;

    let order = client.add_order(order).await?;
    print_json(&order)
}
