//! Dashboard figures derived from the order sheet.
//!
//! The sheet keeps no cost or inventory columns, so expense is estimated as a
//! fixed share of revenue and inventory value is a fixed figure.

use std::collections::BTreeMap;

use oms_core::{DailyRevenue, DashboardMetrics, Order, OrderStatus};
use rust_decimal::Decimal;

/// Share of revenue booked as expense (70 %).
const EXPENSE_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Stock value shown on the dashboard, in VND.
const INVENTORY_VALUE: Decimal = Decimal::from_parts(55_000_000, 0, 0, false, 0);

/// Number of most recent days kept by [`daily_revenue`].
pub const DAILY_REVENUE_WINDOW: usize = 15;

/// Computes the stat-card figures.
///
/// Revenue sums every order that is not cancelled. Debt sums orders still
/// being delivered.
#[must_use]
pub fn dashboard_metrics(orders: &[Order]) -> DashboardMetrics {
    let revenue = saturating_sum(
        orders
            .iter()
            .filter(|o| !o.status.is_cancelled())
            .map(|o| o.total_amount),
    );

    let expense = revenue.saturating_mul(EXPENSE_RATIO);

    let debt = saturating_sum(
        orders
            .iter()
            .filter(|o| o.status == OrderStatus::Processing)
            .map(|o| o.total_amount),
    );

    DashboardMetrics {
        revenue,
        net_income: revenue.saturating_sub(expense).normalize(),
        inventory_value: INVENTORY_VALUE,
        debt,
    }
}

/// Sheet amounts are untrusted; totals clamp at the `Decimal` range instead
/// of overflowing.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Groups non-cancelled revenue by calendar day, oldest first, keeping the
/// last [`DAILY_REVENUE_WINDOW`] days.
#[must_use]
pub fn daily_revenue(orders: &[Order]) -> Vec<DailyRevenue> {
    let mut by_day: BTreeMap<&str, Decimal> = BTreeMap::new();
    for order in orders.iter().filter(|o| !o.status.is_cancelled()) {
        let total = by_day.entry(order.day()).or_default();
        *total = total.saturating_add(order.total_amount);
    }

    let skip = by_day.len().saturating_sub(DAILY_REVENUE_WINDOW);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, amount)| DailyRevenue {
            date: date.to_owned(),
            amount,
        })
        .collect()
}
