use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline figures shown on the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub inventory_value: Decimal,
    /// Outstanding value of orders still being delivered.
    #[serde(with = "rust_decimal::serde::float")]
    pub debt: Decimal,
}

/// Revenue total for one calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}
