use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle as labelled in the spreadsheet.
///
/// The sheet stores the Vietnamese display labels verbatim; those labels are
/// the wire format. Labels the dashboard does not know map to
/// [`OrderStatus::Unknown`], which counts as a live (non-cancelled) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Chờ xử lý")]
    Pending,
    #[serde(rename = "Đang giao")]
    Processing,
    #[serde(rename = "Hoàn thành")]
    Completed,
    #[serde(rename = "Đã hủy")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Parses a sheet label, ignoring surrounding whitespace.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Chờ xử lý" => Self::Pending,
            "Đang giao" => Self::Processing,
            "Hoàn thành" => Self::Completed,
            "Đã hủy" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn is_cancelled(self) -> bool {
        self == Self::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier of the form `ORD-<epoch millis>`.
    pub id: String,
    pub customer_name: String,
    pub product_name: String,
    pub quantity: u32,
    /// Order total in the shop currency (VND), serialized as a number.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    /// `YYYY-MM-DD`, optionally followed by a `T`-separated time part.
    pub date: String,
}

impl Order {
    /// The calendar-day part of [`Order::date`].
    #[must_use]
    pub fn day(&self) -> &str {
        self.date.split('T').next().unwrap_or_default()
    }
}

/// An order that has not yet been assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub date: String,
}

impl NewOrder {
    #[must_use]
    pub fn with_id(self, id: String) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            product_name: self.product_name,
            quantity: self.quantity,
            total_amount: self.total_amount,
            status: self.status,
            date: self.date,
        }
    }
}
