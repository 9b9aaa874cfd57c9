//! Normalization from raw row-store shapes to [`oms_core::Store`] and
//! [`oms_core::Order`].
//!
//! Store rows go through column-drift repair before their counters are
//! parsed:
//!
//! 1. Seed `region`, `status`, `listing`, `sale` from the flat columns.
//! 2. Legacy rows (a `roles` mapping is present) remap the role counters into
//!    the flat columns and salvage a short `status` as the region code.
//! 3. Flat rows that [`looks_shifted`] while `region` is empty are shifted
//!    one column to the left.
//! 4. An empty `status` becomes [`DEFAULT_STORE_STATUS`].
//! 5. `listing` and `sale` become canonical decimal strings.
//!
//! Store normalization never fails. The worst outcome of a heuristic misfire
//! is a wrongly shifted row, never a dropped one.

use oms_core::{Order, OrderStatus, Store, DEFAULT_STORE_STATUS};
use serde_json::Value;

use crate::cell::{is_truthy, to_text, truthy};
use crate::parse::{parse_sheet_decimal, parse_sheet_number, parse_sheet_quantity};
use crate::types::{RawOrder, RawStoreRow};

/// Longest `status` text that a legacy row salvages as a region code.
const LEGACY_REGION_MAX_CHARS: usize = 5;

/// Status tokens that, found in `listing`, mean the row was read one column
/// to the left.
const STATUS_TOKENS: [&str; 3] = ["LIVE", "ACTIVE", "SUSPEND"];

/// Switches for the best-effort drift heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Apply the left-shift repair to flat rows that [`looks_shifted`].
    pub detect_column_shift: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            detect_column_shift: true,
        }
    }
}

/// Normalizes every element of a `getStores` reply, preserving length and order.
#[must_use]
pub fn normalize_stores(rows: Vec<Value>, options: NormalizeOptions) -> Vec<Store> {
    rows.into_iter()
        .map(|value| normalize_store(&RawStoreRow::from_value(value), options))
        .collect()
}

/// Normalizes one raw store row into a fully populated [`Store`].
#[must_use]
pub fn normalize_store(row: &RawStoreRow, options: NormalizeOptions) -> Store {
    let mut columns = Columns::seed(row);

    match RowShape::of(row) {
        RowShape::Legacy(roles) => columns.apply_legacy_roles(&roles),
        RowShape::Flat => {
            if options.detect_column_shift
                && !is_truthy(columns.region.as_ref())
                && columns.looks_shifted()
            {
                tracing::debug!(
                    id = %to_text(row.id.as_ref()),
                    status = %to_text(columns.status.as_ref()),
                    listing = %to_text(columns.listing.as_ref()),
                    "store row looks column-shifted; shifting left"
                );
                columns.shift_left();
            }
        }
    }

    let status = if is_truthy(columns.status.as_ref()) {
        to_text(columns.status.as_ref())
    } else {
        DEFAULT_STORE_STATUS.to_owned()
    };

    Store {
        id: to_text(row.id.as_ref()),
        name: to_text(row.name.as_ref()),
        url: to_text(row.url.as_ref()),
        region: to_text(columns.region.as_ref()),
        status,
        listing: parse_sheet_number(columns.listing.as_ref()),
        sale: parse_sheet_number(columns.sale.as_ref()),
    }
}

/// Returns `true` when a flat row's values look like they were read one
/// column to the left of their headers.
///
/// Either signal is enough, compared case-insensitively after trimming:
/// - `status` is exactly two ASCII letters (a region code such as `"US"`).
/// - `listing` is a status token (`LIVE`, `ACTIVE`, `SUSPEND`).
///
/// This only inspects values; whether a shift is applied also depends on
/// `region` being empty and on [`NormalizeOptions::detect_column_shift`].
#[must_use]
pub fn looks_shifted(row: &RawStoreRow) -> bool {
    Columns::seed(row).looks_shifted()
}

/// Normalizes one raw order row. Rows without an id are skipped.
#[must_use]
pub fn normalize_order(raw: RawOrder) -> Option<Order> {
    let id = to_text(raw.id.as_ref()).trim().to_owned();
    if id.is_empty() {
        return None;
    }

    Some(Order {
        id,
        customer_name: to_text(raw.customer_name.as_ref()),
        product_name: to_text(raw.product_name.as_ref()),
        quantity: parse_sheet_quantity(raw.quantity.as_ref()),
        total_amount: parse_sheet_decimal(raw.total_amount.as_ref()),
        status: OrderStatus::from_label(&to_text(raw.status.as_ref())),
        date: to_text(raw.date.as_ref()).trim().to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Internal working state
// ---------------------------------------------------------------------------

/// Which response contract produced a row.
enum RowShape<'a> {
    /// Pre-region deployments that nest counters under `roles`.
    Legacy(LegacyRoles<'a>),
    /// Current contract with flat columns.
    Flat,
}

impl<'a> RowShape<'a> {
    fn of(row: &'a RawStoreRow) -> Self {
        match row.roles.as_ref() {
            Some(roles) if is_truthy(Some(roles)) => Self::Legacy(LegacyRoles {
                idea: roles.get("idea"),
                support: roles.get("support"),
                designer: roles.get("designer"),
            }),
            _ => Self::Flat,
        }
    }
}

struct LegacyRoles<'a> {
    idea: Option<&'a Value>,
    support: Option<&'a Value>,
    designer: Option<&'a Value>,
}

/// The four drift-prone columns while they are being repaired.
struct Columns {
    region: Option<Value>,
    status: Option<Value>,
    listing: Option<Value>,
    sale: Option<Value>,
}

impl Columns {
    fn seed(row: &RawStoreRow) -> Self {
        Self {
            region: truthy(row.region.as_ref()),
            status: truthy(row.status.as_ref()),
            listing: row.listing.clone(),
            sale: row.sale.clone(),
        }
    }

    fn apply_legacy_roles(&mut self, roles: &LegacyRoles<'_>) {
        // Legacy rows have no region column; a short status is the region code.
        let status_text = to_text(self.status.as_ref()).trim().to_owned();
        if !is_truthy(self.region.as_ref())
            && status_text.chars().count() <= LEGACY_REGION_MAX_CHARS
        {
            self.region = Some(Value::String(status_text));
        }

        if is_truthy(roles.idea) {
            self.status = roles.idea.cloned();
        }
        if let Some(support) = roles.support {
            self.listing = Some(support.clone());
        }
        if let Some(designer) = roles.designer {
            self.sale = Some(designer.clone());
        }
    }

    fn looks_shifted(&self) -> bool {
        let status = to_text(self.status.as_ref()).trim().to_ascii_uppercase();
        let listing = to_text(self.listing.as_ref()).trim().to_ascii_uppercase();

        let status_is_region_code =
            status.len() == 2 && status.bytes().all(|b| b.is_ascii_uppercase());
        let listing_is_status = STATUS_TOKENS.contains(&listing.as_str());

        status_is_region_code || listing_is_status
    }

    fn shift_left(&mut self) {
        self.region = self.status.take();
        self.status = self.listing.take();
        self.listing = self.sale.take();
        self.sale = Some(Value::from(0));
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
