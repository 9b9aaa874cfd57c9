use serde::{Deserialize, Serialize};

/// Status assigned to a store whose row carries no usable status value.
pub const DEFAULT_STORE_STATUS: &str = "LIVE";

/// A storefront row from the spreadsheet, normalized so every field holds a
/// defined value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// External identifier, e.g. `"ST-482913"`. Never regenerated once assigned.
    pub id: String,
    pub name: String,
    /// Storefront link as typed into the sheet; not validated.
    pub url: String,
    /// Free-form region code or label, e.g. `"US"`. May be empty.
    pub region: String,
    /// Free-form status such as `"LIVE"` or `"SUSPEND"`.
    pub status: String,
    /// Listing count as a canonical decimal string, e.g. `"1250"`.
    pub listing: String,
    /// Sale count as a canonical decimal string.
    pub sale: String,
}

impl Store {
    /// Listing count as a number. Normalized stores always parse.
    #[must_use]
    pub fn listing_count(&self) -> f64 {
        self.listing.parse().unwrap_or(0.0)
    }

    /// Sale count as a number. Normalized stores always parse.
    #[must_use]
    pub fn sale_count(&self) -> f64 {
        self.sale.parse().unwrap_or(0.0)
    }
}

/// Input for creating a store. The remaining fields are assigned on creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewStore {
    pub name: String,
    pub url: String,
    pub region: String,
}
