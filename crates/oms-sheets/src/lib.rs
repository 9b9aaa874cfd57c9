//! Client and normalizers for the spreadsheet-backed row-store.
//!
//! The script endpoint answers `?action=<name>` requests with loosely-typed
//! JSON. [`normalize`] turns those rows into the strict types from
//! [`oms_core`]; [`SheetClient`] handles transport.

pub mod cell;
pub mod client;
pub mod error;
pub mod normalize;
pub mod parse;
pub(crate) mod retry;
pub mod stats;
pub mod types;

pub use client::{SheetClient, SheetClientOptions};
pub use error::SheetError;
pub use normalize::{looks_shifted, normalize_order, normalize_store, normalize_stores, NormalizeOptions};
pub use parse::parse_sheet_number;
pub use stats::{daily_revenue, dashboard_metrics};
pub use types::{RawOrder, RawStoreRow};
