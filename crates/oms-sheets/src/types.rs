//! Row shapes returned by the script endpoint.
//!
//! ## Observed shape of `getStores`
//!
//! A JSON array of objects keyed by the sheet header row: `id`, `name`,
//! `url`, `region`, `status`, `listing`, `sale`. Cells keep whatever type the
//! sheet holds, so `listing` may be `120`, `"1,250"`, or `""`.
//!
//! Deployments that predate the flat columns nest per-role counters instead:
//! `{"roles": {"idea": "ACTIVE", "support": 120, "designer": 45}}`, with the
//! region code left in `status`.
//!
//! When a `region` column was inserted into the sheet but the script was not
//! redeployed, values arrive one column to the left of their header. See
//! [`crate::normalize::looks_shifted`].
//!
//! ## Observed shape of `getOrders`
//!
//! A JSON array of camelCase objects (`customerName`, `totalAmount`, ...).
//! `totalAmount` and `quantity` may be numbers or formatted strings.

use oms_core::Store;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One store row exactly as the script returned it.
///
/// Every field is `None` when the key is absent and `Some(Value::Null)` when
/// it is present with `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStoreRow {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub region: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub listing: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub sale: Option<Value>,
    /// Legacy per-role counters (`idea`, `support`, `designer`).
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub roles: Option<Value>,
}

impl RawStoreRow {
    /// Reads one array element. Elements that are not JSON objects become an
    /// empty row so the output keeps one entry per input element.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::debug!(row = %value, "store row is not an object; using empty row");
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "store row did not deserialize; using empty row");
            Self::default()
        })
    }
}

/// Re-expresses a normalized store as a current-contract flat row.
impl From<&Store> for RawStoreRow {
    fn from(store: &Store) -> Self {
        let text = |s: &str| Some(Value::String(s.to_owned()));
        Self {
            id: text(&store.id),
            name: text(&store.name),
            url: text(&store.url),
            region: text(&store.region),
            status: text(&store.status),
            listing: text(&store.listing),
            sale: text(&store.sale),
            roles: None,
        }
    }
}

/// One order row exactly as the script returned it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub customer_name: Option<Value>,
    #[serde(default)]
    pub product_name: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub total_amount: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
}

/// Keeps explicit `null` as `Some(Value::Null)` instead of collapsing it into
/// `None`; paired with `#[serde(default)]` so absent keys stay `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
