//! HTTP client for the spreadsheet script endpoint.
//!
//! Every call hits the same URL with `?action=<name>`. Reads are `GET`s;
//! writes are `POST`s whose JSON body repeats the action next to the payload.
//! The body is sent as `text/plain` because the script host rejects CORS
//! preflights, which a JSON content type would trigger.

mod endpoint;

use std::time::Duration;

use oms_core::{AppConfig, AuthResponse, NewOrder, NewStore, NewUser, Order, Store};
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cell;
use crate::error::SheetError;
use crate::normalize::{normalize_order, normalize_stores, NormalizeOptions};
use crate::retry::retry_with_backoff;
use crate::types::RawOrder;

const TEXT_PLAIN_UTF8: &str = "text/plain;charset=utf-8";

/// Reported in place of the caller's IP when the lookup fails.
const UNKNOWN_IP: &str = "Unknown";

/// Transport and normalization settings for a [`SheetClient`].
#[derive(Debug, Clone)]
pub struct SheetClientOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_secs * 2^(n-1)`.
    pub backoff_base_secs: u64,
    /// Endpoint answering `{"ip": "..."}`; `None` skips the lookup on login.
    pub ip_lookup_url: Option<String>,
    pub normalize: NormalizeOptions,
}

impl Default for SheetClientOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "oms/0.1 (order-dashboard)".to_owned(),
            max_retries: 2,
            backoff_base_secs: 1,
            ip_lookup_url: None,
            normalize: NormalizeOptions::default(),
        }
    }
}

impl SheetClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
            ip_lookup_url: Some(config.ip_lookup_url.clone()).filter(|u| !u.trim().is_empty()),
            normalize: NormalizeOptions {
                detect_column_shift: config.detect_column_shift,
            },
        }
    }
}

/// Client for the row-store script endpoint.
///
/// The endpoint is injected at construction; point it at a mock server in
/// tests.
pub struct SheetClient {
    client: Client,
    endpoint: Url,
    max_retries: u32,
    backoff_base_secs: u64,
    ip_lookup_url: Option<String>,
    normalize: NormalizeOptions,
}

impl SheetClient {
    /// Creates a client for the script deployed at `api_url`.
    ///
    /// # Errors
    ///
    /// - [`SheetError::MissingEndpoint`] if `api_url` is blank, still the
    ///   deployment placeholder, or not an absolute URL.
    /// - [`SheetError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(api_url: &str, options: SheetClientOptions) -> Result<Self, SheetError> {
        let endpoint = endpoint::parse_endpoint(api_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            max_retries: options.max_retries,
            backoff_base_secs: options.backoff_base_secs,
            ip_lookup_url: options.ip_lookup_url,
            normalize: options.normalize,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`SheetClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SheetError> {
        Self::new(
            &config.sheet_api_url,
            SheetClientOptions::from_app_config(config),
        )
    }

    // -----------------------------------------------------------------------
    // Stores
    // -----------------------------------------------------------------------

    /// Fetches and normalizes every store row.
    ///
    /// A reply that is not a JSON array yields an empty list.
    ///
    /// # Errors
    ///
    /// Transport, status, and script errors from [`SheetClient::call`].
    pub async fn get_stores(&self) -> Result<Vec<Store>, SheetError> {
        let body = self.call("getStores", Method::GET, None).await?;
        let Value::Array(rows) = body else {
            tracing::warn!(action = "getStores", "reply is not an array; treating as empty");
            return Ok(Vec::new());
        };

        let stores = normalize_stores(rows, self.normalize);
        tracing::debug!(count = stores.len(), "fetched stores");
        Ok(stores)
    }

    /// Creates a store with a fresh `ST-` id and zeroed counters.
    ///
    /// # Errors
    ///
    /// Transport, status, and script errors from [`SheetClient::call`].
    pub async fn add_store(&self, new_store: NewStore) -> Result<Store, SheetError> {
        let store = Store {
            id: store_id(chrono::Utc::now().timestamp_millis()),
            name: new_store.name,
            url: new_store.url,
            region: new_store.region,
            status: oms_core::DEFAULT_STORE_STATUS.to_owned(),
            listing: "0".to_owned(),
            sale: "0".to_owned(),
        };

        let payload = to_payload("addStore", &store)?;
        self.call("addStore", Method::POST, Some(payload)).await?;
        tracing::info!(id = %store.id, name = %store.name, "store added");
        Ok(store)
    }

    /// Deletes the store with `id`.
    ///
    /// # Errors
    ///
    /// - [`SheetError::Rejected`] if the script does not confirm with
    ///   `success: true`.
    /// - Transport, status, and script errors from [`SheetClient::call`].
    pub async fn delete_store(&self, id: &str) -> Result<(), SheetError> {
        let payload = serde_json::json!({ "id": id });
        let reply = self.call("deleteStore", Method::POST, Some(payload)).await?;

        if reply.get("success").and_then(Value::as_bool) == Some(true) {
            tracing::info!(id, "store deleted");
            return Ok(());
        }

        Err(SheetError::Rejected {
            action: "deleteStore".to_owned(),
            message: "store could not be deleted; check the script deployment".to_owned(),
        })
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    /// Fetches every order row. Rows without an id are skipped.
    ///
    /// # Errors
    ///
    /// Transport, status, and script errors from [`SheetClient::call`].
    pub async fn get_orders(&self) -> Result<Vec<Order>, SheetError> {
        let body = self.call("getOrders", Method::GET, None).await?;
        let Value::Array(rows) = body else {
            tracing::warn!(action = "getOrders", "reply is not an array; treating as empty");
            return Ok(Vec::new());
        };

        let total = rows.len();
        let orders: Vec<Order> = rows
            .into_iter()
            .filter_map(|row| serde_json::from_value::<RawOrder>(row).ok())
            .filter_map(normalize_order)
            .collect();

        if orders.len() < total {
            tracing::warn!(
                skipped = total - orders.len(),
                total,
                "skipped malformed order rows"
            );
        }
        Ok(orders)
    }

    /// Creates an order with a fresh `ORD-` id.
    ///
    /// # Errors
    ///
    /// Transport, status, and script errors from [`SheetClient::call`].
    pub async fn add_order(&self, new_order: NewOrder) -> Result<Order, SheetError> {
        let order = new_order.with_id(format!(
            "ORD-{}",
            chrono::Utc::now().timestamp_millis()
        ));
        let payload = to_payload("addOrder", &order)?;
        self.call("addOrder", Method::POST, Some(payload)).await?;
        tracing::info!(id = %order.id, "order added");
        Ok(order)
    }

    // -----------------------------------------------------------------------
    // Accounts
    // -----------------------------------------------------------------------

    /// Signs in with trimmed credentials, reporting the caller's public IP.
    ///
    /// Wrong credentials are a normal outcome and come back as an
    /// [`AuthResponse`] with `success: false`.
    ///
    /// # Errors
    ///
    /// - [`SheetError::StaleDeployment`] if the script answers with `{}`.
    /// - Transport and status errors from [`SheetClient::call`].
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, SheetError> {
        let username = username.trim();
        let ip = self.client_ip().await;
        tracing::info!(username, ip = %ip, "signing in");

        let payload = serde_json::json!({
            "username": username,
            "password": password.trim(),
            "ip": ip,
        });
        let reply = match self.call("login", Method::POST, Some(payload)).await {
            Ok(reply) => reply,
            Err(SheetError::Script { message, .. }) => {
                tracing::warn!(username, error = %message, "login rejected");
                return Ok(AuthResponse::failure(message));
            }
            Err(e) => return Err(e),
        };

        if reply.as_object().is_some_and(Map::is_empty) {
            return Err(SheetError::StaleDeployment);
        }

        let response = auth_response("login", reply)?;
        if response.success && response.user.is_some() {
            return Ok(response);
        }

        tracing::warn!(username, "login failed");
        Ok(AuthResponse::failure(
            response
                .error
                .unwrap_or_else(|| "login failed for an unknown reason".to_owned()),
        ))
    }

    /// Creates a dashboard account.
    ///
    /// # Errors
    ///
    /// Transport, status, and deserialization errors from
    /// [`SheetClient::call`]. Script-level refusals are returned as a failed
    /// [`AuthResponse`].
    pub async fn create_user(&self, new_user: &NewUser) -> Result<AuthResponse, SheetError> {
        let payload = to_payload("createUser", new_user)?;
        match self.call("createUser", Method::POST, Some(payload)).await {
            Ok(reply) => auth_response("createUser", reply),
            Err(SheetError::Script { message, .. }) => Ok(AuthResponse::failure(message)),
            Err(e) => Err(e),
        }
    }

    /// Looks up the caller's public IP, falling back to `"Unknown"`.
    async fn client_ip(&self) -> String {
        let Some(url) = self.ip_lookup_url.as_deref() else {
            return UNKNOWN_IP.to_owned();
        };

        let lookup = async {
            let reply = self.client.get(url).send().await?.error_for_status()?;
            reply.json::<Value>().await
        };

        match lookup.await {
            Ok(body) => body
                .get("ip")
                .and_then(Value::as_str)
                .filter(|ip| !ip.is_empty())
                .map_or_else(|| UNKNOWN_IP.to_owned(), str::to_owned),
            Err(e) => {
                tracing::warn!(error = %e, "could not look up client IP");
                UNKNOWN_IP.to_owned()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    /// Sends one action to the script and returns its JSON reply. Transient
    /// failures of `GET` actions are retried; `POST` actions are sent once.
    ///
    /// # Errors
    ///
    /// - [`SheetError::RateLimited`]: HTTP 429 after all retries.
    /// - [`SheetError::NotFound`]: HTTP 404.
    /// - [`SheetError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`SheetError::Http`]: network or TLS failure after all retries.
    /// - [`SheetError::Deserialize`]: the body is not JSON (typically an
    ///   HTML error page from the script host).
    /// - [`SheetError::Script`]: the reply carries an `error` field.
    async fn call(
        &self,
        action: &str,
        method: Method,
        payload: Option<Value>,
    ) -> Result<Value, SheetError> {
        let body = payload.map(|p| request_body(action, p).to_string());

        // Writes append rows, so a resend after a lost reply would duplicate them.
        let max_retries = if method == Method::GET {
            self.max_retries
        } else {
            0
        };

        let reply = retry_with_backoff(max_retries, self.backoff_base_secs, || {
            let url = endpoint::action_url(&self.endpoint, action, &endpoint::nonce());
            let method = method.clone();
            let body = body.clone();
            async move {
                let mut request = self.client.request(method, url);
                if let Some(body) = body {
                    request = request
                        .header(reqwest::header::CONTENT_TYPE, TEXT_PLAIN_UTF8)
                        .body(body);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(0);
                    return Err(SheetError::RateLimited {
                        domain: endpoint::domain(&self.endpoint),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(SheetError::NotFound {
                        url: self.endpoint.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(SheetError::UnexpectedStatus {
                        status: status.as_u16(),
                        action: action.to_owned(),
                    });
                }

                let text = response.text().await?;
                serde_json::from_str::<Value>(&text).map_err(|e| {
                    tracing::error!(action, body = %truncate(&text, 200), "reply is not JSON");
                    SheetError::Deserialize {
                        context: format!("{action} reply"),
                        source: e,
                    }
                })
            }
        })
        .await?;

        if let Some(error) = reply.get("error").filter(|e| cell::is_truthy(Some(e))) {
            let message = cell::to_text(Some(error));
            tracing::error!(action, error = %message, "script reported an error");
            return Err(SheetError::Script {
                action: action.to_owned(),
                message,
            });
        }

        Ok(reply)
    }
}

/// `ST-` followed by the last six digits of the creation timestamp.
fn store_id(epoch_millis: i64) -> String {
    format!("ST-{:06}", epoch_millis.rem_euclid(1_000_000))
}

/// Merges `{"action": action}` with the payload's top-level fields.
fn request_body(action: &str, payload: Value) -> Value {
    let mut body = Map::new();
    body.insert("action".to_owned(), Value::String(action.to_owned()));
    match payload {
        Value::Object(fields) => body.extend(fields),
        Value::Null => {}
        other => {
            body.insert("data".to_owned(), other);
        }
    }
    Value::Object(body)
}

fn to_payload<T: Serialize>(action: &str, value: &T) -> Result<Value, SheetError> {
    serde_json::to_value(value).map_err(|e| SheetError::Serialize {
        context: format!("{action} payload"),
        source: e,
    })
}

fn auth_response(action: &str, reply: Value) -> Result<AuthResponse, SheetError> {
    serde_json::from_value(reply).map_err(|e| SheetError::Deserialize {
        context: format!("{action} reply"),
        source: e,
    })
}

fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
