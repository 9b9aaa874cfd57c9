//! Endpoint validation and per-request URL construction.

use reqwest::Url;

use crate::error::SheetError;

/// Marker left in the endpoint setting by the deployment template until a
/// real web-app URL is pasted in.
const PLACEHOLDER_MARKER: &str = "HAY_DAN_URL";

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Parses the configured script endpoint.
///
/// # Errors
///
/// Returns [`SheetError::MissingEndpoint`] when the setting is blank, still
/// holds the template placeholder, or is not an absolute URL.
pub(crate) fn parse_endpoint(api_url: &str) -> Result<Url, SheetError> {
    let trimmed = api_url.trim();
    if trimmed.is_empty() {
        return Err(SheetError::MissingEndpoint {
            reason: "endpoint URL is empty".to_owned(),
        });
    }
    if trimmed.contains(PLACEHOLDER_MARKER) {
        return Err(SheetError::MissingEndpoint {
            reason: "endpoint URL is still the deployment placeholder".to_owned(),
        });
    }
    Url::parse(trimmed).map_err(|e| SheetError::MissingEndpoint {
        reason: format!("\"{trimmed}\" is not a valid URL: {e}"),
    })
}

/// Builds `<endpoint>?action=<action>&_t=<nonce>`, keeping any query the
/// endpoint already carries.
pub(crate) fn action_url(endpoint: &Url, action: &str, nonce: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("action", action)
        .append_pair("_t", nonce);
    url
}

/// Cache-busting token: `<epoch millis>_<random base36>`.
pub(crate) fn nonce() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{millis}_{}", to_base36(u64::from(rand::random::<u32>())))
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // n % 36 < 36, so the index is in bounds.
        #[allow(clippy::cast_possible_truncation)]
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Host name of the endpoint, for error messages.
pub(crate) fn domain(endpoint: &Url) -> String {
    endpoint
        .host_str()
        .map_or_else(|| endpoint.to_string(), str::to_owned)
}
