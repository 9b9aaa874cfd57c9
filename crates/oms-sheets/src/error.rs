use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error for {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("row-store endpoint is not configured: {reason}")]
    MissingEndpoint { reason: String },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} for action {action}")]
    UnexpectedStatus { status: u16, action: String },

    /// The script ran and answered with an `error` field.
    #[error("script error for action {action}: {message}")]
    Script { action: String, message: String },

    /// The script answered `login` with an empty object, which happens when
    /// the sheet was edited but no new deployment version was published.
    #[error("script deployment is stale: publish a new version and retry")]
    StaleDeployment,

    /// A write action completed but did not report `success: true`.
    #[error("action {action} was rejected: {message}")]
    Rejected { action: String, message: String },
}
