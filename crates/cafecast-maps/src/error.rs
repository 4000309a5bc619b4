use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The API answered 200 but its `status` envelope reports a failure.
    #[error("places API returned status {status}: {message}")]
    ApiStatus { status: String, message: String },

    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
