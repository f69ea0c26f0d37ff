use thiserror::Error;

/// Result type shared by every layer of the stylist.
pub type Result<T> = std::result::Result<T, StylistError>;

/// Everything that can go wrong during one recommendation.
#[derive(Debug, Error)]
pub enum StylistError {
    /// The shopping query was empty or whitespace only.
    #[error("Please enter a query to get recommendations.")]
    EmptyQuery,

    /// Configuration is invalid or a required secret is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP transport failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An external service answered with a non-success status.
    #[error("{service} API error {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// An external service answered, but not with what we asked for.
    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },

    /// A retrieved product is missing a required metadata field.
    #[error("Malformed record `{id}`: missing or invalid field `{field}`")]
    MalformedRecord { id: String, field: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
