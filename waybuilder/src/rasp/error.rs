//! Timetable API error types.

/// Errors from the timetable HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RaspError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by timetable API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized: check api_key in the config file")]
    Unauthorized,

    /// Client could not be built from the given configuration
    #[error("invalid client configuration: {0}")]
    Config(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
