/// Errors from the Nexus Dashboard REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Nexus Dashboard returned a non-2xx status code.
    #[error("Nexus Dashboard API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The login exchange completed but yielded no session token.
    #[error("Login failed: {0}")]
    Login(String),

    /// An endpoint URL could not be built from the configured host.
    #[error("Invalid endpoint URL: {0}")]
    Url(String),
}
