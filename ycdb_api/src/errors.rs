//! Error types for the HTTP client.

/// Errors that can occur when requesting pages from the directory site.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The site returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The base URL and path could not be combined into a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
