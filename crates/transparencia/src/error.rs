//! Error types for the transparencia client
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for the Portal da Transparência client
///
/// `Upstream` keeps the Portuguese wire message of the deployed service,
/// embedding the HTTP status and the raw response body.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    #[error("Erro na API do Portal ({status}): {body}")]
    Upstream { status: u16, body: String },
}

/// Result type alias for the transparencia client
pub type Result<T> = std::result::Result<T, PortalError>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        if let Some(url) = e.url() {
            return format!("Invalid URL: {url}");
        }
        return "Invalid URL".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("Could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "Could not connect to server".to_string();
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    if e.is_decode() {
        return "Invalid response from server".to_string();
    }
    format!("Network error: {e}")
}
