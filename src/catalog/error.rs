use thiserror::Error;

/// Errors raised by the catalog client.
///
/// `is_not_found()` singles out the one failure the pipeline tolerates: a
/// resolution the API listed for a wallpaper but cannot actually serve.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("API key is empty")]
    MissingApiKey,

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Not found: {url}")]
    NotFound { url: String },

    #[error("HTTP error {status} from {url}: {message}")]
    HttpStatus {
        status: u16,
        url: String,
        message: String,
    },

    #[error("HTTP error requesting {url}")]
    Http { source: reqwest::Error, url: String },

    #[error("Unexpected response from {url}")]
    Decode {
        source: serde_json::Error,
        url: String,
    },

    #[error("Disk error at {path}")]
    Disk {
        path: String,
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}
