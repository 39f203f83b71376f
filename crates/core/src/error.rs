use thiserror::Error;

/// Failure of one outbound page fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Terminal failure of a calculate or catalog request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("URL is required")]
    MissingUrl,
    #[error("Invalid URL. Must be from {allowed}")]
    InvalidUrl { allowed: String },
    #[error("profile fetch failed: {0}")]
    Profile(#[source] FetchError),
    #[error("catalog fetch failed: {0}")]
    Catalog(#[source] FetchError),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::MissingUrl | ServiceError::InvalidUrl { .. })
    }

    /// 400 for bad input, 500 for anything upstream.
    pub fn status_code(&self) -> u16 {
        if self.is_validation() { 400 } else { 500 }
    }

    /// Message safe to show to end users; upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::MissingUrl | ServiceError::InvalidUrl { .. } => self.to_string(),
            ServiceError::Profile(_) => "Failed to fetch or parse profile".to_string(),
            ServiceError::Catalog(_) => "Failed to fetch games".to_string(),
        }
    }
}
