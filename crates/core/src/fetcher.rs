use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::error::FetchError;

/// Anything that can turn a URL into page markup.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub fn build_http_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36 arcade-calculator/0.1")
        .gzip(true)
        .brotli(true)
        .pool_idle_timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(2)
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

/// Single-attempt HTTP fetch bounded by the client timeout. No retries.
pub struct HttpPageSource {
    client: Client,
    timeout: Duration,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            timeout,
        })
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let resp = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                let e = self.classify(url, e);
                warn!(url = %url, error = %e, "Fetch failed");
                return Err(e);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Unexpected upstream status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // The client timeout also bounds the body read.
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                let e = self.classify(url, e);
                warn!(url = %url, error = %e, "Reading body failed");
                return Err(e);
            }
        };
        info!(
            url = %url,
            status = status.as_u16(),
            html_len = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
