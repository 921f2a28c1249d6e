//! Sources for the portfolio image listing.
//!
//! The listing is read once per controller. `HttpSource` talks to the
//! backend endpoint, `FileSource` reads a saved JSON response, and
//! `RetryingSource` adds a bounded number of retries on top of either.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::ImageRecord;

/// Why the image listing could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: Url, status: u16 },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed image listing: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Whether another attempt could succeed. A body that failed to parse
    /// will fail the same way again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }
}

/// Something that can produce the raw image listing.
pub trait ImageSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ImageRecord>, LoadError>> + Send;
}

/// Decode a listing response body (a JSON array of image records).
pub fn decode_listing(body: &[u8]) -> Result<Vec<ImageRecord>, LoadError> {
    Ok(serde_json::from_slice(body)?)
}

/// Reads the listing from the backend's REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ImageSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<ImageRecord>, LoadError> {
        let transport = |source| LoadError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        debug!("Fetching image listing from {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        let records = decode_listing(&body)?;
        info!("Received {} images from {}", records.len(), self.endpoint);
        Ok(records)
    }
}

/// Reads the listing from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileSource {
    async fn fetch(&self) -> Result<Vec<ImageRecord>, LoadError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let records = decode_listing(&body)?;
        info!("Read {} images from {:?}", records.len(), self.path);
        Ok(records)
    }
}

/// Either kind of listing source, chosen at startup.
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    File(FileSource),
}

impl ImageSource for Source {
    async fn fetch(&self) -> Result<Vec<ImageRecord>, LoadError> {
        match self {
            Self::Http(source) => source.fetch().await,
            Self::File(source) => source.fetch().await,
        }
    }
}

/// Retries a failed fetch up to `retries` extra times with a fixed delay.
///
/// With `retries == 0` this is a single attempt. Only transport and HTTP
/// status failures are retried; malformed listings are returned at once.
#[derive(Debug, Clone)]
pub struct RetryingSource<S> {
    inner: S,
    retries: u32,
    delay: Duration,
}

impl<S> RetryingSource<S> {
    pub fn new(inner: S, retries: u32, delay: Duration) -> Self {
        Self {
            inner,
            retries,
            delay,
        }
    }
}

impl<S: ImageSource + Sync> ImageSource for RetryingSource<S> {
    async fn fetch(&self) -> Result<Vec<ImageRecord>, LoadError> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch().await {
                Ok(records) => return Ok(records),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        "Image listing fetch failed ({}), retry {}/{}",
                        e, attempt, self.retries
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
