use std::path::{Path, PathBuf};
use std::time::Duration;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::debug;
use std::io::Write;
use crate::models::extension::ExtensionId;
use crate::models::gallery::{ExtensionQuery, ExtensionQueryResponse, GalleryExtension};
use crate::models::settings::{Settings, DEFAULT_MARKETPLACE_URL, DEFAULT_USER_AGENT};

const QUERY_PATH: &str = "/_apis/public/gallery/extensionquery";
const ACCEPT_HEADER: &str = "application/json;api-version=7.1-preview.1";

/// Marketplace gallery API client for resolving and downloading VSIX packages
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    /// HTTP client for gallery requests
    client: Client,
    /// Base URL of the gallery (configurable for testing)
    base_url: String,
    /// User agent string for requests
    user_agent: String,
}

/// A package written to disk by [`MarketplaceClient::download_to`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Hex encoded SHA-256 of the file contents
    pub sha256: String,
}

/// Marketplace client errors
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Query endpoint answered with a non-200 status
    #[error("Failed to get metadata for {0}: HTTP {1}")]
    Status(String, u16),

    /// Query returned no matching extension
    #[error("No results found for {0}")]
    NotFound(String),

    /// Newest version has no VSIX package asset
    #[error("Could not find VSIX asset for {0}")]
    AssetMissing(String),

    /// VSIX asset has no source URL
    #[error("No download URL for {0}")]
    MissingSource(String),

    /// Package download answered with a non-200 status
    #[error("Failed to download {0}: HTTP {1}")]
    DownloadStatus(String, u16),

    /// Gallery response parsing failed
    #[error("Failed to parse marketplace response: {0}")]
    ParseError(String),

    /// Writing the package to disk failed
    #[error("Failed to write {0}: {1}")]
    Io(PathBuf, std::io::Error),
}

impl Default for MarketplaceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketplaceClient {
    /// Create a new client for the public marketplace
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_MARKETPLACE_URL.to_string())
    }

    /// Create a client with a custom gallery URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client with a custom HTTP client (for testing)
    pub fn with_client(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Create a client honoring the configured URL, timeout and user agent
    pub fn from_settings(settings: &Settings) -> Result<Self, MarketplaceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let mut this = Self::with_client(client, settings.marketplace_url.clone());
        this.user_agent = settings.user_agent.clone();
        Ok(this)
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up an extension's gallery record
    pub async fn query_extension(&self, id: &ExtensionId) -> Result<GalleryExtension, MarketplaceError> {
        let url = format!("{}{}", self.base_url, QUERY_PATH);
        let extension_id = id.to_string();

        let response = self.client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", ACCEPT_HEADER)
            .header("User-Agent", &self.user_agent)
            .json(&ExtensionQuery::by_name(&extension_id))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(MarketplaceError::Status(extension_id, response.status().as_u16()));
        }

        let body: ExtensionQueryResponse = response.json().await
            .map_err(|e| MarketplaceError::ParseError(e.to_string()))?;

        body.into_first_extension()
            .ok_or(MarketplaceError::NotFound(extension_id))
    }

    /// Download URL of the VSIX package of the newest version
    pub fn vsix_download_url(&self, id: &ExtensionId, extension: &GalleryExtension) -> Result<String, MarketplaceError> {
        let asset = extension
            .vsix_asset()
            .ok_or_else(|| MarketplaceError::AssetMissing(id.to_string()))?;

        asset
            .source
            .as_ref()
            .filter(|source| !source.is_empty())
            .cloned()
            .ok_or_else(|| MarketplaceError::MissingSource(id.to_string()))
    }

    /// Stream a package to `dest`. The body goes to a temporary file in the
    /// same directory first and is renamed into place once complete.
    pub async fn download_to(&self, id: &ExtensionId, url: &str, dest: &Path) -> Result<DownloadedFile, MarketplaceError> {
        let response = self.client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(MarketplaceError::DownloadStatus(id.to_string(), response.status().as_u16()));
        }

        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        let io_err = |e: std::io::Error| MarketplaceError::Io(dest.to_path_buf(), e);

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        let mut hasher = Sha256::new();
        let mut size_bytes = 0u64;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            hasher.update(&chunk);
            tmp.write_all(&chunk).map_err(io_err)?;
            size_bytes += chunk.len() as u64;
        }
        tmp.flush().map_err(io_err)?;

        tmp.persist(dest)
            .map_err(|e| MarketplaceError::Io(dest.to_path_buf(), e.error))?;

        debug!(extension = %id, bytes = size_bytes, path = %dest.display(), "package written");

        Ok(DownloadedFile {
            path: dest.to_path_buf(),
            size_bytes,
            sha256: format!("{:x}", hasher.finalize()),
        })
    }
}
