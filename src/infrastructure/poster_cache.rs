// src/infrastructure/poster_cache.rs
//
// On-Disk Poster Cache
//
// RULES:
// - Cache keys are the sha256 of the source URL
// - A cached file is served without touching the network
// - Cache entries are immutable once written

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// Downloads poster images and keeps them on disk for offline reuse
pub struct PosterCache {
    cache_dir: PathBuf,
    http_client: Client,
}

impl PosterCache {
    /// Cache under the default location: {APP_DATA}/cinegrid/posters
    pub fn new() -> AppResult<Self> {
        let app_data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

        Self::at_dir(app_data_dir.join("cinegrid").join("posters"))
    }

    /// Cache under an explicit directory (used by tests)
    pub fn at_dir(cache_dir: PathBuf) -> AppResult<Self> {
        std::fs::create_dir_all(&cache_dir).map_err(AppError::Io)?;

        let http_client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            cache_dir,
            http_client,
        })
    }

    /// Where a given URL's image lives on disk once cached
    pub fn cache_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();

        self.cache_dir.join(format!("{:x}", result))
    }

    /// Whether a URL's image is already on disk
    pub fn is_cached(&self, url: &str) -> bool {
        self.cache_path(url).exists()
    }

    /// Image bytes for a URL, from disk when cached, downloading otherwise
    pub async fn fetch(&self, url: &str) -> AppResult<Vec<u8>> {
        let path = self.cache_path(url);

        if path.exists() {
            debug!("Poster cache hit: {}", url);
            return std::fs::read(&path).map_err(AppError::Io);
        }

        debug!("Poster cache miss, downloading: {}", url);
        let response = self.http_client.get(url).send().await?;
        let response = response.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();

        std::fs::write(&path, &bytes).map_err(AppError::Io)?;

        Ok(bytes)
    }
}
