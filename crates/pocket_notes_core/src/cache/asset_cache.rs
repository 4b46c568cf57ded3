//! Cache-first asset serving over named in-memory caches.

use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the cache owned by this build.
pub const CACHE_NAME: &str = "pocket-notes-v1";

/// Static assets populated on install.
pub const ASSETS_TO_CACHE: &[&str] = &[
    "/",
    "/index.html",
    "/styles.css",
    "/app.js",
    "/manifest.json",
    "/icons/icon-192x192.png",
    "/icons/icon-512x512.png",
];

/// Response for one asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl AssetResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network failure reported by a `Fetcher`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub path: String,
    pub message: String,
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fetch `{}` failed: {}", self.path, self.message)
    }
}

impl Error for FetchError {}

/// Install failure.
#[derive(Debug)]
pub enum CacheError {
    Fetch(FetchError),
    /// Asset answered with a non-2xx status.
    BadStatus { path: String, status: u16 },
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "{err}"),
            Self::BadStatus { path, status } => {
                write!(f, "asset `{path}` answered with status {status}")
            }
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::BadStatus { .. } => None,
        }
    }
}

impl From<FetchError> for CacheError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

/// Network access used on install and on cache misses.
pub trait Fetcher {
    fn fetch(&self, path: &str) -> Result<AssetResponse, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, path: &str) -> Result<AssetResponse, FetchError> {
        (**self).fetch(path)
    }
}

/// Named caches, each mapping a path to a stored response.
#[derive(Debug, Clone, Default)]
pub struct CacheStorage {
    caches: BTreeMap<String, BTreeMap<String, AssetResponse>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache names in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.caches.keys().cloned().collect()
    }

    /// Inserts entries into `name`, creating the cache when missing.
    pub fn put_all(&mut self, name: &str, entries: Vec<(String, AssetResponse)>) {
        self.caches
            .entry(name.to_string())
            .or_default()
            .extend(entries);
    }

    /// Removes one cache. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.caches.remove(name).is_some()
    }

    /// Looks `path` up across every cache.
    pub fn match_path(&self, path: &str) -> Option<&AssetResponse> {
        self.caches.values().find_map(|entries| entries.get(path))
    }
}

/// Install/activate/fetch lifecycle over a `CacheStorage`.
pub struct AssetCache<F: Fetcher> {
    name: String,
    assets: Vec<String>,
    storage: CacheStorage,
    network: F,
}

impl<F: Fetcher> AssetCache<F> {
    /// Creates a cache for this build's name and asset list.
    pub fn new(network: F) -> Self {
        Self::with_assets(network, CACHE_NAME, ASSETS_TO_CACHE, CacheStorage::new())
    }

    /// Creates a cache with explicit name, assets and pre-existing storage.
    pub fn with_assets(network: F, name: &str, assets: &[&str], storage: CacheStorage) -> Self {
        Self {
            name: name.to_string(),
            assets: assets.iter().map(|path| path.to_string()).collect(),
            storage,
            network,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    /// Fetches every asset and stores them under this cache's name.
    ///
    /// Nothing is stored unless every asset succeeds.
    pub fn install(&mut self) -> Result<(), CacheError> {
        let mut fetched = Vec::with_capacity(self.assets.len());
        for path in &self.assets {
            let response = self.network.fetch(path).map_err(|err| {
                warn!(
                    "event=cache_install module=cache status=error cache={} path={} error={}",
                    self.name, path, err
                );
                err
            })?;
            if !response.is_success() {
                warn!(
                    "event=cache_install module=cache status=error cache={} path={} http_status={}",
                    self.name, path, response.status
                );
                return Err(CacheError::BadStatus {
                    path: path.clone(),
                    status: response.status,
                });
            }
            fetched.push((path.clone(), response));
        }

        let count = fetched.len();
        self.storage.put_all(&self.name, fetched);
        info!(
            "event=cache_install module=cache status=ok cache={} count={count}",
            self.name
        );
        Ok(())
    }

    /// Deletes every cache not named like this one; returns deleted names.
    pub fn activate(&mut self) -> Vec<String> {
        let stale = self
            .storage
            .keys()
            .into_iter()
            .filter(|key| *key != self.name)
            .collect::<Vec<_>>();
        for key in &stale {
            self.storage.delete(key);
        }
        info!(
            "event=cache_activate module=cache status=ok cache={} deleted={}",
            self.name,
            stale.len()
        );
        stale
    }

    /// Serves `path` from any cache, else from the network.
    pub fn fetch(&self, path: &str) -> Result<AssetResponse, FetchError> {
        if let Some(cached) = self.storage.match_path(path) {
            debug!("event=cache_fetch module=cache status=hit path={path}");
            return Ok(cached.clone());
        }
        debug!("event=cache_fetch module=cache status=miss path={path}");
        self.network.fetch(path)
    }
}
