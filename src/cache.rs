//! Disk-backed response cache.
//!
//! A look-aside store keyed by the full request URL. The client checks the
//! cache before going to the network and writes the decoded body back after
//! a successful request, so identical lookups are answered from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Disk-backed cache of raw JSON responses.
///
/// Each entry is one JSON file at `<dir>/<namespace>/<key>.json`, where the
/// key is the SHA-256 of the full request URL (path plus encoded query) and
/// the namespace groups entries per endpoint. Entries are never evicted;
/// [`clear`](ResponseCache::clear) removes a whole namespace.
///
/// # Example
///
/// ```no_run
/// use edsm::{EdsmClient, ResponseCache};
///
/// # fn example() -> edsm::Result<()> {
/// let client = EdsmClient::new("https://www.edsm.net")?
///     .with_cache(ResponseCache::new("./cache"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Create a cache rooted at `dir`. Directories are created on first
    /// write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the cache.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up the stored response for `url` under `namespace`.
    pub fn get(&self, namespace: &str, url: &str) -> Result<Option<Value>> {
        let path = self.entry_path(namespace, url);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store the response body for `url` under `namespace`, replacing any
    /// previous entry.
    pub fn put(&self, namespace: &str, url: &str, value: &Value) -> Result<()> {
        let path = self.entry_path(namespace, url);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string(value)?)?;
        Ok(())
    }

    /// Remove every entry under `namespace`. Missing namespaces are not an
    /// error.
    pub fn clear(&self, namespace: &str) -> Result<()> {
        match fs::remove_dir_all(self.dir.join(namespace)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn entry_path(&self, namespace: &str, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir
            .join(namespace)
            .join(format!("{}.json", hex::encode(digest)))
    }
}
