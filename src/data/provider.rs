//! Data-access boundary
//!
//! The engine never fetches resources itself; it consumes a [`DataProvider`]
//! with synchronous semantics. The surrounding system decides whether that is
//! a file read, an HTTP fetch, or an in-memory fixture. Failures surface as
//! [`StatmapError::DataLoad`] and abort the recompute pass that needed the
//! resource; retries are the provider's business, not the engine's.

use crate::error::{Result, StatmapError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Injected JSON resource loader.
///
/// `path` is a provider-relative resource name such as `"manifest.json"` or
/// `"dataset.json"`.
pub trait DataProvider {
    /// Fetch and parse one JSON resource.
    fn fetch_json(&self, path: &str) -> Result<Value>;
}

/// Directory-backed provider matching the layout the original site serves
/// statically: one JSON file per resource under a single data directory.
pub struct FileProvider {
    root: PathBuf,
}

impl FileProvider {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DataProvider for FileProvider {
    fn fetch_json(&self, path: &str) -> Result<Value> {
        let full = self.root.join(path);
        let text = fs::read_to_string(&full).map_err(|e| StatmapError::DataLoad {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| {
            log::warn!("malformed JSON in {}: {}", full.display(), e);
            StatmapError::DataLoad {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })
    }
}
