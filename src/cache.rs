use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::dataset;
use crate::error::Result;
use crate::model::RawReport;

/// Loaded datasets keyed by source path. Entries live until invalidated.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<Vec<RawReport>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Vec<RawReport>>> {
        let key = cache_key(path);
        if let Some(hit) = self.entries.get(&key) {
            debug!("cache hit for {}", key.display());
            return Ok(Arc::clone(hit));
        }

        debug!("cache miss for {}", key.display());
        let reports = Arc::new(dataset::load_path(path)?);
        self.entries.insert(key, Arc::clone(&reports));
        Ok(reports)
    }

    /// Drops one entry; returns whether it was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let removed = self.entries.remove(&cache_key(path)).is_some();
        if removed {
            info!("invalidated cached dataset {}", path.display());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&cache_key(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
