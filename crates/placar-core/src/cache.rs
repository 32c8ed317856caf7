// Process-lifetime dataset cache.
//
// The dataset is read from disk at most once per holder. Callers own the
// holder explicitly (no hidden global); `invalidate` forces the next `get` to
// re-read the file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::dataset::{self, Dataset, DatasetError, LoadOptions};

/// Lazily loads and memoizes the dataset at `path`.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    options: LoadOptions,
    slot: Mutex<Option<Arc<Dataset>>>,
    loads: AtomicUsize,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, options: LoadOptions) -> Self {
        DatasetCache {
            path: path.into(),
            options,
            slot: Mutex::new(None),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached dataset, loading it on first use.
    ///
    /// A failed load leaves the cache empty, so a later call tries again.
    pub fn get(&self) -> Result<Arc<Dataset>, DatasetError> {
        let mut slot = self.lock();
        if let Some(dataset) = slot.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(dataset::load(&self.path, &self.options)?);
        self.loads.fetch_add(1, Ordering::Relaxed);
        info!(
            "Loaded {} matches from {}",
            dataset.len(),
            self.path.display()
        );
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset. Existing `Arc`s held by callers stay valid.
    pub fn invalidate(&self) {
        if self.lock().take().is_some() {
            info!("Dataset cache invalidated for {}", self.path.display());
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Number of successful reads from disk so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Dataset>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CSV: &str = "\
ano_campeonato,time_mandante,time_visitante,gols_mandante,gols_visitante
2019,A,B,2,1
2020,B,A,0,0
";

    #[test]
    fn get_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        fs::write(&path, CSV).unwrap();

        let cache = DatasetCache::new(&path, LoadOptions::default());
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn cached_value_survives_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        fs::write(&path, CSV).unwrap();

        let cache = DatasetCache::new(&path, LoadOptions::default());
        assert_eq!(cache.get().unwrap().len(), 2);

        fs::remove_file(&path).unwrap();
        assert_eq!(cache.get().unwrap().len(), 2);
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.csv");
        fs::write(&path, CSV).unwrap();

        let cache = DatasetCache::new(&path, LoadOptions::default());
        let before = cache.get().unwrap();

        fs::write(&path, format!("{CSV}2021,C,D,1,0\n")).unwrap();
        cache.invalidate();
        assert!(!cache.is_loaded());

        let after = cache.get().unwrap();
        assert_eq!(before.len(), 2);
        assert_eq!(after.len(), 3);
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn failed_load_caches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");

        let cache = DatasetCache::new(&path, LoadOptions::default());
        assert!(cache.get().is_err());
        assert!(!cache.is_loaded());
        assert_eq!(cache.load_count(), 0);

        fs::write(&path, CSV).unwrap();
        assert_eq!(cache.get().unwrap().len(), 2);
    }
}
