//! Compute-once holder for the results table

use super::loader::{self, LoadError};
use super::MatchTable;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Owns the results table for the lifetime of the application.
///
/// The CSV is read on the first call to [`TableCache::get`]; later calls,
/// including ones racing the first, get the same table without touching the
/// file again. A failed load leaves the cache empty so the error reaches
/// every caller that asks.
#[derive(Debug)]
pub struct TableCache {
    path: PathBuf,
    table: OnceLock<MatchTable>,
    init: Mutex<()>,
}

impl TableCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        TableCache {
            path: path.as_ref().to_path_buf(),
            table: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Build a cache that is already populated
    pub fn preloaded(table: MatchTable) -> Self {
        TableCache {
            path: PathBuf::new(),
            table: OnceLock::from(table),
            init: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Return the table, loading it on first use
    pub fn get(&self) -> Result<&MatchTable, LoadError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        // Poisoning is harmless: the OnceLock is never left half-set.
        let _guard = self.init.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        log::debug!("Loading results table from {}", self.path.display());
        let table = loader::load_csv(&self.path)?;
        Ok(self.table.get_or_init(|| table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "Date,Year,HomeTeam,AwayTeam,HomeScore,AwayScore,HomeBonus,AwayBonus"
        )
        .unwrap();
        write!(file, "{}", body).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_loads_once() {
        let file = write_csv("2020-02-01,2020,France,Wales,30,17,1,0\n");
        let cache = TableCache::new(file.path());
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        assert_eq!(first.len(), 1);

        // Rewriting the file must not change the cached table
        std::fs::write(file.path(), "garbage").unwrap();
        let second = cache.get().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_failed_load_is_reported_and_not_cached() {
        let file = write_csv("2020-02-01,2020,France,Wales,x,17,1,0\n");
        let cache = TableCache::new(file.path());
        assert!(matches!(cache.get(), Err(LoadError::InvalidValue { .. })));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn test_concurrent_callers_share_one_table() {
        let file = write_csv(
            "2020-02-01,2020,France,Wales,30,17,1,0\n\
             2021-02-13,2021,Wales,France,20,20,1,1\n",
        );
        let cache = Arc::new(TableCache::new(file.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache.get().map(|t| t.records().as_ptr() as usize).unwrap()
                })
            })
            .collect();

        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_preloaded() {
        let cache = TableCache::preloaded(MatchTable::new(vec![]));
        assert!(cache.is_loaded());
        assert_eq!(cache.path(), Path::new(""));
        assert!(cache.get().unwrap().is_empty());
    }
}
