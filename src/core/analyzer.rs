use std::path::Path;

use tracing::{error, info};

use super::{DependencyIndex, KeyList, ProxyScanner};
use crate::error::ScanResult;

pub struct DependencyAnalyzer {
    scanner: ProxyScanner,
}

impl DependencyAnalyzer {
    pub fn new() -> Self {
        Self {
            scanner: ProxyScanner::new(),
        }
    }

    pub fn analyze(&self, keys: &KeyList, root_path: &Path) -> ScanResult<DependencyIndex> {
        info!(root = %root_path.display(), keys = keys.len(), "scanning proxies");
        let events = self.scanner.scan(root_path)?;
        let index = DependencyIndex::from_events(keys, events)?;

        let stats = index.stats();
        info!(
            proxies = stats.proxies,
            files = stats.files_scanned,
            skipped = stats.files_skipped,
            matches = stats.matches,
            "scan complete"
        );
        Ok(index)
    }

    /// Parse `raw_keys` as a JSON array and scan `root_path`.
    pub fn analyze_raw(&self, raw_keys: &str, root_path: &Path) -> ScanResult<DependencyIndex> {
        let keys = KeyList::parse(raw_keys)?;
        self.analyze(&keys, root_path)
    }

    /// Like [`analyze_raw`](Self::analyze_raw), but a malformed key list is
    /// reported and yields an empty index instead of an error.
    pub fn find_dependencies(
        &self,
        raw_keys: &str,
        root_path: &Path,
    ) -> ScanResult<DependencyIndex> {
        match self.analyze_raw(raw_keys, root_path) {
            Err(err) if err.is_recoverable() => {
                error!("{err}");
                Ok(DependencyIndex::empty())
            }
            result => result,
        }
    }
}

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
