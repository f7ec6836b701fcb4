use indexmap::IndexMap;
use serde::Serialize;

use super::keys::KeyList;
use super::scanner::{FileContent, ScanEvent, ScannedFile};
use crate::error::ScanResult;

pub type DependencyMap = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub proxies: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub matches: usize,
}

/// Forward (proxy -> keys) and reverse (key -> proxies) mappings of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyIndex {
    forward: DependencyMap,
    reverse: DependencyMap,
    stats: ScanStats,
}

impl DependencyIndex {
    /// Index with no proxies and no keys, reported for an unusable key list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold a stream of scan events into an index, stopping at the first error.
    pub fn from_events<I>(keys: &KeyList, events: I) -> ScanResult<Self>
    where
        I: IntoIterator<Item = ScanResult<ScanEvent>>,
    {
        let mut builder = IndexBuilder::new(keys);
        for event in events {
            builder.apply(event?);
        }
        Ok(builder.build())
    }

    pub fn forward(&self) -> &DependencyMap {
        &self.forward
    }

    pub fn reverse(&self) -> &DependencyMap {
        &self.reverse
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn keys_of(&self, proxy: &str) -> Option<&[String]> {
        self.forward.get(proxy).map(Vec::as_slice)
    }

    pub fn proxies_of(&self, key: &str) -> Option<&[String]> {
        self.reverse.get(key).map(Vec::as_slice)
    }

    pub fn into_maps(self) -> (DependencyMap, DependencyMap) {
        (self.forward, self.reverse)
    }
}

/// Reducer that accumulates scan events into a [`DependencyIndex`].
pub struct IndexBuilder<'k> {
    keys: &'k KeyList,
    forward: DependencyMap,
    reverse: DependencyMap,
    stats: ScanStats,
}

impl<'k> IndexBuilder<'k> {
    pub fn new(keys: &'k KeyList) -> Self {
        let reverse = keys.iter().map(|key| (key.to_string(), Vec::new())).collect();
        Self {
            keys,
            forward: IndexMap::new(),
            reverse,
            stats: ScanStats::default(),
        }
    }

    pub fn apply(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Proxy(name) => self.add_proxy(name),
            ScanEvent::File(file) => self.add_file(&file),
        }
    }

    pub fn add_proxy(&mut self, name: String) {
        if !self.forward.contains_key(&name) {
            self.stats.proxies += 1;
        }
        self.forward.entry(name).or_default();
    }

    pub fn add_file(&mut self, file: &ScannedFile) {
        let text = match &file.content {
            FileContent::Text(text) => text,
            FileContent::Skipped(_) => {
                self.stats.files_skipped += 1;
                return;
            }
        };
        self.stats.files_scanned += 1;

        if !self.forward.contains_key(&file.proxy) {
            self.add_proxy(file.proxy.clone());
        }

        for key in self.keys.iter() {
            let hits = occurrences(text, key);
            if hits == 0 {
                continue;
            }
            self.stats.matches += hits;

            if let Some(found) = self.forward.get_mut(&file.proxy) {
                found.extend(std::iter::repeat(key.to_string()).take(hits));
            }
            if let Some(users) = self.reverse.get_mut(key) {
                users.extend(std::iter::repeat(file.proxy.clone()).take(hits));
            }
        }
    }

    pub fn build(self) -> DependencyIndex {
        DependencyIndex {
            forward: self.forward,
            reverse: self.reverse,
            stats: self.stats,
        }
    }
}

/// Case-sensitive, non-overlapping literal occurrences of `key` in `text`.
/// An empty key counts once per file.
fn occurrences(text: &str, key: &str) -> usize {
    if key.is_empty() {
        return 1;
    }
    text.matches(key).count()
}
