use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{FileDecodingError, ScanError, ScanResult};

/// A direct subdirectory of the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDir {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Skipped(FileDecodingError),
}

impl FileContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            FileContent::Text(text) => Some(text),
            FileContent::Skipped(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub proxy: String,
    pub path: PathBuf,
    pub content: FileContent,
}

/// One step of a scan. A `Proxy` event always precedes the files of that proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Proxy(String),
    File(ScannedFile),
}

pub struct ProxyScanner;

impl ProxyScanner {
    pub fn new() -> Self {
        Self
    }

    /// Start a lazy walk over every proxy under `root_path`.
    ///
    /// The root listing happens eagerly so an unreadable root fails here;
    /// file reads happen as the returned iterator is driven.
    pub fn scan(&self, root_path: &Path) -> ScanResult<ProxyWalk> {
        let proxies = self.list_proxies(root_path)?;
        debug!(root = %root_path.display(), proxies = proxies.len(), "listed proxies");
        Ok(ProxyWalk {
            proxies: proxies.into_iter(),
            current: None,
        })
    }

    /// Direct subdirectories of `root_path`, sorted by name. Plain files at
    /// the root are not proxies.
    pub fn list_proxies(&self, root_path: &Path) -> ScanResult<Vec<ProxyDir>> {
        let access_error = |source: io::Error| ScanError::DirectoryAccess {
            path: root_path.to_path_buf(),
            source,
        };

        let mut proxies = Vec::new();
        for entry in fs::read_dir(root_path).map_err(access_error)? {
            let entry = entry.map_err(access_error)?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            proxies.push(ProxyDir {
                name: proxy_name(&entry.file_name()),
                path,
            });
        }

        proxies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(proxies)
    }
}

impl Default for ProxyScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the scan events of one root directory.
pub struct ProxyWalk {
    proxies: std::vec::IntoIter<ProxyDir>,
    current: Option<(String, walkdir::IntoIter)>,
}

impl Iterator for ProxyWalk {
    type Item = ScanResult<ScanEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((proxy, entries)) = self.current.as_mut() {
                match entries.next() {
                    Some(Ok(entry)) => {
                        // Symlinked files are read, symlinked directories are not descended.
                        if !entry.path().is_file() {
                            continue;
                        }
                        return Some(read_file(proxy, entry.path()).map(ScanEvent::File));
                    }
                    Some(Err(err)) => {
                        let path = err
                            .path()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| PathBuf::from(proxy.as_str()));
                        return Some(Err(ScanError::Walk {
                            path,
                            source: err.into(),
                        }));
                    }
                    None => {
                        self.current = None;
                        continue;
                    }
                }
            }

            let proxy = self.proxies.next()?;
            debug!(proxy = %proxy.name, "scanning proxy");
            let entries = WalkDir::new(&proxy.path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter();
            let name = proxy.name.clone();
            self.current = Some((proxy.name, entries));
            return Some(Ok(ScanEvent::Proxy(name)));
        }
    }
}

/// Directory name as a proxy identifier. Bytes that are not UTF-8 are written
/// as `\xNN` so distinct directories never share a name.
fn proxy_name(raw: &OsStr) -> String {
    let mut bytes = raw.as_encoded_bytes();
    let mut name = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                name.push_str(valid);
                return name;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                name.push_str(std::str::from_utf8(valid).unwrap_or_default());
                let invalid = err.error_len().unwrap_or(rest.len());
                for byte in &rest[..invalid] {
                    name.push_str(&format!("\\x{byte:02x}"));
                }
                bytes = &rest[invalid..];
            }
        }
    }
}

fn read_file(proxy: &str, path: &Path) -> ScanResult<ScannedFile> {
    let bytes = fs::read(path).map_err(|source| ScanError::Walk {
        path: path.to_path_buf(),
        source,
    })?;

    let content = match String::from_utf8(bytes) {
        Ok(text) => FileContent::Text(text),
        Err(err) => {
            let skipped = FileDecodingError {
                path: path.to_path_buf(),
                valid_up_to: err.utf8_error().valid_up_to(),
            };
            warn!("{skipped}");
            FileContent::Skipped(skipped)
        }
    };

    Ok(ScannedFile {
        proxy: proxy.to_string(),
        path: path.to_path_buf(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::proxy_name;
    use std::ffi::OsStr;

    #[test]
    fn proxy_name_escapes_invalid_bytes() {
        assert_eq!(proxy_name(OsStr::new("orders-v1")), "orders-v1");
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            assert_eq!(proxy_name(OsStr::from_bytes(b"p\xff")), "p\\xff");
            assert_eq!(proxy_name(OsStr::from_bytes(b"a\xfe\xfdb")), "a\\xfe\\xfdb");
        }
    }
}
