use std::io;
use std::path::PathBuf;

/// Errors that stop a scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Invalid KVM list format, expected a JSON array of strings: {0}")]
    MalformedKeyList(#[from] serde_json::Error),

    #[error("Cannot list proxy directory {}: {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Whether the scan can still produce a well-formed, empty report.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScanError::MalformedKeyList(_))
    }
}

/// A file that was skipped because its contents are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Skipping file due to decoding error: {} (invalid byte at offset {valid_up_to})", .path.display())]
pub struct FileDecodingError {
    pub path: PathBuf,
    pub valid_up_to: usize,
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
