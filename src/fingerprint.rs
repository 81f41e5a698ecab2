use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Cheap staleness marker for the mapping file: modification time plus length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl Fingerprint {
    /// What a missing file (or anything that is not a regular file) looks like.
    pub const MISSING: Fingerprint = Fingerprint {
        modified: None,
        len: 0,
    };

    pub fn observe(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Fingerprint {
                modified: meta.modified().ok(),
                len: meta.len(),
            },
            _ => Self::MISSING,
        }
    }

    pub fn has_changed(last_seen: Option<&Fingerprint>, observed: &Fingerprint) -> bool {
        match last_seen {
            Some(existing) => existing != observed,
            None => true,
        }
    }
}
