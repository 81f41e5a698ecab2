use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents all possible errors in the script mapping cache.
///
/// Only `InvalidArgument` ever reaches callers of `MappingStore`; the storage
/// variants are logged and absorbed at the store boundary.
#[derive(Error, Debug)]
pub enum ScriptMapError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to read script mapping file '{}': {source}", .path.display())]
    StorageRead { path: PathBuf, source: io::Error },
    #[error("Failed to write script mapping file '{}': {source}", .path.display())]
    StorageWrite { path: PathBuf, source: io::Error },
    #[error("Malformed mapping entry: {0}")]
    MalformedEntry(String),
}
