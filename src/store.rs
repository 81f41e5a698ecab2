use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::config::MappingConfig;
use crate::errors::ScriptMapError;
use crate::fingerprint::Fingerprint;
use crate::properties;
use crate::source::ScriptSource;

const FILE_COMMENT: &str = "Autogenerated.  Do not edit.";

/// Counters of the store's disk activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Reload attempts, successful or not.
    pub reloads: usize,
    /// Completed writes of the mapping file.
    pub writes: usize,
}

/// Persistent class name -> source path mapping for compiled scripts.
///
/// The mapping file is re-read whenever its modification time or length no
/// longer matches what this instance last observed, so several builds against
/// the same root pick up each other's entries. Storage failures never reach
/// the caller; they are logged and the store carries on with what it has in
/// memory.
///
/// Every operation takes `&mut self`. Callers sharing a store across threads
/// must put it behind their own lock.
#[derive(Debug)]
pub struct MappingStore {
    mapping_file: PathBuf,

    /// Maps generated class names -> absolute source file paths
    entries: HashMap<String, String>,

    /// Fingerprint of the mapping file at the last reload attempt
    last_seen: Option<Fingerprint>,

    stats: StoreStats,
}

impl MappingStore {
    pub fn new(root_dir: impl AsRef<Path>) -> Self {
        Self::with_config(root_dir, &MappingConfig::default())
    }

    pub fn with_config(root_dir: impl AsRef<Path>, config: &MappingConfig) -> Self {
        MappingStore {
            mapping_file: config.mapping_file(root_dir.as_ref()),
            entries: HashMap::new(),
            last_seen: None,
            stats: StoreStats::default(),
        }
    }

    pub fn mapping_file(&self) -> &Path {
        &self.mapping_file
    }

    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Returns the source file recorded for `class_name`, if any.
    pub fn lookup(&mut self, class_name: &str) -> Result<Option<PathBuf>, ScriptMapError> {
        if class_name.is_empty() {
            return Err(ScriptMapError::InvalidArgument(
                "class name must not be empty".to_string(),
            ));
        }

        self.reload_if_stale();
        Ok(self.entries.get(class_name).map(PathBuf::from))
    }

    /// Remembers where `source` was compiled from.
    ///
    /// Sources without an on-disk file are ignored. The mapping file is only
    /// rewritten when the recorded path actually changes.
    pub fn record<S: ScriptSource + ?Sized>(&mut self, source: &S) -> Result<(), ScriptMapError> {
        let Some(source_file) = source.source_file() else {
            return Ok(());
        };

        let class_name = source.class_name();
        if class_name.is_empty() {
            return Err(ScriptMapError::InvalidArgument(
                "class name must not be empty".to_string(),
            ));
        }

        self.reload_if_stale();

        let absolute_path = match std::path::absolute(source_file) {
            Ok(path) => path,
            Err(e) => {
                warn!(
                    "Could not resolve '{}' for script class '{}': {}. Skipping.",
                    source_file.display(),
                    class_name,
                    e
                );
                return Ok(());
            }
        };
        let Some(absolute_path) = absolute_path.to_str() else {
            warn!(
                "Source path '{}' for script class '{}' is not valid UTF-8. Skipping.",
                absolute_path.display(),
                class_name
            );
            return Ok(());
        };

        if self.entries.get(class_name).map(String::as_str) == Some(absolute_path) {
            debug!("Script class '{}' already mapped. Nothing to write.", class_name);
            return Ok(());
        }

        info!(
            "Mapping script class '{}' -> '{}'.",
            class_name, absolute_path
        );
        self.entries
            .insert(class_name.to_string(), absolute_path.to_string());
        self.persist();
        Ok(())
    }

    fn reload_if_stale(&mut self) {
        let observed = Fingerprint::observe(&self.mapping_file);
        if !Fingerprint::has_changed(self.last_seen.as_ref(), &observed) {
            return;
        }

        self.last_seen = Some(observed);
        self.entries.clear();
        self.stats.reloads += 1;

        match self.read_entries() {
            Ok(Some(entries)) => {
                debug!(
                    "Loaded {} script mapping(s) from '{}'.",
                    entries.len(),
                    self.mapping_file.display()
                );
                self.entries = entries;
            }
            Ok(None) => {
                debug!(
                    "No script mapping file at '{}'. Starting empty.",
                    self.mapping_file.display()
                );
            }
            Err(e) => error!("{}. Continuing with an empty script mapping.", e),
        }
    }

    fn read_entries(&self) -> Result<Option<HashMap<String, String>>, ScriptMapError> {
        let bytes = match fs::read(&self.mapping_file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ScriptMapError::StorageRead {
                    path: self.mapping_file.clone(),
                    source,
                })
            }
        };

        let entries = properties::load(&bytes).map_err(|e| ScriptMapError::StorageRead {
            path: self.mapping_file.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        })?;
        Ok(Some(entries))
    }

    fn persist(&mut self) {
        let outcome = self.write_entries();
        self.finish_persist(outcome);
    }

    fn finish_persist(&mut self, outcome: Result<bool, ScriptMapError>) {
        match outcome {
            Ok(true) => self.stats.writes += 1,
            Ok(false) => debug!(
                "Script mapping file '{}' is not writable. Keeping the mapping in memory only.",
                self.mapping_file.display()
            ),
            Err(e) => {
                error!("{}. Keeping the mapping in memory only.", e);
                // A half-written file must not be reloaded over the in-memory mapping.
                self.last_seen = Some(Fingerprint::observe(&self.mapping_file));
            }
        }
    }

    /// Returns `Ok(false)` when the write was skipped because the file or its
    /// directory is read-only.
    fn write_entries(&self) -> Result<bool, ScriptMapError> {
        let write_error = |source| ScriptMapError::StorageWrite {
            path: self.mapping_file.clone(),
            source,
        };

        let dir = self.mapping_file.parent().unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(write_error)?;
        }

        let file_exists = self.mapping_file.exists();
        let writable = if file_exists {
            is_writable(&self.mapping_file)
        } else {
            is_writable(dir)
        };
        if !writable {
            return Ok(false);
        }

        let file = File::create(&self.mapping_file).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        properties::store(&mut writer, &self.entries, FILE_COMMENT).map_err(write_error)?;
        Ok(true)
    }
}

fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}
