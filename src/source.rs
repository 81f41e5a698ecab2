use std::path::{Path, PathBuf};

/// A compiled script as seen by the mapping cache: the generated class name and,
/// when the script was read from disk, the file it came from.
pub trait ScriptSource {
    /// The class name generated for the script.
    fn class_name(&self) -> &str;

    /// The on-disk file the script was compiled from, or `None` for scripts
    /// that only exist in memory.
    fn source_file(&self) -> Option<&Path>;
}

/// A plain `ScriptSource` holding its class name and optional file by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    /// The class name generated for the script.
    pub class_name: String,

    /// The file the script was read from, `None` for in-memory scripts.
    pub source_file: Option<PathBuf>,
}

impl ScriptFile {
    /// A script compiled from `source_file`.
    pub fn new(class_name: impl Into<String>, source_file: impl Into<PathBuf>) -> Self {
        ScriptFile {
            class_name: class_name.into(),
            source_file: Some(source_file.into()),
        }
    }

    /// A script with no backing file; the mapping cache never records it.
    pub fn in_memory(class_name: impl Into<String>) -> Self {
        ScriptFile {
            class_name: class_name.into(),
            source_file: None,
        }
    }
}

impl ScriptSource for ScriptFile {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }
}
