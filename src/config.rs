use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the mapping file lives relative to the root directory handed to the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MappingConfig {
    /// Name of the tmp sub-directory under the root.
    pub tmp_dir_name: String,

    /// Name of the mapping file inside the tmp sub-directory.
    pub file_name: String,
}

impl MappingConfig {
    pub const DEFAULT_TMP_DIR_NAME: &'static str = ".gradle";
    pub const DEFAULT_FILE_NAME: &'static str = "script-mapping.properties";

    pub fn mapping_file(&self, root_dir: &Path) -> PathBuf {
        root_dir.join(&self.tmp_dir_name).join(&self.file_name)
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        MappingConfig {
            tmp_dir_name: Self::DEFAULT_TMP_DIR_NAME.to_string(),
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
        }
    }
}
