//! File-backed cache mapping generated script class names to the source files
//! they were compiled from.
//!
//! ```no_run
//! use scriptmap::{MappingStore, ScriptFile};
//!
//! let mut store = MappingStore::new("/work/project");
//! store.record(&ScriptFile::new("build_3fa9c2", "/work/project/build.gradle"))?;
//! assert!(store.lookup("build_3fa9c2")?.is_some());
//! # Ok::<(), scriptmap::ScriptMapError>(())
//! ```

pub mod config;
pub mod errors;
pub mod fingerprint;
pub mod properties;
pub mod source;
pub mod store;

pub use config::MappingConfig;
pub use errors::ScriptMapError;
pub use source::{ScriptFile, ScriptSource};
pub use store::{MappingStore, StoreStats};
