//! knowledge-digest - Flat knowledge files from source trees
//!
//! This library walks a directory, tags every file, and extracts shallow
//! structural facts from C sources (`.c`, `.h`) and label scripts (`.inc`).

pub mod cli;
pub mod error;
pub mod extract;
pub mod storage;
pub mod tree;

/// Re-export commonly used types
pub use error::DigestError;
pub use extract::{CFamilyExtractor, Extractor, KnowledgeItem, ScriptBlockExtractor};
pub use storage::KnowledgeFile;
pub use tree::{DigestConfig, SourceTree};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "knowledge-digest";
