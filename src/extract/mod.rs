//! Knowledge extraction module
//!
//! This module turns file paths and file contents into knowledge items:
//! - File name tags for every visited file
//! - C-family facts (functions, structs, enums, local includes)
//! - Script block facts for `.inc` label scripts

pub mod c_family;
pub mod script;

pub use c_family::CFamilyExtractor;
pub use script::{
    LabelRule, RuleOutcome, ScriptBlockExtractor, ScriptRule, SetDirectiveRule, TrailingGroup,
};

use std::fmt;
use std::path::{Path, MAIN_SEPARATOR};

/// A single line of knowledge output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeItem {
    /// Parent directory and file name of a visited file
    FileName(String),
    /// A function signature
    Function(String),
    /// A struct definition block
    Struct(String),
    /// An anonymous enum block
    Enum(String),
    /// A local `#include "..."` directive, kept verbatim
    Include(String),
    /// Number of lines since the previous script label
    LineCount(usize),
    /// A script label name
    ScriptName(String),
    /// A `.set NAME, VALUE` directive
    Setting { name: String, value: String },
}

impl fmt::Display for KnowledgeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeItem::FileName(path) => write!(f, "File Name: {}", path),
            KnowledgeItem::Function(sig) => write!(f, "Function: {}", sig),
            KnowledgeItem::Struct(body) => write!(f, "Struct: {}", body),
            KnowledgeItem::Enum(body) => write!(f, "Enum: {}", body),
            KnowledgeItem::Include(directive) => write!(f, "{}", directive),
            KnowledgeItem::LineCount(count) => write!(f, "{} lines.", count),
            KnowledgeItem::ScriptName(name) => write!(f, "Script named '{}'.", name),
            KnowledgeItem::Setting { name, value } => write!(f, "{} set to {}.", name, value),
        }
    }
}

/// Common trait for content extractors
pub trait Extractor {
    /// Extract knowledge items from the full text of one file
    fn extract(&self, content: &str) -> Vec<KnowledgeItem>;
}

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(content: String) -> String {
    if !content.contains('\r') {
        return content;
    }
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Tag a file with its parent directory and file name.
///
/// `src/app/main.c` becomes `File Name: app/main.c`; a path without any
/// separator is used as-is.
pub fn tag_file_name(path: &Path) -> KnowledgeItem {
    let text = path.to_string_lossy();
    let segments: Vec<&str> = text.split(MAIN_SEPARATOR).collect();

    let partial = match segments.as_slice() {
        [.., parent, name] => Path::new(parent).join(name).to_string_lossy().into_owned(),
        _ => text.to_string(),
    };

    KnowledgeItem::FileName(partial)
}
