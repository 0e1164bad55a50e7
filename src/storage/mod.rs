//! Knowledge file output
//!
//! The digest is written as plain text, one knowledge item per line, to a
//! file named after the root directory.

use crate::error::{DigestError, Result};
use crate::extract::KnowledgeItem;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

/// Suffix appended to the root directory name
pub const KNOWLEDGE_SUFFIX: &str = "_knowledge.txt";

/// The text file a digest is written to
#[derive(Debug, Clone)]
pub struct KnowledgeFile {
    path: PathBuf,
}

impl KnowledgeFile {
    /// Knowledge file for `root`, placed in `output_dir`
    pub fn for_root(root: &Path, output_dir: &Path) -> Self {
        let file_name = format!("{}{}", root_base_name(root), KNOWLEDGE_SUFFIX);
        Self {
            path: output_dir.join(file_name),
        }
    }

    /// Get the output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all items, replacing any existing file
    pub fn write(&self, items: &[KnowledgeItem]) -> Result<()> {
        let to_write_error = |source: std::io::Error| DigestError::Write {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(to_write_error)?;
        let mut writer = BufWriter::new(file);

        for item in items {
            writeln!(writer, "{}", item).map_err(to_write_error)?;
        }
        writer.flush().map_err(to_write_error)?;

        tracing::debug!("Wrote {} line(s) to {:?}", items.len(), self.path);
        Ok(())
    }
}

/// Last component of the lexically normalized root path.
///
/// `src/` gives `src`, `a/../b` gives `b`, `.` stays `.` and a bare
/// filesystem root gives an empty name.
pub fn root_base_name(root: &Path) -> String {
    let mut parts: Vec<Component> = Vec::new();

    for component in root.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    match parts.last() {
        None => ".".to_string(),
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        Some(Component::ParentDir) => "..".to_string(),
        Some(_) => String::new(),
    }
}
