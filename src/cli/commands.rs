//! Command implementations

use crate::extract::KnowledgeItem;
use crate::storage::KnowledgeFile;
use crate::tree::{DigestConfig, Dispatcher, SourceTree};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Prompt shown when no root directory is passed on the command line
pub const ROOT_PROMPT: &str = "Enter the relative path to your directory: ";

/// Digest the tree in `config` and write its knowledge file.
///
/// Nothing is written unless every file was digested.
pub fn generate(config: &DigestConfig) -> Result<PathBuf> {
    let tree = SourceTree::open(config)?;
    let knowledge = tree.digest()?;

    let file = KnowledgeFile::for_root(tree.root(), &config.output_dir);
    file.write(&knowledge)?;

    tracing::info!("Knowledge file written to {:?}", file.path());
    Ok(file.path().to_path_buf())
}

/// Knowledge items for a single file
pub fn analyze(target: &Path) -> Result<Vec<KnowledgeItem>> {
    if !target.is_file() {
        anyhow::bail!("Not a file: {:?}", target);
    }

    let items = Dispatcher::default().digest_file(target)?;
    Ok(items)
}

/// Ask for the root directory on `output` and read one line from `input`
pub fn prompt_root<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{}", ROOT_PROMPT).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read root directory")?;
    if read == 0 {
        anyhow::bail!("No root directory given");
    }

    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Print knowledge items, one per line
pub fn print_items(items: &[KnowledgeItem]) {
    for item in items {
        println!("{}", item);
    }
}
