//! Source tree traversal and dispatch
//!
//! This module handles:
//! - Validating the root directory
//! - Walking every file under it in a stable order
//! - Routing each file to the matching extractor by extension

mod config;

pub use config::DigestConfig;

use crate::error::{DigestError, Result};
use crate::extract::{
    normalize_newlines, tag_file_name, CFamilyExtractor, Extractor, KnowledgeItem,
    ScriptBlockExtractor,
};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Kind of file, decided by its name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `.c` or `.h`
    CFamily,
    /// `.inc` label scripts
    Script,
    /// Anything else; tagged but never read
    Other,
}

impl FileKind {
    /// Categorize a path by exact, case-sensitive suffix
    pub fn from_path(path: &Path) -> Self {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

        if name.ends_with(".c") || name.ends_with(".h") {
            FileKind::CFamily
        } else if name.ends_with(".inc") {
            FileKind::Script
        } else {
            FileKind::Other
        }
    }
}

/// Routes single files to the tagger and extractors
pub struct Dispatcher {
    c_family: CFamilyExtractor,
    script: ScriptBlockExtractor,
}

impl Dispatcher {
    /// Create a dispatcher with extractors configured from `config`
    pub fn new(config: &DigestConfig) -> Self {
        Self {
            c_family: CFamilyExtractor::new(),
            script: config.script_extractor(),
        }
    }

    /// Create a dispatcher with default extractors
    pub fn with_defaults() -> Self {
        Self {
            c_family: CFamilyExtractor::new(),
            script: ScriptBlockExtractor::new(),
        }
    }

    /// Knowledge items for one file: its tag, then any extracted facts
    pub fn digest_file(&self, path: &Path) -> Result<Vec<KnowledgeItem>> {
        let kind = FileKind::from_path(path);
        tracing::debug!("Visiting {:?} ({:?})", path, kind);

        let mut items = vec![tag_file_name(path)];

        let extractor: &dyn Extractor = match kind {
            FileKind::CFamily => &self.c_family,
            FileKind::Script => &self.script,
            FileKind::Other => return Ok(items),
        };

        let content = std::fs::read_to_string(path).map_err(|source| DigestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        items.extend(extractor.extract(&normalize_newlines(content)));

        Ok(items)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// A directory tree being digested
pub struct SourceTree {
    root: PathBuf,
    dispatcher: Dispatcher,
}

impl SourceTree {
    /// Open the tree described by `config`, checking that the root is a directory
    pub fn open(config: &DigestConfig) -> Result<Self> {
        let root = config.root.clone();

        if !root.exists() {
            return Err(DigestError::RootNotFound(root));
        }
        if !root.is_dir() {
            return Err(DigestError::RootNotDirectory(root));
        }

        Ok(Self {
            root,
            dispatcher: Dispatcher::new(config),
        })
    }

    /// Get the root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List every file under the root.
    ///
    /// Within a directory, files come before subdirectories and each group is
    /// sorted by name, so a directory's own files always precede its children.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by(files_first) {
            let entry = entry?;
            if is_file(&entry) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Digest every file under the root, in traversal order
    pub fn digest(&self) -> Result<Vec<KnowledgeItem>> {
        let files = self.list_files()?;
        let mut knowledge = Vec::new();

        for path in &files {
            knowledge.extend(self.dispatcher.digest_file(path)?);
        }

        tracing::info!(
            "Digested {} file(s) under {:?} into {} item(s)",
            files.len(),
            self.root,
            knowledge.len()
        );

        Ok(knowledge)
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Anything that is not a directory; symlinks count unless they resolve to one
fn is_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn render(items: &[KnowledgeItem]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn tag(parent: &str, name: &str) -> String {
        format!("File Name: {}", Path::new(parent).join(name).display())
    }

    fn create_test_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("proj");

        fs::create_dir_all(root.join("src").join("util")).unwrap();
        fs::create_dir_all(root.join("data")).unwrap();

        fs::write(root.join("README.md"), "# Project\n").unwrap();
        fs::write(root.join("src").join("main.c"), "int main(void) { return 0; }\n").unwrap();
        fs::write(
            root.join("src").join("point.h"),
            "#include \"types.h\"\nstruct Point {\n  int x;\n};\n",
        )
        .unwrap();
        fs::write(
            root.join("src").join("util").join("str.c"),
            "static char up(char c);\n",
        )
        .unwrap();
        fs::write(root.join("data").join("events.inc"), "a\nb\nEvent::\nc\n").unwrap();

        dir
    }

    #[test]
    fn test_file_kind_is_case_sensitive() {
        assert_eq!(FileKind::from_path(Path::new("a/b.c")), FileKind::CFamily);
        assert_eq!(FileKind::from_path(Path::new("b.h")), FileKind::CFamily);
        assert_eq!(FileKind::from_path(Path::new("x.inc")), FileKind::Script);
        assert_eq!(FileKind::from_path(Path::new("data.INC")), FileKind::Other);
        assert_eq!(FileKind::from_path(Path::new("main.C")), FileKind::Other);
        assert_eq!(FileKind::from_path(Path::new("readme.cfg")), FileKind::Other);
        assert_eq!(FileKind::from_path(Path::new("x.cc")), FileKind::Other);
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let config = DigestConfig::new(dir.path().join("nope"));

        assert!(matches!(
            SourceTree::open(&config),
            Err(DigestError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("main.c");
        fs::write(&file, "").unwrap();

        assert!(matches!(
            SourceTree::open(&DigestConfig::new(&file)),
            Err(DigestError::RootNotDirectory(_))
        ));
    }

    #[test]
    fn test_files_before_subdirectories() {
        let dir = create_test_tree();
        let root = dir.path().join("proj");
        let tree = SourceTree::open(&DigestConfig::new(&root)).unwrap();

        let files: Vec<PathBuf> = tree
            .list_files()
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(&root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            files,
            vec![
                PathBuf::from("README.md"),
                Path::new("data").join("events.inc"),
                Path::new("src").join("main.c"),
                Path::new("src").join("point.h"),
                Path::new("src").join("util").join("str.c"),
            ]
        );
    }

    #[test]
    fn test_digest_tree() {
        let dir = create_test_tree();
        let tree = SourceTree::open(&DigestConfig::new(dir.path().join("proj"))).unwrap();

        assert_eq!(
            render(&tree.digest().unwrap()),
            vec![
                tag("proj", "README.md"),
                tag("data", "events.inc"),
                "2 lines.".to_string(),
                "Script named 'Event'.".to_string(),
                tag("src", "main.c"),
                "Function: int main(void)".to_string(),
                tag("src", "point.h"),
                "Struct: struct Point {\n  int x;\n};".to_string(),
                "#include \"types.h\"".to_string(),
                tag("util", "str.c"),
                "Function: static char up(char c)".to_string(),
            ]
        );
    }

    #[test]
    fn test_single_function_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("app");
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src").join("main.c"), "int run(int argc)\n").unwrap();

        let tree = SourceTree::open(&DigestConfig::new(&root)).unwrap();
        let items = tree.digest().unwrap();

        assert_eq!(
            items,
            vec![
                KnowledgeItem::FileName(Path::new("src").join("main.c").display().to_string()),
                KnowledgeItem::Function("int run(int argc)".to_string()),
            ]
        );
    }

    #[test]
    fn test_digest_is_repeatable() {
        let dir = create_test_tree();
        let tree = SourceTree::open(&DigestConfig::new(dir.path().join("proj"))).unwrap();

        assert_eq!(tree.digest().unwrap(), tree.digest().unwrap());
    }

    #[test]
    fn test_other_files_are_not_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        fs::write(dir.path().join("data.INC"), "Label::\n").unwrap();

        let tree = SourceTree::open(&DigestConfig::new(dir.path())).unwrap();
        let items = tree.digest().unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| matches!(item, KnowledgeItem::FileName(_))));
    }

    #[test]
    fn test_non_utf8_source_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.c"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let tree = SourceTree::open(&DigestConfig::new(dir.path())).unwrap();

        assert!(matches!(tree.digest(), Err(DigestError::Read { .. })));
    }

    #[test]
    fn test_dispatcher_flushes_trailing_group() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("map.inc");
        fs::write(&path, "Start::\n  end\n").unwrap();

        let config =
            DigestConfig::new(dir.path()).with_trailing(crate::extract::TrailingGroup::Flush);
        let items = Dispatcher::new(&config).digest_file(&path).unwrap();

        assert_eq!(items.last(), Some(&KnowledgeItem::LineCount(2)));
    }

    #[test]
    fn test_crlf_source_is_normalized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.h");
        fs::write(&path, "struct P {\r\n  int x;\r\n};\r\n").unwrap();

        let items = Dispatcher::default().digest_file(&path).unwrap();

        assert_eq!(
            items[1..],
            [KnowledgeItem::Struct("struct P {\n  int x;\n};".to_string())]
        );
    }

    #[test]
    fn test_cr_only_script_is_split() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("s.inc");
        fs::write(&path, "a\rb\rLabel::\rc\r").unwrap();

        let items = Dispatcher::default().digest_file(&path).unwrap();

        assert_eq!(
            render(&items[1..]),
            vec!["2 lines.", "Script named 'Label'."]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_tagged() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("link.txt"))
            .unwrap();

        let tree = SourceTree::open(&DigestConfig::new(dir.path())).unwrap();
        let items = tree.digest().unwrap();

        assert_eq!(items.len(), 1);
        assert!(items[0].to_string().ends_with("link.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_source_symlink_fails() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.c"), dir.path().join("link.c")).unwrap();

        let tree = SourceTree::open(&DigestConfig::new(dir.path())).unwrap();

        assert!(matches!(tree.digest(), Err(DigestError::Read { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_symlink_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("real").join("a.txt"), "").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

        let tree = SourceTree::open(&DigestConfig::new(dir.path())).unwrap();

        assert_eq!(tree.list_files().unwrap(), vec![dir.path().join("real").join("a.txt")]);
    }
}
