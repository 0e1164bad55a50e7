//! Run configuration for a digest

use crate::extract::{ScriptBlockExtractor, SetDirectiveRule, TrailingGroup};
use std::path::{Path, PathBuf};

/// Settings for one digest run
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Root directory to walk
    pub root: PathBuf,

    /// Directory the knowledge file is written into
    pub output_dir: PathBuf,

    /// What to do with lines after the last script label
    pub trailing: TrailingGroup,

    /// Recognize `.set NAME, VALUE` directives in scripts
    pub set_directives: bool,
}

impl DigestConfig {
    /// Configuration for `root` with defaults for everything else
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            output_dir: default_output_dir(),
            trailing: TrailingGroup::default(),
            set_directives: false,
        }
    }

    /// Set the output directory
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the trailing group policy for scripts
    pub fn with_trailing(mut self, trailing: TrailingGroup) -> Self {
        self.trailing = trailing;
        self
    }

    /// Enable or disable `.set` directive facts
    pub fn with_set_directives(mut self, enabled: bool) -> Self {
        self.set_directives = enabled;
        self
    }

    /// Build the script extractor these settings describe
    pub fn script_extractor(&self) -> ScriptBlockExtractor {
        let extractor = ScriptBlockExtractor::new().with_trailing(self.trailing);
        if self.set_directives {
            extractor.with_rule(Box::new(SetDirectiveRule))
        } else {
            extractor
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
