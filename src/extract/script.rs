//! Script block extraction for `.inc` files
//!
//! Label scripts are written as a label line ending in `::` followed by the
//! script body. The extractor walks the file line by line, counting lines since
//! the previous label, and emits a line count plus the label name each time a
//! new label is reached.
//!
//! Label detection is one of several pluggable [`ScriptRule`]s. Rules are
//! checked in order and the first one that accepts a line decides what is
//! emitted and whether the line counter starts over.

use super::{Extractor, KnowledgeItem};

/// What a rule produced for one line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleOutcome {
    /// Items to append, in order
    pub items: Vec<KnowledgeItem>,
    /// Whether the line closes the current group and restarts the count
    pub resets_count: bool,
}

/// Trait for line rules in `.inc` scripts
pub trait ScriptRule: Send + Sync {
    /// Rule name
    fn name(&self) -> &str;

    /// Inspect a stripped line. `lines_since_marker` counts the lines seen
    /// since the last counter reset, not including `line` itself.
    fn apply(&self, line: &str, lines_since_marker: usize) -> Option<RuleOutcome>;
}

/// Detects `Label::` lines
pub struct LabelRule;

impl ScriptRule for LabelRule {
    fn name(&self) -> &str {
        "label"
    }

    fn apply(&self, line: &str, lines_since_marker: usize) -> Option<RuleOutcome> {
        if !line.ends_with("::") {
            return None;
        }

        let name = line.split("::").next().unwrap_or_default();

        Some(RuleOutcome {
            items: vec![
                KnowledgeItem::LineCount(lines_since_marker),
                KnowledgeItem::ScriptName(name.to_string()),
            ],
            resets_count: true,
        })
    }
}

/// Detects `.set NAME, VALUE` directives
pub struct SetDirectiveRule;

impl ScriptRule for SetDirectiveRule {
    fn name(&self) -> &str {
        "set"
    }

    fn apply(&self, line: &str, _lines_since_marker: usize) -> Option<RuleOutcome> {
        let rest = line.strip_prefix(".set")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }

        let (name, value) = rest.split_once(',')?;
        let value = value.split(',').next().unwrap_or_default();

        Some(RuleOutcome {
            items: vec![KnowledgeItem::Setting {
                name: name.trim().to_string(),
                value: value.trim().to_string(),
            }],
            resets_count: false,
        })
    }
}

/// What to do with lines after the last label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingGroup {
    /// Discard the count of lines after the last label
    #[default]
    Drop,
    /// Emit a final line count when lines follow the last label
    Flush,
}

/// Extracts label scripts from `.inc` files
pub struct ScriptBlockExtractor {
    rules: Vec<Box<dyn ScriptRule>>,
    trailing: TrailingGroup,
}

impl ScriptBlockExtractor {
    /// Create an extractor that recognizes script labels only
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(LabelRule)],
            trailing: TrailingGroup::Drop,
        }
    }

    /// Append a rule; earlier rules take precedence
    pub fn with_rule(mut self, rule: Box<dyn ScriptRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the trailing group policy
    pub fn with_trailing(mut self, trailing: TrailingGroup) -> Self {
        self.trailing = trailing;
        self
    }

    /// Names of the active rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run the line scanner over an already split sequence of lines
    pub fn extract_lines<'a, I>(&self, lines: I) -> Vec<KnowledgeItem>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut items = Vec::new();
        let mut lines_since_marker = 0usize;

        for raw in lines {
            let line = raw.trim();

            if let Some(outcome) = self
                .rules
                .iter()
                .find_map(|rule| rule.apply(line, lines_since_marker))
            {
                items.extend(outcome.items);
                if outcome.resets_count {
                    lines_since_marker = 0;
                }
            }

            // The label line itself counts toward the group it opens
            lines_since_marker += 1;
        }

        if self.trailing == TrailingGroup::Flush && lines_since_marker > 0 {
            items.push(KnowledgeItem::LineCount(lines_since_marker));
        }

        items
    }
}

impl Default for ScriptBlockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for ScriptBlockExtractor {
    fn extract(&self, content: &str) -> Vec<KnowledgeItem> {
        let items = self.extract_lines(content.lines());
        tracing::debug!("Script scan produced {} item(s)", items.len());
        items
    }
}
