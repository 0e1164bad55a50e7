//! C-family extraction for `.c` and `.h` files
//!
//! Scans the raw text for shallow structural facts:
//! - Function signatures (`[static] type name(args)`)
//! - Struct blocks (`struct Name { ... };`)
//! - Anonymous enum blocks (`enum { ... }`)
//! - Local includes (`#include "file.h"`)
//!
//! The scanner is deliberately shallow. It does not understand multi-token
//! return types, nested parentheses in argument lists, nested braces, or
//! comments and string literals. Each category is scanned independently over
//! the whole text; matches never overlap within a category and scanning
//! resumes right after each match.

use super::{Extractor, KnowledgeItem};

/// Extracts knowledge items from C source and header files
#[derive(Debug, Clone, Copy, Default)]
pub struct CFamilyExtractor;

impl CFamilyExtractor {
    /// Create a new C-family extractor
    pub fn new() -> Self {
        Self
    }

    /// Function signatures in order of appearance
    pub fn functions<'a>(&self, content: &'a str) -> Vec<&'a str> {
        scan(content, match_function)
    }

    /// Struct definition blocks in order of appearance
    pub fn structs<'a>(&self, content: &'a str) -> Vec<&'a str> {
        scan(content, match_struct)
    }

    /// Anonymous enum blocks in order of appearance
    pub fn enums<'a>(&self, content: &'a str) -> Vec<&'a str> {
        scan(content, match_enum)
    }

    /// Local include directives in order of appearance
    pub fn includes<'a>(&self, content: &'a str) -> Vec<&'a str> {
        scan(content, match_include)
    }
}

impl Extractor for CFamilyExtractor {
    fn extract(&self, content: &str) -> Vec<KnowledgeItem> {
        let functions = self
            .functions(content)
            .into_iter()
            .map(|m| KnowledgeItem::Function(m.to_string()));
        let structs = self
            .structs(content)
            .into_iter()
            .map(|m| KnowledgeItem::Struct(m.to_string()));
        let enums = self
            .enums(content)
            .into_iter()
            .map(|m| KnowledgeItem::Enum(m.to_string()));
        let includes = self
            .includes(content)
            .into_iter()
            .map(|m| KnowledgeItem::Include(m.to_string()));

        let items: Vec<_> = functions.chain(structs).chain(enums).chain(includes).collect();
        tracing::debug!("C-family scan produced {} item(s)", items.len());
        items
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offset just past the run of chars matching `pred` starting at `pos`
fn skip_while(text: &str, pos: usize, pred: impl Fn(char) -> bool) -> usize {
    text[pos..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| pos + i)
}

/// Try `matcher` at every char boundary, left to right, without overlaps
fn scan<'a>(text: &'a str, matcher: fn(&str, usize) -> Option<usize>) -> Vec<&'a str> {
    let mut matches = Vec::new();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        match matcher(text, pos) {
            Some(end) => {
                matches.push(&text[pos..end]);
                pos = end;
            }
            None => pos += c.len_utf8(),
        }
    }

    matches
}

/// `\b(?:static\s+)?\w+\s+\w+\([^)]*\)`
fn match_function(text: &str, start: usize) -> Option<usize> {
    let first = text[start..].chars().next()?;
    let after_word = text[..start].chars().next_back().is_some_and(is_word);
    if !is_word(first) || after_word {
        return None;
    }

    if text[start..].starts_with("static") {
        let after = start + "static".len();
        let ws_end = skip_while(text, after, char::is_whitespace);
        if ws_end > after {
            if let Some(end) = match_typed_call(text, ws_end) {
                return Some(end);
            }
        }
    }

    // `static` may also stand in as the return type word
    match_typed_call(text, start)
}

/// `\w+\s+\w+\([^)]*\)`
fn match_typed_call(text: &str, start: usize) -> Option<usize> {
    let type_end = skip_while(text, start, is_word);
    if type_end == start {
        return None;
    }

    let ws_end = skip_while(text, type_end, char::is_whitespace);
    if ws_end == type_end {
        return None;
    }

    let name_end = skip_while(text, ws_end, is_word);
    if name_end == ws_end || !text[name_end..].starts_with('(') {
        return None;
    }

    let args = name_end + 1;
    let close = text[args..].find(')')?;
    Some(args + close + 1)
}

/// `struct\s+\w+\s*\{.*?\};` with `.` matching newlines
fn match_struct(text: &str, start: usize) -> Option<usize> {
    if !text[start..].starts_with("struct") {
        return None;
    }
    let after = start + "struct".len();

    let ws_end = skip_while(text, after, char::is_whitespace);
    if ws_end == after {
        return None;
    }

    let name_end = skip_while(text, ws_end, is_word);
    if name_end == ws_end {
        return None;
    }

    let brace = skip_while(text, name_end, char::is_whitespace);
    if !text[brace..].starts_with('{') {
        return None;
    }

    let body = brace + 1;
    let close = text[body..].find("};")?;
    Some(body + close + 2)
}

/// `enum\s+\{[^}]*\}`
fn match_enum(text: &str, start: usize) -> Option<usize> {
    if !text[start..].starts_with("enum") {
        return None;
    }
    let after = start + "enum".len();

    let brace = skip_while(text, after, char::is_whitespace);
    if brace == after || !text[brace..].starts_with('{') {
        return None;
    }

    let body = brace + 1;
    let close = text[body..].find('}')?;
    Some(body + close + 1)
}

/// `#include\s+"[^"]+"`
fn match_include(text: &str, start: usize) -> Option<usize> {
    if !text[start..].starts_with("#include") {
        return None;
    }
    let after = start + "#include".len();

    let quote = skip_while(text, after, char::is_whitespace);
    if quote == after || !text[quote..].starts_with('"') {
        return None;
    }

    let name = quote + 1;
    match text[name..].find('"')? {
        0 => None,
        close => Some(name + close + 1),
    }
}
