//! # Source Parsing
//!
//! Splits document source into top-level [`SourceBlock`]s, one pass over the
//! lines:
//!
//! - A line of the form `name::target[attrs]` is a block macro
//! - Runs of other non-blank lines form a paragraph
//! - Blank lines only separate paragraphs
//!
//! Line numbers are 1-based and point at the first line of each block.

use std::sync::LazyLock;

use regex::Regex;

use crate::macros::Attributes;

static BLOCK_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z][\w-]*)::(?P<target>[^\s\[]*)\[(?P<attrs>.*)\]$")
        .expect("block macro pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceBlock {
    Paragraph {
        line: usize,
        text: String,
    },
    Macro {
        line: usize,
        name: String,
        target: String,
        attrs: Attributes,
        raw: String,
    },
}

impl SourceBlock {
    pub fn line(&self) -> usize {
        match self {
            SourceBlock::Paragraph { line, .. } | SourceBlock::Macro { line, .. } => *line,
        }
    }
}

/// Parse `source` into top-level blocks in document order.
pub fn parse_lines(source: &str) -> Vec<SourceBlock> {
    let mut blocks = Vec::new();
    let mut paragraph: Option<(usize, Vec<&str>)> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim_end();

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some(caps) = BLOCK_MACRO.captures(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(SourceBlock::Macro {
                line: line_no,
                name: caps["name"].to_string(),
                target: caps["target"].to_string(),
                attrs: parse_attributes(&caps["attrs"]),
                raw: line.to_string(),
            });
            continue;
        }

        paragraph
            .get_or_insert_with(|| (line_no, Vec::new()))
            .1
            .push(line);
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph(paragraph: &mut Option<(usize, Vec<&str>)>, blocks: &mut Vec<SourceBlock>) {
    if let Some((line, lines)) = paragraph.take() {
        blocks.push(SourceBlock::Paragraph {
            line,
            text: lines.join("\n"),
        });
    }
}

/// Parse the text between a macro's brackets.
///
/// Entries are comma separated. `key=value` entries are named, anything else
/// is positional and keyed by its 1-based position. Names start with a
/// letter or `_`, so `1=y` stays positional and cannot overwrite position 1.
/// Double-quoted values may contain commas and `\"`.
pub fn parse_attributes(raw: &str) -> Attributes {
    let mut attrs = Attributes::new();
    let mut position = 0;

    for entry in split_entries(raw) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.split_once('=') {
            Some((key, value)) if is_attribute_name(key.trim()) => {
                attrs.insert(key.trim(), unquote(value.trim()));
            }
            _ => {
                position += 1;
                attrs.insert(position.to_string(), unquote(entry));
            }
        }
    }

    attrs
}

fn split_entries(raw: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in raw.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => entries.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    entries.push(current);
    entries
}

fn is_attribute_name(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn unquote(value: &str) -> String {
    match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\""),
        None => value.to_string(),
    }
}
