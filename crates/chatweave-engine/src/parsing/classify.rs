//! Per-dialect line classification.
//!
//! Each non-empty line is tagged with exactly one kind, tried in fixed
//! priority order: directive > comment > delimiter > message > drop. Lines
//! matching nothing are dropped before any positional lookup happens, so
//! "previous line" always means the previous *classified* line.

use std::sync::OnceLock;

use regex::Regex;

/// Classification of a single trimmed, non-empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Inside of a `{...}` layout directive line.
    LayoutDirective(&'a str),
    /// Inside of a `[...]` color directive line.
    ColorDirective(&'a str),
    /// Names from a `>a,b` right-alignment directive line (transcript only).
    AlignDirective(&'a str),
    /// Plain annotation text, never attributed to a speaker.
    Comment(&'a str),
    /// The `...` sentinel, rendered as a three-dot separator.
    Delimiter,
    /// A message line, parsed further by the dialect parser.
    Message(&'a str),
}

const DELIMITER_SENTINEL: &str = "...";

fn layout_inner(line: &str) -> Option<&str> {
    line.strip_prefix('{')?.strip_suffix('}')
}

fn color_inner(line: &str) -> Option<&str> {
    // Only a line that is nothing but the bracket pair is a directive; a
    // transcript message starts with a bracket token but continues after it.
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains(']') || !inner.contains('=') {
        return None;
    }
    Some(inner)
}

/// Classifies a line of the prefix (`>`/`<`/`^`) dialect.
pub fn classify_prefix(line: &str) -> Option<LineKind<'_>> {
    if let Some(inner) = layout_inner(line) {
        return Some(LineKind::LayoutDirective(inner));
    }
    if let Some(inner) = color_inner(line) {
        return Some(LineKind::ColorDirective(inner));
    }
    if let Some(text) = line.strip_prefix('#') {
        return Some(LineKind::Comment(text.trim()));
    }
    if line == DELIMITER_SENTINEL {
        return Some(LineKind::Delimiter);
    }
    if line.starts_with(['>', '<', '^']) {
        return Some(LineKind::Message(line));
    }
    None
}

fn transcript_message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[(\[][^)\]]*[)\]].*").expect("Invalid transcript message regex")
    })
}

fn transcript_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[*_]{3}(.*?)[*_]{3}$").expect("Invalid transcript comment regex")
    })
}

/// Classifies a line of the timestamped-transcript dialect.
///
/// The `***...***` comment wrapper takes priority over message parsing, so a
/// wrapped line never becomes an attributed turn.
pub fn classify_transcript(line: &str) -> Option<LineKind<'_>> {
    if let Some(inner) = layout_inner(line) {
        return Some(LineKind::LayoutDirective(inner));
    }
    if let Some(inner) = color_inner(line) {
        return Some(LineKind::ColorDirective(inner));
    }
    if let Some(caps) = transcript_comment_re().captures(line) {
        let inner = caps.get(1).map_or("", |m| m.as_str());
        return Some(LineKind::Comment(inner.trim()));
    }
    if line == DELIMITER_SENTINEL {
        return Some(LineKind::Delimiter);
    }
    if let Some(names) = line.strip_prefix('>') {
        return Some(LineKind::AlignDirective(names));
    }
    if transcript_message_re().is_match(line) {
        return Some(LineKind::Message(line));
    }
    None
}
