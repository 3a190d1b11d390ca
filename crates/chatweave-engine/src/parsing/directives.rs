//! Inline configuration directives, collected across a whole block before any
//! message line is processed.
//!
//! Three shapes, distinguished by enclosing punctuation:
//! - `{header=h3,mw=70,mode=minimal}` — layout options
//! - `[Alice=blue,Bob=red]` — explicit speaker colors
//! - `>Alice,Bob` — right-aligned speakers (transcript dialect only)
//!
//! Unrecognized keys and values are dropped without complaint; a later line
//! overwrites an earlier one for the same key (last-wins).

use std::collections::{HashMap, HashSet};

use crate::parsing::style;

/// Resolved layout options for a block. `None` means "no directive given,
/// use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveSet {
    pub header_tag: Option<String>,
    pub max_width: Option<String>,
    pub mode: Option<String>,
}

impl DirectiveSet {
    /// Applies one `key=value` pair, accepting it only if the key is a
    /// recognized layout key and the value is in that key's value set.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "header" | "Header" if style::HEADER_TAGS.contains(&value) => {
                self.header_tag = Some(value.to_string());
            }
            "mw" | "MaxWidth" if style::MAX_WIDTHS.contains(&value) => {
                self.max_width = Some(value.to_string());
            }
            "mode" | "Mode" if style::MODES.contains(&value) => {
                self.mode = Some(value.to_string());
            }
            _ => {}
        }
    }

    /// Applies the comma-separated pairs from the inside of a `{...}` line.
    pub fn apply_pairs(&mut self, inner: &str) {
        for pair in inner.split(',') {
            if let Some((key, value)) = pair.split_once('=') {
                self.set(key.trim(), value.trim());
            }
        }
    }
}

/// Explicit speaker-to-color assignments from `[name=color]` directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap(HashMap<String, String>);

impl ColorMap {
    /// Applies the comma-separated pairs from the inside of a `[...]` line.
    /// A pair is accepted only if the color is in the fixed palette; the
    /// speaker name may be any non-empty string.
    pub fn apply_pairs(&mut self, inner: &str) {
        for pair in inner.split(',') {
            if let Some((name, color)) = pair.split_once('=') {
                let (name, color) = (name.trim(), color.trim());
                if !name.is_empty() && style::PALETTE.contains(&color) {
                    self.0.insert(name.to_string(), color.to_string());
                }
            }
        }
    }

    pub fn get(&self, speaker: &str) -> Option<&str> {
        self.0.get(speaker).map(String::as_str)
    }
}

/// Speakers whose turns render right-aligned, from `>a,b` directive lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentSet(HashSet<String>);

impl AlignmentSet {
    pub fn apply_names(&mut self, names: &str) {
        for name in names.split(',') {
            let name = name.trim();
            if !name.is_empty() {
                self.0.insert(name.to_string());
            }
        }
    }

    pub fn insert(&mut self, name: &str) {
        if !name.is_empty() {
            self.0.insert(name.to_string());
        }
    }

    pub fn contains(&self, speaker: &str) -> bool {
        self.0.contains(speaker)
    }
}

/// All directive state for one block, built by a fold over classified lines
/// and then passed by reference into resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDirectives {
    pub layout: DirectiveSet,
    pub colors: ColorMap,
    pub right_aligned: AlignmentSet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn layout_pairs_are_validated_per_key() {
        let mut set = DirectiveSet::default();
        set.apply_pairs("header=h3, mw=70, mode=minimal");
        assert_eq!(set.header_tag.as_deref(), Some("h3"));
        assert_eq!(set.max_width.as_deref(), Some("70"));
        assert_eq!(set.mode.as_deref(), Some("minimal"));
    }

    #[rstest]
    #[case("header=h7")]
    #[case("mw=99")]
    #[case("mode=fancy")]
    #[case("margin=10")]
    fn unknown_keys_and_values_are_dropped(#[case] pair: &str) {
        let mut set = DirectiveSet::default();
        set.apply_pairs(pair);
        assert_eq!(set, DirectiveSet::default());
    }

    #[test]
    fn later_pairs_overwrite_earlier_ones() {
        let mut set = DirectiveSet::default();
        set.apply_pairs("mw=50");
        set.apply_pairs("mw=90");
        assert_eq!(set.max_width.as_deref(), Some("90"));
    }

    #[test]
    fn invalid_value_retains_prior_value() {
        let mut set = DirectiveSet::default();
        set.apply_pairs("mw=70");
        set.apply_pairs("mw=99");
        assert_eq!(set.max_width.as_deref(), Some("70"));
    }

    #[test]
    fn color_pairs_require_palette_colors() {
        let mut colors = ColorMap::default();
        colors.apply_pairs("Alice=blue, Bob=chartreuse, =red");
        assert_eq!(colors.get("Alice"), Some("blue"));
        assert_eq!(colors.get("Bob"), None);
    }

    #[test]
    fn alignment_names_accumulate_across_lines() {
        let mut set = AlignmentSet::default();
        set.apply_names("Alice, Bob");
        set.apply_names("Carol");
        assert!(set.contains("Alice"));
        assert!(set.contains("Bob"));
        assert!(set.contains("Carol"));
        assert!(!set.contains("Dave"));
    }
}
