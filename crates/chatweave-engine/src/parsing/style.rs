//! Color and layout resolution for a block.
//!
//! Speakers without an explicit color directive get a deterministic palette
//! color keyed on first-appearance order; layout options fall back to fixed
//! defaults when no directive was given.

use std::collections::HashMap;

use crate::parsing::directives::{ColorMap, DirectiveSet};

/// Fixed color palette, in assignment order.
pub const PALETTE: [&str; 13] = [
    "red", "orange", "yellow", "green", "blue", "purple", "grey", "brown", "indigo", "teal",
    "pink", "slate", "wood",
];

/// Accepted values for the `header` layout key.
pub const HEADER_TAGS: [&str; 5] = ["h2", "h3", "h4", "h5", "h6"];

/// Accepted values for the `mw` layout key.
pub const MAX_WIDTHS: [&str; 9] = ["50", "55", "60", "65", "70", "75", "80", "85", "90"];

/// Accepted values for the `mode` layout key.
pub const MODES: [&str; 2] = ["default", "minimal"];

const DEFAULT_HEADER_TAG: &str = "h4";
const DEFAULT_MODE: &str = "default";

/// Width preset for compact viewports, applied by the renderer when a block
/// carries no `mw` directive.
pub const PRESET_WIDTH_COMPACT: &str = "90";

/// Width preset for regular viewports, applied by the renderer when a block
/// carries no `mw` directive.
pub const PRESET_WIDTH_WIDE: &str = "80";

/// Block-level resolved style: one color per speaker plus the layout options
/// every bubble in the block shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    colors: HashMap<String, String>,
    pub header_tag: String,
    pub max_width: Option<String>,
    pub mode: String,
}

impl StyleSheet {
    /// Resolves colors and layout for a block.
    ///
    /// `owners` is the list of distinct non-empty owning speakers in
    /// first-appearance order across the whole block; it must be collected
    /// after full traversal so indices are stable.
    ///
    /// `max_width` stays `None` when no `mw` directive was given: the
    /// device-class preset ([`PRESET_WIDTH_COMPACT`] / [`PRESET_WIDTH_WIDE`])
    /// is selected by the rendering collaborator, which knows the viewport.
    pub fn resolve(owners: &[String], explicit: &ColorMap, layout: &DirectiveSet) -> Self {
        let mut colors = HashMap::new();
        for (index, owner) in owners.iter().enumerate() {
            let color = explicit
                .get(owner)
                .unwrap_or(PALETTE[index % PALETTE.len()]);
            colors.insert(owner.clone(), color.to_string());
        }

        Self {
            colors,
            header_tag: layout
                .header_tag
                .clone()
                .unwrap_or_else(|| DEFAULT_HEADER_TAG.to_string()),
            max_width: layout.max_width.clone(),
            mode: layout
                .mode
                .clone()
                .unwrap_or_else(|| DEFAULT_MODE.to_string()),
        }
    }

    /// Color token for a speaker. Anonymous (empty) speakers have no color.
    pub fn color_for(&self, speaker: &str) -> &str {
        self.colors.get(speaker).map_or("", String::as_str)
    }
}
