use serde::{Deserialize, Serialize};

/// Which side of the block a bubble renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
}

/// One renderable conversational unit.
///
/// This is the rendering contract: everything the rendering collaborator
/// needs to draw one bubble. Constructed once per accepted message line and
/// never mutated afterwards.
///
/// Invariant: when `continued` is true, `header` is empty and the owning
/// speaker is carried in `previous_header` — style lookups (color, grouping)
/// go through `previous_header`, never through the empty `header`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub header: String,
    pub previous_header: String,
    pub body: String,
    pub subtext: String,
    pub align: Align,
    pub continued: bool,
    /// Palette color token for the owning speaker; empty for anonymous turns.
    pub color: String,
    /// Heading element used for the header, `h2`..`h6`.
    pub header_tag: String,
    /// Percentage width token, or `None` when no directive was given and the
    /// renderer should fall back to its device-class preset.
    pub max_width: Option<String>,
    /// Visual mode, `default` or `minimal`.
    pub mode: String,
}

/// One item of a compiled block, in source order.
///
/// Comments and delimiters are degenerate records the renderer recognizes by
/// kind; they carry no speaker, alignment, or style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChatItem {
    Bubble(Bubble),
    Comment { text: String },
    Delimiter,
}
