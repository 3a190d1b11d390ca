//! Cue-import dialect: compiles an externally tokenized caption cue list
//! (start/end times plus an optional voice tag) into turns.
//!
//! Tokenization itself is delegated to the host through [`CueTokenizer`];
//! unlike the text dialects, a structurally broken cue source is a hard
//! failure, because the engine cannot recover what the tokenizer could not
//! read.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::parsing::RawTurn;
use crate::parsing::directives::{AlignmentSet, DirectiveSet};

/// One caption cue: a timed payload, possibly voice-tagged.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    pub text: String,
}

/// Tokenizer output: block metadata plus the ordered cue list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueSheet {
    /// `Key: value` pairs from the block header (`Self`, `MaxWidth`,
    /// `Header`, `Mode`).
    pub metadata: Vec<(String, String)>,
    pub cues: Vec<Cue>,
}

/// Errors from cue tokenization. These surface to the host unrecovered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CueError {
    #[error("malformed cue timing line: {0}")]
    BadTiming(String),
    #[error("malformed cue timestamp: {0}")]
    BadTimestamp(String),
    #[error("unexpected content outside any cue: {0}")]
    UnexpectedLine(String),
}

/// External cue tokenizer collaborator, treated as a pure function from raw
/// block text to a cue sheet.
pub trait CueTokenizer {
    fn tokenize(&self, source: &str) -> Result<CueSheet, CueError>;
}

/// Block options recovered from cue-sheet metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueOptions {
    /// Speakers rendered right-aligned ("self" voices).
    pub selves: AlignmentSet,
    pub layout: DirectiveSet,
}

impl CueOptions {
    /// Builds options from metadata pairs. Unknown keys and out-of-set
    /// values are dropped; later pairs win for layout keys and accumulate
    /// for `Self`.
    pub fn from_metadata(metadata: &[(String, String)]) -> Self {
        let mut options = Self::default();
        for (key, value) in metadata {
            if key.eq_ignore_ascii_case("self") {
                for name in value.split(',') {
                    options.selves.insert(name.trim());
                }
            } else {
                options.layout.set(key, value);
            }
        }
        options
    }
}

fn voice_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^<v(?:\.[\w.-]+)?\s+([^>]+)>\s*(.*?)\s*(?:</v>)?$")
            .expect("Invalid voice tag regex")
    })
}

/// Turns one cue into a raw turn: voice tag → speaker, timestamps → subtext.
pub fn parse_cue(cue: &Cue) -> RawTurn {
    let (speaker, body) = match voice_tag_re().captures(&cue.text) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
            caps.get(2).map_or("", |m| m.as_str()).to_string(),
        ),
        None => (String::new(), cue.text.trim().to_string()),
    };

    RawTurn {
        speaker,
        body,
        subtext: format!(
            "{} to {}",
            format_timestamp(cue.start),
            format_timestamp(cue.end)
        ),
    }
}

/// Formats seconds as zero-padded `HH:mm:ss.mmm`.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let s = (total_ms / 1000) % 60;
    let m = (total_ms / 60_000) % 60;
    let h = total_ms / 3_600_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}
