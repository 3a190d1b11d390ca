//! The block compilation pipeline.
//!
//! One pass collects directives and classifies lines, one pass resolves
//! continuation, one pass resolves colors and layout, one pass assembles
//! bubbles. Every structure is block-scoped; compiling the same block twice
//! yields identical output.

pub mod classify;
pub mod continuation;
pub mod cue;
pub mod directives;
pub mod prefix;
pub mod style;
pub mod transcript;

use crate::models::{Align, Bubble, ChatItem, Settings};
use classify::LineKind;
use continuation::{ContinuationRule, Item, ResolvedTurn, TurnSeed};
use cue::{CueError, CueOptions, CueSheet, CueTokenizer};
use directives::{AlignmentSet, BlockDirectives};
use style::StyleSheet;

/// One attributable unit of conversation as a dialect parser produced it,
/// before continuation and style resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTurn {
    /// May be empty: "continue the previous speaker" or "no attribution",
    /// depending on the dialect's continuation rule.
    pub speaker: String,
    pub body: String,
    pub subtext: String,
}

/// Which grammar applies to a block, selected by the host's fence tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `>`/`<`/`^` line-prefixed shorthand.
    Prefix,
    /// `(hh:mm) Speaker: text` transcript lines.
    Transcript,
    /// Imported caption cues with voice tags.
    Cue,
}

impl Dialect {
    /// Maps a fenced-code-block info string to a dialect.
    pub fn from_fence_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "chat" => Some(Self::Prefix),
            "chat-transcript" | "transcript" => Some(Self::Transcript),
            "chat-webvtt" | "webvtt" => Some(Self::Cue),
            _ => None,
        }
    }
}

/// Compiles a block of raw text in the given dialect. The cue dialect
/// delegates tokenization to `tokenizer`; tokenizer failures are the only
/// hard-failure path, everything else degrades per line.
pub fn compile_block(
    source: &str,
    dialect: Dialect,
    settings: &Settings,
    tokenizer: &dyn CueTokenizer,
) -> Result<Vec<ChatItem>, CueError> {
    match dialect {
        Dialect::Prefix => Ok(compile_chat(source, settings)),
        Dialect::Transcript => Ok(compile_transcript(source)),
        Dialect::Cue => Ok(compile_cues(&tokenizer.tokenize(source)?)),
    }
}

/// Compiles a prefix-dialect block.
pub fn compile_chat(source: &str, settings: &Settings) -> Vec<ChatItem> {
    let glyphs = prefix::GlyphTable::new(settings);
    let mut directives = BlockDirectives::default();
    let mut items = Vec::new();

    for line in trimmed_lines(source) {
        match classify::classify_prefix(line) {
            Some(LineKind::LayoutDirective(inner)) => directives.layout.apply_pairs(inner),
            Some(LineKind::ColorDirective(inner)) => directives.colors.apply_pairs(inner),
            Some(LineKind::Comment(text)) => items.push(Item::Comment(text.to_string())),
            Some(LineKind::Delimiter) => items.push(Item::Delimiter),
            Some(LineKind::Message(line)) => {
                if let Some(parsed) = prefix::parse_message(line, &glyphs) {
                    items.push(Item::Turn(TurnSeed {
                        turn: parsed.turn,
                        glyph: Some(parsed.glyph),
                        align: Some(parsed.align),
                    }));
                }
            }
            // The prefix classifier produces no alignment directives.
            Some(LineKind::AlignDirective(_)) | None => {}
        }
    }

    let resolved = continuation::resolve(&items, ContinuationRule::SameGlyphEmptyHeader);
    assemble(&items, &resolved, &directives, &directives.right_aligned)
}

/// Compiles a timestamped-transcript block.
pub fn compile_transcript(source: &str) -> Vec<ChatItem> {
    let mut directives = BlockDirectives::default();
    let mut items = Vec::new();

    for line in trimmed_lines(source) {
        match classify::classify_transcript(line) {
            Some(LineKind::LayoutDirective(inner)) => directives.layout.apply_pairs(inner),
            Some(LineKind::ColorDirective(inner)) => directives.colors.apply_pairs(inner),
            Some(LineKind::AlignDirective(names)) => directives.right_aligned.apply_names(names),
            Some(LineKind::Comment(text)) => items.push(Item::Comment(text.to_string())),
            Some(LineKind::Delimiter) => items.push(Item::Delimiter),
            Some(LineKind::Message(line)) => {
                if let Some(turn) = transcript::parse_message(line) {
                    items.push(Item::Turn(TurnSeed {
                        turn,
                        glyph: None,
                        align: None,
                    }));
                }
            }
            None => {}
        }
    }

    let resolved = continuation::resolve(&items, ContinuationRule::MatchingOrEmptyHeader);
    assemble(&items, &resolved, &directives, &directives.right_aligned)
}

/// Compiles an already-tokenized cue sheet.
pub fn compile_cues(sheet: &CueSheet) -> Vec<ChatItem> {
    let options = CueOptions::from_metadata(&sheet.metadata);
    let items: Vec<Item> = sheet
        .cues
        .iter()
        .map(|c| {
            Item::Turn(TurnSeed {
                turn: cue::parse_cue(c),
                glyph: None,
                align: None,
            })
        })
        .collect();

    let resolved = continuation::resolve(&items, ContinuationRule::SameSpeaker);
    let directives = BlockDirectives {
        layout: options.layout,
        ..BlockDirectives::default()
    };
    assemble(&items, &resolved, &directives, &options.selves)
}

fn trimmed_lines(source: &str) -> impl Iterator<Item = &str> {
    source.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Zips classified items with their resolved continuation and style into the
/// final record sequence: exactly one output per classified item, in source
/// order, nothing merged or reordered.
fn assemble(
    items: &[Item],
    resolved: &[ResolvedTurn],
    directives: &BlockDirectives,
    right_aligned: &AlignmentSet,
) -> Vec<ChatItem> {
    let owners = first_appearance_owners(resolved);
    let sheet = StyleSheet::resolve(&owners, &directives.colors, &directives.layout);

    let mut turns = resolved.iter();
    items
        .iter()
        .map(|item| match item {
            Item::Comment(text) => ChatItem::Comment { text: text.clone() },
            Item::Delimiter => ChatItem::Delimiter,
            Item::Turn(_) => {
                let r = turns
                    .next()
                    .expect("one resolved turn exists per classified turn");
                ChatItem::Bubble(build_bubble(r, &sheet, right_aligned))
            }
        })
        .collect()
}

/// Distinct non-empty owning speakers, ordered by first appearance across
/// the whole block. Computed after full traversal so palette indices are
/// stable regardless of continuation structure.
fn first_appearance_owners(resolved: &[ResolvedTurn]) -> Vec<String> {
    let mut owners: Vec<String> = Vec::new();
    for r in resolved {
        if !r.owner.is_empty() && !owners.iter().any(|o| o == &r.owner) {
            owners.push(r.owner.clone());
        }
    }
    owners
}

fn build_bubble(r: &ResolvedTurn, sheet: &StyleSheet, right_aligned: &AlignmentSet) -> Bubble {
    let align = r.seed.align.unwrap_or_else(|| {
        if right_aligned.contains(&r.owner) {
            Align::Right
        } else {
            Align::Left
        }
    });

    Bubble {
        header: if r.continued {
            String::new()
        } else {
            r.seed.turn.speaker.clone()
        },
        previous_header: if r.continued {
            r.owner.clone()
        } else {
            String::new()
        },
        body: r.seed.turn.body.clone(),
        subtext: r.seed.turn.subtext.clone(),
        align,
        continued: r.continued,
        color: sheet.color_for(&r.owner).to_string(),
        header_tag: sheet.header_tag.clone(),
        max_width: sheet.max_width.clone(),
        mode: sheet.mode.clone(),
    }
}
