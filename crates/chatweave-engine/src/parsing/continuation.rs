//! Speaker-continuation resolution.
//!
//! A single pass over the classified sequence decides, per turn, whether it
//! continues the previous speaker's turn, and which header owns it. State is
//! loop-local; nothing survives the pass.

use crate::models::Align;
use crate::parsing::RawTurn;

/// How a dialect decides that a turn continues the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationRule {
    /// Previous classified item is a message with the same glyph and the
    /// current header is empty (prefix dialect).
    SameGlyphEmptyHeader,
    /// Current header equals the previous message's header, or the current
    /// header is empty (transcript dialect).
    MatchingOrEmptyHeader,
    /// Current speaker equals the previous speaker, anonymous included
    /// (cue dialect).
    SameSpeaker,
}

/// A turn before continuation resolution. `glyph` is set by the prefix
/// dialect only; `align` is the per-line alignment where the dialect encodes
/// one (prefix), or `None` when alignment is a per-speaker property resolved
/// later (transcript, cues).
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSeed {
    pub turn: RawTurn,
    pub glyph: Option<char>,
    pub align: Option<Align>,
}

/// A classified item flowing through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Comment(String),
    Delimiter,
    Turn(TurnSeed),
}

/// A turn with its continuation flag and owning header resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTurn {
    pub seed: TurnSeed,
    pub continued: bool,
    /// Header of the turn that owns this one: the turn itself when not
    /// continued, otherwise the nearest preceding non-continued turn.
    pub owner: String,
}

/// Resolves continuation over the classified items, returning one entry per
/// `Item::Turn` in order. Comments and delimiters break continuation: only
/// an immediately preceding message counts as a predecessor.
pub fn resolve(items: &[Item], rule: ContinuationRule) -> Vec<ResolvedTurn> {
    let mut resolved = Vec::new();
    let mut previous: Option<&TurnSeed> = None;
    let mut owner = String::new();

    for item in items {
        let Item::Turn(seed) = item else {
            previous = None;
            continue;
        };

        let continued = match (rule, previous) {
            (_, None) => false,
            (ContinuationRule::SameGlyphEmptyHeader, Some(prev)) => {
                prev.glyph == seed.glyph && seed.turn.speaker.is_empty()
            }
            (ContinuationRule::MatchingOrEmptyHeader, Some(prev)) => {
                seed.turn.speaker.is_empty() || seed.turn.speaker == prev.turn.speaker
            }
            (ContinuationRule::SameSpeaker, Some(prev)) => {
                seed.turn.speaker == prev.turn.speaker
            }
        };

        if !continued {
            owner = seed.turn.speaker.clone();
        }

        resolved.push(ResolvedTurn {
            seed: seed.clone(),
            continued,
            owner: owner.clone(),
        });
        previous = Some(seed);
    }

    resolved
}
