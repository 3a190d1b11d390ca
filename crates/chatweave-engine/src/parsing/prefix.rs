//! Prefix dialect: one message per line, leading glyph selects the side,
//! `|`-separated fields carry header, body, and subtext.
//!
//! ```text
//! >Alice|Hello there|09:00
//! <Bob|Hi Alice|09:01
//! <|How are you?
//! ```

use crate::models::{Align, Settings};
use crate::parsing::RawTurn;

/// Glyph-to-side table. The base mapping is `>` right, `<` left, `^` center;
/// `Settings::reverse_arrows` swaps the two arrows (the mapping has flipped
/// between historical variants of this markup, so it stays configurable).
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable {
    right: char,
    left: char,
}

impl GlyphTable {
    pub fn new(settings: &Settings) -> Self {
        if settings.reverse_arrows {
            Self {
                right: '<',
                left: '>',
            }
        } else {
            Self {
                right: '>',
                left: '<',
            }
        }
    }

    pub fn align_for(&self, glyph: char) -> Option<Align> {
        if glyph == self.right {
            Some(Align::Right)
        } else if glyph == self.left {
            Some(Align::Left)
        } else if glyph == '^' {
            Some(Align::Center)
        } else {
            None
        }
    }
}

/// A parsed prefix-dialect message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTurn {
    pub glyph: char,
    pub align: Align,
    pub turn: RawTurn,
}

/// Parses a classified message line. Returns `None` for a glyph outside the
/// table (cannot happen for lines the classifier accepted, but the table is
/// the authority on glyphs).
pub fn parse_message(line: &str, glyphs: &GlyphTable) -> Option<PrefixTurn> {
    let glyph = line.chars().next()?;
    let align = glyphs.align_for(glyph)?;
    let fields = split_fields(&line[glyph.len_utf8()..]);

    let turn = match fields.len() {
        0 => return None,
        1 => RawTurn {
            speaker: String::new(),
            body: fields[0].clone(),
            subtext: String::new(),
        },
        _ => RawTurn {
            // The first field is a header only if it has something
            // pronounceable in it; a bare separator row stays anonymous.
            speaker: if fields[0].chars().any(char::is_alphanumeric) {
                fields[0].clone()
            } else {
                String::new()
            },
            body: fields[1].clone(),
            subtext: fields.get(2).cloned().unwrap_or_default(),
        },
    };

    Some(PrefixTurn { glyph, align, turn })
}

/// Splits on `|`, honoring the `\|` escape for a literal pipe inside a
/// field. Fields are trimmed after unescaping.
fn split_fields(rest: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = rest.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields.iter().map(|f| f.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn table() -> GlyphTable {
        GlyphTable::new(&Settings::default())
    }

    #[test]
    fn full_message_round_trips_fields() {
        let parsed = parse_message(">Alice|Hello there|09:00", &table()).unwrap();
        assert_eq!(parsed.align, Align::Right);
        assert_eq!(parsed.turn.speaker, "Alice");
        assert_eq!(parsed.turn.body, "Hello there");
        assert_eq!(parsed.turn.subtext, "09:00");
    }

    #[test]
    fn single_field_is_the_body() {
        let parsed = parse_message("<just a message", &table()).unwrap();
        assert_eq!(parsed.turn.speaker, "");
        assert_eq!(parsed.turn.body, "just a message");
        assert_eq!(parsed.turn.subtext, "");
    }

    #[test]
    fn escaped_pipes_stay_literal() {
        let parsed = parse_message(r">A|he said \|hi\||sub", &table()).unwrap();
        assert_eq!(parsed.turn.speaker, "A");
        assert_eq!(parsed.turn.body, "he said |hi|");
        assert_eq!(parsed.turn.subtext, "sub");
    }

    #[test]
    fn header_without_alphanumerics_is_anonymous() {
        let parsed = parse_message(">--|body", &table()).unwrap();
        assert_eq!(parsed.turn.speaker, "");
        assert_eq!(parsed.turn.body, "body");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let parsed = parse_message(">A|body|sub|extra|more", &table()).unwrap();
        assert_eq!(parsed.turn.subtext, "sub");
    }

    #[rstest]
    #[case('>', Align::Right)]
    #[case('<', Align::Left)]
    #[case('^', Align::Center)]
    fn base_glyph_table(#[case] glyph: char, #[case] expected: Align) {
        assert_eq!(table().align_for(glyph), Some(expected));
    }

    #[rstest]
    #[case('>', Align::Left)]
    #[case('<', Align::Right)]
    #[case('^', Align::Center)]
    fn reversed_glyph_table_swaps_arrows_only(#[case] glyph: char, #[case] expected: Align) {
        let table = GlyphTable::new(&Settings {
            reverse_arrows: true,
        });
        assert_eq!(table.align_for(glyph), Some(expected));
    }

    #[test]
    fn empty_body_field_is_kept() {
        let parsed = parse_message(">Alice|", &table()).unwrap();
        assert_eq!(parsed.turn.speaker, "Alice");
        assert_eq!(parsed.turn.body, "");
    }
}
