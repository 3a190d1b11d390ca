//! Timestamped-transcript dialect: each message line opens with a bracketed
//! or parenthesized subtext token, followed by `speaker: body` or a bare
//! body.
//!
//! ```text
//! >Alice
//! (09:00) Alice: morning
//! (09:01) Bob: hey
//! [aside] no attribution here
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::RawTurn;

fn message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[(\[]\s*([^)\]]*?)\s*[)\]]\s*(.*)$")
            .expect("Invalid transcript line regex")
    })
}

/// Parses a classified transcript message line into a raw turn.
///
/// The remainder after the subtext token is split once on `:`; two parts
/// give speaker and body, one part is an anonymous body.
pub fn parse_message(line: &str) -> Option<RawTurn> {
    let caps = message_re().captures(line)?;
    let subtext = caps.get(1).map_or("", |m| m.as_str());
    let remainder = caps.get(2).map_or("", |m| m.as_str());

    let (speaker, body) = match remainder.split_once(':') {
        Some((speaker, body)) => (speaker.trim(), body.trim()),
        None => ("", remainder.trim()),
    };

    Some(RawTurn {
        speaker: speaker.to_string(),
        body: body.to_string(),
        subtext: subtext.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("(09:00) Alice: morning", "Alice", "morning", "09:00")]
    #[case("[intro] Bob: welcome all", "Bob", "welcome all", "intro")]
    #[case("(09:05) no speaker here", "", "no speaker here", "09:05")]
    #[case("[] Carol: empty subtext", "Carol", "empty subtext", "")]
    fn message_lines_split_into_turns(
        #[case] line: &str,
        #[case] speaker: &str,
        #[case] body: &str,
        #[case] subtext: &str,
    ) {
        let turn = parse_message(line).unwrap();
        assert_eq!(turn.speaker, speaker);
        assert_eq!(turn.body, body);
        assert_eq!(turn.subtext, subtext);
    }

    #[test]
    fn body_splits_only_on_first_colon() {
        let turn = parse_message("(10:00) Alice: note: this stays whole").unwrap();
        assert_eq!(turn.speaker, "Alice");
        assert_eq!(turn.body, "note: this stays whole");
    }

    #[test]
    fn line_without_subtext_token_is_rejected() {
        assert_eq!(parse_message("Alice: no timestamp"), None);
    }
}
