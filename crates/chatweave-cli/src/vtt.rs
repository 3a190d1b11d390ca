//! WebVTT-subset cue tokenizer: the host-side collaborator the engine's cue
//! dialect delegates to.
//!
//! Supported: optional `WEBVTT` header, `Key: value` metadata lines before
//! the first cue, `NOTE` comment blocks, optional cue identifiers, timing
//! lines with cue settings after the end timestamp, multi-line payloads.
//! Malformed timing is a hard error; the engine cannot guess at structure
//! the tokenizer could not read.

use chatweave_engine::{Cue, CueError, CueSheet, CueTokenizer};

pub struct VttTokenizer;

impl CueTokenizer for VttTokenizer {
    fn tokenize(&self, source: &str) -> Result<CueSheet, CueError> {
        parse_vtt(source)
    }
}

fn parse_vtt(source: &str) -> Result<CueSheet, CueError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut metadata = Vec::new();
    let mut cues: Vec<Cue> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() || (i == 0 && line.starts_with("WEBVTT")) {
            i += 1;
            continue;
        }

        if line.starts_with("NOTE") {
            while i < lines.len() && !lines[i].trim().is_empty() {
                i += 1;
            }
            continue;
        }

        if line.contains("-->") {
            let (start, end) = parse_timing(line)?;
            let mut payload = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].trim().is_empty() {
                payload.push(lines[i].trim());
                i += 1;
            }
            cues.push(Cue {
                start,
                end,
                text: payload.join("\n"),
            });
            continue;
        }

        // A cue identifier directly precedes its timing line
        if i + 1 < lines.len() && lines[i + 1].contains("-->") {
            i += 1;
            continue;
        }

        if cues.is_empty()
            && let Some((key, value)) = line.split_once(':')
        {
            metadata.push((key.trim().to_string(), value.trim().to_string()));
            i += 1;
            continue;
        }

        return Err(CueError::UnexpectedLine(line.to_string()));
    }

    Ok(CueSheet { metadata, cues })
}

fn parse_timing(line: &str) -> Result<(f64, f64), CueError> {
    let Some((start, rest)) = line.split_once("-->") else {
        return Err(CueError::BadTiming(line.to_string()));
    };
    // Cue settings (e.g. `position:50%`) may follow the end timestamp
    let end = rest
        .trim()
        .split_whitespace()
        .next()
        .ok_or_else(|| CueError::BadTiming(line.to_string()))?;

    Ok((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parses `hh:mm:ss.mmm` or `mm:ss.mmm` into seconds.
fn parse_timestamp(raw: &str) -> Result<f64, CueError> {
    let bad = || CueError::BadTimestamp(raw.to_string());
    let parts: Vec<&str> = raw.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => ("0", *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(bad()),
    };

    let hours: u64 = hours.parse().map_err(|_| bad())?;
    let minutes: u64 = minutes.parse().map_err(|_| bad())?;
    let seconds: f64 = seconds.parse().map_err(|_| bad())?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(bad());
    }

    Ok((hours * 3600 + minutes * 60) as f64 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn full_sheet_with_metadata_and_cues() {
        let source = "\
WEBVTT

Self: Me
Header: h5

00:00:01.200 --> 00:00:03.450
<v Me>hello

00:00:03.450 --> 00:00:05.000
<v Them>hi back
second payload line
";
        let sheet = parse_vtt(source).unwrap();
        assert_eq!(
            sheet.metadata,
            vec![
                ("Self".to_string(), "Me".to_string()),
                ("Header".to_string(), "h5".to_string()),
            ]
        );
        assert_eq!(sheet.cues.len(), 2);
        assert_eq!(sheet.cues[0].start, 1.2);
        assert_eq!(sheet.cues[0].end, 3.45);
        assert_eq!(sheet.cues[1].text, "<v Them>hi back\nsecond payload line");
    }

    #[test]
    fn cue_identifiers_and_notes_are_skipped() {
        let source = "\
WEBVTT

NOTE a comment
spanning two lines

intro
00:01.000 --> 00:02.000
payload
";
        let sheet = parse_vtt(source).unwrap();
        assert_eq!(sheet.cues.len(), 1);
        assert_eq!(sheet.cues[0].start, 1.0);
        assert_eq!(sheet.cues[0].text, "payload");
    }

    #[test]
    fn cue_settings_after_end_timestamp_are_tolerated() {
        let sheet = parse_vtt("00:01.000 --> 00:02.000 position:50%\nx\n").unwrap();
        assert_eq!(sheet.cues[0].end, 2.0);
    }

    #[rstest]
    #[case("00:00:01.200", 1.2)]
    #[case("00:01.000", 1.0)]
    #[case("01:02:03.500", 3723.5)]
    #[case("10:00.000", 600.0)]
    fn timestamps_parse_to_seconds(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_timestamp(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("oops")]
    #[case("1.2.3:4")]
    #[case("aa:bb.ccc")]
    fn malformed_timestamps_error(#[case] raw: &str) {
        assert!(matches!(
            parse_timestamp(raw),
            Err(CueError::BadTimestamp(_))
        ));
    }

    #[test]
    fn malformed_timing_line_is_a_hard_error() {
        let result = parse_vtt("00:01.000 -->\nx\n");
        assert!(matches!(result, Err(CueError::BadTiming(_))));
    }

    #[test]
    fn stray_text_outside_cues_is_a_hard_error() {
        let result = parse_vtt("00:01.000 --> 00:02.000\npayload\n\nstray prose\n");
        assert!(matches!(result, Err(CueError::UnexpectedLine(_))));
    }
}
