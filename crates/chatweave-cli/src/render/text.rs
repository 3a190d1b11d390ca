//! Plain-text rendering of compiled blocks for the terminal.
//!
//! Alignment is expressed by padding within a fixed canvas width; color and
//! layout tokens become bracketed annotations, since a terminal cannot honor
//! them literally.

use chatweave_engine::{Align, ChatItem};

const CANVAS_WIDTH: usize = 72;

/// Renders one compiled block to display lines.
pub fn render_block(items: &[ChatItem]) -> Vec<String> {
    let mut out = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match item {
            ChatItem::Bubble(bubble) => {
                if index > 0 && !bubble.continued {
                    out.push(String::new());
                }
                if !bubble.header.is_empty() {
                    let header = if bubble.color.is_empty() {
                        bubble.header.clone()
                    } else {
                        format!("{} [{}]", bubble.header, bubble.color)
                    };
                    out.push(aligned(&header, bubble.align));
                }
                if !bubble.body.is_empty() {
                    for line in bubble.body.lines() {
                        out.push(aligned(line, bubble.align));
                    }
                }
                if !bubble.subtext.is_empty() {
                    out.push(aligned(&format!("({})", bubble.subtext), bubble.align));
                }
            }
            ChatItem::Comment { text } => {
                if index > 0 {
                    out.push(String::new());
                }
                out.push(format!("# {text}"));
            }
            ChatItem::Delimiter => {
                if index > 0 {
                    out.push(String::new());
                }
                out.push(aligned("· · ·", Align::Center));
            }
        }
    }

    out
}

fn aligned(text: &str, align: Align) -> String {
    let width = text.chars().count();
    if width >= CANVAS_WIDTH {
        return text.to_string();
    }
    match align {
        Align::Left => text.to_string(),
        Align::Right => format!("{}{}", " ".repeat(CANVAS_WIDTH - width), text),
        Align::Center => format!("{}{}", " ".repeat((CANVAS_WIDTH - width) / 2), text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatweave_engine::{Settings, compile_chat};
    use pretty_assertions::assert_eq;

    #[test]
    fn headers_carry_color_annotations() {
        let items = compile_chat(">Alice|hi|09:00", &Settings::default());
        let lines = render_block(&items);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("Alice [red]"));
        assert!(lines[1].ends_with("hi"));
        assert!(lines[2].ends_with("(09:00)"));
    }

    #[test]
    fn left_aligned_lines_have_no_padding() {
        let items = compile_chat("<Bob|hey", &Settings::default());
        let lines = render_block(&items);
        assert_eq!(lines, vec!["Bob [red]".to_string(), "hey".to_string()]);
    }

    #[test]
    fn continued_bubbles_skip_header_and_gap() {
        let items = compile_chat(">Alice|one\n>|two", &Settings::default());
        let lines = render_block(&items);
        // header, body, continued body; no blank line inside the turn
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("two"));
    }

    #[test]
    fn delimiter_renders_as_three_dots() {
        let items = compile_chat("...", &Settings::default());
        let lines = render_block(&items);
        assert!(lines[0].trim_start().starts_with("· · ·"));
    }
}
