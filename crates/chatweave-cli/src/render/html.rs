//! HTML rendering of compiled blocks.
//!
//! Message bodies are Markdown and go through `pulldown-cmark`; every other
//! interpolated string is escaped. Color, alignment, and mode become class
//! names so a stylesheet can map them onto concrete styling.

use chatweave_engine::parsing::style::{PRESET_WIDTH_COMPACT, PRESET_WIDTH_WIDE};
use chatweave_engine::{Align, Bubble, ChatItem};
use pulldown_cmark::{Options, Parser, html};

/// Renders all compiled blocks as one standalone HTML document.
pub fn render_document(blocks: &[Vec<ChatItem>], compact: bool) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    for items in blocks {
        out.push_str("<div class=\"chat-block\">\n");
        for item in items {
            render_item(&mut out, item, compact);
        }
        out.push_str("</div>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

const STYLE: &str = "\
.chat-block { display: flex; flex-direction: column; gap: 0.25em; }
.chat-bubble { border-radius: 8px; padding: 0.4em 0.8em; background: #eee; }
.chat-align-right { align-self: flex-end; }
.chat-align-left { align-self: flex-start; }
.chat-align-center { align-self: center; }
.chat-comment { text-align: center; font-style: italic; }
.chat-delimiter { text-align: center; letter-spacing: 0.5em; }
";

fn render_item(out: &mut String, item: &ChatItem, compact: bool) {
    match item {
        ChatItem::Bubble(bubble) => render_bubble(out, bubble, compact),
        ChatItem::Comment { text } => {
            out.push_str("<p class=\"chat-comment\">");
            out.push_str(&html_escape::encode_text(text));
            out.push_str("</p>\n");
        }
        ChatItem::Delimiter => out.push_str("<div class=\"chat-delimiter\">...</div>\n"),
    }
}

fn render_bubble(out: &mut String, bubble: &Bubble, compact: bool) {
    let align = match bubble.align {
        Align::Left => "left",
        Align::Right => "right",
        Align::Center => "center",
    };
    let width = bubble.max_width.as_deref().unwrap_or(if compact {
        PRESET_WIDTH_COMPACT
    } else {
        PRESET_WIDTH_WIDE
    });

    // Class tokens come from fixed value sets, the color from the fixed
    // palette; only free-form text needs escaping.
    out.push_str(&format!(
        "<div class=\"chat-bubble chat-align-{align} chat-mode-{}{}{}\" style=\"max-width: {width}%\">\n",
        bubble.mode,
        if bubble.color.is_empty() {
            String::new()
        } else {
            format!(" chat-color-{}", bubble.color)
        },
        if bubble.continued { " chat-continued" } else { "" },
    ));

    if !bubble.header.is_empty() {
        let tag = &bubble.header_tag;
        out.push_str(&format!(
            "<{tag} class=\"chat-header\">{}</{tag}>\n",
            html_escape::encode_text(&bubble.header)
        ));
    }
    if !bubble.body.is_empty() {
        out.push_str("<div class=\"chat-body\">");
        out.push_str(&render_markdown(&bubble.body));
        out.push_str("</div>\n");
    }
    if !bubble.subtext.is_empty() {
        out.push_str(&format!(
            "<sub class=\"chat-subtext\">{}</sub>\n",
            html_escape::encode_text(&bubble.subtext)
        ));
    }
    out.push_str("</div>\n");
}

fn render_markdown(body: &str) -> String {
    let parser = Parser::new_ext(body, Options::ENABLE_STRIKETHROUGH);
    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatweave_engine::{Settings, compile_chat};

    #[test]
    fn bubbles_carry_alignment_and_color_classes() {
        let blocks = vec![compile_chat(">Alice|hello", &Settings::default())];
        let doc = render_document(&blocks, false);
        assert!(doc.contains("chat-align-right"));
        assert!(doc.contains("chat-color-red"));
        assert!(doc.contains("<h4 class=\"chat-header\">Alice</h4>"));
    }

    #[test]
    fn body_markdown_is_rendered() {
        let blocks = vec![compile_chat(">Alice|some *emphasis*", &Settings::default())];
        let doc = render_document(&blocks, false);
        assert!(doc.contains("<em>emphasis</em>"));
    }

    #[test]
    fn header_text_is_escaped() {
        let blocks = vec![compile_chat(">Q&A|hello", &Settings::default())];
        let doc = render_document(&blocks, false);
        assert!(doc.contains("Q&amp;A"));
    }

    #[test]
    fn device_preset_applies_without_directive() {
        let blocks = vec![compile_chat(">Alice|hi", &Settings::default())];
        assert!(render_document(&blocks, false).contains("max-width: 80%"));
        assert!(render_document(&blocks, true).contains("max-width: 90%"));
    }

    #[test]
    fn explicit_width_beats_preset() {
        let blocks = vec![compile_chat("{mw=55}\n>Alice|hi", &Settings::default())];
        assert!(render_document(&blocks, true).contains("max-width: 55%"));
    }

    #[test]
    fn continued_bubble_is_marked() {
        let blocks = vec![compile_chat(">Alice|one\n>|two", &Settings::default())];
        assert!(render_document(&blocks, false).contains("chat-continued"));
    }
}
