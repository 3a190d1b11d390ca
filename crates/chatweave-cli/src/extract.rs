//! Finds fenced chat blocks in a Markdown document.
//!
//! Only fences whose info string names a chat dialect are extracted; all
//! other fenced blocks are skipped whole, so a chat-looking line inside a
//! regular code block never leaks out. An unterminated fence runs to EOF.

use chatweave_engine::Dialect;

/// One extracted block: the dialect named by the fence tag and the source
/// text between the fences.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatFence {
    pub dialect: Dialect,
    pub source: String,
}

/// Signature of a fence line: marker character and run length.
fn fence_sig(line: &str) -> Option<(char, usize, &str)> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }
    let run = trimmed.chars().take_while(|&c| c == marker).count();
    if run < 3 {
        return None;
    }
    Some((marker, run, trimmed[run..].trim()))
}

fn closes(line: &str, marker: char, len: usize) -> bool {
    matches!(fence_sig(line), Some((m, l, rest)) if m == marker && l >= len && rest.is_empty())
}

/// Scans the document and returns chat fences in source order.
pub fn extract_chat_fences(document: &str) -> Vec<ChatFence> {
    enum State {
        Outside,
        InChat {
            dialect: Dialect,
            marker: char,
            len: usize,
            lines: Vec<String>,
        },
        InOther {
            marker: char,
            len: usize,
        },
    }

    let mut fences = Vec::new();
    let mut state = State::Outside;

    for line in document.lines() {
        state = match state {
            State::Outside => match fence_sig(line) {
                Some((marker, len, tag)) => match Dialect::from_fence_tag(tag) {
                    Some(dialect) => State::InChat {
                        dialect,
                        marker,
                        len,
                        lines: Vec::new(),
                    },
                    None => State::InOther { marker, len },
                },
                None => State::Outside,
            },
            State::InChat {
                dialect,
                marker,
                len,
                mut lines,
            } => {
                if closes(line, marker, len) {
                    fences.push(ChatFence {
                        dialect,
                        source: lines.join("\n"),
                    });
                    State::Outside
                } else {
                    lines.push(line.to_string());
                    State::InChat {
                        dialect,
                        marker,
                        len,
                        lines,
                    }
                }
            }
            State::InOther { marker, len } => {
                if closes(line, marker, len) {
                    State::Outside
                } else {
                    State::InOther { marker, len }
                }
            }
        };
    }

    // Unterminated chat fence: emit what we have
    if let State::InChat { dialect, lines, .. } = state {
        fences.push(ChatFence {
            dialect,
            source: lines.join("\n"),
        });
    }

    fences
}
