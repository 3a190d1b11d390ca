pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use models::{Align, Bubble, ChatItem, Settings};
pub use parsing::cue::{Cue, CueError, CueSheet, CueTokenizer};
pub use parsing::{Dialect, compile_block, compile_chat, compile_cues, compile_transcript};
