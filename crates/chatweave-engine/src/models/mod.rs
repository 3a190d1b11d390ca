pub mod bubble;
pub mod settings;

pub use bubble::{Align, Bubble, ChatItem};
pub use settings::Settings;
