//! Terminal feedback: progress indication and key prompts.

pub mod progress;
pub mod prompt;
