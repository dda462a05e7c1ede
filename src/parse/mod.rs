//! Markdown study-log parsing
//!
//! Turns a free-form markdown study log into an ordered list of structured
//! question records:
//! - [`normalize::clean_text`] canonicalizes smart punctuation
//! - [`segment::segment`] runs the line-oriented question scan

pub mod normalize;
pub mod segment;

pub use normalize::clean_text;
pub use segment::{segment, QuestionRecord};
