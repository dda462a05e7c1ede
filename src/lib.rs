//! QuizForge - content pipeline for a study-question web app
//!
//! This library turns a markdown study log into the assets a question web
//! app serves: a structured JSON question bank, the screenshots that were
//! embedded in the log as base64 payloads, and OCR text for those
//! screenshots. Each step is a single-pass batch transform with no shared
//! state between invocations.

pub mod cli;
pub mod images;
pub mod ocr;
pub mod parse;
pub mod patch;

/// Re-export commonly used types
pub use images::{extract_images, strip_image_payloads, zoom_image, ExtractSummary};
pub use ocr::{OcrRunner, OcrSummary};
pub use parse::{clean_text, segment, QuestionRecord};
pub use patch::{patch_content, PatchSummary};

/// Application-wide error type
pub use anyhow::Result;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "quizforge";
