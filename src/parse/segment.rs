//! Markdown segmentation into ordered question records
//!
//! The study log is free-form markdown where each question starts with a
//! numbered line ("12. Which of the following..."). Segmentation is a
//! line-oriented scan with one piece of state: the minimum number the next
//! marker must carry to open a new record. Numbered list items inside an
//! answer explanation ("1. First", "2. Second") fall below that threshold
//! once numbering has advanced past them, so they stay in the body instead
//! of fragmenting the record.
//!
//! Malformed input never errors here; it just yields fewer records. An
//! unparseable document is an empty output, not a failure.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize::clean_text;

lazy_static! {
    /// A leading integer, an optional stray backslash (a markdown-escaping
    /// artifact some exporters emit before the delimiter), then either a
    /// `.`/`)` delimiter or at least one space, then the headline.
    static ref QUESTION_MARKER: Regex =
        Regex::new(r"^(\d+)(?:\\)?(?:[.)]\s*|\s+)(.*)").unwrap();

    /// Inline reference to an extracted screenshot, e.g. `![][image7]`.
    static ref IMAGE_REF: Regex = Regex::new(r"!\[\]\[(image\d+)\]").unwrap();
}

/// One structured question entry extracted from the study log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// The question's declared numeric label; sort key of the output.
    pub order: u32,
    /// Text from the marker line itself, normalized and trimmed.
    pub headline: String,
    /// Image labels referenced in the body, in order of appearance.
    pub images: Vec<String>,
    /// Normalized multi-line body; outer blank lines trimmed, interior
    /// blank lines kept as paragraph breaks.
    pub content: String,
}

/// An open record still accumulating body lines.
struct OpenRecord {
    order: u32,
    headline: String,
    images: Vec<String>,
    body: Vec<String>,
}

impl OpenRecord {
    fn seal(self) -> QuestionRecord {
        let content = clean_text(self.body.join("\n").trim());
        QuestionRecord {
            order: self.order,
            headline: self.headline,
            images: self.images,
            content,
        }
    }
}

/// Segment an already payload-stripped markdown document into question
/// records, sorted ascending by `order`.
///
/// Everything before the first qualifying marker is discarded. Image
/// reference lines are pulled into `images` and never appear in `content`.
pub fn segment(text: &str) -> Vec<QuestionRecord> {
    let mut entries: Vec<QuestionRecord> = Vec::new();
    let mut current: Option<OpenRecord> = None;
    let mut expected: u32 = 1;

    // line breaks are `\n`/`\r\n` only; exotic separators (U+2028,
    // U+2029, form feed) are left inside their line rather than split on
    for raw_line in text.lines() {
        let stripped = raw_line.trim();
        if stripped.is_empty() {
            if let Some(record) = current.as_mut() {
                record.body.push(String::new());
            }
            continue;
        }

        if let Some(captures) = QUESTION_MARKER.captures(stripped) {
            // the pattern guarantees digits, but the value may overflow u32
            if let Ok(number) = captures[1].parse::<u32>() {
                if number >= expected {
                    if let Some(record) = current.take() {
                        entries.push(record.seal());
                    }
                    current = Some(OpenRecord {
                        order: number,
                        headline: clean_text(captures[2].trim()),
                        images: Vec::new(),
                        body: Vec::new(),
                    });
                    expected = number.saturating_add(1);
                    continue;
                }
            }
        }

        let Some(record) = current.as_mut() else {
            // prose before the first qualifying marker is discarded
            continue;
        };

        if let Some(image) = IMAGE_REF.captures(stripped) {
            record.images.push(image[1].to_string());
            continue;
        }

        record.body.push(clean_text(raw_line));
    }

    if let Some(record) = current.take() {
        entries.push(record.seal());
    }

    entries.sort_by_key(|entry| entry.order);
    entries
}
