//! Text normalization for OCR'd and word-processor-authored markdown
//!
//! Study logs exported from rich-text editors arrive full of "smart"
//! punctuation, and OCR output sprinkles in U+FFFD where a glyph could not
//! be decoded. Downstream JSON consumers want plain ASCII punctuation, so a
//! fixed substitution table canonicalizes the known offenders and leaves
//! every other character (including non-Latin scripts) alone.

/// The substitution table. U+FFFD is mapped to an apostrophe rather than
/// dropped: in practice it always stands in for a curly quote the exporter
/// mangled, and salvaging it keeps contractions readable.
const REPLACEMENTS: &[(char, char)] = &[
    ('\u{2019}', '\''), // right single quote
    ('\u{2018}', '\''), // left single quote
    ('\u{201c}', '"'),  // left double quote
    ('\u{201d}', '"'),  // right double quote
    ('\u{2013}', '-'),  // en dash
    ('\u{2014}', '-'),  // em dash
    ('\u{00a0}', ' '),  // non-breaking space
    ('\u{fffd}', '\''), // replacement character
];

/// Replace smart punctuation variants with their ASCII counterparts.
///
/// Pure and total: never fails, and applying it twice yields the same
/// result as applying it once (no replacement target appears among the
/// replacement values).
pub fn clean_text(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            REPLACEMENTS
                .iter()
                .find(|(from, _)| *from == ch)
                .map_or(ch, |(_, to)| *to)
        })
        .collect()
}
