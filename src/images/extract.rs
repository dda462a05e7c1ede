//! Base64 screenshot extraction

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, warn};

use super::IMAGE_PAYLOAD;

/// Outcome of an extraction run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Image files written.
    pub written: usize,
    /// Payload blocks that failed to decode and were skipped.
    pub failed: usize,
}

/// Decode every embedded payload block in `text` into `<label>.<fmt>`
/// files under `out_dir` (created if missing).
///
/// A block that fails base64 decoding is logged and skipped; one bad
/// payload never aborts the batch.
pub fn extract_images(text: &str, out_dir: &Path) -> Result<ExtractSummary> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut summary = ExtractSummary::default();

    for captures in IMAGE_PAYLOAD.captures_iter(text) {
        let label = &captures[1];
        let fmt = &captures["fmt"];
        // payloads wrap across lines in the source document
        let data: String = captures["data"]
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect();

        let binary = match general_purpose::STANDARD.decode(data.as_bytes()) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to decode {label}: {err}");
                summary.failed += 1;
                continue;
            }
        };

        let file_path = out_dir.join(format!("{label}.{fmt}"));
        fs::write(&file_path, binary)
            .with_context(|| format!("writing {}", file_path.display()))?;
        debug!("wrote {}", file_path.display());
        summary.written += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // 1x1 transparent PNG
    const TINY_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn writes_one_file_per_block() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!(
            "1. Q\n[image1]: <data:image/png;base64,{TINY_PNG}>\n[image2]: <data:image/png;base64,{TINY_PNG}>\n"
        );

        let summary = extract_images(&text, dir.path()).unwrap();
        assert_eq!(summary, ExtractSummary { written: 2, failed: 0 });
        assert!(dir.path().join("image1.png").exists());
        assert!(dir.path().join("image2.png").exists());
    }

    #[test]
    fn decode_failure_skips_block_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        // five characters is an invalid base64 length
        let text = format!(
            "[image1]: <data:image/png;base64,AAAAA>\n[image2]: <data:image/png;base64,{TINY_PNG}>\n"
        );

        let summary = extract_images(&text, dir.path()).unwrap();
        assert_eq!(summary, ExtractSummary { written: 1, failed: 1 });
        assert!(!dir.path().join("image1.png").exists());
        assert!(dir.path().join("image2.png").exists());
    }

    #[test]
    fn payload_split_across_lines_is_reassembled() {
        let dir = tempfile::tempdir().unwrap();
        let (head, tail) = TINY_PNG.split_at(40);
        let text = format!("[image9]: <data:image/png;base64,{head}\n{tail}>\n");

        let summary = extract_images(&text, dir.path()).unwrap();
        assert_eq!(summary.written, 1);
        let bytes = std::fs::read(dir.path().join("image9.png")).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG".as_slice());
    }

    #[test]
    fn document_without_payloads_extracts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let summary = extract_images("1. Q\nBody.\n", dir.path()).unwrap();
        assert_eq!(summary, ExtractSummary::default());
    }
}
