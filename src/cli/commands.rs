//! Command implementations

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::images::{extract_images, strip_image_payloads, zoom_image};
use crate::ocr::{OcrRunner, OcrSummary};
use crate::parse::segment;
use crate::patch::{load_updates, patch_content};

use super::{OcrArgs, PatchArgs};

/// Parse a markdown study log into a JSON array of question records.
pub fn parse(source: &Path, output: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;

    let stripped = strip_image_payloads(&text);
    let records = segment(&stripped);

    let mut json = serde_json::to_string_pretty(&records)?;
    json.push('\n');

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            println!("Parsed {} questions to {}", records.len(), path.display());
        }
        None => print!("{json}"),
    }

    Ok(())
}

/// Extract embedded base64 screenshots into image files.
pub fn extract(source: &Path, out_dir: &Path) -> Result<()> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;

    let summary = extract_images(&text, out_dir)?;

    println!("Extracted {} images to {}", summary.written, out_dir.display());
    if summary.failed > 0 {
        println!("⚠ {} payload block(s) failed to decode and were skipped", summary.failed);
    }

    Ok(())
}

/// OCR every screenshot in a directory. The returned summary carries the
/// failure count; the caller maps it to the process exit code.
pub fn ocr(args: &OcrArgs) -> Result<OcrSummary> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| args.source.join("ocr"));
    let log = args
        .log
        .clone()
        .unwrap_or_else(|| dest.join("ocr-progress.log"));

    let runner = OcrRunner::new()
        .with_command(args.tesseract.as_str())
        .with_lang(args.lang.as_str())
        .with_psm(args.psm)
        .with_force(args.force);

    runner.run(&args.source, &dest, &log)
}

/// Overwrite the content of specific questions in a question-bank file.
pub fn patch(args: &PatchArgs) -> Result<()> {
    let updates: BTreeMap<u32, String> = if let Some(updates_path) = &args.updates {
        load_updates(updates_path)?
    } else {
        let Some(order) = args.order else {
            bail!("either --updates or --order with replacement content is required");
        };
        let content = match (&args.content, &args.content_file) {
            (Some(content), None) => content.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            (None, None) => bail!("--order requires --content or --content-file"),
            (Some(_), Some(_)) => unreachable!("clap rejects the combination"),
        };
        BTreeMap::from([(order, content)])
    };

    let summary = patch_content(&args.file, &updates)?;

    println!("✓ Patched {} question(s) in {}", summary.patched, args.file.display());
    for order in &summary.unmatched {
        println!("⚠ No question with order {order}");
    }

    Ok(())
}

/// Resize an image by a scale factor, writing a `zoom-` prefixed copy.
pub fn zoom(image: &Path, scale: f32) -> Result<()> {
    let output = zoom_image(image, scale)?;
    println!("Saved {}", output.display());
    Ok(())
}
