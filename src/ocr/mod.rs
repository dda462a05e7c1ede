//! Batch OCR over practice-test screenshots
//!
//! One text file is written per screenshot into the destination directory.
//! Progress is appended to a log file so a run can be monitored and
//! restarted without losing work: screenshots that already have an output
//! file are skipped unless the run is forced.
//!
//! Failures are per-image. A screenshot the engine cannot read is logged
//! and counted; the batch always runs to completion, and the summary tells
//! the caller whether anything failed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::Local;
use thiserror::Error;
use tracing::{error, info, warn};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Why OCR of a single image did not produce usable text.
#[derive(Debug, Error)]
pub enum OcrFailure {
    #[error("failed to launch {command}: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("engine exited with {status}: {stderr}")]
    Engine { status: String, stderr: String },

    #[error("engine completed but {} was not created", .0.display())]
    MissingOutput(PathBuf),

    #[error("rewriting engine output: {0}")]
    Rewrite(#[source] std::io::Error),
}

/// Outcome counts for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OcrSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl OcrSummary {
    /// True when no image in the batch failed.
    pub fn ok(&self) -> bool {
        self.failed == 0
    }
}

/// Append-only progress log with timestamped lines, mirrored to the
/// console via `tracing`.
pub struct ProgressLog {
    file: fs::File,
}

impl ProgressLog {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening progress log {}", path.display()))?;
        Ok(Self { file })
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        info!("{message}");
        self.append("INFO", message)
    }

    pub fn warn(&mut self, message: &str) -> Result<()> {
        warn!("{message}");
        self.append("WARNING", message)
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        error!("{message}");
        self.append("ERROR", message)
    }

    fn append(&mut self, level: &str, message: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.file, "{timestamp} {level} {message}").context("writing progress log")
    }
}

/// Configured OCR engine invocation.
pub struct OcrRunner {
    command: String,
    lang: String,
    psm: u32,
    force: bool,
}

impl OcrRunner {
    pub fn new() -> Self {
        Self {
            command: "tesseract".to_string(),
            lang: "eng".to_string(),
            psm: 6,
            force: false,
        }
    }

    /// Set the engine executable to invoke.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Set the language(s) passed to the engine.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u32) -> Self {
        self.psm = psm;
        self
    }

    /// Re-run OCR even when an output file already exists.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// OCR every screenshot in `source_dir`, writing one `.txt` per image
    /// into `dest_dir` and appending progress to `log_path`.
    pub fn run(&self, source_dir: &Path, dest_dir: &Path, log_path: &Path) -> Result<OcrSummary> {
        if !source_dir.is_dir() {
            bail!("source directory not found: {}", source_dir.display());
        }

        let mut log = ProgressLog::open(log_path)?;
        log.info("Starting OCR run")?;
        log.info(&format!("Source: {}", source_dir.display()))?;
        log.info(&format!("Destination: {}", dest_dir.display()))?;

        let images = collect_images(source_dir);
        if images.is_empty() {
            log.warn(&format!("No images found in {}", source_dir.display()))?;
            return Ok(OcrSummary::default());
        }

        let mut summary = OcrSummary::default();

        for image_path in &images {
            let name = image_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stem = image_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let output_path = dest_dir.join(format!("{stem}.txt"));

            if output_path.exists() && !self.force {
                summary.skipped += 1;
                log.info(&format!("Skipping existing OCR: {name}"))?;
                continue;
            }

            log.info(&format!("Processing: {name}"))?;
            let start = Instant::now();
            let result = self.recognize(image_path, &output_path);
            let duration = start.elapsed().as_secs_f64();

            match result {
                Ok(()) => {
                    summary.processed += 1;
                    log.info(&format!("Completed {name} in {duration:.2}s"))?;
                }
                Err(failure) => {
                    summary.failed += 1;
                    log.error(&format!("Failed {name} after {duration:.2}s: {failure}"))?;
                }
            }
        }

        log.info(&format!(
            "OCR run finished: {} processed, {} skipped, {} failed",
            summary.processed, summary.skipped, summary.failed
        ))?;

        Ok(summary)
    }

    /// Run the engine for one image and normalize its output in place.
    fn recognize(&self, image_path: &Path, output_path: &Path) -> Result<(), OcrFailure> {
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(OcrFailure::Rewrite)?;
        }

        // the engine expects the output path without its file extension
        let output_base = output_path.with_extension("");

        let output = Command::new(&self.command)
            .arg(image_path)
            .arg(&output_base)
            .args(["-l", &self.lang])
            .args(["--psm", &self.psm.to_string()])
            .output()
            .map_err(|source| OcrFailure::Launch {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrFailure::Engine {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // the engine creates the .txt itself; confirm it exists
        if !output_path.exists() {
            return Err(OcrFailure::MissingOutput(output_path.to_path_buf()));
        }

        // engine output is already UTF-8, but normalize line endings
        let bytes = fs::read(output_path).map_err(OcrFailure::Rewrite)?;
        let text = String::from_utf8_lossy(&bytes).replace("\r\n", "\n");
        fs::write(output_path, text).map_err(OcrFailure::Rewrite)?;

        Ok(())
    }
}

impl Default for OcrRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Screenshots directly inside `dir`, in sorted filename order.
fn collect_images(dir: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    images.sort();
    images
}
