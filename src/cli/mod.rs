//! CLI interface using clap
//!
//! One subcommand per pipeline step: parse the study log, extract the
//! embedded screenshots, OCR them, patch the generated question bank, and
//! resize an image.

mod commands;

pub use commands::*;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// QuizForge - study-question content pipeline
#[derive(Parser, Debug)]
#[command(name = "quizforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a markdown study log into a question-bank JSON array
    Parse(ParseArgs),

    /// Extract embedded base64 screenshots into image files
    Extract(ExtractArgs),

    /// Run OCR over a directory of screenshots
    Ocr(OcrArgs),

    /// Overwrite the content of specific questions in a question-bank file
    Patch(PatchArgs),

    /// Resize an image by a scale factor
    Zoom(ZoomArgs),
}

/// Arguments for parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// The markdown study log to parse
    pub source: PathBuf,

    /// Output JSON file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for extract command
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// The markdown study log containing embedded screenshots
    pub source: PathBuf,

    /// Directory to write extracted images into
    #[arg(short, long, default_value = "practice-test")]
    pub out_dir: PathBuf,
}

/// Arguments for ocr command
#[derive(Parser, Debug)]
pub struct OcrArgs {
    /// Directory containing practice-test screenshots
    pub source: PathBuf,

    /// Directory to write OCR output (defaults to <source>/ocr)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Progress log file (defaults to <dest>/ocr-progress.log)
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// OCR executable to invoke
    #[arg(long, default_value = "tesseract")]
    pub tesseract: String,

    /// Language(s) to pass to the engine
    #[arg(long, default_value = "eng")]
    pub lang: String,

    /// Page segmentation mode
    #[arg(long, default_value = "6")]
    pub psm: u32,

    /// Re-run OCR even if a destination text file already exists
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for patch command
#[derive(Parser, Debug)]
pub struct PatchArgs {
    /// The question-bank JSON file to patch in place
    pub file: PathBuf,

    /// Question number whose content should be replaced
    #[arg(short = 'n', long)]
    pub order: Option<u32>,

    /// Replacement content, inline
    #[arg(short, long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Replacement content, read from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// JSON file mapping question numbers to replacement content
    #[arg(short, long, conflicts_with_all = ["order", "content", "content_file"])]
    pub updates: Option<PathBuf>,
}

/// Arguments for zoom command
#[derive(Parser, Debug)]
pub struct ZoomArgs {
    /// The image to resize
    pub image: PathBuf,

    /// Scale factor (e.g. 2.0 to double, 0.5 to halve)
    pub scale: f32,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        let cli = Cli::parse_from(["quizforge", "parse", "log.md", "--output", "out.json"]);
        if let Commands::Parse(args) = cli.command {
            assert_eq!(args.source, PathBuf::from("log.md"));
            assert_eq!(args.output, Some(PathBuf::from("out.json")));
        } else {
            panic!("expected parse command");
        }
    }

    #[test]
    fn test_ocr_defaults() {
        let cli = Cli::parse_from(["quizforge", "ocr", "shots"]);
        if let Commands::Ocr(args) = cli.command {
            assert_eq!(args.tesseract, "tesseract");
            assert_eq!(args.lang, "eng");
            assert_eq!(args.psm, 6);
            assert!(!args.force);
            assert!(args.dest.is_none());
        } else {
            panic!("expected ocr command");
        }
    }

    #[test]
    fn test_patch_updates_conflicts_with_inline_content() {
        let result = Cli::try_parse_from([
            "quizforge", "patch", "bank.json", "--updates", "u.json", "--order", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zoom_command() {
        let cli = Cli::parse_from(["quizforge", "zoom", "shot.png", "1.5"]);
        if let Commands::Zoom(args) = cli.command {
            assert_eq!(args.scale, 1.5);
        } else {
            panic!("expected zoom command");
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["quizforge", "parse", "log.md", "--verbose"]);
        assert!(cli.verbose);
    }
}
