//! QuizForge - study-question content pipeline
//!
//! Batch tools for turning a markdown study log into a question web app's
//! content: parse questions to JSON, extract embedded screenshots, OCR
//! them, patch individual entries, and resize images.

use anyhow::Result;
use quizforge::cli::{extract, ocr, parse, patch, zoom, Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Parse(args) => {
            parse(&args.source, args.output.as_deref())?;
        }

        Commands::Extract(args) => {
            extract(&args.source, &args.out_dir)?;
        }

        Commands::Ocr(args) => {
            let summary = ocr(&args)?;
            if !summary.ok() {
                // per-image failures are logged, not fatal; the exit code
                // still has to reflect them for calling scripts
                std::process::exit(2);
            }
        }

        Commands::Patch(args) => {
            patch(&args)?;
        }

        Commands::Zoom(args) => {
            zoom(&args.image, args.scale)?;
        }
    }

    Ok(())
}
