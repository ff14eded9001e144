use clap::Parser;
use std::path::PathBuf;

use crate::image_processing::{OutputFormat, ProcessingOptions};
use crate::utils::{single_output_path, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(
    name = "sticker-processor",
    version,
    about = "Convert images and simple animations into 512px stickers",
    long_about = "
Sticker Processor

Turns pictures (PNG, JPEG, BMP, TIFF, WebP) and simple animations (GIF,
animated WebP) into sticker images: the longer side is scaled to exactly
512 pixels, the aspect ratio is kept and an alpha channel is always present.
Animated sources contribute their first frame only.

The input may be a single file or a directory. A directory switches to batch
mode: every matching file is converted into the output directory and one
failing file never stops the batch.

Example Usage:
  # Single image to output.png
  sticker-processor input.jpg

  # First GIF frame to a lossy WebP sticker
  sticker-processor input.gif -o sticker.webp --lossy -q 90

  # Every JPEG of a directory into ./stickers
  sticker-processor ./images -o ./stickers --lossy -p \"*.jpg\"

  # Batch with a results table at the end
  sticker-processor ./images -o ./stickers --report"
)]
pub struct Args {
    /// Input image file, or a directory for batch mode
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Output file (single mode) or directory (batch mode) [default: output]
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Write lossy WebP instead of PNG
    #[arg(long = "lossy", visible_alias = "webp")]
    pub lossy: bool,

    /// WebP quality, clamped to 1-100 [default: 100]
    #[arg(
        short = 'q',
        long = "quality",
        value_name = "1-100",
        value_parser = parse_quality,
        allow_negative_numbers = true
    )]
    pub quality: Option<u8>,

    /// File pattern for batch mode: "*" or "*.ext" [default: *]
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Request background removal (not supported, ignored with a warning)
    #[arg(long = "remove-background")]
    pub remove_background: bool,

    /// JSON configuration file; command-line values take precedence
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Enable verbose output with detailed progress information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Emit JSON lines instead of human-readable output
    #[arg(long = "json")]
    pub json: bool,

    /// Print a table with the result of every file after a batch
    #[arg(long = "report")]
    pub report: bool,
}

/// Fully resolved invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLineArgs {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub options: ProcessingOptions,
    pub is_batch_mode: bool,
}

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        if self.lossy {
            OutputFormat::WebP
        } else {
            OutputFormat::Png
        }
    }

    /// Resolve defaults and the processing mode.
    ///
    /// Batch mode is selected when the input is a directory. In single mode
    /// an output path without extension receives the one of the output
    /// format (`output` becomes `output.png` or `output.webp`).
    pub fn to_command_line(&self) -> CommandLineArgs {
        let defaults = ProcessingOptions::default();
        let options = ProcessingOptions {
            format: self.output_format(),
            preserve_aspect_ratio: true,
            remove_background: self.remove_background,
            quality: self.quality.unwrap_or(defaults.quality),
            pattern: self.pattern.clone().unwrap_or(defaults.pattern),
        };

        let is_batch_mode = self.input_path.is_dir();
        let output = self
            .output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let output_path = if is_batch_mode {
            output
        } else {
            single_output_path(&output, options.format)
        };

        CommandLineArgs {
            input_path: self.input_path.clone(),
            output_path,
            options,
            is_batch_mode,
        }
    }
}

/// Parse a quality value, clamping it into 1-100
pub fn parse_quality(value: &str) -> Result<u8, String> {
    let quality = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid quality '{}': expected an integer", value))?;
    Ok(quality.clamp(1, 100) as u8)
}
