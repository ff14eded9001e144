pub mod batch;
pub mod batch_report;
pub mod encode;
pub mod file_matcher;
pub mod format_detector;
pub mod frame_extractor;
pub mod normalize;
pub mod resize;
pub mod sizing;

use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};
use strum_macros::Display;

use crate::error::{StickerError, StickerResult};
use crate::utils::verbose_println;
use format_detector::{detect_source_kind, SourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum OutputFormat {
    /// Lossless PNG
    #[default]
    #[strum(serialize = "png")]
    Png,
    /// Lossy WebP, honours the quality setting
    #[strum(serialize = "webp")]
    WebP,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }
}

/// Options shared by every file of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub format: OutputFormat,
    /// Always true; stickers keep the source aspect ratio.
    pub preserve_aspect_ratio: bool,
    /// Accepted for compatibility, never acted upon.
    pub remove_background: bool,
    /// 1-100, only used for lossy output
    pub quality: u8,
    pub pattern: String,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            preserve_aspect_ratio: true,
            remove_background: false,
            quality: 100,
            pattern: "*".to_string(),
        }
    }
}

/// Outcome of one file in batch mode.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
    pub source_kind: SourceKind,
    pub output_size: Option<(u32, u32)>,
}

impl ProcessingResult {
    pub fn succeeded(input_path: PathBuf, output_path: PathBuf, info: StickerInfo) -> Self {
        Self {
            input_path,
            output_path,
            success: true,
            error: None,
            source_kind: info.source_kind,
            output_size: Some((info.width, info.height)),
        }
    }

    pub fn failed(
        input_path: PathBuf,
        output_path: PathBuf,
        source_kind: SourceKind,
        error: &StickerError,
    ) -> Self {
        Self {
            input_path,
            output_path,
            success: false,
            error: Some(error.to_string()),
            source_kind,
            output_size: None,
        }
    }
}

/// What the single-file pipeline produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickerInfo {
    pub source_kind: SourceKind,
    pub width: u32,
    pub height: u32,
}

pub struct ProcessingEngine {
    options: ProcessingOptions,
    verbose: bool,
}

impl ProcessingEngine {
    pub fn new(options: ProcessingOptions, verbose: bool) -> Self {
        Self { options, verbose }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Convert a single file into a sticker written at `output_path`.
    pub fn process_file(&self, input_path: &Path, output_path: &Path) -> StickerResult<StickerInfo> {
        let kind = detect_source_kind(input_path);
        self.process_file_as(input_path, output_path, kind)
    }

    /// Run the pipeline for an already classified source.
    pub fn process_file_as(
        &self,
        input_path: &Path,
        output_path: &Path,
        kind: SourceKind,
    ) -> StickerResult<StickerInfo> {
        verbose_println(
            self.verbose,
            &format!("Processing {} ({})", input_path.display(), kind),
        );

        let decoded = self.decode(input_path, kind)?;
        verbose_println(
            self.verbose,
            &format!(
                "  Source: {}x{}, {} channels",
                decoded.width(),
                decoded.height(),
                decoded.color().channel_count()
            ),
        );

        let rgba = normalize::ensure_alpha(decoded)?;
        let resized = resize::resize_for_sticker(&rgba)?;
        let (width, height) = resized.dimensions();
        verbose_println(self.verbose, &format!("  Adjusted size: {}x{}", width, height));

        encode::save_sticker(
            &resized,
            output_path,
            self.options.format,
            self.options.quality,
        )?;
        verbose_println(
            self.verbose,
            &format!("  Saved to: {}", output_path.display()),
        );

        Ok(StickerInfo {
            source_kind: kind,
            width,
            height,
        })
    }

    fn decode(&self, input_path: &Path, kind: SourceKind) -> StickerResult<DynamicImage> {
        if kind.is_animated() {
            let frame = frame_extractor::extract_first_frame(input_path, kind)?;
            return Ok(DynamicImage::ImageRgba8(frame));
        }

        ImageReader::open(input_path)
            .map_err(|e| StickerError::io(input_path, e))?
            .with_guessed_format()
            .map_err(|e| StickerError::io(input_path, e))?
            .decode()
            .map_err(|e| StickerError::decode(input_path, e))
    }
}
