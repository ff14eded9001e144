use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::file_matcher::{matching_files, FilePattern};
use super::format_detector::detect_source_kind;
use super::{OutputFormat, ProcessingEngine, ProcessingResult};
use crate::error::{StickerError, StickerResult};
use crate::utils::{verbose_println, warn_println};

/// Aggregated counts for a finished batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_duration: Duration,
}

impl BatchSummary {
    pub fn from_results(results: &[ProcessingResult], total_duration: Duration) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        Self {
            total_files: results.len(),
            successful,
            failed: results.len() - successful,
            total_duration,
        }
    }

    /// Percentage of successful files (100 for an empty batch)
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            100.0
        } else {
            (self.successful as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Output path for `input` inside `output_dir`: same stem, format extension.
pub fn batch_output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let file_name = input
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));
    output_dir
        .join(file_name)
        .with_extension(format.extension())
}

/// Reason why writing `output` would clobber a file of the current batch.
fn output_conflict(input: &Path, output: &Path, produced: &HashSet<PathBuf>) -> Option<String> {
    if output == input {
        Some(format!("{} will be overwritten by its own sticker", input.display()))
    } else if produced.contains(output) {
        Some(format!(
            "{} overwrites {}, already written in this batch",
            input.display(),
            output.display()
        ))
    } else {
        None
    }
}

impl ProcessingEngine {
    /// Convert every file of `input_dir` matching the configured pattern.
    ///
    /// `output_dir` is created up front; failing to create it (or to list
    /// `input_dir`) aborts the batch. Past that point a failing file only
    /// produces a failed [`ProcessingResult`]. Files are processed one at a
    /// time in sorted order and `on_result` is called after each one with
    /// its 1-based position and the batch size.
    pub fn process_directory<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        mut on_result: F,
    ) -> StickerResult<Vec<ProcessingResult>>
    where
        F: FnMut(usize, usize, &ProcessingResult),
    {
        std::fs::create_dir_all(output_dir).map_err(|e| StickerError::io(output_dir, e))?;

        let pattern = FilePattern::parse(&self.options.pattern);
        if let FilePattern::Unsupported(raw) = &pattern {
            verbose_println(
                self.verbose,
                &format!("Pattern '{}' is not supported, nothing will match", raw),
            );
        }
        let files = matching_files(input_dir, &pattern)?;
        verbose_println(
            self.verbose,
            &format!(
                "Found {} files matching '{}' in {}",
                files.len(),
                self.options.pattern,
                input_dir.display()
            ),
        );

        let total = files.len();
        let mut results = Vec::with_capacity(total);
        let mut produced = HashSet::with_capacity(total);

        for (index, input_path) in files.into_iter().enumerate() {
            let output_path = batch_output_path(&input_path, output_dir, self.options.format);
            if let Some(conflict) = output_conflict(&input_path, &output_path, &produced) {
                warn_println(&conflict);
            }
            produced.insert(output_path.clone());
            let kind = detect_source_kind(&input_path);

            let result = match self.process_file_as(&input_path, &output_path, kind) {
                Ok(info) => ProcessingResult::succeeded(input_path, output_path, info),
                Err(e) => ProcessingResult::failed(input_path, output_path, kind, &e),
            };

            on_result(index + 1, total, &result);
            results.push(result);
        }

        Ok(results)
    }

    /// Same as [`process_directory`](Self::process_directory), also timing the run.
    pub fn process_directory_timed<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        on_result: F,
    ) -> StickerResult<(Vec<ProcessingResult>, BatchSummary)>
    where
        F: FnMut(usize, usize, &ProcessingResult),
    {
        let start = Instant::now();
        let results = self.process_directory(input_dir, output_dir, on_result)?;
        let summary = BatchSummary::from_results(&results, start.elapsed());
        Ok((results, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_processing::format_detector::SourceKind;
    use crate::image_processing::ProcessingOptions;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn engine(options: ProcessingOptions) -> ProcessingEngine {
        ProcessingEngine::new(options, false)
    }

    fn write_valid_images(dir: &Path) {
        RgbImage::from_pixel(640, 480, Rgb([200, 10, 10]))
            .save(dir.join("a.jpg"))
            .unwrap();
        RgbaImage::from_pixel(100, 300, Rgba([0, 0, 0, 0]))
            .save(dir.join("b.png"))
            .unwrap();
        RgbImage::from_pixel(32, 32, Rgb([1, 2, 3]))
            .save(dir.join("c.bmp"))
            .unwrap();
    }

    #[test]
    fn test_batch_output_path() {
        let out = batch_output_path(Path::new("/in/cat.JPG"), Path::new("/out"), OutputFormat::Png);
        assert_eq!(out, PathBuf::from("/out/cat.png"));

        let out = batch_output_path(
            Path::new("/in/archive.tar.gz"),
            Path::new("/out"),
            OutputFormat::WebP,
        );
        assert_eq!(out, PathBuf::from("/out/archive.tar.webp"));
    }

    #[test]
    fn test_output_conflict() {
        let mut produced = HashSet::new();
        let out = Path::new("/out/a.png");
        assert_eq!(output_conflict(Path::new("/in/a.jpg"), out, &produced), None);

        produced.insert(out.to_path_buf());
        let conflict = output_conflict(Path::new("/in/a.png"), out, &produced).unwrap();
        assert!(conflict.contains("/in/a.png"));
        assert!(conflict.contains("already written"));

        let conflict = output_conflict(out, out, &HashSet::new()).unwrap();
        assert!(conflict.contains("its own sticker"));
    }

    #[test]
    fn test_same_stem_inputs_share_output() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(20, 10, Rgb([1, 1, 1]))
            .save(input.path().join("a.jpg"))
            .unwrap();
        RgbImage::from_pixel(10, 20, Rgb([2, 2, 2]))
            .save(input.path().join("a.png"))
            .unwrap();

        let results = engine(ProcessingOptions::default())
            .process_directory(input.path(), output.path(), |_, _, _| {})
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.success));
        assert_eq!(results[0].output_path, results[1].output_path);

        // sorted order: a.png is written last
        let sticker = image::open(output.path().join("a.png")).unwrap();
        assert_eq!((sticker.width(), sticker.height()), (256, 512));
    }

    #[test]
    fn test_summary_counts() {
        let ok = ProcessingResult {
            input_path: PathBuf::from("a"),
            output_path: PathBuf::from("a.png"),
            success: true,
            error: None,
            source_kind: SourceKind::Static,
            output_size: Some((512, 512)),
        };
        let failed = ProcessingResult {
            success: false,
            error: Some("boom".to_string()),
            output_size: None,
            ..ok.clone()
        };

        let summary =
            BatchSummary::from_results(&[ok.clone(), failed, ok], Duration::from_secs(3));
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert!((summary.success_rate() - 66.67).abs() < 0.1);

        let empty = BatchSummary::from_results(&[], Duration::ZERO);
        assert_eq!(empty.success_rate(), 100.0);
    }

    #[test]
    fn test_corrupt_file_does_not_abort_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_valid_images(input.path());
        std::fs::write(input.path().join("d.png"), b"garbage").unwrap();

        let mut seen = Vec::new();
        let results = engine(ProcessingOptions::default())
            .process_directory(input.path(), output.path(), |index, total, result| {
                seen.push((index, total, result.success));
            })
            .unwrap();

        assert_eq!(results.len(), 4);
        let failures: Vec<_> = results.iter().filter(|r| !r.success).collect();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].input_path.ends_with("d.png"));
        assert!(!failures[0].error.as_deref().unwrap_or("").is_empty());

        assert_eq!(
            seen,
            vec![(1, 4, true), (2, 4, true), (3, 4, true), (4, 4, false)]
        );
        assert!(output.path().join("a.png").is_file());
        assert!(output.path().join("b.png").is_file());
        assert!(output.path().join("c.png").is_file());
        assert!(!output.path().join("d.png").exists());
    }

    #[test]
    fn test_pattern_filters_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_valid_images(input.path());

        let options = ProcessingOptions {
            pattern: "*.PNG".to_string(),
            format: OutputFormat::WebP,
            quality: 75,
            ..Default::default()
        };
        let (results, summary) = engine(options)
            .process_directory_timed(input.path(), output.path(), |_, _, _| {})
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(summary.successful, 1);
        assert_eq!(results[0].output_size, Some((171, 512)));
        assert!(output.path().join("b.webp").is_file());
    }

    #[test]
    fn test_output_directory_created_eagerly() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let nested = output.path().join("stickers").join("set1");

        let results = engine(ProcessingOptions::default())
            .process_directory(input.path(), &nested, |_, _, _| {})
            .unwrap();

        assert!(results.is_empty());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_uncreatable_output_directory_fails_batch() {
        let input = tempfile::tempdir().unwrap();
        let blocker = input.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let err = engine(ProcessingOptions::default())
            .process_directory(input.path(), &blocker.join("out"), |_, _, _| {})
            .unwrap_err();
        assert!(matches!(err, StickerError::Io { .. }));
    }
}
