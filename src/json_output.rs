//! JSON output for scripting
//!
//! When --json is enabled, per-file results and the batch summary are
//! emitted as JSON lines to stdout, suppressing all other output.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JsonMessage {
    /// File processing completed
    #[serde(rename_all = "camelCase")]
    FileCompleted {
        input_path: String,
        output_path: String,
        width: u32,
        height: u32,
    },
    /// File processing failed
    #[serde(rename_all = "camelCase")]
    FileFailed { input_path: String, error: String },
    /// Processing summary
    #[serde(rename_all = "camelCase")]
    Summary {
        total_files: usize,
        processed: usize,
        failed: usize,
        duration_secs: f64,
    },
}

impl JsonMessage {
    /// Emit JSON message to stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn file_completed(input_path: &Path, output_path: &Path, size: (u32, u32)) -> Self {
        Self::FileCompleted {
            input_path: input_path.display().to_string(),
            output_path: output_path.display().to_string(),
            width: size.0,
            height: size.1,
        }
    }

    pub fn file_failed(input_path: &Path, error: impl Into<String>) -> Self {
        Self::FileFailed {
            input_path: input_path.display().to_string(),
            error: error.into(),
        }
    }

    pub fn summary(total_files: usize, processed: usize, failed: usize, duration_secs: f64) -> Self {
        Self::Summary {
            total_files,
            processed,
            failed,
            duration_secs,
        }
    }
}
