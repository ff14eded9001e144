use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning a source image into a sticker.
///
/// Every variant that concerns a file carries its path so that batch results
/// and the single-file error message can name the offending input.
#[derive(Error, Debug)]
pub enum StickerError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Failed to decode '{}': {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to encode '{}': {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resize failed: {0}")]
    Resize(String),

    #[error("Unsupported channel layout: expected 3 or 4 channels, got {channels}")]
    UnsupportedFormat { channels: u8 },
}

impl StickerError {
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Encode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StickerResult<T> = std::result::Result<T, StickerError>;
