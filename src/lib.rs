// Library exports for reuse by the binary and integration tests
pub mod cli;
pub mod config_file;
pub mod error;
pub mod image_processing;
pub mod json_output;
pub mod utils;

// Re-export commonly used types
pub use cli::{Args, CommandLineArgs};
pub use error::{StickerError, StickerResult};
pub use image_processing::batch::BatchSummary;
pub use image_processing::format_detector::SourceKind;
pub use image_processing::sizing::{sticker_size, STICKER_BOUND};
pub use image_processing::{
    OutputFormat, ProcessingEngine, ProcessingOptions, ProcessingResult, StickerInfo,
};
pub use json_output::JsonMessage;
