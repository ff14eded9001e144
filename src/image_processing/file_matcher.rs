use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{StickerError, StickerResult};
use crate::utils::{get_file_extension, warn_println};

/// Filename pattern accepted in batch mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePattern {
    /// `*`: every regular file
    All,
    /// `*.ext`: files whose extension equals `ext`, ignoring case (stored lowercase)
    Extension(String),
    /// Anything else. Matches nothing.
    Unsupported(String),
}

impl FilePattern {
    pub fn parse(pattern: &str) -> Self {
        if pattern == "*" {
            return FilePattern::All;
        }

        match pattern.strip_prefix("*.") {
            Some(ext) if is_plain_extension(ext) => FilePattern::Extension(ext.to_lowercase()),
            _ => FilePattern::Unsupported(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self {
            FilePattern::All => true,
            FilePattern::Extension(ext) => get_file_extension(path).as_deref() == Some(ext.as_str()),
            FilePattern::Unsupported(_) => false,
        }
    }
}

fn is_plain_extension(ext: &str) -> bool {
    !ext.is_empty()
        && !ext
            .chars()
            .any(|c| matches!(c, '*' | '?' | '[' | ']' | '/' | '\\'))
}

/// List the regular files directly inside `directory` that match `pattern`.
///
/// Symlinks are followed so that links to files count and links to
/// directories are skipped like directories. Subdirectories are not entered.
/// The result is sorted by path.
pub fn matching_files(directory: &Path, pattern: &FilePattern) -> StickerResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Dangling symlink or unreadable entry: skip it, keep listing
            Err(e) if e.depth() > 0 => {
                warn_println(&format!("Skipping unreadable entry: {}", e));
                continue;
            }
            Err(e) => {
                let path = e.path().unwrap_or(directory).to_path_buf();
                return Err(match e.into_io_error() {
                    Some(io) => StickerError::io(path, io),
                    None => StickerError::Argument(format!(
                        "cannot list directory {}",
                        directory.display()
                    )),
                });
            }
        };

        if entry.file_type().is_file() && pattern.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
