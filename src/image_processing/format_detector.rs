//! Source classification.
//!
//! Decides whether an input is a plain still image or an animation whose
//! first frame has to be extracted. Everything here is a pure function of the
//! path and the leading bytes of the file, apart from [`detect_source_kind`]
//! which reads those bytes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use strum_macros::Display;

use crate::utils::get_file_extension;

/// Number of header bytes needed to probe a WebP container.
pub const HEADER_PROBE_LEN: usize = 30;

/// VP8X feature flag marking an animated WebP.
const VP8X_ANIMATION_FLAG: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SourceKind {
    /// Single still image, decoded directly
    #[strum(serialize = "static")]
    Static,
    /// GIF, always routed through the palette frame extractor
    #[strum(serialize = "animated-gif")]
    AnimatedGif,
    /// Multi-frame container (animated WebP)
    #[strum(serialize = "animated-webp")]
    AnimatedContainer,
}

impl SourceKind {
    pub fn is_animated(&self) -> bool {
        !matches!(self, SourceKind::Static)
    }
}

/// Classify a source from its path and the first bytes of its contents.
///
/// Every `.gif` counts as animated. A `.webp` is animated only when its
/// header is an extended (`VP8X`) chunk with the animation flag set; simple
/// lossy/lossless WebP files are still images.
pub fn classify_source(path: &Path, header: &[u8]) -> SourceKind {
    match get_file_extension(path).as_deref() {
        Some("gif") => SourceKind::AnimatedGif,
        Some("webp") if is_animated_webp(header) => SourceKind::AnimatedContainer,
        _ => SourceKind::Static,
    }
}

/// Check a WebP header for the VP8X animation flag.
pub fn is_animated_webp(header: &[u8]) -> bool {
    if header.len() < 21 {
        return false;
    }
    if &header[0..4] != b"RIFF" || &header[8..12] != b"WEBP" {
        return false;
    }
    &header[12..16] == b"VP8X" && header[20] & VP8X_ANIMATION_FLAG != 0
}

/// Read the header of `path` and classify it.
///
/// Unreadable files are reported as [`SourceKind::Static`]; the decoder that
/// runs next produces the real error for them.
pub fn detect_source_kind(path: &Path) -> SourceKind {
    let header = read_header(path).unwrap_or_default();
    classify_source(path, &header)
}

fn read_header(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_PROBE_LEN);
    file.take(HEADER_PROBE_LEN as u64).read_to_end(&mut header)?;
    Ok(header)
}
