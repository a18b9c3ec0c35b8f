use std::fs;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;

use crate::data::Placement;
use crate::errors::TrialError;
use crate::types::FileName;

/// A display-ready encoding of one image file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayImage {
    /// File name the encoding was produced from.
    pub filename: FileName,
    /// Base64 text of the raw image bytes (standard alphabet).
    pub base64: String,
}

/// Image-bytes-to-displayable-encoding collaborator, keyed by filename.
pub trait ImageEncoder {
    /// Encode `filename`, or `None` when the file cannot be read. Unreadable
    /// images are dropped from the grid rather than failing the trial.
    fn encode(&self, filename: &str) -> Result<Option<DisplayImage>, TrialError>;
}

/// Encoder reading image bytes under a root directory.
pub struct Base64ImageEncoder {
    root: PathBuf,
}

impl Base64ImageEncoder {
    /// Create an encoder rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageEncoder for Base64ImageEncoder {
    fn encode(&self, filename: &str) -> Result<Option<DisplayImage>, TrialError> {
        let path = self.root.join(filename);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(DisplayImage {
                filename: filename.to_string(),
                base64: STANDARD.encode(bytes),
            })),
            Err(err) => {
                warn!(filename, error = %err, "skipping unreadable image");
                Ok(None)
            }
        }
    }
}

/// Pair each placement with its display encoding, dropping unreadable files
/// and preserving grid order.
pub fn encode_placements(
    encoder: &dyn ImageEncoder,
    placements: &[Placement],
) -> Result<Vec<(Placement, DisplayImage)>, TrialError> {
    let mut displayable = Vec::with_capacity(placements.len());
    for placement in placements {
        if let Some(image) = encoder.encode(&placement.filename)? {
            displayable.push((placement.clone(), image));
        }
    }
    Ok(displayable)
}
