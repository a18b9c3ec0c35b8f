use std::io;

use thiserror::Error;

use crate::types::Tag;

/// Error type for tag-source loading, trial configuration, and selection failures.
///
/// All failures are deterministic local validation results: selection either
/// fully succeeds or returns one error naming the cause, never a partially
/// built grid.
#[derive(Debug, Error)]
pub enum TrialError {
    #[error("tag source contains no usable records")]
    EmptySource,
    #[error("tag '{tag}' not found; enter a tag known to the image table")]
    InvalidTag { tag: Tag },
    #[error(
        "not enough images for the selected targets: found {found} images for {needed} targets"
    )]
    NotEnoughImages { found: usize, needed: usize },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("session log failure: {0}")]
    SessionLog(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
