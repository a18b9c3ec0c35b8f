#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Trial configuration types.
pub mod config;
/// Centralized constants used across parsing, selection, and logging.
pub mod constants;
mod csv;
/// Core record, target, placement, and interaction types.
pub mod data;
/// Display encoding for placed images.
pub mod encode;
/// Tag index construction and lookup.
pub mod index;
/// Correctness labeling for placed images.
pub mod labeler;
/// Session summary helpers.
pub mod metrics;
/// Random image selection for trial grids.
pub mod selector;
/// Per-session interaction logging.
pub mod session;
/// Tag table sources (in-memory and CSV today).
pub mod source;
/// Trial assembly from index plus configuration.
pub mod trial;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{ActionType, PromptStrategy, TrialConfig};
pub use data::{
    InteractionRecord, Placement, PlacementRole, RawTagRow, TagRecord, TargetSpec,
};
pub use encode::{Base64ImageEncoder, DisplayImage, ImageEncoder, encode_placements};
pub use errors::TrialError;
pub use index::TagIndex;
pub use labeler::{label, label_all};
pub use metrics::{SessionSummary, TargetShare, session_summary};
pub use selector::{ImageSelector, SelectedImage};
pub use session::{FileInteractionLog, InteractionLog, new_session_id};
pub use source::{CsvTagSource, InMemoryTagSource, TagSource};
pub use trial::Trial;
pub use types::{CategoryId, FileName, SessionId, SourceId, Tag};
