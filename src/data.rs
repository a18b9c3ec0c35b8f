use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TrialError;

pub use crate::types::{CategoryId, FileName, SessionId, Tag};

/// A raw tag-table row before validation.
///
/// `tags` is the unparsed `|`-delimited cell; `category` is `None` when the
/// source table has no category column or the cell is empty.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawTagRow {
    /// Image file name cell.
    pub filename: String,
    /// Optional category cell.
    pub category: Option<String>,
    /// Unparsed `|`-delimited tags cell.
    pub tags: String,
}

impl RawTagRow {
    /// Convenience constructor for building rows in code.
    pub fn new(
        filename: impl Into<String>,
        category: Option<&str>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            category: category.map(str::to_string),
            tags: tags.into(),
        }
    }
}

/// One validated row of the image/tag table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TagRecord {
    /// Image file name, unique within an index.
    pub filename: FileName,
    /// Optional category label; matches like one more tag.
    pub category: Option<CategoryId>,
    /// Parsed tags in cell order; never empty for a record kept in an index.
    pub tags: Vec<Tag>,
}

impl TagRecord {
    /// Full label set used for matching: the tags plus the category, when present.
    pub fn label_set(&self) -> BTreeSet<Tag> {
        let mut labels: BTreeSet<Tag> = self.tags.iter().cloned().collect();
        if let Some(category) = &self.category {
            labels.insert(category.clone());
        }
        labels
    }

    /// True when `tag` appears among this record's tags or equals its category.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag) || self.category.as_deref() == Some(tag)
    }
}

/// One experimenter-configured target: the tag to match and whether its name
/// is shown to the participant. Order across targets defines draw order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Tag the trial must present an image for.
    pub tag: Tag,
    /// Whether the target's name appears in the participant-facing labels.
    pub visible: bool,
}

impl TargetSpec {
    /// Build a target spec.
    pub fn new(tag: impl Into<Tag>, visible: bool) -> Self {
        Self {
            tag: tag.into(),
            visible,
        }
    }
}

/// Role a placed image plays in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRole {
    /// Drawn for a target tag (or a downsample survivor of such a draw).
    TargetMatch,
    /// Filler image sharing no tag or category with any target.
    Distractor,
}

/// A placed image with its correctness annotation. Immutable once built; the
/// `is_correct` field is the authoritative source for logged correctness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// File name of the placed image.
    pub filename: FileName,
    /// The image's full label set (tags plus category).
    pub labels: BTreeSet<Tag>,
    /// True when the label set intersects the active target tags.
    pub is_correct: bool,
    /// How the image was chosen.
    pub role: PlacementRole,
}

/// One logged participant interaction.
///
/// Field names match the JSON payload the interaction logger contract posts,
/// and the column order of persisted session logs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Session this interaction belongs to.
    pub session_id: SessionId,
    /// 1-based trial counter within the session.
    pub trial_number: u32,
    /// When the interaction happened.
    pub timestamp: DateTime<Utc>,
    /// Target label active when the participant responded.
    pub target_name: String,
    /// File name of the image the participant acted on.
    pub image_file_name: FileName,
    /// Response latency in milliseconds.
    pub time_taken_ms: u64,
    /// Prompt type in effect, empty when unprompted.
    pub prompt_used: String,
    /// Whether the response was correct, taken from `Placement.is_correct`.
    pub correct: bool,
}

impl InteractionRecord {
    /// Parse the JSON body posted by the interaction logging contract.
    pub fn from_json(payload: &str) -> Result<Self, TrialError> {
        serde_json::from_str(payload)
            .map_err(|err| TrialError::SessionLog(format!("bad interaction payload: {err}")))
    }
}
