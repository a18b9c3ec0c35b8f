use serde::{Deserialize, Serialize};

use crate::constants::trial::{
    DEFAULT_FADE_DURATION_SECS, DEFAULT_FADE_OPACITY, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS,
    DEFAULT_HIGHLIGHT_COLOR, DEFAULT_IMAGE_SIZE_PX, DEFAULT_REQUIRED_CORRECT,
    DEFAULT_SAMPLE_IMAGE_SCALE,
};
use crate::data::TargetSpec;
use crate::types::Tag;

/// How the participant responds to the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Click or tap a correct image.
    #[default]
    Click,
    /// Drag a correct image onto a drop zone.
    ClickAndDrag,
    /// Drag the image matching a separately shown sample.
    MatchToSample,
    /// Type the target's name.
    ManualEntry,
}

impl ActionType {
    /// True when placed images should be rendered draggable.
    pub fn is_draggable(self) -> bool {
        matches!(self, Self::ClickAndDrag | Self::MatchToSample)
    }
}

/// Prompting and consequence settings applied after responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromptStrategy {
    /// Whether prompting is active at all.
    pub enabled: bool,
    /// Prompt variant name forwarded to the rendering layer (for example
    /// `fade` or `highlight`); empty when prompting is disabled.
    pub prompt_type: String,
    /// Seconds to wait before prompting; `None` prompts immediately.
    pub prompt_delay_secs: Option<f32>,
    /// Seconds the fade prompt takes to settle.
    pub fade_duration_secs: f32,
    /// Opacity incorrect images fade to, in `0.0..=1.0`.
    pub fade_opacity: f32,
    /// CSS color used by highlight prompts.
    pub highlight_color: String,
    /// Whether to play reinforcement on a correct response.
    pub reinforcement: bool,
    /// Whether to play the celebration animation on trial completion.
    pub celebration_animation: bool,
    /// Scale of the sample image relative to grid images.
    pub sample_image_scale: f32,
}

impl Default for PromptStrategy {
    fn default() -> Self {
        Self {
            enabled: false,
            prompt_type: String::new(),
            prompt_delay_secs: None,
            fade_duration_secs: DEFAULT_FADE_DURATION_SECS,
            fade_opacity: DEFAULT_FADE_OPACITY,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            reinforcement: false,
            celebration_animation: false,
            sample_image_scale: DEFAULT_SAMPLE_IMAGE_SCALE,
        }
    }
}

/// Top-level configuration for one trial request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Grid height in cells.
    pub grid_rows: usize,
    /// Grid width in cells.
    pub grid_cols: usize,
    /// Rendered size of each placed image, in pixels.
    pub image_size_px: u32,
    /// Ordered targets; order defines draw order during selection.
    pub targets: Vec<TargetSpec>,
    /// Participant response mode.
    pub action: ActionType,
    /// Correct responses required to complete the trial.
    pub required_correct: usize,
    /// Prompting behavior.
    pub prompt: PromptStrategy,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            grid_rows: DEFAULT_GRID_ROWS,
            grid_cols: DEFAULT_GRID_COLS,
            image_size_px: DEFAULT_IMAGE_SIZE_PX,
            targets: Vec::new(),
            action: ActionType::default(),
            required_correct: DEFAULT_REQUIRED_CORRECT,
            prompt: PromptStrategy::default(),
        }
    }
}

impl TrialConfig {
    /// Total grid capacity in cells.
    pub fn total_cells(&self) -> usize {
        self.grid_rows * self.grid_cols
    }

    /// Targets with a non-empty tag, in configured order.
    pub fn usable_targets(&self) -> Vec<TargetSpec> {
        self.targets
            .iter()
            .filter(|spec| !spec.tag.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Tags of visible targets, in configured order, for participant-facing labels.
    pub fn visible_target_tags(&self) -> Vec<Tag> {
        self.targets
            .iter()
            .filter(|spec| spec.visible && !spec.tag.trim().is_empty())
            .map(|spec| spec.tag.clone())
            .collect()
    }
}
