/// Constants used by tag parsing and index construction.
pub mod tags {
    /// Delimiter joining multiple tags inside one raw tag cell.
    pub const TAG_DELIMITER: char = '|';
}

/// Column names accepted by tabular tag sources.
pub mod tag_table {
    /// Required column holding the image file name.
    pub const COLUMN_FILENAME: &str = "filename";
    /// Optional column holding the category label.
    pub const COLUMN_CATEGORY: &str = "category";
    /// Required column holding the `|`-delimited tag list.
    pub const COLUMN_TAGS: &str = "tags";
}

/// Default values for trial configuration.
pub mod trial {
    /// Default grid height in cells.
    pub const DEFAULT_GRID_ROWS: usize = 2;
    /// Default grid width in cells.
    pub const DEFAULT_GRID_COLS: usize = 2;
    /// Default rendered size of each placed image.
    pub const DEFAULT_IMAGE_SIZE_PX: u32 = 250;
    /// Default number of correct responses required to finish a trial.
    pub const DEFAULT_REQUIRED_CORRECT: usize = 1;
    /// Default duration of the prompt fade, in seconds.
    pub const DEFAULT_FADE_DURATION_SECS: f32 = 1.0;
    /// Default opacity incorrect images fade to while prompting.
    pub const DEFAULT_FADE_OPACITY: f32 = 0.4;
    /// Default highlight color used by highlight prompts.
    pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#28a745";
    /// Default scale of the sample image in match-to-sample trials.
    pub const DEFAULT_SAMPLE_IMAGE_SCALE: f32 = 0.5;
}

/// Constants used by per-session interaction log files.
pub mod session {
    /// Prefix of a session log file name.
    pub const SESSION_FILE_PREFIX: &str = "session_";
    /// Extension of a session log file name.
    pub const SESSION_FILE_EXT: &str = "csv";
    /// Column order written to and read from session log files.
    pub const LOG_COLUMNS: [&str; 8] = [
        "session_id",
        "trial_number",
        "timestamp",
        "target_name",
        "image_file_name",
        "time_taken_ms",
        "prompt_used",
        "correct",
    ];
}
