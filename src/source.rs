//! Tag table sources.
//!
//! A source produces the ordered raw rows a `TagIndex` is built from. Row
//! validation lives in the index so every source shares one set of rules;
//! sources only handle transport and table shape.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::constants::tag_table::{COLUMN_CATEGORY, COLUMN_FILENAME, COLUMN_TAGS};
use crate::csv::split_record;
use crate::data::RawTagRow;
use crate::errors::TrialError;
use crate::types::SourceId;

/// Produces the ordered raw rows a `TagIndex` is built from.
pub trait TagSource {
    /// Stable source identifier used in warnings.
    fn id(&self) -> &str;
    /// Ordered raw rows. Unparseable content yields zero rows, not an error;
    /// the resulting empty index is the caller's fatal signal.
    fn rows(&self) -> Result<Vec<RawTagRow>, TrialError>;
}

/// In-memory tag source for tests and embedded taxonomies.
pub struct InMemoryTagSource {
    id: SourceId,
    rows: Vec<RawTagRow>,
}

impl InMemoryTagSource {
    /// Create an in-memory source from prebuilt rows.
    pub fn new(id: impl Into<SourceId>, rows: Vec<RawTagRow>) -> Self {
        Self {
            id: id.into(),
            rows,
        }
    }
}

impl TagSource for InMemoryTagSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> Result<Vec<RawTagRow>, TrialError> {
        Ok(self.rows.clone())
    }
}

/// Tag source reading the `image_tags.csv` table shape: a header row naming
/// `filename`/`category`/`tags` columns (category optional), quote-aware
/// fields, CRLF tolerated.
pub struct CsvTagSource {
    id: SourceId,
    path: PathBuf,
}

impl CsvTagSource {
    /// Create a source reading `path`.
    pub fn new(id: impl Into<SourceId>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

impl TagSource for CsvTagSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> Result<Vec<RawTagRow>, TrialError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(parse_tag_table(self.id(), &text))
    }
}

/// Parse CSV text into raw rows. A header missing the required columns
/// degrades to zero rows; per-row problems are left for index validation.
fn parse_tag_table(source_id: &str, text: &str) -> Vec<RawTagRow> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns = split_record(header);
    let position =
        |name: &str| columns.iter().position(|c| c.trim().eq_ignore_ascii_case(name));
    let Some(filename_col) = position(COLUMN_FILENAME) else {
        warn!(source_id, "tag table has no '{COLUMN_FILENAME}' column");
        return Vec::new();
    };
    let Some(tags_col) = position(COLUMN_TAGS) else {
        warn!(source_id, "tag table has no '{COLUMN_TAGS}' column");
        return Vec::new();
    };
    let category_col = position(COLUMN_CATEGORY);

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(line);
        let field = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");
        rows.push(RawTagRow {
            filename: field(filename_col).to_string(),
            category: category_col
                .map(|idx| field(idx).to_string())
                .filter(|category| !category.is_empty()),
            tags: field(tags_col).to_string(),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_tag_table_reads_the_sample_shape() {
        let text = "filename,category,tags\r\n\
                    cat.jpg,animals,animal|pet|cat\r\n\
                    dog.jpg,animals,animal|pet|dog\r\n\
                    car.jpg,vehicles,vehicle|car\r\n";
        let rows = parse_tag_table("test", text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].filename, "cat.jpg");
        assert_eq!(rows[0].category.as_deref(), Some("animals"));
        assert_eq!(rows[2].tags, "vehicle|car");
    }

    #[test]
    fn parse_tag_table_tolerates_missing_category_column() {
        let text = "tags,filename\nanimal|cat,cat.jpg\n";
        let rows = parse_tag_table("test", text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "cat.jpg");
        assert!(rows[0].category.is_none());
    }

    #[test]
    fn parse_tag_table_degrades_to_empty_on_bad_headers() {
        assert!(parse_tag_table("test", "").is_empty());
        assert!(parse_tag_table("test", "name,labels\nx,y\n").is_empty());
        assert!(parse_tag_table("test", "filename,category\ncat.jpg,animals\n").is_empty());
    }

    #[test]
    fn csv_source_loads_from_disk_and_missing_files_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("image_tags.csv");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "filename,category,tags").expect("write");
        writeln!(file, "cat.jpg,animals,animal|pet|cat").expect("write");

        let source = CsvTagSource::new("image_tags", &path);
        let rows = source.rows().expect("readable file");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "cat.jpg");

        let missing = CsvTagSource::new("missing", dir.path().join("nope.csv"));
        assert!(matches!(missing.rows(), Err(TrialError::Io(_))));
    }

    #[test]
    fn quoted_fields_survive_parsing() {
        let text = "filename,category,tags\n\"a,b.jpg\",animals,\"animal|pet\"\n";
        let rows = parse_tag_table("test", text);
        assert_eq!(rows[0].filename, "a,b.jpg");
        assert_eq!(rows[0].tags, "animal|pet");
    }
}
