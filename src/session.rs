use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::{fs, io};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::constants::session::{LOG_COLUMNS, SESSION_FILE_EXT, SESSION_FILE_PREFIX};
use crate::csv::{escape_field, split_record};
use crate::data::InteractionRecord;
use crate::errors::TrialError;
use crate::types::SessionId;

/// Generate a fresh session identifier.
pub fn new_session_id() -> SessionId {
    Uuid::new_v4().to_string()
}

/// Append-only sink for per-session interaction records.
pub trait InteractionLog {
    /// Persist one interaction record.
    fn append(&self, record: &InteractionRecord) -> Result<(), TrialError>;
}

/// CSV-backed interaction log, one `session_<id>.csv` file per session.
///
/// The header row is written on first append; subsequent appends add one
/// record row each. `load` reads a session's records back for the download
/// responder.
pub struct FileInteractionLog {
    dir: PathBuf,
}

impl FileInteractionLog {
    /// Create a log writing under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the log file for `session_id`.
    pub fn log_path(&self, session_id: &str) -> PathBuf {
        self.dir
            .join(format!("{SESSION_FILE_PREFIX}{session_id}.{SESSION_FILE_EXT}"))
    }

    /// Read a session's records back in append order.
    ///
    /// A session with no recorded interactions yields an empty list rather
    /// than an error, matching the "no data available" download response.
    pub fn load(&self, session_id: &str) -> Result<Vec<InteractionRecord>, TrialError> {
        let text = match fs::read_to_string(self.log_path(session_id)) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut records = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if idx == 0 || line.trim().is_empty() {
                continue;
            }
            records.push(parse_row(line)?);
        }
        Ok(records)
    }
}

impl InteractionLog for FileInteractionLog {
    fn append(&self, record: &InteractionRecord) -> Result<(), TrialError> {
        let path = self.log_path(&record.session_id);
        let write_header = !path.exists();
        let mut file = OpenOptions::new().append(true).create(true).open(&path)?;
        if write_header {
            writeln!(file, "{}", LOG_COLUMNS.join(","))?;
        }
        writeln!(file, "{}", format_row(record))?;
        Ok(())
    }
}

fn format_row(record: &InteractionRecord) -> String {
    [
        escape_field(&record.session_id),
        record.trial_number.to_string(),
        record.timestamp.to_rfc3339(),
        escape_field(&record.target_name),
        escape_field(&record.image_file_name),
        record.time_taken_ms.to_string(),
        escape_field(&record.prompt_used),
        record.correct.to_string(),
    ]
    .join(",")
}

fn parse_row(line: &str) -> Result<InteractionRecord, TrialError> {
    let fields = split_record(line);
    if fields.len() != LOG_COLUMNS.len() {
        return Err(TrialError::SessionLog(format!(
            "expected {} fields per row, got {}",
            LOG_COLUMNS.len(),
            fields.len()
        )));
    }
    let parse_err = |what: &str, err: &dyn std::fmt::Display| {
        TrialError::SessionLog(format!("bad {what}: {err}"))
    };
    let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&fields[2])
        .map_err(|err| parse_err("timestamp", &err))?
        .with_timezone(&Utc);
    Ok(InteractionRecord {
        session_id: fields[0].clone(),
        trial_number: fields[1]
            .parse()
            .map_err(|err| parse_err("trial number", &err))?,
        timestamp,
        target_name: fields[3].clone(),
        image_file_name: fields[4].clone(),
        time_taken_ms: fields[5]
            .parse()
            .map_err(|err| parse_err("latency", &err))?,
        prompt_used: fields[6].clone(),
        correct: fields[7]
            .parse()
            .map_err(|err| parse_err("correct flag", &err))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record(session_id: &str, trial_number: u32, correct: bool) -> InteractionRecord {
        InteractionRecord {
            session_id: session_id.to_string(),
            trial_number,
            timestamp: Utc.with_ymd_and_hms(2025, 2, 25, 12, 0, 0).unwrap(),
            target_name: "cat".to_string(),
            image_file_name: "cat.jpg".to_string(),
            time_taken_ms: 640,
            prompt_used: String::new(),
            correct,
        }
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }

    #[test]
    fn log_path_uses_the_session_file_shape() {
        let log = FileInteractionLog::new("/tmp/logs");
        assert_eq!(
            log.log_path("abc"),
            PathBuf::from("/tmp/logs/session_abc.csv")
        );
    }

    #[test]
    fn append_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = FileInteractionLog::new(dir.path());
        let session = "roundtrip";
        log.append(&sample_record(session, 1, true)).expect("append");
        log.append(&sample_record(session, 2, false)).expect("append");

        let records = log.load(session).expect("load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], sample_record(session, 1, true));
        assert_eq!(records[1], sample_record(session, 2, false));

        // Header is written exactly once.
        let text = fs::read_to_string(log.log_path(session)).expect("read");
        assert_eq!(
            text.lines()
                .filter(|line| line.starts_with("session_id,"))
                .count(),
            1
        );
    }

    #[test]
    fn fields_with_commas_survive_the_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = FileInteractionLog::new(dir.path());
        let mut record = sample_record("quoted", 1, true);
        record.target_name = "cats, large".to_string();
        record.image_file_name = "odd \"name\".jpg".to_string();
        log.append(&record).expect("append");
        let records = log.load("quoted").expect("load");
        assert_eq!(records[0], record);
    }

    #[test]
    fn missing_session_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = FileInteractionLog::new(dir.path());
        assert!(log.load("never-logged").expect("empty").is_empty());
    }

    #[test]
    fn malformed_rows_are_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = FileInteractionLog::new(dir.path());
        fs::write(
            log.log_path("bad"),
            "session_id,trial_number,timestamp,target_name,image_file_name,time_taken_ms,prompt_used,correct\nonly,three,fields\n",
        )
        .expect("write");
        assert!(matches!(log.load("bad"), Err(TrialError::SessionLog(_))));
    }
}
