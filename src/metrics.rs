use std::collections::HashMap;

use crate::data::InteractionRecord;

/// Aggregate summary of one session's logged interactions.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_time_ms: f64,
    pub per_target: Vec<TargetShare>,
}

/// Per-target slice of a session summary.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetShare {
    pub target: String,
    pub attempts: usize,
    pub correct: usize,
    pub share: f64,
}

/// Summarize logged interactions; `None` when the slice is empty.
/// Targets are ordered by attempt count, then name, for stable reports.
pub fn session_summary(records: &[InteractionRecord]) -> Option<SessionSummary> {
    if records.is_empty() {
        return None;
    }
    let total = records.len();
    let correct = records.iter().filter(|record| record.correct).count();
    let mean_time_ms =
        records.iter().map(|record| record.time_taken_ms as f64).sum::<f64>() / total as f64;

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for record in records {
        let entry = counts.entry(record.target_name.as_str()).or_default();
        entry.0 += 1;
        if record.correct {
            entry.1 += 1;
        }
    }
    let mut per_target: Vec<TargetShare> = counts
        .into_iter()
        .map(|(target, (attempts, hits))| TargetShare {
            target: target.to_string(),
            attempts,
            correct: hits,
            share: attempts as f64 / total as f64,
        })
        .collect();
    per_target.sort_by(|a, b| {
        b.attempts
            .cmp(&a.attempts)
            .then_with(|| a.target.cmp(&b.target))
    });

    Some(SessionSummary {
        total,
        correct,
        accuracy: correct as f64 / total as f64,
        mean_time_ms,
        per_target,
    })
}
