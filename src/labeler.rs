//! Correctness labeling for placed images.
//!
//! Labeling is pure: the same filename, index, and target set always produce
//! the same placement. The `is_correct` flag computed here is the
//! authoritative source for the `correct` field in session logs, so this is
//! the one spot where a bug would silently corrupt trial data.

use std::collections::BTreeSet;

use crate::data::{Placement, PlacementRole, TagRecord};
use crate::index::TagIndex;
use crate::selector::SelectedImage;
use crate::types::Tag;

/// Label one placed image against the active target tags.
///
/// The label set is the record's tags plus its category; the placement is
/// correct iff that set intersects `active_targets`. A filename missing from
/// the index yields an empty label set and an incorrect placement.
pub fn label(
    filename: &str,
    index: &TagIndex,
    active_targets: &BTreeSet<Tag>,
    role: PlacementRole,
) -> Placement {
    let labels = index
        .record(filename)
        .map(TagRecord::label_set)
        .unwrap_or_default();
    let is_correct = labels.iter().any(|label| active_targets.contains(label));
    Placement {
        filename: filename.to_string(),
        labels,
        is_correct,
        role,
    }
}

/// Label every selected image, preserving grid order.
pub fn label_all(
    selected: &[SelectedImage],
    index: &TagIndex,
    active_targets: &BTreeSet<Tag>,
) -> Vec<Placement> {
    selected
        .iter()
        .map(|image| label(&image.filename, index, active_targets, image.role))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawTagRow;

    fn sample_index() -> TagIndex {
        TagIndex::build(vec![
            RawTagRow::new("cat.jpg", Some("animals"), "animal|pet|cat"),
            RawTagRow::new("car.jpg", Some("vehicles"), "vehicle|car"),
        ])
    }

    fn target_set(tags: &[&str]) -> BTreeSet<Tag> {
        tags.iter().map(|tag| tag.to_string()).collect()
    }

    #[test]
    fn labeling_is_idempotent() {
        let index = sample_index();
        let targets = target_set(&["cat"]);
        let first = label("cat.jpg", &index, &targets, PlacementRole::TargetMatch);
        let second = label("cat.jpg", &index, &targets, PlacementRole::TargetMatch);
        assert_eq!(first, second);
        assert!(first.is_correct);
    }

    #[test]
    fn category_counts_toward_correctness() {
        let index = sample_index();
        let placement = label(
            "car.jpg",
            &index,
            &target_set(&["vehicles"]),
            PlacementRole::TargetMatch,
        );
        assert!(placement.is_correct);
        assert!(placement.labels.contains("vehicles"));
    }

    #[test]
    fn non_matching_image_is_incorrect() {
        let index = sample_index();
        let placement = label(
            "car.jpg",
            &index,
            &target_set(&["cat", "pet"]),
            PlacementRole::Distractor,
        );
        assert!(!placement.is_correct);
        assert_eq!(placement.role, PlacementRole::Distractor);
    }

    #[test]
    fn unknown_filename_labels_empty_and_incorrect() {
        let index = sample_index();
        let placement = label(
            "missing.jpg",
            &index,
            &target_set(&["cat"]),
            PlacementRole::Distractor,
        );
        assert!(placement.labels.is_empty());
        assert!(!placement.is_correct);
    }
}
