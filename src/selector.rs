use std::collections::HashSet;

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::data::{PlacementRole, TargetSpec};
use crate::errors::TrialError;
use crate::index::TagIndex;
use crate::types::FileName;

/// One image chosen for the grid, before correctness labeling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedImage {
    /// File name of the chosen image.
    pub filename: FileName,
    /// How the image was chosen.
    pub role: PlacementRole,
}

/// Random image selection against a `TagIndex`.
///
/// Selection is intentionally non-deterministic across calls: repeated trials
/// with identical targets are expected to show different concrete images,
/// while the exclusion rules stay deterministic. Tests inject a seeded RNG
/// through `with_rng`.
pub struct ImageSelector<'a, R: Rng> {
    index: &'a TagIndex,
    rng: R,
}

impl<'a> ImageSelector<'a, ThreadRng> {
    /// Selector backed by the thread-local RNG.
    pub fn new(index: &'a TagIndex) -> Self {
        Self {
            index,
            rng: rand::rng(),
        }
    }
}

impl<'a, R: Rng> ImageSelector<'a, R> {
    /// Selector with an explicit RNG.
    pub fn with_rng(index: &'a TagIndex, rng: R) -> Self {
        Self { index, rng }
    }

    /// Build the grid's image list for the given targets.
    ///
    /// Draws one uniformly random image per matching target in target order,
    /// validates feasibility, then either downsamples to the grid capacity or
    /// fills the remaining cells with non-conflicting distractors. The final
    /// list is shuffled so grid order does not reveal how an image was chosen.
    ///
    /// A target whose tag matches no image contributes nothing; the shortfall
    /// surfaces in the feasibility check rather than per tag. Running out of
    /// distractor candidates is not an error: the grid comes back short.
    pub fn select_for_targets(
        &mut self,
        targets: &[TargetSpec],
        grid_rows: usize,
        grid_cols: usize,
    ) -> Result<Vec<SelectedImage>, TrialError> {
        if grid_rows == 0 || grid_cols == 0 {
            return Err(TrialError::Configuration(format!(
                "grid must be at least 1x1, got {grid_rows}x{grid_cols}"
            )));
        }
        // Fail fast on the first unknown tag so the error names exactly one.
        for spec in targets {
            if !self.index.contains_tag(&spec.tag) {
                return Err(TrialError::InvalidTag {
                    tag: spec.tag.clone(),
                });
            }
        }

        let mut selected: Vec<FileName> = Vec::with_capacity(targets.len());
        for spec in targets {
            let candidates = self.index.filenames_with_tag(&spec.tag);
            if let Some(filename) = candidates.choose(&mut self.rng) {
                selected.push(filename.clone());
            }
        }
        if selected.len() < targets.len() {
            return Err(TrialError::NotEnoughImages {
                found: selected.len(),
                needed: targets.len(),
            });
        }

        let total_needed = grid_rows * grid_cols;
        let mut placed: Vec<SelectedImage> = if selected.len() > total_needed {
            selected
                .choose_multiple(&mut self.rng, total_needed)
                .cloned()
                .map(|filename| SelectedImage {
                    filename,
                    role: PlacementRole::TargetMatch,
                })
                .collect()
        } else {
            let remaining = total_needed - selected.len();
            let pool = self.distractor_pool(&selected, targets);
            let mut placed: Vec<SelectedImage> = selected
                .into_iter()
                .map(|filename| SelectedImage {
                    filename,
                    role: PlacementRole::TargetMatch,
                })
                .collect();
            placed.extend(
                pool.choose_multiple(&mut self.rng, remaining.min(pool.len()))
                    .cloned()
                    .map(|filename| SelectedImage {
                        filename,
                        role: PlacementRole::Distractor,
                    }),
            );
            placed
        };
        placed.shuffle(&mut self.rng);
        Ok(placed)
    }

    /// Images eligible as distractors: not already placed, and sharing no tag
    /// or category with any target (no incidental correct answers).
    fn distractor_pool(&self, selected: &[FileName], targets: &[TargetSpec]) -> Vec<FileName> {
        let taken: HashSet<&str> = selected.iter().map(String::as_str).collect();
        let target_tags: HashSet<&str> = targets.iter().map(|spec| spec.tag.as_str()).collect();
        self.index
            .records()
            .filter(|record| !taken.contains(record.filename.as_str()))
            .filter(|record| {
                !record
                    .tags
                    .iter()
                    .any(|tag| target_tags.contains(tag.as_str()))
                    && record
                        .category
                        .as_deref()
                        .is_none_or(|category| !target_tags.contains(category))
            })
            .map(|record| record.filename.clone())
            .collect()
    }
}
