use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::{ActionType, TrialConfig};
use crate::data::Placement;
use crate::errors::TrialError;
use crate::index::TagIndex;
use crate::labeler::label_all;
use crate::selector::ImageSelector;
use crate::types::{FileName, Tag};

/// A fully assembled trial, ready for the rendering and logging layers.
#[derive(Clone, Debug)]
pub struct Trial {
    /// Placed images in final grid order, each labeled for correctness.
    pub placements: Vec<Placement>,
    /// Tags of visible targets, in configured order, for UI labels.
    pub visible_targets: Vec<Tag>,
    /// Sample image for match-to-sample trials; `None` for other actions or
    /// when no correct placement exists.
    pub sample_image: Option<FileName>,
}

impl Trial {
    /// Assemble a trial with the thread-local RNG.
    pub fn build(index: &TagIndex, config: &TrialConfig) -> Result<Self, TrialError> {
        Self::build_with_rng(index, config, rand::rng())
    }

    /// Assemble a trial with an explicit RNG.
    ///
    /// Runs selection, labels every placement against the full active target
    /// set (visible and hidden alike), and for match-to-sample trials draws
    /// one correct placement uniformly at random as the sample.
    pub fn build_with_rng<R: Rng>(
        index: &TagIndex,
        config: &TrialConfig,
        mut rng: R,
    ) -> Result<Self, TrialError> {
        if index.is_empty() {
            return Err(TrialError::EmptySource);
        }
        let targets = config.usable_targets();
        let mut selector = ImageSelector::with_rng(index, &mut rng);
        let selected = selector.select_for_targets(&targets, config.grid_rows, config.grid_cols)?;

        let active_targets: BTreeSet<Tag> = targets.iter().map(|spec| spec.tag.clone()).collect();
        let placements = label_all(&selected, index, &active_targets);

        let sample_image = if config.action == ActionType::MatchToSample {
            let correct: Vec<&Placement> = placements
                .iter()
                .filter(|placement| placement.is_correct)
                .collect();
            correct
                .choose(&mut rng)
                .map(|placement| placement.filename.clone())
        } else {
            None
        };

        Ok(Self {
            placements,
            visible_targets: config.visible_target_tags(),
            sample_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PlacementRole, RawTagRow, TargetSpec};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_index() -> TagIndex {
        TagIndex::build(vec![
            RawTagRow::new("cat.jpg", Some("animals"), "animal|pet|cat"),
            RawTagRow::new("dog.jpg", Some("animals"), "animal|pet|dog"),
            RawTagRow::new("car.jpg", Some("vehicles"), "vehicle|car"),
            RawTagRow::new("bus.jpg", Some("vehicles"), "vehicle|bus"),
        ])
    }

    #[test]
    fn empty_index_is_fatal() {
        let index = TagIndex::build(Vec::new());
        let err = Trial::build_with_rng(&index, &TrialConfig::default(), StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, TrialError::EmptySource));
    }

    #[test]
    fn trial_labels_match_roles() {
        let index = sample_index();
        let config = TrialConfig {
            targets: vec![TargetSpec::new("cat", true), TargetSpec::new("", true)],
            ..TrialConfig::default()
        };
        let trial =
            Trial::build_with_rng(&index, &config, StdRng::seed_from_u64(2)).expect("trial");
        assert_eq!(trial.placements.len(), 4);
        assert_eq!(trial.visible_targets, vec!["cat".to_string()]);
        for placement in &trial.placements {
            match placement.role {
                PlacementRole::TargetMatch => assert!(placement.is_correct),
                PlacementRole::Distractor => assert!(!placement.is_correct),
            }
        }
    }

    #[test]
    fn match_to_sample_draws_a_correct_sample() {
        let index = sample_index();
        let config = TrialConfig {
            targets: vec![TargetSpec::new("vehicle", true)],
            action: ActionType::MatchToSample,
            ..TrialConfig::default()
        };
        for seed in 0..20 {
            let trial = Trial::build_with_rng(&index, &config, StdRng::seed_from_u64(seed))
                .expect("trial");
            let sample = trial.sample_image.expect("a correct placement exists");
            let placement = trial
                .placements
                .iter()
                .find(|placement| placement.filename == sample)
                .expect("sample is a placed image");
            assert!(placement.is_correct);
        }
    }

    #[test]
    fn non_sample_actions_have_no_sample_image() {
        let index = sample_index();
        let config = TrialConfig {
            targets: vec![TargetSpec::new("cat", true)],
            ..TrialConfig::default()
        };
        let trial =
            Trial::build_with_rng(&index, &config, StdRng::seed_from_u64(3)).expect("trial");
        assert!(trial.sample_image.is_none());
    }
}
