use crate::alignment::normalization::TextNormalizer;
use crate::config::AlignConfig;
use crate::error::CollationError;
use crate::pipeline::defaults::{
    BreakpointSegmenter, NeedlemanWunschAligner, RealignmentScorer, StreamingSynchronizer,
};
use crate::pipeline::runtime::{Collator, CollatorParts};
use crate::pipeline::traits::{DivergenceScorer, FieldSegmenter, PairAligner, WitnessSynchronizer};

pub struct CollatorBuilder {
    config: AlignConfig,
    pair_aligner: Option<Box<dyn PairAligner>>,
    field_segmenter: Option<Box<dyn FieldSegmenter>>,
    divergence_scorer: Option<Box<dyn DivergenceScorer>>,
    synchronizer: Option<Box<dyn WitnessSynchronizer>>,
}

impl CollatorBuilder {
    pub fn new(config: AlignConfig) -> Self {
        Self {
            config,
            pair_aligner: None,
            field_segmenter: None,
            divergence_scorer: None,
            synchronizer: None,
        }
    }

    pub fn with_pair_aligner(mut self, pair_aligner: Box<dyn PairAligner>) -> Self {
        self.pair_aligner = Some(pair_aligner);
        self
    }

    pub fn with_field_segmenter(mut self, field_segmenter: Box<dyn FieldSegmenter>) -> Self {
        self.field_segmenter = Some(field_segmenter);
        self
    }

    pub fn with_divergence_scorer(mut self, divergence_scorer: Box<dyn DivergenceScorer>) -> Self {
        self.divergence_scorer = Some(divergence_scorer);
        self
    }

    pub fn with_synchronizer(mut self, synchronizer: Box<dyn WitnessSynchronizer>) -> Self {
        self.synchronizer = Some(synchronizer);
        self
    }

    pub fn build(self) -> Result<Collator, CollationError> {
        self.config.validate()?;
        let normalizer = TextNormalizer::new(&self.config)?;

        Ok(Collator::from_parts(CollatorParts {
            divergence_scorer: self
                .divergence_scorer
                .unwrap_or_else(|| Box::new(RealignmentScorer::new(normalizer.clone()))),
            config: self.config,
            normalizer,
            pair_aligner: self
                .pair_aligner
                .unwrap_or_else(|| Box::new(NeedlemanWunschAligner)),
            field_segmenter: self
                .field_segmenter
                .unwrap_or_else(|| Box::new(BreakpointSegmenter)),
            synchronizer: self
                .synchronizer
                .unwrap_or_else(|| Box::new(StreamingSynchronizer)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::synchronization::Synchronization;
    use crate::error::SyncFailure;
    use crate::types::WitnessText;

    struct ConstantScorer(f32);

    impl DivergenceScorer for ConstantScorer {
        fn score(&self, _field_a: &str, _field_b: &str) -> f32 {
            self.0
        }
    }

    struct RefusingSynchronizer;

    impl WitnessSynchronizer for RefusingSynchronizer {
        fn synchronize(&self, _sources: &[&[String]]) -> Result<Synchronization, SyncFailure> {
            Err(SyncFailure::SynchronizationExhausted {
                witness: 1,
                field: 0,
                offset: 0,
            })
        }
    }

    #[test]
    fn builder_defaults_build() {
        let collator = CollatorBuilder::new(AlignConfig::default())
            .build()
            .expect("build should succeed");
        assert_eq!(collator.config(), &AlignConfig::default());
    }

    #[test]
    fn build_fails_on_invalid_config() {
        let result = CollatorBuilder::new(AlignConfig {
            filler: ' ',
            ..AlignConfig::default()
        })
        .build();
        assert!(matches!(result, Err(CollationError::InvalidInput { .. })));
    }

    #[test]
    fn divergence_scorer_can_be_overridden() {
        let collator = CollatorBuilder::new(AlignConfig::default())
            .with_divergence_scorer(Box::new(ConstantScorer(0.25)))
            .build()
            .expect("build should succeed");
        let result = collator.align_pair("a b", "a b").unwrap();
        assert!(result.score.iter().all(|&s| s == 0.25));
    }

    #[test]
    fn synchronizer_failure_surfaces_as_collation_error() {
        let collator = CollatorBuilder::new(AlignConfig::default())
            .with_synchronizer(Box::new(RefusingSynchronizer))
            .build()
            .expect("build should succeed");
        let err = collator
            .collate(
                &WitnessText::new("base", "a b"),
                &[WitnessText::new("A", "a b"), WitnessText::new("B", "a c")],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CollationError::Sync(SyncFailure::SynchronizationExhausted { witness: 1, .. })
        ));
    }

    #[test]
    fn custom_filler_and_brackets_flow_through() {
        let collator = CollatorBuilder::new(AlignConfig {
            filler: '_',
            bracket_open: '[',
            bracket_close: ']',
            ..AlignConfig::default()
        })
        .build()
        .expect("build should succeed");
        let result = collator.align_pair("[f. 1r]the cat dog", "the cat").unwrap();
        assert_eq!(result.source, vec!["the ", "cat ", "dog"]);
        assert_eq!(result.target, vec!["the ", "cat", ""]);
    }
}
