use rayon::prelude::*;

use crate::alignment::apparatus::assemble;
use crate::alignment::normalization::TextNormalizer;
use crate::config::AlignConfig;
use crate::error::CollationError;
use crate::pipeline::builder::CollatorBuilder;
use crate::pipeline::traits::{DivergenceScorer, FieldSegmenter, PairAligner, WitnessSynchronizer};
use crate::types::{AlignmentResult, CollationOutput, WitnessText};

pub struct Collator {
    config: AlignConfig,
    normalizer: TextNormalizer,
    pair_aligner: Box<dyn PairAligner>,
    field_segmenter: Box<dyn FieldSegmenter>,
    divergence_scorer: Box<dyn DivergenceScorer>,
    synchronizer: Box<dyn WitnessSynchronizer>,
}

pub(crate) struct CollatorParts {
    pub config: AlignConfig,
    pub normalizer: TextNormalizer,
    pub pair_aligner: Box<dyn PairAligner>,
    pub field_segmenter: Box<dyn FieldSegmenter>,
    pub divergence_scorer: Box<dyn DivergenceScorer>,
    pub synchronizer: Box<dyn WitnessSynchronizer>,
}

/// Two-text comparison with default components.
pub fn align_pair(a: &str, b: &str, config: &AlignConfig) -> Result<AlignmentResult, CollationError> {
    CollatorBuilder::new(config.clone()).build()?.align_pair(a, b)
}

impl Collator {
    pub(crate) fn from_parts(parts: CollatorParts) -> Self {
        Self {
            config: parts.config,
            normalizer: parts.normalizer,
            pair_aligner: parts.pair_aligner,
            field_segmenter: parts.field_segmenter,
            divergence_scorer: parts.divergence_scorer,
            synchronizer: parts.synchronizer,
        }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Align two texts field by field; no synchronization is needed for a pair.
    pub fn align_pair(&self, a: &str, b: &str) -> Result<AlignmentResult, CollationError> {
        let base: Vec<char> = self.normalizer.normalize_witness(a).chars().collect();
        self.align_normalized("a+b".to_string(), &base, b)
    }

    /// Align every witness against `base`, synchronize their segmentations
    /// and assemble the apparatus.
    ///
    /// Witness order is significant: the first witness is the reference the
    /// synchronizer drives from.
    pub fn collate(
        &self,
        base: &WitnessText,
        witnesses: &[WitnessText],
    ) -> Result<CollationOutput, CollationError> {
        if witnesses.is_empty() {
            return Err(CollationError::invalid_input(
                "collation needs at least one witness",
            ));
        }

        let base_chars: Vec<char> = self.normalizer.normalize_witness(&base.text).chars().collect();
        let alignments = witnesses
            .par_iter()
            .map(|witness| {
                self.align_normalized(
                    format!("{}+{}", base.id, witness.id),
                    &base_chars,
                    &witness.text,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sources: Vec<&[String]> = alignments.iter().map(|a| a.source.as_slice()).collect();
        let sync = self.synchronizer.synchronize(&sources).map_err(|failure| {
            tracing::warn!(
                base_id = base.id.as_str(),
                witnesses = witnesses.len(),
                %failure,
                "collation: synchronization failed"
            );
            CollationError::from(failure)
        })?;

        let groups = assemble(witnesses, &alignments, &sync);
        tracing::debug!(
            base_id = base.id.as_str(),
            witnesses = witnesses.len(),
            groups = groups.len(),
            "collation: assembled"
        );

        Ok(CollationOutput {
            base_id: base.id.clone(),
            witness_ids: witnesses.iter().map(|w| w.id.clone()).collect(),
            groups,
            alignments,
        })
    }

    fn align_normalized(
        &self,
        name: String,
        base: &[char],
        witness_text: &str,
    ) -> Result<AlignmentResult, CollationError> {
        let witness: Vec<char> = self.normalizer.normalize_witness(witness_text).chars().collect();

        let cells = (base.len() + 1).saturating_mul(witness.len() + 1);
        if cells > self.config.max_cells {
            tracing::warn!(
                name = name.as_str(),
                base_len = base.len(),
                witness_len = witness.len(),
                max_cells = self.config.max_cells,
                "collation: alignment grid over ceiling, rejecting"
            );
            return Err(CollationError::InputTooLarge {
                cells,
                max_cells: self.config.max_cells,
            });
        }

        let filler = self.config.filler;
        let pair = self
            .pair_aligner
            .align(base, &witness, filler, self.config.scoring());
        let (fields_a, fields_b) = self.field_segmenter.segment(&pair, filler);

        let mut source = Vec::with_capacity(fields_a.len());
        let mut target = Vec::with_capacity(fields_b.len());
        let mut score = Vec::with_capacity(fields_a.len());
        for (field_a, field_b) in fields_a.iter().zip(&fields_b) {
            score.push(self.divergence_scorer.score(field_a, field_b));
            source.push(self.normalizer.strip_filler(field_a));
            target.push(self.normalizer.strip_filler(field_b));
        }

        tracing::debug!(
            name = name.as_str(),
            grid_score = pair.score,
            fields = source.len(),
            "collation: pair aligned"
        );

        Ok(AlignmentResult {
            name,
            source,
            target,
            score,
        })
    }
}
