use crate::alignment::divergence::field_divergence;
use crate::alignment::needleman_wunsch::needleman_wunsch;
use crate::alignment::normalization::TextNormalizer;
use crate::alignment::segmentation::segment_fields;
use crate::alignment::synchronization::{synchronize, Synchronization};
use crate::config::ScoringScheme;
use crate::error::SyncFailure;
use crate::pipeline::traits::{DivergenceScorer, FieldSegmenter, PairAligner, WitnessSynchronizer};
use crate::types::AlignedPair;

pub struct NeedlemanWunschAligner;

impl PairAligner for NeedlemanWunschAligner {
    fn align(&self, a: &[char], b: &[char], filler: char, scoring: ScoringScheme) -> AlignedPair {
        needleman_wunsch(a, b, filler, scoring)
    }
}

pub struct BreakpointSegmenter;

impl FieldSegmenter for BreakpointSegmenter {
    fn segment(&self, pair: &AlignedPair, filler: char) -> (Vec<String>, Vec<String>) {
        segment_fields(pair, filler)
    }
}

pub struct RealignmentScorer {
    normalizer: TextNormalizer,
}

impl RealignmentScorer {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }
}

impl DivergenceScorer for RealignmentScorer {
    fn score(&self, field_a: &str, field_b: &str) -> f32 {
        field_divergence(&self.normalizer, field_a, field_b)
    }
}

pub struct StreamingSynchronizer;

impl WitnessSynchronizer for StreamingSynchronizer {
    fn synchronize(&self, sources: &[&[String]]) -> Result<Synchronization, SyncFailure> {
        synchronize(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlignConfig;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn needleman_wunsch_aligner_align() {
        let aligner = NeedlemanWunschAligner;
        let pair = aligner.align(&chars("abc"), &chars("abd"), '#', ScoringScheme::UNIT);
        let expected = needleman_wunsch(&chars("abc"), &chars("abd"), '#', ScoringScheme::UNIT);
        assert_eq!(pair, expected);
    }

    #[test]
    fn breakpoint_segmenter_segment() {
        let pair = needleman_wunsch(&chars("a b"), &chars("a c"), '#', ScoringScheme::UNIT);
        let (a, b) = BreakpointSegmenter.segment(&pair, '#');
        assert_eq!((a.clone(), b.clone()), segment_fields(&pair, '#'));
        assert_eq!(a, vec!["a ", "b"]);
        assert_eq!(b, vec!["a ", "c"]);
    }

    #[test]
    fn realignment_scorer_score() {
        let normalizer = TextNormalizer::new(&AlignConfig::default()).expect("patterns compile");
        let scorer = RealignmentScorer::new(normalizer);
        assert_eq!(scorer.score("cat", "cat"), 0.0);
        assert_eq!(scorer.score("cat", ""), 1.0);
    }

    #[test]
    fn streaming_synchronizer_synchronize() {
        let w0: Vec<String> = vec!["a ".into(), "b".into()];
        let w1: Vec<String> = vec!["a b".into()];
        let sources: Vec<&[String]> = vec![w0.as_slice(), w1.as_slice()];
        let sync = StreamingSynchronizer
            .synchronize(&sources)
            .expect("should synchronize");
        assert_eq!(sync, synchronize(&sources).expect("should synchronize"));
        assert_eq!(sync.group_count(), 1);
    }
}
