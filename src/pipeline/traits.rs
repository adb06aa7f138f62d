use crate::alignment::synchronization::Synchronization;
use crate::config::ScoringScheme;
use crate::error::SyncFailure;
use crate::types::AlignedPair;

pub trait PairAligner: Send + Sync {
    fn align(&self, a: &[char], b: &[char], filler: char, scoring: ScoringScheme) -> AlignedPair;
}

pub trait FieldSegmenter: Send + Sync {
    fn segment(&self, pair: &AlignedPair, filler: char) -> (Vec<String>, Vec<String>);
}

pub trait DivergenceScorer: Send + Sync {
    /// Divergence of two raw aligned fields, in [0, 1].
    fn score(&self, field_a: &str, field_b: &str) -> f32;
}

pub trait WitnessSynchronizer: Send + Sync {
    fn synchronize(&self, sources: &[&[String]]) -> Result<Synchronization, SyncFailure>;
}
