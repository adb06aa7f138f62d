pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::report::{
    summarize, CollationReport, CollationSummary, Meta, Report, WitnessSummary,
    REPORT_SCHEMA_VERSION,
};
pub use alignment::synchronization::{synchronize, synchronize_alignments, Synchronization};
pub use config::{AlignConfig, ScoringScheme};
pub use error::{CollationError, SyncFailure};
pub use pipeline::builder::CollatorBuilder;
pub use pipeline::runtime::{align_pair, Collator};
pub use pipeline::traits::{DivergenceScorer, FieldSegmenter, PairAligner, WitnessSynchronizer};
pub use types::{
    AlignedPair, AlignmentResult, CollationGroup, CollationOutput, CollationRequest,
    WitnessReading, WitnessText,
};
