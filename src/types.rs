use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AlignConfig;

/// One plain-text transcription handed in by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessText {
    pub id: String,
    pub text: String,
}

impl WitnessText {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollationRequest {
    pub base: WitnessText,
    pub witnesses: Vec<WitnessText>,
    #[serde(default)]
    pub config: Option<AlignConfig>,
}

/// Two filler-padded sequences of equal length plus the grid score.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignedPair {
    pub a: Vec<char>,
    pub b: Vec<char>,
    pub score: i32,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Field-level view of one base/witness alignment.
///
/// `source`, `target` and `score` are parallel and always share a length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentResult {
    /// `"{base_id}+{witness_id}"`.
    pub name: String,
    pub source: Vec<String>,
    pub target: Vec<String>,
    /// Divergence per field in [0, 1].
    pub score: Vec<f32>,
}

impl AlignmentResult {
    pub fn field_count(&self) -> usize {
        self.source.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WitnessReading {
    pub witness_id: String,
    /// Siglum derived from a CTS URN, or the full id.
    pub label: String,
    /// Field indices into this witness's `AlignmentResult`.
    pub fields: Vec<usize>,
    pub text: String,
    /// Mean of the constituent field scores.
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollationGroup {
    pub index: usize,
    pub base_text: String,
    pub readings: Vec<WitnessReading>,
    /// Normalized reading -> witness ids sharing it, ids in witness order.
    pub variants: BTreeMap<String, Vec<String>>,
    /// Mean divergence over all witnesses; highlight intensity of the base unit.
    pub mean_score: f32,
}

impl CollationGroup {
    /// Critical apparatus entry: only the readings that diverge from the base.
    ///
    /// A reading with a non-zero score whose normalized text equals the base
    /// reading is left out; such scores come from separator whitespace kept
    /// on one side of a gap only.
    pub fn apparatus(&self) -> BTreeMap<String, Vec<String>> {
        use crate::alignment::apparatus::reading_key;

        let base_key = reading_key(&self.base_text);
        let mut entries: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for reading in self.readings.iter().filter(|r| r.score > 0.0) {
            let key = reading_key(&reading.text);
            if key == base_key {
                continue;
            }
            entries
                .entry(key)
                .or_default()
                .push(reading.witness_id.clone());
        }
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollationOutput {
    pub base_id: String,
    pub witness_ids: Vec<String>,
    pub groups: Vec<CollationGroup>,
    pub alignments: Vec<AlignmentResult>,
}

impl CollationOutput {
    /// Concatenated base text of all groups, in order.
    pub fn base_text(&self) -> String {
        self.groups.iter().map(|g| g.base_text.as_str()).collect()
    }
}
