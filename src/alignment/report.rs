use serde::Serialize;

use crate::alignment::apparatus::short_label;
use crate::config::AlignConfig;
use crate::types::CollationOutput;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub collations: Vec<CollationReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub generated_at: String,
    pub config: AlignConfig,
    pub request_count: usize,
    pub failed_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollationReport {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CollationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<CollationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollationSummary {
    pub group_count: usize,
    /// Groups where at least one witness diverges from the base.
    pub divergent_group_count: usize,
    pub witnesses: Vec<WitnessSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WitnessSummary {
    pub witness_id: String,
    pub label: String,
    pub field_count: usize,
    pub mean_score: f32,
    pub divergent_groups: usize,
}

pub fn summarize(output: &CollationOutput) -> CollationSummary {
    let group_count = output.groups.len();
    let divergent_group_count = output
        .groups
        .iter()
        .filter(|g| g.readings.iter().any(|r| r.score > 0.0))
        .count();

    let witnesses = output
        .witness_ids
        .iter()
        .enumerate()
        .map(|(k, witness_id)| {
            let scores: Vec<f32> = output
                .groups
                .iter()
                .filter_map(|g| g.readings.get(k).map(|r| r.score))
                .collect();
            let mean_score = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f32>() / scores.len() as f32
            };
            WitnessSummary {
                witness_id: witness_id.clone(),
                label: short_label(witness_id),
                field_count: output.alignments.get(k).map_or(0, |a| a.field_count()),
                mean_score,
                divergent_groups: scores.iter().filter(|&&s| s > 0.0).count(),
            }
        })
        .collect();

    CollationSummary {
        group_count,
        divergent_group_count,
        witnesses,
    }
}

impl CollationReport {
    pub fn success(id: impl Into<String>, output: CollationOutput) -> Self {
        Self {
            id: id.into(),
            summary: Some(summarize(&output)),
            collation: Some(output),
            error: None,
        }
    }

    pub fn failure(id: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self {
            id: id.into(),
            summary: None,
            collation: None,
            error: Some(err.to_string()),
        }
    }
}
