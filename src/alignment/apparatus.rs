use std::collections::BTreeMap;

use crate::alignment::synchronization::Synchronization;
use crate::types::{AlignmentResult, CollationGroup, WitnessReading, WitnessText};

/// Key under which identical readings cluster: case-folded, whitespace
/// collapsed and trimmed.
pub fn reading_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Manuscript siglum from a CTS URN (`urn:cts:ns:group.work.version:passage`
/// gives `version`); anything else is returned unchanged.
pub fn short_label(id: &str) -> String {
    let mut parts = id.split(':');
    if !matches!((parts.next(), parts.next()), (Some("urn"), Some("cts"))) {
        return id.to_string();
    }
    parts
        .nth(1)
        .and_then(|work| work.split('.').nth(2))
        .filter(|version| !version.is_empty())
        .map_or_else(|| id.to_string(), str::to_string)
}

/// Fold synchronized field groups into displayable collation groups.
///
/// `witnesses`, `alignments` and the synchronization share witness order.
pub fn assemble(
    witnesses: &[WitnessText],
    alignments: &[AlignmentResult],
    sync: &Synchronization,
) -> Vec<CollationGroup> {
    debug_assert_eq!(witnesses.len(), alignments.len());
    let Some(reference) = alignments.first() else {
        return Vec::new();
    };

    (0..sync.group_count())
        .map(|group| {
            let base_text: String = sync
                .indices(0, group)
                .iter()
                .map(|&i| reference.source[i].as_str())
                .collect();

            let readings: Vec<WitnessReading> = witnesses
                .iter()
                .zip(alignments)
                .enumerate()
                .map(|(k, (witness, alignment))| {
                    let fields = sync.indices(k, group).to_vec();
                    let text: String = fields
                        .iter()
                        .map(|&i| alignment.target[i].as_str())
                        .collect();
                    let score = mean(fields.iter().map(|&i| alignment.score[i]));
                    WitnessReading {
                        witness_id: witness.id.clone(),
                        label: short_label(&witness.id),
                        fields,
                        text,
                        score,
                    }
                })
                .collect();

            let mut variants: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for reading in &readings {
                variants
                    .entry(reading_key(&reading.text))
                    .or_default()
                    .push(reading.witness_id.clone());
            }
            let mean_score = mean(readings.iter().map(|r| r.score));

            CollationGroup {
                index: group,
                base_text,
                readings,
                variants,
                mean_score,
            }
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0f32, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}
