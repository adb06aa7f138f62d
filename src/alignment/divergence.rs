use crate::alignment::needleman_wunsch::needleman_wunsch_score;
use crate::alignment::normalization::TextNormalizer;
use crate::config::ScoringScheme;

/// Divergence of two cleaned strings in [0, 1].
///
/// The pair is re-aligned with unit scores; `rescore <= 0` is fully
/// divergent, `rescore >= max_len` identical, linear in between. Two empty
/// strings are identical.
pub fn divergence(clean_a: &[char], clean_b: &[char]) -> f32 {
    let base = clean_a.len().max(clean_b.len());
    if base == 0 {
        return 0.0;
    }
    let rescore = needleman_wunsch_score(clean_a, clean_b, ScoringScheme::UNIT);
    match rescore {
        s if s <= 0 => 1.0,
        s if s as usize >= base => 0.0,
        s => 1.0 - s as f32 / base as f32,
    }
}

/// Divergence of two raw aligned fields (filler, punctuation and case ignored).
pub fn field_divergence(normalizer: &TextNormalizer, field_a: &str, field_b: &str) -> f32 {
    let clean_a: Vec<char> = normalizer.clean_for_scoring(field_a).chars().collect();
    let clean_b: Vec<char> = normalizer.clean_for_scoring(field_b).chars().collect();
    divergence(&clean_a, &clean_b)
}
