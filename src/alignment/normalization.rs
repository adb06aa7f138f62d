use regex::Regex;

use crate::config::AlignConfig;
use crate::error::CollationError;

/// Text cleanup shared by the collator and the divergence scorer.
///
/// Patterns are compiled once from the caller's filler and bracket choice.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    editorial: Regex,
    filler_runs: Regex,
    punctuation: Regex,
}

impl TextNormalizer {
    pub fn new(config: &AlignConfig) -> Result<Self, CollationError> {
        let open = regex::escape(&config.bracket_open.to_string());
        let close = regex::escape(&config.bracket_close.to_string());
        let filler = regex::escape(&config.filler.to_string());

        let editorial = Regex::new(&format!("{open}[^{close}]*{close}"))
            .map_err(|e| CollationError::pattern("compile editorial bracket pattern", e))?;
        let filler_runs = Regex::new(&format!("(?:{filler})+"))
            .map_err(|e| CollationError::pattern("compile filler pattern", e))?;
        let punctuation = Regex::new(r"[^\p{L}\s]+")
            .map_err(|e| CollationError::pattern("compile punctuation pattern", e))?;

        Ok(Self {
            editorial,
            filler_runs,
            punctuation,
        })
    }

    /// Drop editorial spans, case-fold and trim a witness or base text.
    pub fn normalize_witness(&self, text: &str) -> String {
        let stripped = self.editorial.replace_all(text, "");
        stripped.to_lowercase().trim().to_string()
    }

    pub fn strip_filler(&self, field: &str) -> String {
        self.filler_runs.replace_all(field, "").into_owned()
    }

    /// Field text reduced to letters and whitespace, case-folded.
    pub fn clean_for_scoring(&self, field: &str) -> String {
        let without_filler = self.filler_runs.replace_all(field, "");
        self.punctuation
            .replace_all(&without_filler, "")
            .to_lowercase()
    }
}
