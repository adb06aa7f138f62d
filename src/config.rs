use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CollationError;

/// Scores used by the Needleman-Wunsch grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringScheme {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_score: i32,
}

impl ScoringScheme {
    /// `match=1, mismatch=-1, gap=-1`; divergence re-alignment always uses this.
    pub const UNIT: Self = Self {
        match_score: 1,
        mismatch_score: -1,
        gap_score: -1,
    };

    #[inline(always)]
    pub fn substitution(&self, a: char, b: char) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self::UNIT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_score: i32,
    /// Gap marker written into aligned sequences.
    pub filler: char,
    pub bracket_open: char,
    pub bracket_close: char,
    /// Ceiling on `|a| * |b|` for a single pairwise alignment.
    pub max_cells: usize,
}

impl AlignConfig {
    pub const DEFAULT_FILLER: char = '#';
    pub const DEFAULT_BRACKET_OPEN: char = '{';
    pub const DEFAULT_BRACKET_CLOSE: char = '}';
    pub const DEFAULT_MAX_CELLS: usize = 4_000_000;

    pub fn scoring(&self) -> ScoringScheme {
        ScoringScheme {
            match_score: self.match_score,
            mismatch_score: self.mismatch_score,
            gap_score: self.gap_score,
        }
    }

    pub fn load(path: &Path) -> Result<Self, CollationError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| CollationError::io("read collation config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| CollationError::json("parse collation config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CollationError> {
        if self.filler.is_whitespace() {
            return Err(CollationError::invalid_input(
                "filler character must not be whitespace",
            ));
        }
        if self.bracket_open == self.bracket_close {
            return Err(CollationError::invalid_input(format!(
                "editorial brackets must differ, got '{}' twice",
                self.bracket_open
            )));
        }
        if self.filler == self.bracket_open || self.filler == self.bracket_close {
            return Err(CollationError::invalid_input(format!(
                "filler '{}' collides with an editorial bracket",
                self.filler
            )));
        }
        if self.max_cells == 0 {
            return Err(CollationError::invalid_input("max_cells must be >= 1"));
        }
        // A grid within max_cells has a path shorter than max_cells, so every
        // cell stays within magnitude * max_cells.
        let magnitude = [self.match_score, self.mismatch_score, self.gap_score]
            .iter()
            .map(|s| u64::from(s.unsigned_abs()))
            .max()
            .unwrap_or(0);
        let worst = magnitude.checked_mul(self.max_cells as u64);
        if worst.map_or(true, |w| w > i32::MAX as u64) {
            return Err(CollationError::invalid_input(format!(
                "score magnitude {magnitude} over a grid of {} cells overflows i32",
                self.max_cells
            )));
        }
        Ok(())
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            match_score: ScoringScheme::UNIT.match_score,
            mismatch_score: ScoringScheme::UNIT.mismatch_score,
            gap_score: ScoringScheme::UNIT.gap_score,
            filler: Self::DEFAULT_FILLER,
            bracket_open: Self::DEFAULT_BRACKET_OPEN,
            bracket_close: Self::DEFAULT_BRACKET_CLOSE,
            max_cells: Self::DEFAULT_MAX_CELLS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_config_default() {
        let config = AlignConfig::default();
        assert_eq!(config.match_score, 1);
        assert_eq!(config.mismatch_score, -1);
        assert_eq!(config.gap_score, -1);
        assert_eq!(config.filler, '#');
        assert_eq!(config.bracket_open, '{');
        assert_eq!(config.bracket_close, '}');
        assert_eq!(config.max_cells, AlignConfig::DEFAULT_MAX_CELLS);
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring(), ScoringScheme::UNIT);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AlignConfig =
            serde_json::from_str(r#"{ "gap_score": -2, "filler": "_" }"#).expect("valid json");
        assert_eq!(config.gap_score, -2);
        assert_eq!(config.filler, '_');
        assert_eq!(config.match_score, 1);
        assert_eq!(config.bracket_open, '{');
    }

    #[test]
    fn validate_rejects_whitespace_filler() {
        let config = AlignConfig {
            filler: ' ',
            ..AlignConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_filler_bracket_collision() {
        let config = AlignConfig {
            filler: '{',
            ..AlignConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_identical_brackets() {
        let config = AlignConfig {
            bracket_open: '|',
            bracket_close: '|',
            ..AlignConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_scores_that_overflow_the_grid() {
        let config = AlignConfig {
            gap_score: -1_000_000_000,
            ..AlignConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CollationError::InvalidInput { .. })
        ));

        let at_limit = AlignConfig {
            match_score: 536,
            ..AlignConfig::default()
        };
        assert!(at_limit.validate().is_ok());
        let over_limit = AlignConfig {
            match_score: 537,
            ..AlignConfig::default()
        };
        assert!(over_limit.validate().is_err());

        let wide_grid = AlignConfig {
            max_cells: i32::MAX as usize,
            ..AlignConfig::default()
        };
        assert!(wide_grid.validate().is_ok());
    }

    #[test]
    fn load_rejects_overflowing_scores() {
        let path = std::env::temp_dir().join("collation_rs_config_overflow.json");
        std::fs::write(&path, r#"{ "gap_score": -1000000000 }"#).expect("write config");
        let result = AlignConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(CollationError::InvalidInput { .. })));
    }

    #[test]
    fn load_reads_and_validates_json() {
        let path = std::env::temp_dir().join("collation_rs_config_load.json");
        std::fs::write(&path, r#"{ "bracket_open": "[", "bracket_close": "]" }"#)
            .expect("write config");
        let config = AlignConfig::load(&path).expect("load should succeed");
        assert_eq!(config.bracket_open, '[');
        assert_eq!(config.bracket_close, ']');
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let result = AlignConfig::load(Path::new("/nonexistent/collation.json"));
        assert!(matches!(result, Err(CollationError::Io { .. })));
    }

    #[test]
    fn substitution_uses_match_and_mismatch() {
        let scheme = ScoringScheme {
            match_score: 2,
            mismatch_score: -3,
            gap_score: -1,
        };
        assert_eq!(scheme.substitution('a', 'a'), 2);
        assert_eq!(scheme.substitution('a', 'b'), -3);
    }
}
