use thiserror::Error;

/// Outcome of a synchronization that could not produce a shared grouping.
///
/// This is data, not a crash: callers decide whether to fall back to
/// unsynchronized per-witness display or to surface it to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncFailure {
    #[error(
        "no common synchronization possible: witness {witness} reconstructs a different base text \
         (first difference at codepoint {offset}, {expected_len} vs {actual_len} codepoints)"
    )]
    InconsistentBaseText {
        witness: usize,
        offset: usize,
        expected_len: usize,
        actual_len: usize,
    },
    #[error(
        "synchronization exhausted: witness {witness} could not re-synchronize at field {field} \
         (base offset {offset})"
    )]
    SynchronizationExhausted {
        witness: usize,
        field: usize,
        offset: usize,
    },
}

#[derive(Debug, Error)]
pub enum CollationError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid pattern while {context}: {source}")]
    Pattern {
        context: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("alignment grid of {cells} cells exceeds the configured ceiling of {max_cells}")]
    InputTooLarge { cells: usize, max_cells: usize },
    #[error(transparent)]
    Sync(#[from] SyncFailure),
}

impl CollationError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn pattern(context: &'static str, source: regex::Error) -> Self {
        Self::Pattern { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
