//! Domain error types for clawctl.
//!
//! Typed errors at module boundaries; the CLI layer aggregates them through
//! `anyhow` with file and path context.

use thiserror::Error;

/// Errors from parsing dotted path text (`models.providers.openai.apiKey`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,

    #[error("empty segment at position {position}")]
    EmptySegment { position: usize },
}

/// Errors from applying a patch to a document.
///
/// Traversal failures carry the dotted prefix walked before the mismatch so
/// output can point at the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("`{at}` is not a mapping")]
    NotAMapping { at: String },

    #[error("`{at}` is not a sequence")]
    NotASequence { at: String },

    #[error("index {index} is out of range at `{at}` (length {len})")]
    IndexOutOfRange { at: String, index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parse_error_display() {
        let e = PathParseError::EmptySegment { position: 2 };
        assert_eq!(e.to_string(), "empty segment at position 2");
    }

    #[test]
    fn test_patch_error_display() {
        let e = PatchError::IndexOutOfRange {
            at: "agents.list".to_string(),
            index: 3,
            len: 1,
        };
        assert!(e.to_string().contains("index 3"));
        assert!(e.to_string().contains("agents.list"));
    }
}
