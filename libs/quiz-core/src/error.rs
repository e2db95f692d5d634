//! Error and diagnostic types for quiz parsing.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// File-level failures: the whole input cannot be treated as the format.
///
/// Anything less severe is a per-question skip recorded in the parse
/// report, not an error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty input")]
    EmptyInput,

    #[error("no {format} question blocks recognized")]
    NoQuestions { format: &'static str },
}

/// Why a single question record was dropped from an otherwise-valid file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("question text is empty after cleanup")]
    EmptyQuestion,

    #[error("question has no recognizable choices")]
    NoChoices,

    #[error("a choice is empty after cleanup")]
    EmptyChoice,

    /// Question kinds the converter does not model (matching,
    /// drop-down multianswer).
    #[error("unsupported question type")]
    UnsupportedType,
}

/// A dropped question record, with enough context for a diagnostic.
#[derive(Debug, Clone)]
pub struct SkippedQuestion {
    /// Block ordinal (markup formats) or line number (text formats).
    pub location: usize,
    /// Question text as far as it was recovered; may be empty.
    pub preview: String,
    pub reason: SkipReason,
}

impl SkippedQuestion {
    pub fn new(location: usize, text: &str, reason: SkipReason) -> Self {
        Self {
            location,
            preview: preview(text),
            reason,
        }
    }
}

/// Structurally detectable markup damage that did not drop a record.
///
/// Emitted when a question block's tag nesting never closes (typically an
/// unescaped bracket in the source text). The block's output may be
/// truncated or mis-split; the damage is reported rather than repaired.
#[derive(Debug, Clone)]
pub struct MarkupWarning {
    /// Block ordinal within the file.
    pub location: usize,
    pub detail: String,
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 60;
    if text.chars().count() > LIMIT {
        let mut s: String = text.chars().take(LIMIT).collect();
        s.push('…');
        s
    } else {
        text.to_string()
    }
}
