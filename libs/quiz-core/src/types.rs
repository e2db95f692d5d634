//! Core types for the quiz conversion pipeline.

use serde::{Deserialize, Serialize};

use crate::normalize;

/// Correctness assigned to a choice when the source provides no marker.
///
/// Portal exports frequently omit the answer key. Absence means "unknown",
/// which the model records as not-correct rather than failing the parse.
pub const CORRECTNESS_UNKNOWN: bool = false;

/// One answer option: display text plus correctness flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub is_correct: bool,
}

impl Choice {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    /// Choice whose correctness the source did not specify.
    pub fn unknown(text: impl Into<String>) -> Self {
        Self::new(text, CORRECTNESS_UNKNOWN)
    }
}

/// One multiple-choice item: prompt text plus an ordered list of choices.
///
/// Created by a format parser and never mutated afterwards; the pipeline
/// owns the collection exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn new(text: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }

    /// Choices marked correct, in source order. May be empty: a question
    /// without an answer key is still valid and exportable.
    pub fn correct_choices(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter().filter(|c| c.is_correct)
    }

    /// True when any choice is marked correct.
    pub fn has_answer(&self) -> bool {
        self.choices.iter().any(|c| c.is_correct)
    }

    /// Comparison key: normalized question text plus the order-independent
    /// set of (normalized choice text, correctness) pairs. Two questions
    /// with equal keys are duplicates regardless of choice order,
    /// whitespace or letter case.
    pub fn dedup_key(&self) -> String {
        normalize::dedup_key(self)
    }

    /// Like [`Question::dedup_key`], but ignoring correctness flags. Used
    /// to find the answered counterpart of an unanswered question.
    pub fn answer_key(&self) -> String {
        normalize::answer_key(self)
    }
}
