//! Core library for converting multiple-choice quiz exports.
//!
//! Provides:
//! - per-format parsers behind the [`FormatParser`] capability
//!   (two Moodle portal HTML layouts and MyTestX plain text)
//! - comparison-key normalization that makes the same question from
//!   different sources compare equal
//! - order-preserving deduplication across source files
//! - MyTestX / Anki / crib exporters

pub mod dedup;
pub mod error;
pub mod export;
pub mod html;
pub mod normalize;
pub mod parsers;
pub mod types;

pub use dedup::{dedupe, duplicates, transfer_answers, DedupIndex};
pub use error::{MarkupWarning, ParseError, Result, SkipReason, SkippedQuestion};
pub use export::{to_anki, to_crib, to_mytestx};
pub use normalize::normalize_for_compare;
pub use parsers::{Format, FormatParser, ParseReport};
pub use types::{Choice, Question, CORRECTNESS_UNKNOWN};
