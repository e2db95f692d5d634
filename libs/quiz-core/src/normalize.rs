//! Text canonicalization for comparison keys.
//!
//! Display text is never altered here; these functions produce values used
//! only to decide whether two questions are the same.

use crate::html;
use crate::types::Question;

/// Punctuation that varies freely between portal exports of the same
/// question; stripped from both ends before comparison.
const EDGE_CHARS: &[char] = &['\n', '\t', ' ', ':', ';', '.', '?'];

/// Separates fields within one key component.
const FIELD_SEP: char = '\u{1f}';

/// Separates key components (question text, choice pairs).
const PAIR_SEP: char = '\u{1e}';

/// Collapse whitespace runs (including newlines) to single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical form of a display string for comparison: markup stripped,
/// entities unescaped, whitespace collapsed, lowercased, edge punctuation
/// removed.
pub fn normalize_for_compare(display: &str) -> String {
    let stripped = html::strip_tags(display);
    collapse_ws(&stripped)
        .to_lowercase()
        .trim_matches(EDGE_CHARS)
        .to_string()
}

/// Comparison key over question text and the choice set.
///
/// Choice pairs are sorted and deduplicated, so the key is independent of
/// the order choices appeared in the source. Correctness is part of each
/// pair: the same choices with a different answer marked are different
/// questions.
pub fn dedup_key(question: &Question) -> String {
    build_key(question, true)
}

/// Comparison key with correctness flags ignored: same question, same
/// choice texts, any answer marking.
pub fn answer_key(question: &Question) -> String {
    build_key(question, false)
}

fn build_key(question: &Question, with_flags: bool) -> String {
    let mut pairs: Vec<String> = question
        .choices
        .iter()
        .map(|c| {
            let text = normalize_for_compare(&c.text);
            if with_flags {
                format!("{}{}{}", text, FIELD_SEP, c.is_correct)
            } else {
                text
            }
        })
        .collect();
    pairs.sort();
    pairs.dedup();

    let mut key = normalize_for_compare(&question.text);
    for pair in pairs {
        key.push(PAIR_SEP);
        key.push_str(&pair);
    }
    key
}
