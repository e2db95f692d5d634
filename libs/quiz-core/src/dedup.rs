//! Order-preserving deduplication and answer transfer.

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::HashMap;

use crate::types::Question;

/// Owned index of kept questions keyed by their comparison key.
///
/// First insert wins; iteration order is insertion order, which makes the
/// dedup result stable for a fixed file list. The pipeline driver owns
/// the index, so independent runs cannot interfere.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: IndexMap<String, Question>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a question. Returns false when an equal question (same
    /// normalized key) was already kept and this one is dropped.
    pub fn insert(&mut self, question: Question) -> bool {
        match self.seen.entry(question.dedup_key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(question);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Surviving questions in order of first appearance.
    pub fn into_questions(self) -> Vec<Question> {
        self.seen.into_values().collect()
    }
}

/// Drop later occurrences of equal questions, keeping input order.
pub fn dedupe(questions: Vec<Question>) -> Vec<Question> {
    let mut index = DedupIndex::new();
    for question in questions {
        index.insert(question);
    }
    index.into_questions()
}

/// Questions whose key occurs more than once: the first occurrence of
/// each duplicated key, in order of first appearance.
pub fn duplicates(questions: &[Question]) -> Vec<Question> {
    let mut counts: IndexMap<String, (Question, usize)> = IndexMap::new();
    for question in questions {
        counts
            .entry(question.dedup_key())
            .and_modify(|(_, n)| *n += 1)
            .or_insert_with(|| (question.clone(), 1));
    }
    counts
        .into_values()
        .filter(|(_, n)| *n > 1)
        .map(|(q, _)| q)
        .collect()
}

/// Fill unanswered questions from an answered collection.
///
/// A target question without any correct choice is replaced by an
/// answered question with the same text and choice texts (correctness
/// ignored in the lookup); everything else passes through unchanged.
/// Returns the result and how many questions were resolved.
pub fn transfer_answers(
    answered: &[Question],
    targets: Vec<Question>,
) -> (Vec<Question>, usize) {
    let known: HashMap<String, &Question> = answered
        .iter()
        .filter(|q| q.has_answer())
        .map(|q| (q.answer_key(), q))
        .collect();

    let mut resolved = 0;
    let result = targets
        .into_iter()
        .map(|q| {
            if q.has_answer() {
                return q;
            }
            match known.get(&q.answer_key()) {
                Some(answer) => {
                    resolved += 1;
                    (*answer).clone()
                }
                None => q,
            }
        })
        .collect();
    (result, resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Choice;
    use pretty_assertions::assert_eq;

    fn q(text: &str, choices: &[(&str, bool)]) -> Question {
        Question::new(
            text,
            choices
                .iter()
                .map(|(t, c)| Choice::new(*t, *c))
                .collect(),
        )
    }

    #[test]
    fn dedupe_is_idempotent() {
        let qs = vec![
            q("a", &[("1", true)]),
            q("b", &[("2", false)]),
            q("a", &[("1", true)]),
        ];
        let once = dedupe(qs);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn distinct_questions_pass_unchanged() {
        let qs = vec![
            q("b", &[("1", true)]),
            q("a", &[("1", true)]),
            q("c", &[("2", false)]),
        ];
        assert_eq!(dedupe(qs.clone()), qs);
    }

    #[test]
    fn first_occurrence_wins_across_choice_order() {
        let first = q("2+2=?", &[("4", true), ("5", false)]);
        let reordered = q("2+2=?", &[("5", false), ("4", true)]);
        let survivors = dedupe(vec![first.clone(), reordered]);
        assert_eq!(survivors.len(), 1);
        // the kept question is file A's occurrence, original choice order
        assert_eq!(survivors[0], first);
    }

    #[test]
    fn same_choices_different_answer_are_distinct() {
        let a = q("q", &[("x", true), ("y", false)]);
        let b = q("q", &[("x", false), ("y", true)]);
        assert_eq!(dedupe(vec![a, b]).len(), 2);
    }

    #[test]
    fn empty_key_passes_through() {
        let blank = q("   ", &[("x", false)]);
        let survivors = dedupe(vec![blank.clone()]);
        assert_eq!(survivors, vec![blank]);
    }

    #[test]
    fn duplicates_lists_each_repeated_question_once() {
        let qs = vec![
            q("a", &[("1", true)]),
            q("b", &[("2", true)]),
            q("A", &[("1", true)]),
            q("a", &[("1", true)]),
        ];
        let dup = duplicates(&qs);
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].text, "a");
    }

    #[test]
    fn transfer_fills_unanswered_from_answered() {
        let answered = vec![q("2+2=?", &[("4", true), ("5", false)])];
        let targets = vec![
            q("2+2=?", &[("5", false), ("4", false)]),
            q("3+3=?", &[("6", false), ("7", false)]),
        ];
        let (result, resolved) = transfer_answers(&answered, targets);
        assert_eq!(resolved, 1);
        assert!(result[0].has_answer());
        assert!(!result[1].has_answer());
    }

    #[test]
    fn transfer_keeps_already_answered_targets() {
        let answered = vec![q("q", &[("a", true), ("b", false)])];
        let targets = vec![q("q", &[("b", true), ("a", false)])];
        let (result, resolved) = transfer_answers(&answered, targets);
        assert_eq!(resolved, 0);
        assert!(result[0].choices[0].is_correct);
        assert_eq!(result[0].choices[0].text, "b");
    }
}
