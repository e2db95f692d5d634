//! MyTestX plain-text quiz parser.
//!
//! # Format
//! ```text
//! // Comment
//! # Question in one line
//! + Correct choice
//! - Incorrect choice
//! Unmarked line is an incorrect choice too
//!
//! # Next question
//! ```
//!
//! A blank line terminates the current question block. `@` lines
//! (legacy image references) are recognized and discarded: media is not
//! part of the model. This format is also the exporter's round-trip
//! target.

use super::{reject_empty, FormatParser, ParseReport, QuestionBuilder};
use crate::error::{ParseError, Result};

pub struct MyTestXParser;

impl FormatParser for MyTestXParser {
    fn name(&self) -> &'static str {
        "mytestx"
    }

    fn parse(&self, content: &str) -> Result<ParseReport> {
        reject_empty(content)?;
        if !content.lines().any(|l| l.trim_start().starts_with('#')) {
            return Err(ParseError::NoQuestions { format: self.name() });
        }

        let mut report = ParseReport::default();
        let mut current: Option<(usize, QuestionBuilder)> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line_num = idx + 1;
            let line = raw.replace('\t', " ");
            let line = line.trim();

            match classify(line) {
                LineKind::Comment | LineKind::Image => {}
                LineKind::Blank => flush(&mut current, &mut report),
                LineKind::Question(text) => {
                    flush(&mut current, &mut report);
                    current = Some((line_num, QuestionBuilder::new(text)));
                }
                LineKind::Correct(text) => {
                    if let Some((_, builder)) = current.as_mut() {
                        builder.push_choice(text, true);
                    }
                }
                LineKind::Incorrect(text) => {
                    if let Some((_, builder)) = current.as_mut() {
                        builder.push_choice(text, false);
                    }
                }
            }
        }
        flush(&mut current, &mut report);
        Ok(report)
    }
}

enum LineKind<'a> {
    Question(&'a str),
    Correct(&'a str),
    Incorrect(&'a str),
    Image,
    Comment,
    Blank,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        LineKind::Blank
    } else if line.starts_with("//") {
        LineKind::Comment
    } else if let Some(rest) = line.strip_prefix('#') {
        LineKind::Question(rest.trim())
    } else if let Some(rest) = line.strip_prefix('+') {
        LineKind::Correct(rest.trim())
    } else if let Some(rest) = line.strip_prefix('-') {
        LineKind::Incorrect(rest.trim())
    } else if line.starts_with('@') {
        LineKind::Image
    } else {
        // unmarked text is a choice nobody vouched for
        LineKind::Incorrect(line)
    }
}

fn flush(current: &mut Option<(usize, QuestionBuilder)>, report: &mut ParseReport) {
    if let Some((line, builder)) = current.take() {
        let preview = builder.text().to_string();
        report.record(line, builder.build(), &preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkipReason;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_blocks_and_markers() {
        let input = "\
# First question
+ Right
- Wrong

// comment between blocks
# Second question
- No
+ Yes
Also wrong
";
        let report = MyTestXParser.parse(input).unwrap();
        assert_eq!(report.questions.len(), 2);

        let first = &report.questions[0];
        assert_eq!(first.text, "First question");
        assert_eq!(first.choices.len(), 2);
        assert!(first.choices[0].is_correct);
        assert!(!first.choices[1].is_correct);

        let second = &report.questions[1];
        let flags: Vec<bool> = second.choices.iter().map(|c| c.is_correct).collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(second.choices[2].text, "Also wrong");
    }

    #[test]
    fn image_lines_are_discarded() {
        let input = "# Q\n@ skull.jpg\n+ a\n- b\n";
        let report = MyTestXParser.parse(input).unwrap();
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions[0].choices.len(), 2);
    }

    #[test]
    fn blank_line_terminates_block() {
        // choices after the terminating blank line belong to nothing
        let input = "# Q\n\n+ stray\n# R\n- ok\n";
        let report = MyTestXParser.parse(input).unwrap();
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions[0].text, "R");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::NoChoices);
    }

    #[test]
    fn zero_choice_block_is_skipped_and_file_continues() {
        let input = "# Empty one\n\n# Full one\n+ a\n";
        let report = MyTestXParser.parse(input).unwrap();
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions[0].text, "Full one");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].location, 1);
    }

    #[test]
    fn empty_choice_text_rejects_question_but_not_siblings() {
        let input = "# Bad\n+ ;.\n\n# Good\n+ fine\n";
        let report = MyTestXParser.parse(input).unwrap();
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.questions[0].text, "Good");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::EmptyChoice);
    }

    #[test]
    fn no_question_marker_is_structural() {
        assert!(matches!(
            MyTestXParser.parse("just\nsome\ntext\n"),
            Err(ParseError::NoQuestions { .. })
        ));
    }

    #[test]
    fn whitespace_only_input_is_structural() {
        assert!(matches!(
            MyTestXParser.parse("  \n \n"),
            Err(ParseError::EmptyInput)
        ));
    }

    #[test]
    fn tabs_are_treated_as_spaces() {
        let input = "#\tQuestion\n+\tChoice\n";
        let report = MyTestXParser.parse(input).unwrap();
        assert_eq!(report.questions[0].text, "Question");
        assert_eq!(report.questions[0].choices[0].text, "Choice");
    }
}
