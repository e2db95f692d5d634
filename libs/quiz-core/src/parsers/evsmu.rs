//! e-vsmu.by Moodle quiz page parser.
//!
//! Question blocks are `que multichoice` divs; the prompt sits in the
//! theme's `qtext22` element and each answer in a `<label>` of the answer
//! table, prefixed with its letter ("а. …"). The correct-answer icon
//! (`alt="Верно"`) marks correctness; pages saved outside review mode
//! carry no icons and yield all-unknown choices.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{has_correct_icon, reject_empty, FormatParser, ParseReport, QuestionBuilder};
use crate::error::{MarkupWarning, ParseError, Result, SkipReason, SkippedQuestion};
use crate::html;
use crate::normalize::collapse_ws;

/// Leading "а." / "b." answer enumeration added by the portal theme.
static ENUMERATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-zа-яё]\.\s*").expect("enumeration pattern"));

pub struct EvsmuParser;

impl FormatParser for EvsmuParser {
    fn name(&self) -> &'static str {
        "evsmu"
    }

    fn parse(&self, content: &str) -> Result<ParseReport> {
        reject_empty(content)?;

        let blocks = html::class_blocks(content, "que multichoice");
        let unsupported = html::class_blocks(content, "que match").len()
            + html::class_blocks(content, "que multianswer").len();
        if blocks.is_empty() && unsupported == 0 {
            return Err(ParseError::NoQuestions { format: self.name() });
        }

        let mut report = ParseReport::default();
        for block in &blocks {
            if !block.balanced {
                report.warnings.push(MarkupWarning {
                    location: block.index,
                    detail: "unbalanced tag nesting in question block".to_string(),
                });
            }
            let (built, preview) = parse_block(block.html);
            report.record(block.index, built, &preview);
        }
        for n in 0..unsupported {
            report.skipped.push(SkippedQuestion::new(
                blocks.len() + n + 1,
                "",
                SkipReason::UnsupportedType,
            ));
        }
        Ok(report)
    }
}

fn parse_block(block: &str) -> (std::result::Result<crate::types::Question, SkipReason>, String) {
    let text = html::class_section(block, "qtext22")
        .map(|qtext| collapse_ws(&html::strip_tags(qtext)))
        .unwrap_or_default();
    let mut builder = QuestionBuilder::new(&text);

    if let Some(ablock) = html::class_section(block, "ablock") {
        for label in html::tag_sections(ablock, "label") {
            let correct = has_correct_icon(label);
            let choice = collapse_ws(&html::strip_tags(label));
            let choice = ENUMERATION.replace(&choice, "");
            builder.push_choice(&choice, correct);
        }
    }

    let preview = builder.text().to_string();
    (builder.build(), preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(questions: &[(&str, &[(&str, bool)])]) -> String {
        let mut doc = String::from("<html><body><div id=\"content\">");
        for (text, choices) in questions {
            doc.push_str("<div class=\"que multichoice clearfix\"><div class=\"content\">");
            doc.push_str(&format!("<div class=\"qtext22\">{}</div>", text));
            doc.push_str("<div class=\"ablock clearfix\"><table><tr>");
            for (i, (choice, correct)) in choices.iter().enumerate() {
                let icon = if *correct {
                    "<img class=\"icon\" alt=\"Верно\" src=\"tick.gif\">"
                } else {
                    ""
                };
                doc.push_str(&format!(
                    "<td><label><div>{}. {}{}</div></label></td>",
                    (b'a' + i as u8) as char,
                    choice,
                    icon
                ));
            }
            doc.push_str("</tr></table></div></div></div>");
        }
        doc.push_str("</div></body></html>");
        doc
    }

    #[test]
    fn parses_marked_answers() {
        let doc = page(&[(
            "What is 2+2?",
            &[("four", true), ("five", false), ("six", false)],
        )]);
        let report = EvsmuParser.parse(&doc).unwrap();
        assert_eq!(report.questions.len(), 1);
        let q = &report.questions[0];
        assert_eq!(q.text, "What is 2+2?");
        let texts: Vec<&str> = q.choices.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["four", "five", "six"]);
        assert!(q.choices[0].is_correct);
        assert!(!q.choices[1].is_correct);
    }

    #[test]
    fn page_without_icons_yields_all_unknown() {
        let doc = page(&[("Unanswered?", &[("a", false), ("b", false)])]);
        let report = EvsmuParser.parse(&doc).unwrap();
        assert!(report.questions[0].choices.iter().all(|c| !c.is_correct));
    }

    #[test]
    fn cyrillic_enumeration_is_stripped() {
        let doc = "<div class=\"que multichoice clearfix\">\
                   <div class=\"qtext22\">Вопрос</div>\
                   <div class=\"ablock clearfix\"><label><div>а. Ответ</div></label></div>\
                   </div>";
        let report = EvsmuParser.parse(doc).unwrap();
        assert_eq!(report.questions[0].choices[0].text, "Ответ");
    }

    #[test]
    fn block_without_choices_is_skipped() {
        let mut doc = page(&[("Good?", &[("yes", true)])]);
        doc.push_str(
            "<div class=\"que multichoice clearfix\">\
             <div class=\"qtext22\">Bad</div></div>",
        );
        let report = EvsmuParser.parse(&doc).unwrap();
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::NoChoices);
    }

    #[test]
    fn no_blocks_is_structural() {
        let err = EvsmuParser.parse("<html><body>nothing</body></html>");
        assert!(matches!(err, Err(ParseError::NoQuestions { .. })));
    }

    #[test]
    fn match_questions_reported_unsupported() {
        let mut doc = page(&[("Good?", &[("yes", true)])]);
        doc.push_str("<div class=\"que match clearfix\"><div class=\"qtext22\">m</div></div>");
        let report = EvsmuParser.parse(&doc).unwrap();
        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::UnsupportedType);
    }
}
