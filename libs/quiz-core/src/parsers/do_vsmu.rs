//! do.vsmu.by Moodle quiz page parser.
//!
//! Same portal family as e-vsmu but a different theme: the prompt is the
//! `qtext` element of the block's `content` div and the answers live in
//! `<table class="answer">` rows, one `<label>` per row, without letter
//! enumeration. The correct-answer icon marker is identical.

use super::{has_correct_icon, reject_empty, FormatParser, ParseReport, QuestionBuilder};
use crate::error::{MarkupWarning, ParseError, Result, SkipReason, SkippedQuestion};
use crate::html;
use crate::normalize::collapse_ws;
use crate::types::Question;

pub struct DoVsmuParser;

impl FormatParser for DoVsmuParser {
    fn name(&self) -> &'static str {
        "do.vsmu"
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

fn parse_block(block: &str) -> (std::result::Result<Question, SkipReason>, String) {
    let text = html::class_section(block, "qtext")
        .map(|qtext| collapse_ws(&html::strip_tags(qtext)))
        .unwrap_or_default();
    let mut builder = QuestionBuilder::new(&text);

    if let Some(table) = html::class_section(block, "answer") {
        for row in html::tag_sections(table, "tr") {
            let Some(label) = html::tag_sections(row, "label").into_iter().next() else {
                continue;
            };
            let correct = has_correct_icon(row);
            builder.push_choice(&collapse_ws(&html::strip_tags(label)), correct);
        }
    }

    let preview = builder.text().to_string();
    (builder.build(), preview)
}
