//! Format parsers and the file-suffix registry.

pub mod do_vsmu;
pub mod evsmu;
pub mod mytestx;

use std::path::Path;

use crate::error::{MarkupWarning, ParseError, Result, SkipReason, SkippedQuestion};
use crate::html;
use crate::types::{Choice, Question};

/// Outcome of parsing one input file.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub questions: Vec<Question>,
    /// Question records dropped from an otherwise-valid file.
    pub skipped: Vec<SkippedQuestion>,
    /// Detected markup damage that did not drop a record.
    pub warnings: Vec<MarkupWarning>,
}

/// Common capability implemented by every source format.
///
/// Parsing is pure and restartable; per-question damage lands in the
/// report, and only a document with no recognizable question structure at
/// all is an error.
pub trait FormatParser {
    /// Format identifier used in diagnostics.
    fn name(&self) -> &'static str;

    fn parse(&self, content: &str) -> Result<ParseReport>;
}

/// Closed set of supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// e-vsmu.by Moodle quiz page export.
    Evsmu,
    /// do.vsmu.by Moodle quiz page export.
    DoVsmu,
    /// MyTestX plain-text quiz file.
    MyTestX,
}

impl Format {
    /// Recognize a format from the file name. The portals' download
    /// convention is a double suffix (`page.evsmu.htm`, `page.do.htm`);
    /// any other `.txt` file is treated as MyTestX.
    pub fn from_path(path: &Path) -> Option<Format> {
        let name = path.file_name()?.to_str()?.to_lowercase();
        if name.ends_with(".evsmu.htm") || name.ends_with(".evsmu.html") {
            Some(Self::Evsmu)
        } else if name.ends_with(".do.htm") || name.ends_with(".do.html") {
            Some(Self::DoVsmu)
        } else if name.ends_with(".txt") {
            Some(Self::MyTestX)
        } else {
            None
        }
    }

    /// Parser implementation for this format.
    pub fn parser(&self) -> Box<dyn FormatParser> {
        match self {
            Self::Evsmu => Box::new(evsmu::EvsmuParser),
            Self::DoVsmu => Box::new(do_vsmu::DoVsmuParser),
            Self::MyTestX => Box::new(mytestx::MyTestXParser),
        }
    }
}

/// `alt` text Moodle puts on the "correct answer" icon in both portals.
pub(crate) const CORRECT_ICON_ALT: &str = "Верно";

/// True when the markup region carries the portal's correct-answer icon.
pub(crate) fn has_correct_icon(region: &str) -> bool {
    let mut pos = 0;
    while let Some(rel) = region[pos..].find("<img") {
        let at = pos + rel;
        pos = at + 4;
        if let Some(tag) = region[at..].find('>').map(|end| &region[at..at + end + 1]) {
            if html::attr(tag, "class") == Some("icon")
                && html::attr(tag, "alt") == Some(CORRECT_ICON_ALT)
            {
                return true;
            }
        }
    }
    false
}

/// Accumulates one question record, enforcing the model invariants on
/// build: non-empty question text, at least one choice, no empty choice.
/// A choice that cleans down to nothing poisons the whole record.
pub(crate) struct QuestionBuilder {
    text: String,
    choices: Vec<Choice>,
    saw_empty_choice: bool,
}

/// Punctuation trimmed from choice ends; portals decorate the same answer
/// with varying trailing separators.
const CHOICE_EDGE: &[char] = &[';', ',', '.', ' '];

impl QuestionBuilder {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            choices: Vec::new(),
            saw_empty_choice: false,
        }
    }

    pub fn push_choice(&mut self, text: &str, is_correct: bool) {
        let cleaned = text.trim().trim_matches(CHOICE_EDGE).to_string();
        if cleaned.is_empty() {
            self.saw_empty_choice = true;
            return;
        }
        if let Some(existing) = self.choices.iter_mut().find(|c| c.text == cleaned) {
            // repeated variant: never downgrade an earlier correct mark
            existing.is_correct = existing.is_correct || is_correct;
            return;
        }
        self.choices.push(Choice::new(cleaned, is_correct));
    }

    /// Question text recovered so far, for diagnostics.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn build(self) -> std::result::Result<Question, SkipReason> {
        if self.saw_empty_choice {
            return Err(SkipReason::EmptyChoice);
        }
        if self.text.is_empty() {
            return Err(SkipReason::EmptyQuestion);
        }
        if self.choices.is_empty() {
            return Err(SkipReason::NoChoices);
        }
        Ok(Question::new(self.text, self.choices))
    }
}

impl ParseReport {
    pub(crate) fn record(
        &mut self,
        location: usize,
        built: std::result::Result<Question, SkipReason>,
        preview: &str,
    ) {
        match built {
            Ok(question) => self.questions.push(question),
            Err(reason) => self
                .skipped
                .push(SkippedQuestion::new(location, preview, reason)),
        }
    }
}

/// Guard shared by all parsers: whitespace-only input is structural.
pub(crate) fn reject_empty(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        Err(ParseError::EmptyInput)
    } else {
        Ok(())
    }
}
