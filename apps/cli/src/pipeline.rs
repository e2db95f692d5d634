//! Pipeline driver: load inputs, dispatch parsers, deduplicate, export.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use quiz_core::{
    duplicates, to_anki, to_crib, to_mytestx, transfer_answers, DedupIndex, Format, Question,
};

use crate::args::{Args, ExportFormat};
use crate::encoding::{self, Newline, TextEncoding};

/// Counters reported at the end of a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub parsed: usize,
    pub unique: usize,
    pub skipped_questions: usize,
    pub failed_files: usize,
    pub unsupported_files: usize,
}

impl RunSummary {
    /// Exit status contract: only structural file failures are fatal to
    /// the status; per-question skips and unsupported files are not.
    pub fn exit_code(&self) -> u8 {
        if self.failed_files > 0 {
            1
        } else {
            0
        }
    }
}

/// Parse every file in argument order, concatenating the questions.
/// Per-file problems are logged and counted, never propagated.
pub fn load_files(
    paths: &[PathBuf],
    input_encoding: TextEncoding,
    summary: &mut RunSummary,
) -> Vec<Question> {
    let mut questions = Vec::new();
    for path in paths {
        let Some(format) = Format::from_path(path) else {
            warn!(path = %path.display(), "no parser for this file name, skipping");
            summary.unsupported_files += 1;
            continue;
        };
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(path = %path.display(), %err, "cannot read file");
                summary.failed_files += 1;
                continue;
            }
        };
        let content = encoding::decode(&bytes, input_encoding);
        let parser = format.parser();
        match parser.parse(&content) {
            Ok(report) => {
                for skip in &report.skipped {
                    warn!(
                        path = %path.display(),
                        location = skip.location,
                        preview = %skip.preview,
                        "question skipped: {}",
                        skip.reason
                    );
                }
                for warning in &report.warnings {
                    warn!(path = %path.display(), block = warning.location, "{}", warning.detail);
                }
                debug!(
                    path = %path.display(),
                    parser = parser.name(),
                    count = report.questions.len(),
                    "parsed"
                );
                summary.skipped_questions += report.skipped.len();
                questions.extend(report.questions);
            }
            Err(err) => {
                error!(path = %path.display(), parser = parser.name(), %err, "file failed to parse");
                summary.failed_files += 1;
            }
        }
    }
    questions
}

/// Run the whole pipeline. Returns the process exit code; `Err` is
/// reserved for output I/O failures.
pub fn run(args: &Args) -> Result<u8> {
    let mut summary = RunSummary::default();

    let mut questions = load_files(&args.input, args.input_encoding, &mut summary);
    summary.parsed = questions.len();

    if args.duplicates {
        for dup in duplicates(&questions) {
            info!(question = %dup.text, "appears more than once");
        }
    }

    if !args.solve.is_empty() {
        let targets = load_files(&args.solve, args.input_encoding, &mut summary);
        let (solved, resolved) = transfer_answers(&questions, targets);
        info!(resolved, total = solved.len(), "answer transfer");
        questions = solved;
    }

    if args.has_answer {
        questions.retain(Question::has_answer);
    }

    let mut index = DedupIndex::new();
    for question in questions {
        index.insert(question);
    }
    summary.unique = index.len();
    let mut questions = index.into_questions();

    if args.sort || args.format == ExportFormat::Crib {
        questions.sort_by_key(|q| q.text.to_lowercase());
    }

    let rendered = match args.format {
        ExportFormat::Mytestx => to_mytestx(&questions),
        ExportFormat::Anki => to_anki(&questions),
        ExportFormat::Crib => to_crib(&questions),
    };

    let newline = args.newline.unwrap_or(match &args.output {
        Some(_) => args.format.default_newline(),
        None => Newline::Lf,
    });
    let out_encoding = args.output_encoding.unwrap_or(TextEncoding::Utf8);
    let bytes = encoding::encode(&rendered, out_encoding, newline);

    match &args.output {
        Some(path) => fs::write(path, &bytes)
            .with_context(|| format!("writing {}", path.display()))?,
        None => std::io::stdout()
            .write_all(&bytes)
            .context("writing standard output")?,
    }

    info!(
        parsed = summary.parsed,
        unique = summary.unique,
        skipped = summary.skipped_questions,
        failed_files = summary.failed_files,
        unsupported_files = summary.unsupported_files,
        "run complete"
    );
    Ok(summary.exit_code())
}
