//! Command-line argument surface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::encoding::{Newline, TextEncoding};

/// Multiple-choice quiz parser, converter and deduplicator.
///
/// Parses portal exports and plain-text quizzes into one collection,
/// removes duplicates and writes the result in the selected format.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Files to parse. The parser is chosen by file suffix
    /// ('*.evsmu.htm', '*.do.htm', '*.txt'). Files are concatenated in
    /// argument order.
    #[arg(required = true)]
    pub input: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "mytestx")]
    pub format: ExportFormat,

    /// Destination file; standard output when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Sort questions by casefolded text (always on for crib output).
    #[arg(short, long)]
    pub sort: bool,

    /// Drop questions without a known correct answer.
    #[arg(long)]
    pub has_answer: bool,

    /// List questions that appear more than once.
    #[arg(short, long)]
    pub duplicates: bool,

    /// Populate unanswered questions of these files with answers found in
    /// the main inputs; the output then contains only these files'
    /// questions.
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub solve: Vec<PathBuf>,

    /// Character encoding of input files.
    #[arg(long, value_enum, default_value = "utf-8")]
    pub input_encoding: TextEncoding,

    /// Character encoding of the output file (default UTF-8).
    #[arg(long, value_enum)]
    pub output_encoding: Option<TextEncoding>,

    /// Line endings of the output. Files default to the format's legacy
    /// convention (CRLF for MyTestX and crib, LF for Anki TSV); standard
    /// output is always LF unless overridden.
    #[arg(long, value_enum)]
    pub newline: Option<Newline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// MyTestX plain text, importable by the legacy quiz tools.
    Mytestx,
    /// Tab-separated flashcards for Anki import.
    Anki,
    /// Condensed cheat-sheet text.
    Crib,
}

impl ExportFormat {
    /// Newline convention the format's consumers historically expect.
    pub fn default_newline(&self) -> Newline {
        match self {
            ExportFormat::Mytestx | ExportFormat::Crib => Newline::Crlf,
            ExportFormat::Anki => Newline::Lf,
        }
    }
}
