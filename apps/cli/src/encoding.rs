//! Input decoding and output encoding conventions.
//!
//! The MyTestX ecosystem historically used Windows-1251 text with CRLF
//! line endings; current files are UTF-8. Both are supported and selected
//! per run.

use std::borrow::Cow;

use clap::ValueEnum;
use encoding_rs::{UTF_8, WINDOWS_1251};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextEncoding {
    #[value(name = "utf-8")]
    Utf8,
    #[value(name = "windows-1251")]
    Windows1251,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Newline {
    Lf,
    Crlf,
}

/// Decode file bytes. Stray bytes decode to U+FFFD; decoding itself never
/// fails.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    let (text, _, _) = match encoding {
        TextEncoding::Utf8 => UTF_8.decode(bytes),
        TextEncoding::Windows1251 => WINDOWS_1251.decode(bytes),
    };
    text.into_owned()
}

/// Encode export text, applying the newline convention first.
pub fn encode(text: &str, encoding: TextEncoding, newline: Newline) -> Vec<u8> {
    let text: Cow<'_, str> = match newline {
        Newline::Lf => Cow::Borrowed(text),
        Newline::Crlf => Cow::Owned(text.replace('\n', "\r\n")),
    };
    match encoding {
        TextEncoding::Utf8 => text.into_owned().into_bytes(),
        TextEncoding::Windows1251 => WINDOWS_1251.encode(&text).0.into_owned(),
    }
}
