//! Command-line front end for the quiz converter.

pub mod args;
pub mod encoding;
pub mod pipeline;
