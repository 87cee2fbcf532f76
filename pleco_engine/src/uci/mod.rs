//! UCI protocol support: option parsing/storage and command-line parsing.

pub mod options;
pub mod parse;
