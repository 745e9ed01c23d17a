//! Support for Apple `.strings` localization files.
//!
//! Values are written as given (already run through the formatter pipeline),
//! except that bare double quotes and a dangling trailing backslash are
//! escaped so the file stays well-formed.

use std::io::{BufRead, Write};

use indoc::indoc;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::{error::Error, traits::Parser};

lazy_static! {
    // "key" = "value";
    static ref PAIR_REGEX: Regex =
        Regex::new(r#"^\s*"((?:[^"\\]|\\.)*)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;"#).unwrap();
}

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Language code written into the header comment.
    pub language: String,
    pub pairs: Vec<Pair>,
}

/// A single `"key" = "value";` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "\"{}\" = \"{}\";",
            escape_quotes(&self.key),
            escape_quotes(&self.value)
        )
    }
}

impl Format {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

impl Parser for Format {
    /// Keys and values are returned exactly as they appear between the quotes.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut language = String::new();
        let mut pairs = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if let Some(header) = trimmed.strip_prefix("//: Language:") {
                language = header.trim().to_string();
                continue;
            }
            if let Some(captures) = PAIR_REGEX.captures(trimmed) {
                pairs.push(Pair::new(&captures[1], &captures[2]));
            } else if trimmed.starts_with('"') {
                warn!(line = %trimmed, "skipping malformed .strings line");
            }
        }

        Ok(Format { language, pairs })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = format!(
            indoc! {"
            // This file is automatically generated by polyglot.
            // Do not edit it manually, as your changes will be overwritten.
            //
            //: Language: {}
            //

            "},
            self.language
        );

        for pair in &self.pairs {
            content.push_str(&pair.to_string());
            content.push('\n');
        }

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

/// Escapes every `"` that is not already preceded by a backslash, and pairs
/// up an odd run of trailing backslashes so it cannot swallow the closing quote.
fn escape_quotes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    let mut backslashes = 0;
    for c in raw.chars() {
        if c == '"' && backslashes % 2 == 0 {
            out.push('\\');
        }
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
        out.push(c);
    }
    if backslashes % 2 == 1 {
        out.push('\\');
    }
    out
}
