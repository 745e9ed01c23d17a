//! Support for the flat `key=value` properties files a project is stored in.
//!
//! The syntax follows Java properties files (comments, separators, escapes,
//! line continuations) but the files are read and written as UTF-8.

use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
};

use crate::{error::Error, traits::Parser};

/// One properties file: an optional header comment and its records.
///
/// Records are kept sorted by key, so writing the same content twice
/// produces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Header comment written as the first `#` line; not read back.
    pub comment: Option<String>,
    pub entries: BTreeMap<String, String>,
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Format {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            comment: None,
            entries: iter.into_iter().collect(),
        }
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut entries = BTreeMap::new();
        let mut logical = String::new();

        for line in reader.lines() {
            let line = line?;
            let line = if logical.is_empty() {
                let trimmed = line.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed
            } else {
                // Leading whitespace of a continuation line is not part of the value.
                line.trim_start()
            };

            if ends_with_continuation(line) {
                logical.push_str(&line[..line.len() - 1]);
                continue;
            }
            logical.push_str(line);

            let (key, value) = split_record(&logical)?;
            entries.insert(key, value);
            logical.clear();
        }

        if !logical.is_empty() {
            let (key, value) = split_record(&logical)?;
            entries.insert(key, value);
        }

        Ok(Format {
            comment: None,
            entries,
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();

        if let Some(comment) = &self.comment {
            for line in comment.lines() {
                content.push_str("# ");
                content.push_str(line);
                content.push('\n');
            }
        }

        for (key, value) in &self.entries {
            content.push_str(&escape(key, true));
            content.push('=');
            content.push_str(&escape(value, false));
            content.push('\n');
        }

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits a logical line into an unescaped key and value.
///
/// The key ends at the first unescaped `=`, `:` or whitespace; whitespace and
/// one separator after it are skipped.
fn split_record(line: &str) -> Result<(String, String), Error> {
    let mut chars = line.char_indices().peekable();
    let mut key_end = line.len();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\u{c}']);
    }

    Ok((unescape(key)?, unescape(rest)?))
}

fn unescape(raw: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = read_utf16_unit(&mut chars, raw)?;
                let decoded = match unit {
                    0xD800..=0xDBFF => {
                        let low = match (chars.next(), chars.next()) {
                            (Some('\\'), Some('u')) => read_utf16_unit(&mut chars, raw)?,
                            _ => 0,
                        };
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(malformed_escape(raw));
                        }
                        char::decode_utf16([unit, low]).next().and_then(Result::ok)
                    }
                    _ => char::from_u32(u32::from(unit)),
                };
                out.push(decoded.ok_or_else(|| malformed_escape(raw))?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Reads the four hex digits following `\u`.
fn read_utf16_unit(chars: &mut std::str::Chars<'_>, raw: &str) -> Result<u16, Error> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed_escape(raw));
    }
    u16::from_str_radix(&hex, 16).map_err(|_| malformed_escape(raw))
}

fn malformed_escape(raw: &str) -> Error {
    Error::DataMismatch(format!("malformed \\uXXXX escape in `{}`", raw))
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());

    for (i, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{c}' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
