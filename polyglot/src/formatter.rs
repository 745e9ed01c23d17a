//! String formatters rewrite arguments and special characters in shared
//! resource text so it exports properly on each platform.
//!
//! For example, `%s` stays a plain argument in the source text but becomes
//! `%1$s` on Android and `%@` on iOS. Custom formatters can localize tokens
//! per platform, e.g. `%STORE` to "Play Store" or "App Store".

use std::{collections::BTreeSet, fmt::Debug, sync::Arc};

use lazy_static::lazy_static;

use crate::{error::Error, types::Platform};

type Replace = dyn Fn(usize, bool) -> String + Send + Sync;

/// A textual substitution rule.
#[derive(Clone)]
pub struct StringFormatter {
    arg: String,
    platforms: Option<BTreeSet<Platform>>,
    is_indexed: bool,
    formatter: Arc<Replace>,
}

impl StringFormatter {
    /// Creates a formatter replacing every occurrence of `arg`.
    ///
    /// - `platforms`: restrict the formatter to these platforms; `None` applies
    ///   it everywhere.
    /// - `is_indexed`: occurrences advance the string's argument index, which
    ///   is passed to `formatter` (starting at 1). Android arguments are
    ///   positional, e.g. `%s` becomes `%1$s` or `%2$s`.
    /// - `formatter`: receives the argument index and whether the destination
    ///   file is XML, and returns the replacement.
    ///
    /// Fails if `arg` is empty.
    pub fn new<F>(
        arg: impl Into<String>,
        platforms: Option<BTreeSet<Platform>>,
        is_indexed: bool,
        formatter: F,
    ) -> Result<Self, Error>
    where
        F: Fn(usize, bool) -> String + Send + Sync + 'static,
    {
        let arg = arg.into();
        if arg.is_empty() {
            return Err(Error::InvalidFormatter(
                "formatter arg cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            arg,
            platforms,
            is_indexed,
            formatter: Arc::new(formatter),
        })
    }

    pub fn arg(&self) -> &str {
        &self.arg
    }

    pub fn is_indexed(&self) -> bool {
        self.is_indexed
    }

    pub fn applies_to(&self, platform: Platform) -> bool {
        self.platforms
            .as_ref()
            .is_none_or(|platforms| platforms.contains(&platform))
    }

    pub fn replacement(&self, index: usize, is_xml: bool) -> String {
        (self.formatter)(index, is_xml)
    }
}

impl Debug for StringFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringFormatter")
            .field("arg", &self.arg)
            .field("platforms", &self.platforms)
            .field("is_indexed", &self.is_indexed)
            .finish_non_exhaustive()
    }
}

lazy_static! {
    static ref DEFAULT_FORMATTERS: Vec<StringFormatter> = build_default_formatters();
}

/// The built-in pipeline, in application order.
pub fn default_formatters() -> &'static [StringFormatter] {
    &DEFAULT_FORMATTERS
}

fn build_default_formatters() -> Vec<StringFormatter> {
    let android = Some(Platform::Android.only());
    let ios = Some(Platform::Ios.only());
    // The args are non-empty literals, so construction cannot fail.
    [
        StringFormatter::new("\n", None, false, |_, _| "\\n".to_string()),
        StringFormatter::new("'", android.clone(), false, |_, _| "\\'".to_string()),
        StringFormatter::new("%s", android.clone(), true, |index, _| format!("%{}$s", index)),
        StringFormatter::new("%d", android.clone(), true, |index, _| format!("%{}$d", index)),
        StringFormatter::new("%f", android, true, |index, _| format!("%{}$f", index)),
        StringFormatter::new("%s", ios.clone(), false, |_, _| "%@".to_string()),
        StringFormatter::new("\"", ios, false, |_, is_xml| {
            if is_xml { "\\\"" } else { "\"" }.to_string()
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Runs `text` through `formatters` for `platform`.
///
/// Formatters apply in order, each pass scanning the output of the previous
/// one. Consecutive indexed formatters share one left-to-right pass so the
/// argument index follows the order of the arguments in the text. The index
/// starts at 1 for every string.
pub fn format(text: &str, platform: Platform, is_xml: bool, formatters: &[StringFormatter]) -> String {
    let applicable: Vec<&StringFormatter> = formatters
        .iter()
        .filter(|formatter| formatter.applies_to(platform))
        .collect();

    let mut result = text.to_string();
    let mut index = 1;
    let mut start = 0;
    while start < applicable.len() {
        let mut end = start + 1;
        if applicable[start].is_indexed {
            while end < applicable.len() && applicable[end].is_indexed {
                end += 1;
            }
        }
        result = apply_pass(&result, &applicable[start..end], is_xml, &mut index);
        start = end;
    }
    result
}

fn apply_pass(text: &str, pass: &[&StringFormatter], is_xml: bool, index: &mut usize) -> String {
    if !pass.iter().any(|formatter| text.contains(formatter.arg.as_str())) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while let Some(c) = rest.chars().next() {
        for formatter in pass {
            if let Some(after) = rest.strip_prefix(formatter.arg.as_str()) {
                out.push_str(&formatter.replacement(*index, is_xml));
                if formatter.is_indexed {
                    *index += 1;
                }
                rest = after;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn android(text: &str) -> String {
        format(text, Platform::Android, true, default_formatters())
    }

    fn ios(text: &str) -> String {
        format(text, Platform::Ios, false, default_formatters())
    }

    #[test]
    fn test_empty_arg_is_rejected() {
        let result = StringFormatter::new("", None, false, |_, _| String::new());
        assert!(matches!(result, Err(Error::InvalidFormatter(_))));
    }

    #[test]
    fn test_default_pipeline_order() {
        let args: Vec<&str> = default_formatters().iter().map(StringFormatter::arg).collect();
        assert_eq!(args, vec!["\n", "'", "%s", "%d", "%f", "%s", "\""]);
    }

    #[test]
    fn test_android_indexing() {
        assert_eq!(android("%s and %d"), "%1$s and %2$d");
        assert_eq!(android("%d of %s at %f%%"), "%1$d of %2$s at %3$f%%");
        assert_eq!(android("%s, %s"), "%1$s, %2$s");
    }

    #[test]
    fn test_index_restarts_per_string() {
        assert_eq!(android("%s"), "%1$s");
        assert_eq!(android("%s"), "%1$s");
    }

    #[test]
    fn test_ios_rules() {
        assert_eq!(ios("%s and %d"), "%@ and %d");
        assert_eq!(ios("Say \"hi\""), "Say \"hi\"");
        assert_eq!(
            format("Say \"hi\"", Platform::Ios, true, default_formatters()),
            "Say \\\"hi\\\""
        );
        assert_eq!(ios("It's"), "It's");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(android("It's\nfine"), "It\\'s\\nfine");
        assert_eq!(ios("line one\nline two"), "line one\\nline two");
        assert_eq!(android("Say \"hi\""), "Say \"hi\"");
    }

    #[test]
    fn test_non_matching_text_is_unchanged() {
        for text in ["", "Hello, world!", "100% sure", "Grüße 🎉"] {
            assert_eq!(android(text), text);
            assert_eq!(ios(text), text);
        }
    }

    #[test]
    fn test_custom_platform_token() {
        let mut formatters = default_formatters().to_vec();
        formatters.push(
            StringFormatter::new("%STORE", Some(Platform::Android.only()), false, |_, _| {
                "Play Store".to_string()
            })
            .unwrap(),
        );
        formatters.push(
            StringFormatter::new("%STORE", Some(Platform::Ios.only()), false, |_, _| {
                "App Store".to_string()
            })
            .unwrap(),
        );
        assert_eq!(
            format("Rate us on %STORE", Platform::Android, true, &formatters),
            "Rate us on Play Store"
        );
        assert_eq!(
            format("Rate us on %STORE", Platform::Ios, false, &formatters),
            "Rate us on App Store"
        );
    }
}
