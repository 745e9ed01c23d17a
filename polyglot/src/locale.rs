//! Locale codes and their human-readable names.

use std::{borrow::Borrow, fmt::Display};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// An ISO locale code such as `en`, `de` or `pt-BR`.
///
/// The code is kept verbatim: it names folders and files, so it is never
/// canonicalized. Parsing is only used to look up a display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.0.parse().ok()
    }

    /// English name of the locale, e.g. `German` or `Portuguese (BR)`.
    ///
    /// Falls back to the code itself for unknown or unparsable codes.
    pub fn display_name(&self) -> String {
        let Some(langid) = self.parse_language_identifier() else {
            return self.0.clone();
        };
        let language = langid.language.as_str();
        let name = language_name(language).unwrap_or(language);
        match langid.region {
            Some(region) => format!("{} ({})", name, region.as_str()),
            None => name.to_string(),
        }
    }
}

impl Display for LocaleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocaleCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocaleCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for LocaleCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Sorts locales by display name, then by code so the order is total.
pub fn sort_by_display_name(locales: &mut [LocaleCode]) {
    locales.sort_by_cached_key(|locale| (locale.display_name(), locale.0.clone()));
}

fn language_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "ar" => "Arabic",
        "bg" => "Bulgarian",
        "bn" => "Bengali",
        "ca" => "Catalan",
        "cs" => "Czech",
        "da" => "Danish",
        "de" => "German",
        "el" => "Greek",
        "en" => "English",
        "es" => "Spanish",
        "et" => "Estonian",
        "fa" => "Persian",
        "fi" => "Finnish",
        "fr" => "French",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "hr" => "Croatian",
        "hu" => "Hungarian",
        "id" => "Indonesian",
        "it" => "Italian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "lt" => "Lithuanian",
        "lv" => "Latvian",
        "ms" => "Malay",
        "nb" => "Norwegian Bokmål",
        "nl" => "Dutch",
        "pl" => "Polish",
        "pt" => "Portuguese",
        "ro" => "Romanian",
        "ru" => "Russian",
        "sk" => "Slovak",
        "sl" => "Slovenian",
        "sr" => "Serbian",
        "sv" => "Swedish",
        "th" => "Thai",
        "tr" => "Turkish",
        "uk" => "Ukrainian",
        "vi" => "Vietnamese",
        "zh" => "Chinese",
        _ => return None,
    };
    Some(name)
}
