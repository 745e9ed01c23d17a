use std::path::{Path, PathBuf};

use tracing::debug;

use super::ResourceGenerator;
use crate::{
    error::Error,
    formats::{
        StringsFormat, StringsdictFormat, strings::Pair, stringsdict::PluralEntry,
    },
    formatter::{StringFormatter, format},
    locale::LocaleCode,
    traits::Parser,
    types::{Platform, Plural, is_blank},
};

const STRINGS_FILE: &str = "Localizable.strings";
const STRINGSDICT_FILE: &str = "Localizable.stringsdict";

/// Generates `<locale>.lproj/Localizable.strings` and
/// `Localizable.stringsdict` for one locale.
///
/// iOS has no base folder, so the default locale gets its own `.lproj` like
/// every other locale. Array items are flattened to `"<id>.<index>"` keys.
#[derive(Debug)]
pub struct IosResourceGenerator {
    lproj_folder: PathBuf,
    formatters: Vec<StringFormatter>,
    strings: StringsFormat,
    plurals: StringsdictFormat,
}

impl IosResourceGenerator {
    pub fn new(
        ios_folder: impl Into<PathBuf>,
        locale: LocaleCode,
        _is_default: bool,
        formatters: Vec<StringFormatter>,
    ) -> Self {
        Self {
            lproj_folder: ios_folder.into().join(format!("{}.lproj", locale)),
            formatters,
            strings: StringsFormat {
                language: locale.to_string(),
                pairs: Vec::new(),
            },
            plurals: StringsdictFormat::default(),
        }
    }

    fn sanitized(&self, text: &str) -> String {
        format(text, Platform::Ios, false, &self.formatters)
    }
}

impl ResourceGenerator for IosResourceGenerator {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn output_folder(&self) -> &Path {
        &self.lproj_folder
    }

    fn add_string(&mut self, id: &str, text: &str) {
        if is_blank(text) {
            return;
        }
        let value = self.sanitized(text);
        self.strings.pairs.push(Pair::new(id, value));
    }

    fn add_plural(&mut self, id: &str, plural: &Plural) {
        if is_blank(plural.other()) {
            return;
        }
        let items = plural
            .items()
            .iter()
            .filter(|(_, text)| !is_blank(text))
            .map(|(quantity, text)| (*quantity, self.sanitized(text)))
            .collect();
        self.plurals.plurals.push(PluralEntry {
            key: id.to_string(),
            items,
        });
    }

    fn add_string_array(&mut self, id: &str, items: &[String]) {
        if items.is_empty() || items.iter().any(|item| is_blank(item)) {
            return;
        }
        for (index, item) in items.iter().enumerate() {
            let value = self.sanitized(item);
            self.strings
                .pairs
                .push(Pair::new(format!("{}.{}", id, index), value));
        }
    }

    fn generate_files(&self) -> Result<Vec<PathBuf>, Error> {
        let strings_path = self.lproj_folder.join(STRINGS_FILE);
        self.strings.write_to(&strings_path)?;
        let stringsdict_path = self.lproj_folder.join(STRINGSDICT_FILE);
        self.plurals.write_to(&stringsdict_path)?;
        debug!(
            locale = %self.strings.language,
            strings = self.strings.pairs.len(),
            plurals = self.plurals.plurals.len(),
            folder = %self.lproj_folder.display(),
            "wrote ios resources"
        );
        Ok(vec![strings_path, stringsdict_path])
    }
}
