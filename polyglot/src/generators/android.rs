use std::path::{Path, PathBuf};

use tracing::debug;

use super::ResourceGenerator;
use crate::{
    error::Error,
    formats::{AndroidStringsFormat, android_strings::Element},
    formatter::{StringFormatter, format},
    locale::LocaleCode,
    traits::Parser,
    types::{Platform, Plural, is_blank},
};

const STRINGS_FILE: &str = "strings.xml";

/// Generates `values[-<locale>]/strings.xml` for one locale.
#[derive(Debug)]
pub struct AndroidResourceGenerator {
    values_folder: PathBuf,
    locale: LocaleCode,
    formatters: Vec<StringFormatter>,
    document: AndroidStringsFormat,
}

impl AndroidResourceGenerator {
    pub fn new(
        android_folder: impl Into<PathBuf>,
        locale: LocaleCode,
        is_default: bool,
        formatters: Vec<StringFormatter>,
    ) -> Self {
        let folder_name = if is_default {
            "values".to_string()
        } else {
            format!("values-{}", locale)
        };
        Self {
            values_folder: android_folder.into().join(folder_name),
            locale,
            formatters,
            document: AndroidStringsFormat {
                tools_namespace: is_default,
                elements: Vec::new(),
            },
        }
    }

    fn sanitized(&self, text: &str) -> String {
        format(text, Platform::Android, true, &self.formatters)
    }
}

impl ResourceGenerator for AndroidResourceGenerator {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn output_folder(&self) -> &Path {
        &self.values_folder
    }

    fn add_string(&mut self, id: &str, text: &str) {
        if is_blank(text) {
            return;
        }
        let value = self.sanitized(text);
        self.document.elements.push(Element::String {
            name: id.to_string(),
            value,
        });
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
        self.document.elements.push(Element::Plurals {
            name: id.to_string(),
            items,
        });
    }

    fn add_string_array(&mut self, id: &str, items: &[String]) {
        if items.is_empty() || items.iter().any(|item| is_blank(item)) {
            return;
        }
        let items = items.iter().map(|item| self.sanitized(item)).collect();
        self.document.elements.push(Element::StringArray {
            name: id.to_string(),
            items,
        });
    }

    fn generate_files(&self) -> Result<Vec<PathBuf>, Error> {
        let path = self.values_folder.join(STRINGS_FILE);
        self.document.write_to(&path)?;
        debug!(
            locale = %self.locale,
            resources = self.document.elements.len(),
            path = %path.display(),
            "wrote android resources"
        );
        Ok(vec![path])
    }
}
