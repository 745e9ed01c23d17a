//! Platform generators: render one locale's resources into the platform's
//! native files.
//!
//! A generator is created per locale, fed resources through the `add_*`
//! methods, then asked to write its files. Generators never mutate the
//! resource model; every call to [`ResourceGenerator::generate_files`]
//! recreates the output files from scratch.

mod android;
mod ios;

use std::path::{Path, PathBuf};

pub use android::AndroidResourceGenerator;
pub use ios::IosResourceGenerator;

use crate::{
    error::Error,
    formatter::StringFormatter,
    locale::LocaleCode,
    types::{Platform, Plural, Resource, Resources},
};

/// The contract shared by every platform generator.
pub trait ResourceGenerator {
    fn platform(&self) -> Platform;

    /// Folder the locale's files are written to.
    fn output_folder(&self) -> &Path;

    /// Adds a string; blank text is skipped.
    fn add_string(&mut self, id: &str, text: &str);

    /// Adds a plural; skipped when `other` is blank, and blank quantities are
    /// left out.
    fn add_plural(&mut self, id: &str, plural: &Plural);

    /// Adds a string array; skipped when any item is blank.
    fn add_string_array(&mut self, id: &str, items: &[String]);

    /// Writes the generated files, returning their paths.
    fn generate_files(&self) -> Result<Vec<PathBuf>, Error>;

    /// Adds every resource, dispatching on its variant.
    fn add_all(&mut self, resources: &Resources) {
        for (id, resource) in resources {
            match resource {
                Resource::Str(text) => self.add_string(id, text),
                Resource::Plural(plural) => self.add_plural(id, plural),
                Resource::StringArray(items) => self.add_string_array(id, items),
            }
        }
    }
}

/// Creates the generator for `platform`.
pub fn for_platform(
    platform: Platform,
    output_root: impl Into<PathBuf>,
    locale: LocaleCode,
    is_default: bool,
    formatters: Vec<StringFormatter>,
) -> Box<dyn ResourceGenerator> {
    match platform {
        Platform::Android => Box::new(AndroidResourceGenerator::new(
            output_root,
            locale,
            is_default,
            formatters,
        )),
        Platform::Ios => Box::new(IosResourceGenerator::new(
            output_root,
            locale,
            is_default,
            formatters,
        )),
    }
}
