#![forbid(unsafe_code)]
//! Author localized strings once, export them to Android and iOS.
//!
//! A polyglot project keeps its strings, plurals and string arrays in flat,
//! human-editable `.properties` files, one per resource type and locale.
//! Exporting runs every text through a platform-aware formatter pipeline and
//! writes the platform-native resource files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use polyglot::{Platform, Project, default_formatters};
//!
//! let project = Project::load("projects", "my-app")?;
//! let content = project.load_content()?.value;
//!
//! // Writes values/strings.xml, values-de/strings.xml, ...
//! let report = project.export(Platform::Android, &content, default_formatters());
//! assert!(report.is_ok());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Project Layout
//!
//! - `project.properties`: output folders, default locale and locales
//! - `<type>.<locale>.properties`: localized content, e.g. `plurals.de.properties`
//! - `metadata.<type>.properties`: group and target platforms per resource id
//! - `sizes.arrays.properties`: declared size of every string array
//!
//! # Output
//!
//! - **Android**: `values[-<locale>]/strings.xml`
//! - **iOS**: `<locale>.lproj/Localizable.strings` and `Localizable.stringsdict`

pub mod codec;
pub mod error;
pub mod formats;
pub mod formatter;
pub mod generators;
pub mod locale;
pub mod project;
pub mod report;
pub mod stats;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Decoded, SkippedRecord},
    error::Error,
    formatter::{StringFormatter, default_formatters},
    generators::{AndroidResourceGenerator, IosResourceGenerator, ResourceGenerator},
    locale::LocaleCode,
    project::{Project, ProjectContent, ResourceTable},
    report::Report,
    types::{
        LocalizedResources, Metadata, MetadataDetail, Platform, Plural, Quantity, Resource,
        ResourceId, ResourceType, Resources,
    },
};
