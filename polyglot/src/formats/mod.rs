//! File formats polyglot reads and writes.
//!
//! `properties` is the project's own storage format; the others are the
//! platform-native files the generators emit.

pub mod android_strings;
pub mod properties;
pub mod strings;
pub mod stringsdict;

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
pub use properties::Format as PropertiesFormat;
pub use strings::Format as StringsFormat;
pub use stringsdict::Format as StringsdictFormat;
