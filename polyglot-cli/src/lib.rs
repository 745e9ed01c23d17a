//! CLI library for testing purposes

pub mod generate;
pub mod platforms;
pub mod stats;
pub mod view;

pub use generate::{print_report, run_generate};
pub use platforms::{PlatformArg, ResourceTypeArg};
pub use polyglot::Project;
