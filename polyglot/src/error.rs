//! All error types for the polyglot crate.
//!
//! These are returned from all fallible operations (parsing, construction,
//! writing generated files, etc.). Per-file failures during a save or an
//! export are not returned as errors; they are collected in a
//! [`crate::report::Report`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("invalid formatter: {0}")]
    InvalidFormatter(String),

    #[error("unknown resource type `{0}`")]
    UnknownResourceType(String),

    #[error("unknown platform `{0}`")]
    UnknownPlatform(String),

    #[error("unknown quantity `{0}`")]
    UnknownQuantity(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}
