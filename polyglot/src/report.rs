//! Collected outcome of a save or export.
//!
//! Saving and exporting write many files; a failure on one file is recorded
//! here and the remaining files are still written.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::error;

use crate::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Files written successfully, in write order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub message: String,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn record_written(&mut self, path: impl Into<PathBuf>) {
        self.written.push(path.into());
    }

    /// Records a failure for `path` and logs it.
    pub fn record_failure(&mut self, path: impl AsRef<Path>, err: &Error) {
        let path = path.as_ref();
        error!(path = %path.display(), error = %err, "failed to write file");
        self.failures.push(Failure {
            path: path.to_path_buf(),
            message: err.to_string(),
        });
    }

    /// Records the outcome of writing a single file.
    pub fn record(&mut self, path: impl AsRef<Path>, result: Result<(), Error>) {
        match result {
            Ok(()) => self.record_written(path.as_ref()),
            Err(err) => self.record_failure(path, &err),
        }
    }

    pub fn merge(&mut self, other: Report) {
        self.written.extend(other.written);
        self.failures.extend(other.failures);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_merge() {
        let mut report = Report::new();
        report.record("a.properties", Ok(()));
        assert!(report.is_ok());

        let mut other = Report::new();
        other.record(
            "b.properties",
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            ))),
        );
        report.merge(other);

        assert!(!report.is_ok());
        assert_eq!(report.written, vec![PathBuf::from("a.properties")]);
        assert_eq!(report.failures[0].path, PathBuf::from("b.properties"));
        assert!(report.failures[0].message.contains("denied"));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut report = Report::new();
        report.record_written("out/values/strings.xml");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["written"][0], "out/values/strings.xml");
        assert!(json["failures"].as_array().unwrap().is_empty());
    }
}
