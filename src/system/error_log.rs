//! Append-only text log of error norms.
//!
//! One line per call: every value followed by a single space, then `\n`.
//! Columns are positional. There is no header and no locking, so a log path
//! should have one writer per run.

use super::error::SystemError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default log file name, relative to the working directory.
pub const DEFAULT_ERROR_LOG: &str = "errors.txt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorLog {
    path: PathBuf,
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG)
    }
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line with `values`.
    pub fn append(&self, values: &[f64]) -> Result<(), SystemError> {
        let line = format_line(values);
        let wrap = |source| SystemError::ErrorLog {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(wrap)?;
        file.write_all(line.as_bytes()).map_err(wrap)?;

        tracing::trace!(path = ?self.path, n = values.len(), "appended error norms");
        Ok(())
    }
}

fn format_line(values: &[f64]) -> String {
    let mut line = String::new();
    for v in values {
        line.push_str(&v.to_string());
        line.push(' ');
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        assert_eq!(format_line(&[0.1, 0.25]), "0.1 0.25 \n");
        assert_eq!(format_line(&[]), "\n");
        assert_eq!(format_line(&[1.0, 1e-20]), "1 0.00000000000000000001 \n");
    }

    #[test]
    fn test_append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("errors.txt"));

        log.append(&[0.1, 0.25]).unwrap();
        log.append(&[0.3, 0.4]).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "0.1 0.25 \n0.3 0.4 \n");
    }

    #[test]
    fn test_unopenable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("missing").join("errors.txt"));
        assert!(matches!(log.append(&[1.0]), Err(SystemError::ErrorLog { .. })));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(ErrorLog::default().path(), Path::new(DEFAULT_ERROR_LOG));
    }
}
