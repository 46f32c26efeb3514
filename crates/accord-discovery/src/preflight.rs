use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{Discovery, ParseError, ValidationError};

/// A local discovery file failed its preflight check.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// Reading the file failed.
    #[error("local io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file does not deserialize into a document.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The document parsed but violates a semantic rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Parse and semantically validate a discovery file on the local
/// filesystem, without fetching anything it references.
///
/// Lets an operator check a document before publishing it, and lets the
/// node reject a broken root document at startup instead of on the
/// first rebuild.
pub fn validate_local_document(path: impl AsRef<Path>) -> Result<Discovery, PreflightError> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| PreflightError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let discovery = Discovery::from_yaml(&raw)?;
    discovery.validate()?;
    Ok(discovery)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_doc(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("my_discovery.yaml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn valid_file_parses_and_passes() {
        let (_dir, path) = write_doc(
            "account_name: acme\norganization_name: Acme Corp\ntestnet: true\n",
        );
        let disco = validate_local_document(&path).unwrap();
        assert_eq!(disco.account_name, "acme");
    }

    #[test]
    fn missing_file_reports_io() {
        let dir = tempdir().unwrap();
        let err = validate_local_document(dir.path().join("nowhere.yaml")).unwrap_err();
        assert!(matches!(err, PreflightError::Io { .. }));
    }

    #[test]
    fn garbage_reports_parse() {
        let (_dir, path) = write_doc("{{{ not yaml");
        let err = validate_local_document(&path).unwrap_err();
        assert!(matches!(err, PreflightError::Parse(_)));
    }

    #[test]
    fn semantic_violation_reports_validation() {
        let (_dir, path) = write_doc(
            "account_name: acme\norganization_name: Acme Corp\ntestnet: true\nmainnet: true\n",
        );
        let err = validate_local_document(&path).unwrap_err();
        assert!(matches!(
            err,
            PreflightError::Validation(ValidationError::AmbiguousNetwork)
        ));
    }
}
