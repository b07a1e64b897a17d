use std::path::{Path, PathBuf};

use thiserror::Error;

use super::validation::ArtifactValidationError;

/// Failure to bring a model artifact into memory
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Model artifact not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt model artifact {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported model artifact format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid model artifact: {0}")]
    Invalid(#[from] ArtifactValidationError),
}

impl LoadError {
    pub(crate) fn io(path: &Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = LoadError::io(
            Path::new("models/missing.json"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(
            error.to_string(),
            "Model artifact not found: models/missing.json"
        );
    }

    #[test]
    fn test_io_error_kept() {
        let error = LoadError::io(
            Path::new("models/locked.json"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(error, LoadError::Io { .. }));
    }

    #[test]
    fn test_version_message() {
        let error = LoadError::UnsupportedVersion {
            found: 2,
            supported: 1,
        };
        assert_eq!(
            error.to_string(),
            "Unsupported model artifact format version 2 (supported: 1)"
        );
    }
}
