//! Error types for aip-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from aip-cloud
    #[error(transparent)]
    Cloud(#[from] aip_cloud::Error),

    /// Error from aip-blocks
    #[error(transparent)]
    Blocks(#[from] aip_blocks::Error),

    /// Error from aip-fs
    #[error(transparent)]
    Fs(#[from] aip_fs::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_errors_keep_their_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CliError::from(aip_fs::Error::io("/home/user/.aws/config", source));

        assert!(matches!(err, CliError::Fs(_)));
        assert_eq!(
            err.to_string(),
            "I/O error at /home/user/.aws/config: denied"
        );
    }
}
