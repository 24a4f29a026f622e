//! Errors produced while resolving the data directory layout.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Path resolution error type.
#[derive(Debug, Error)]
pub enum PathError {
    /// A directory could not be created (permissions, disk full, bad path).
    #[error("Failed to create directory at {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A profile-scoped path was requested before a profile was set.
    #[error("No profile is set; a profile must be selected before resolving profile paths")]
    ProfileUnset,

    /// The channel ID cannot be used as a single directory name.
    #[error("Invalid channel ID '{channel_id}': {reason}")]
    InvalidChannelId {
        channel_id: String,
        reason: &'static str,
    },

    /// Could not determine home directory.
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Could not determine the current OS user name.
    #[error("Could not determine the current user name")]
    NoUsername,
}

impl PathError {
    /// Whether this error came from the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, PathError::CreateDir { .. })
    }

    /// Whether this error means the process state (profile, home directory,
    /// user) was not usable for resolution.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            PathError::ProfileUnset | PathError::NoHomeDir | PathError::NoUsername
        )
    }
}

/// Result type for path resolution.
pub type PathResult<T> = Result<T, PathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let io_err = PathError::CreateDir {
            path: PathBuf::from("/nope"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(io_err.is_io());
        assert!(!io_err.is_invalid_state());

        assert!(PathError::ProfileUnset.is_invalid_state());
        assert!(!PathError::ProfileUnset.is_io());

        let bad_id = PathError::InvalidChannelId {
            channel_id: "..".to_string(),
            reason: "must not be a relative path component",
        };
        assert!(!bad_id.is_io());
        assert!(!bad_id.is_invalid_state());
    }

    #[test]
    fn test_create_dir_message_includes_path() {
        let err = PathError::CreateDir {
            path: PathBuf::from("/root/forbidden"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
