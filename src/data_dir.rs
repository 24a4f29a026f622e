//! EFB data directory layout.
//!
//! ```text
//! <base>/profiles/<profile>/config.<ext>
//! <base>/profiles/<profile>/<channel_id>/config.<ext>
//! <base>/channels/
//! ```
//!
//! The base is `$EFB_DATA_PATH/<user>/` when `EFB_DATA_PATH` is set, and
//! `~/.ehforwarderbot/` otherwise. Every function returning a directory
//! creates it (with missing parents) before returning, and every returned
//! directory path ends in a separator. Nothing is cached: each call reads the
//! environment and the current profile again.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{PathError, PathResult};
use crate::profile::ProfileContext;
use crate::user::current_username;
use crate::{APP_DIR_NAME, DATA_PATH_ENV};

const PROFILES_DIR: &str = "profiles";
const CHANNELS_DIR: &str = "channels";
const CONFIG_STEM: &str = "config";

/// Extension used for config files when none is given.
pub const DEFAULT_CONFIG_EXT: &str = "yaml";

/// Inputs that decide where the base directory lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseLocation {
    /// Value of `EFB_DATA_PATH`. Empty counts as unset.
    pub data_path_override: Option<OsString>,
    /// Home directory of the current user.
    pub home: Option<PathBuf>,
    /// Current OS user name, used under the override root.
    pub username: Option<String>,
}

impl BaseLocation {
    /// Snapshot the base location inputs from the process environment.
    pub fn from_env() -> Self {
        let data_path_override = std::env::var_os(DATA_PATH_ENV).filter(|v| !v.is_empty());
        // The user name only matters under an override root
        let username = if data_path_override.is_some() {
            current_username()
        } else {
            None
        };
        Self {
            data_path_override,
            home: dirs::home_dir(),
            username,
        }
    }

    /// Compose the base directory path without touching the filesystem.
    pub fn compose(&self) -> PathResult<PathBuf> {
        match self.data_path_override.as_ref().filter(|v| !v.is_empty()) {
            Some(root) => {
                let user = self.username.as_deref().ok_or(PathError::NoUsername)?;
                Ok(dir_path(PathBuf::from(root).join(user)))
            }
            None => {
                let home = self.home.as_ref().ok_or(PathError::NoHomeDir)?;
                Ok(dir_path(home.join(APP_DIR_NAME)))
            }
        }
    }
}

/// Resolve the base data directory from the environment, creating it if needed.
pub fn resolve_base_path() -> PathResult<PathBuf> {
    ensure_dir(BaseLocation::from_env().compose()?)
}

#[derive(Debug, Clone)]
enum BaseSource {
    Env,
    Fixed(BaseLocation),
}

/// Resolver for profile- and channel-scoped directories.
///
/// Holds the shared [`ProfileContext`] rather than reading a global, so the
/// profile observed is whatever the coordinator has selected at call time.
#[derive(Debug, Clone)]
pub struct DataDir {
    profile: ProfileContext,
    base: BaseSource,
}

impl DataDir {
    /// Resolver whose base comes from the environment on every call.
    pub fn new(profile: ProfileContext) -> Self {
        Self {
            profile,
            base: BaseSource::Env,
        }
    }

    /// Resolver with an injected base location.
    pub fn with_base(profile: ProfileContext, base: BaseLocation) -> Self {
        Self {
            profile,
            base: BaseSource::Fixed(base),
        }
    }

    pub fn profile(&self) -> &ProfileContext {
        &self.profile
    }

    /// Base data directory. Created if missing.
    pub fn base_path(&self) -> PathResult<PathBuf> {
        let location = match &self.base {
            BaseSource::Env => BaseLocation::from_env(),
            BaseSource::Fixed(location) => location.clone(),
        };
        ensure_dir(location.compose()?)
    }

    /// `<base>/profiles/<profile>/`. Created if missing.
    ///
    /// Fails with [`PathError::ProfileUnset`] before touching the filesystem
    /// when no profile is selected.
    pub fn profile_path(&self) -> PathResult<PathBuf> {
        let profile = self.profile.get().ok_or(PathError::ProfileUnset)?;
        let base = self.base_path()?;
        ensure_dir(dir_path(base.join(PROFILES_DIR).join(profile)))
    }

    /// `<base>/profiles/<profile>/<channel_id>/`. Created if missing.
    pub fn channel_data_path(&self, channel_id: &str) -> PathResult<PathBuf> {
        validate_channel_id(channel_id)?;
        let profile_dir = self.profile_path()?;
        ensure_dir(dir_path(profile_dir.join(channel_id)))
    }

    /// Path of a config file, `config.<ext>`, in the channel data directory
    /// or, without a channel ID, in the profile directory.
    ///
    /// The containing directory is created; the file itself is not. An empty
    /// channel ID is treated as no channel ID. A leading `.` on `ext` is
    /// ignored and an empty `ext` means `yaml`.
    pub fn config_path(&self, channel_id: Option<&str>, ext: &str) -> PathResult<PathBuf> {
        let dir = match channel_id.filter(|id| !id.is_empty()) {
            Some(id) => self.channel_data_path(id)?,
            None => self.profile_path()?,
        };
        let path = dir.join(config_file_name(ext));
        trace!(path = %path.display(), "resolved config path");
        Ok(path)
    }

    /// [`config_path`](Self::config_path) with the `yaml` extension.
    pub fn default_config_path(&self, channel_id: Option<&str>) -> PathResult<PathBuf> {
        self.config_path(channel_id, DEFAULT_CONFIG_EXT)
    }

    /// `<base>/channels/`, where custom channel modules live. Created if missing.
    pub fn custom_channel_path(&self) -> PathResult<PathBuf> {
        let base = self.base_path()?;
        ensure_dir(dir_path(base.join(CHANNELS_DIR)))
    }
}

/// Ensure `dir` exists as a directory, creating it and its parents if needed.
pub(crate) fn ensure_dir(dir: PathBuf) -> PathResult<PathBuf> {
    if !dir.is_dir() {
        std::fs::create_dir_all(&dir).map_err(|source| PathError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        debug!(path = %dir.display(), "created directory");
    }
    Ok(dir)
}

/// Append an empty component so the path ends in a separator.
fn dir_path(path: PathBuf) -> PathBuf {
    path.join("")
}

fn config_file_name(ext: &str) -> String {
    let ext = ext.trim_start_matches('.');
    let ext = if ext.is_empty() { DEFAULT_CONFIG_EXT } else { ext };
    format!("{CONFIG_STEM}.{ext}")
}

/// A channel ID becomes exactly one directory under the profile directory.
fn validate_channel_id(channel_id: &str) -> PathResult<()> {
    let reason = if channel_id.is_empty() {
        "must not be empty"
    } else if channel_id == "." || channel_id == ".." {
        "must not be a relative path component"
    } else if channel_id.contains(['/', '\\']) {
        "must not contain a path separator"
    } else if channel_id.contains('\0') {
        "must not contain a NUL byte"
    } else if Path::new(channel_id).is_absolute() {
        "must not be an absolute path"
    } else {
        return Ok(());
    };
    Err(PathError::InvalidChannelId {
        channel_id: channel_id.to_string(),
        reason,
    })
}
