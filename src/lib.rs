//! `efb_core` — Shared infrastructure for EFB channel plugins.
//!
//! Provides:
//! - `data_dir` — Locate and create the base, profile, channel and custom-channel directories
//! - `profile` — The shared "current profile" handle the host coordinator owns
//! - `config` — Load and atomically save channel/profile config files (YAML or JSON)
//! - `extra` — Tag channel callables as user-invokable "extra functions"
//! - `user` — Look up the current OS user name for `EFB_DATA_PATH` roots

pub mod config;
pub mod data_dir;
pub mod error;
pub mod extra;
pub mod profile;
pub mod user;

pub use data_dir::{resolve_base_path, BaseLocation, DataDir};
pub use error::{PathError, PathResult};
pub use extra::{extra, Extra, ExtraFunctions, ExtraMeta};
pub use profile::ProfileContext;

/// Default data directory name under the user's home.
const APP_DIR_NAME: &str = ".ehforwarderbot";

/// Environment variable to override the data directory root.
pub const DATA_PATH_ENV: &str = "EFB_DATA_PATH";
