//! Shared "current profile" handle.
//!
//! The host coordinator owns the profile selection; path resolution only
//! reads it. A `ProfileContext` is a cheap clonable handle: every clone sees
//! the same value, so the coordinator can switch profiles after handing the
//! context to a [`DataDir`](crate::data_dir::DataDir).

use std::sync::{Arc, PoisonError, RwLock};

/// Profile used when nothing else selects one.
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable naming the profile to start with.
pub const PROFILE_ENV: &str = "EFB_PROFILE";

#[derive(Debug, Clone, Default)]
pub struct ProfileContext {
    inner: Arc<RwLock<Option<String>>>,
}

impl ProfileContext {
    /// Create a context with `name` selected.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(name.into()))),
        }
    }

    /// Create a context with no profile selected.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Create a context from `EFB_PROFILE`, falling back to `default`.
    pub fn from_env() -> Self {
        let name = std::env::var(PROFILE_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        Self::new(name)
    }

    /// Select a profile. Visible to every clone of this context.
    pub fn set(&self, name: impl Into<String>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(name.into());
    }

    /// Deselect the current profile.
    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// The selected profile, or `None` when unset or blank.
    pub fn get(&self) -> Option<String> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().filter(|p| !p.trim().is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that touch `EFB_PROFILE`.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_new_and_get() {
        let ctx = ProfileContext::new("work");
        assert_eq!(ctx.get().as_deref(), Some("work"));
    }

    #[test]
    fn test_unset_and_blank_read_as_none() {
        assert_eq!(ProfileContext::unset().get(), None);
        assert_eq!(ProfileContext::new("").get(), None);
        assert_eq!(ProfileContext::new("   ").get(), None);
    }

    #[test]
    fn test_clones_share_value() {
        let ctx = ProfileContext::new("a");
        let other = ctx.clone();
        ctx.set("b");
        assert_eq!(other.get().as_deref(), Some("b"));
        other.clear();
        assert_eq!(ctx.get(), None);
    }

    #[test]
    fn test_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        std::env::set_var(PROFILE_ENV, "staging");
        assert_eq!(ProfileContext::from_env().get().as_deref(), Some("staging"));

        std::env::set_var(PROFILE_ENV, "");
        assert_eq!(
            ProfileContext::from_env().get().as_deref(),
            Some(DEFAULT_PROFILE)
        );

        std::env::remove_var(PROFILE_ENV);
        assert_eq!(
            ProfileContext::from_env().get().as_deref(),
            Some(DEFAULT_PROFILE)
        );
    }
}
