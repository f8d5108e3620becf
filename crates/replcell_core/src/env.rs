//! Process-global environment helpers.

use std::ffi::OsString;
use std::sync::{Mutex, OnceLock};

/// Return the lock used to serialize environment mutation in tests.
///
/// # Returns
/// A process-wide mutex; hold its guard for as long as a [`ScopedEnv`] lives.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&OsString>) {
    // SAFETY: Callers serialize mutation through `env_lock`.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// A batch of environment overrides restored (in reverse order) on drop.
#[derive(Debug, Default)]
pub struct ScopedEnv {
    saved: Vec<(String, Option<OsString>)>,
}

impl ScopedEnv {
    /// Start an empty override batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key=value` for the lifetime of this batch.
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.save(key);
        write_var(key, Some(&OsString::from(value)));
        self
    }

    /// Remove `key` for the lifetime of this batch.
    pub fn unset(mut self, key: &str) -> Self {
        self.save(key);
        write_var(key, None);
        self
    }

    fn save(&mut self, key: &str) {
        self.saved.push((key.to_string(), std::env::var_os(key)));
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            write_var(&key, previous.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{env_lock, ScopedEnv};

    #[test]
    fn scoped_env_restores_previous_values() {
        let _lock = env_lock().lock().expect("env lock");
        let key = "REPLCELL_TEST_SCOPED_ENV_RESTORE";
        let _baseline = ScopedEnv::new().set(key, "before");
        {
            let _override = ScopedEnv::new().set(key, "first").set(key, "second");
            assert_eq!(std::env::var(key).ok().as_deref(), Some("second"));
        }
        assert_eq!(std::env::var(key).ok().as_deref(), Some("before"));
    }

    #[test]
    fn scoped_env_unset_restores_missing_value() {
        let _lock = env_lock().lock().expect("env lock");
        let key = "REPLCELL_TEST_SCOPED_ENV_UNSET";
        {
            let _removed = ScopedEnv::new().unset(key);
            assert!(std::env::var(key).is_err());
        }
        assert!(std::env::var(key).is_err());
    }
}
