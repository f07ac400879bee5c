//! RAII guards for process-global state in tests.
//!
//! Tests that mutate environment variables must guarantee restoration even if
//! the test panics. The guard snapshots the variable in `new()` and restores
//! it in `Drop`.
//!
//! All tests using these guards should still be marked `#[serial]` since the
//! environment is truly process-global and cannot be isolated between
//! concurrent tests.

use std::env;
use std::ffi::OsString;

/// RAII guard that restores an environment variable on drop.
///
/// # Example
///
/// ```ignore
/// #[test]
/// #[serial]
/// fn test_something() {
///     let _guard = unsafe { EnvGuard::set("HELPDESK_HOME", "/tmp/helpdesk") };
///     // HELPDESK_HOME is restored when _guard goes out of scope
/// }
/// ```
pub struct EnvGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvGuard {
    /// Create a new guard that snapshots the current value of `key`.
    pub fn new(key: &str) -> Self {
        let original = env::var_os(key);
        Self {
            key: key.to_string(),
            original,
        }
    }

    /// Create a new guard and immediately set the variable to `value`.
    ///
    /// # Safety
    /// This function calls `std::env::set_var` which is unsafe in Rust 2024
    /// edition due to potential data races in multi-threaded programs.
    /// Tests using this should be marked `#[serial]`.
    pub unsafe fn set(key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let guard = Self::new(key);
        unsafe { env::set_var(key, value) };
        guard
    }

    /// Create a new guard and immediately remove the variable.
    ///
    /// # Safety
    /// Same constraints as [`EnvGuard::set`].
    pub unsafe fn remove(key: &str) -> Self {
        let guard = Self::new(key);
        unsafe { env::remove_var(key) };
        guard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests using EnvGuard are marked #[serial].
        match &self.original {
            Some(val) => unsafe { env::set_var(&self.key, val) },
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_restores_existing_var() {
        let key = "HELPDESK_TEST_GUARD_EXISTING";
        unsafe { env::set_var(key, "original_value") };
        {
            let _guard = unsafe { EnvGuard::set(key, "modified_value") };
            assert_eq!(env::var(key).unwrap(), "modified_value");
        }
        assert_eq!(env::var(key).unwrap(), "original_value");
        unsafe { env::remove_var(key) };
    }

    #[test]
    #[serial]
    fn test_env_guard_restores_absent_var() {
        let key = "HELPDESK_TEST_GUARD_ABSENT";
        unsafe { env::remove_var(key) };
        {
            let _guard = unsafe { EnvGuard::set(key, "temporary") };
            assert_eq!(env::var(key).unwrap(), "temporary");
        }
        assert!(env::var(key).is_err());
    }

    #[test]
    #[serial]
    fn test_env_guard_remove() {
        let key = "HELPDESK_TEST_GUARD_REMOVE";
        unsafe { env::set_var(key, "should_be_restored") };
        {
            let _guard = unsafe { EnvGuard::remove(key) };
            assert!(env::var(key).is_err());
        }
        assert_eq!(env::var(key).unwrap(), "should_be_restored");
        unsafe { env::remove_var(key) };
    }
}
