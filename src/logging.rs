//! File-backed tracing setup.
//!
//! The dashboard owns the terminal in fullscreen mode, so log output goes to
//! `helpdesk.log` in the data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::error::Result;
use crate::paths;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "HELPDESK_LOG";

const DEFAULT_FILTER: &str = "warn";

pub fn log_path() -> Result<PathBuf> {
    Ok(paths::data_dir()?.join("helpdesk.log"))
}

/// Install the global subscriber.
///
/// Returns the path being written to. Calling this twice is harmless; the
/// second subscriber is dropped.
pub fn init() -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let subscriber = tracing_subscriber::registry().with(build_env_filter()).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file)),
    );
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(path)
}

/// Filter from `HELPDESK_LOG`, falling back to `warn` when unset or unparsable.
fn build_env_filter() -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_log_path_under_home() {
        let dir = tempfile::TempDir::new().unwrap();
        let _home = unsafe { EnvGuard::set(paths::HOME_ENV, dir.path()) };
        assert_eq!(log_path().unwrap(), dir.path().join("helpdesk.log"));
    }

    #[test]
    #[serial]
    fn test_default_filter_is_warn() {
        let _log = unsafe { EnvGuard::remove(LOG_ENV) };
        assert_eq!(build_env_filter().to_string(), "warn");
    }
}
