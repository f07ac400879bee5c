use std::path::PathBuf;

use crate::error::{HelpdeskError, Result};

/// Environment variable that pins every helpdesk file under one directory.
pub const HOME_ENV: &str = "HELPDESK_HOME";

/// Returns the directory holding `config.yaml`.
///
/// Resolution order:
/// 1. `HELPDESK_HOME` environment variable (if set)
/// 2. The platform config directory for `helpdesk`
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = home_override() {
        return Ok(home);
    }
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the directory holding the persisted session and the log file.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = home_override() {
        return Ok(home);
    }
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

fn home_override() -> Option<PathBuf> {
    std::env::var(HOME_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("id", "ptpn4", "helpdesk").ok_or_else(|| {
        HelpdeskError::Config(format!(
            "cannot determine a home directory; set {HOME_ENV} to choose one"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_home_override_wins() {
        let _guard = unsafe { EnvGuard::set(HOME_ENV, "/srv/helpdesk") };
        assert_eq!(config_dir().unwrap(), PathBuf::from("/srv/helpdesk"));
        assert_eq!(data_dir().unwrap(), PathBuf::from("/srv/helpdesk"));
    }

    #[test]
    #[serial]
    fn test_empty_override_is_ignored() {
        let _guard = unsafe { EnvGuard::set(HOME_ENV, "") };
        assert_ne!(config_dir().ok(), Some(PathBuf::new()));
    }
}
