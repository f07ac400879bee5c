use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Session;
use crate::error::Result;
use crate::paths;

/// On-disk form of a session.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    email: String,
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<Timestamp>,
}

/// `session.json` in the data directory, readable only by the owner.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default location under the helpdesk data directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(paths::data_dir()?.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session. A missing file is `None`; a corrupt one is
    /// logged and also treated as `None`.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<StoredSession>(&content) {
            Ok(stored) => Ok(Some(Session::new(
                stored.email,
                stored.access_token,
                stored.refresh_token,
                stored.expires_at,
            ))),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            email: session.email.clone(),
            access_token: session.access_token().to_string(),
            refresh_token: session.refresh_token().map(str::to_string),
            expires_at: session.expires_at,
        };
        let content = serde_json::to_string_pretty(&stored)?;

        let mut file = open_private(&self.path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
