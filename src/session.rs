use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;

/// Authentication state of the client, passed explicitly to whatever needs it.
///
/// Created once at startup from the persisted token, cleared on logout or when
/// the backend answers 401.
#[derive(Debug)]
pub struct Session {
    token: Option<String>,
    path: PathBuf,
}

impl Session {
    pub fn init(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(content) => Some(content.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e).context(format!("failed to read session token {}", path.display()))
            }
        };

        tracing::debug!(path = %path.display(), authenticated = token.is_some(), "session loaded");
        Ok(Self { token, path })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&mut self, token: impl Into<String>) -> anyhow::Result<()> {
        let token = token.into();
        fs::write(&self.path, &token)
            .context(format!("failed to persist session token {}", self.path.display()))?;
        self.token = Some(token);
        Ok(())
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.token = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).context(format!("failed to remove session token {}", self.path.display()))
            }
        }
    }
}
