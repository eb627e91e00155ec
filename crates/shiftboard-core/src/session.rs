//! Login flag persistence.
//!
//! The dashboard is gated by a single `logged_in` boolean kept in
//! `session.json` inside the data directory. There is no token and no
//! expiry; logging out removes the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default)]
    logged_in: bool,
}

pub struct Session {
    dir: PathBuf,
    data: SessionData,
}

impl Session {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            data: SessionData::default(),
        }
    }

    /// Load the flag from disk. A missing file means logged out.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            self.data = serde_json::from_str(&contents).context("Failed to parse session file")?;
        } else {
            self.data = SessionData::default();
        }
        Ok(self.data.logged_in)
    }

    pub fn is_logged_in(&self) -> bool {
        self.data.logged_in
    }

    pub fn log_in(&mut self) -> Result<()> {
        self.data.logged_in = true;
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(path, contents).context("Failed to write session file")?;
        Ok(())
    }

    /// Clear the flag and remove the session file
    pub fn log_out(&mut self) -> Result<()> {
        self.data.logged_in = false;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}
