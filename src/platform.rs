use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};

fn dirs_home() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| env::var("USERPROFILE").ok().map(PathBuf::from))
}

/// Get the data directory for dialbook (database and settings)
pub fn data_dir() -> Result<PathBuf> {
    let dir = if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("dialbook")
    } else if let Some(home) = dirs_home() {
        if cfg!(target_os = "macos") {
            home.join("Library").join("Application Support").join("dialbook")
        } else {
            home.join(".local").join("share").join("dialbook")
        }
    } else {
        bail!("Cannot determine data directory");
    };

    Ok(dir)
}
