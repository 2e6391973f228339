use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$COMPTES_HOME`, or `~/.comptes` when unset
pub fn comptes_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("COMPTES_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".comptes"))
}

pub fn ensure_comptes_home() -> Result<PathBuf> {
    let dir = comptes_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
