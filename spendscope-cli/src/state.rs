use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$SPENDSCOPE_HOME`, or `~/.spendscope`
pub fn spendscope_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SPENDSCOPE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendscope"))
}

pub fn ensure_spendscope_home() -> Result<PathBuf> {
    let dir = spendscope_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
