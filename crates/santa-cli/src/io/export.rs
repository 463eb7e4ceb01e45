use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty JSON to `path`, creating parent directories.
pub fn write_json_file<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
