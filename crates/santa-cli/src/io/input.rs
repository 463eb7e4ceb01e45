use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;

use santa_core::model::{Assignment, Participant};

pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let v: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid json in {}: {e}", path.display()))?;
    Ok(v)
}

/// JSON array of `{id, name, email?}`.
pub fn read_participants<P: AsRef<Path>>(path: P) -> Result<Vec<Participant>> {
    read_typed(path, "participants")
}

/// JSON array of `{giverId, receiverId, giftNumber}`.
pub fn read_assignments<P: AsRef<Path>>(path: P) -> Result<Vec<Assignment>> {
    read_typed(path, "assignments")
}

fn read_typed<T: DeserializeOwned, P: AsRef<Path>>(path: P, what: &str) -> Result<T> {
    let v = read_json_file(&path)?;
    serde_json::from_value(v).map_err(|e| {
        anyhow!(
            "invalid {what} json in {}: {e}",
            path.as_ref().display()
        )
    })
}
