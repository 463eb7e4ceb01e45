use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use santa_core::prelude::*;

use crate::cmd::generate::warnings;
use crate::cmd::{open_store, resolve_group};
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawOut {
    pub group_id: String,
    pub group_name: String,
    pub stats: GenerateStats,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOut {
    pub group_id: String,
    pub removed: usize,
}

/// Draw a group's assignments. The triples stay in the store; the
/// organizer only sees counts.
pub fn draw(store_root: &str, group: &str, seed: Option<u64>) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    let mut rng = from_optional_seed(seed);

    let report = store.generate_assignments(&group.id, &mut rng)?;
    let out = DrawOut {
        group_id: group.id,
        group_name: group.name,
        stats: report.stats,
        diagnostics: report.diagnostics,
    };

    output::emit(&out, |w| {
        output::status_line(
            w,
            true,
            &format!(
                "drew {} assignments for {} participants in {}",
                out.stats.total_assignments, out.stats.participants, out.group_name
            ),
        )?;
        warnings(w, &out.diagnostics)
    })?;
    Ok(ExitCode::SUCCESS)
}

pub fn clear(store_root: &str, group: &str) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    let removed = store.clear_assignments(&group.id)?;

    let out = ClearOut {
        group_id: group.id,
        removed,
    };
    output::emit(&out, |w| {
        output::status_line(w, true, &format!("removed {removed} assignments"))
    })?;
    Ok(ExitCode::SUCCESS)
}
