use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;

use crate::cmd::{open_store, resolve_group};
use crate::output;

/// Receivers one participant buys for, by gift number.
pub fn mine(store_root: &str, group: &str, participant: &str) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    let gifts = store.assignments_for_giver(&group.id, participant)?;

    output::emit(&gifts, |w| {
        if gifts.is_empty() {
            return writeln!(w, "no assignments yet");
        }
        for g in &gifts {
            writeln!(w, "gift {}: {}", g.gift_number, g.receiver_name)?;
        }
        Ok(())
    })?;
    Ok(ExitCode::SUCCESS)
}

pub fn list(store_root: &str, group: &str) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    let all = store.all_assignments(&group.id)?;

    output::emit(&all, |w| {
        for v in &all {
            writeln!(
                w,
                "{} -> {} (gift {})",
                v.giver_name, v.receiver_name, v.gift_number
            )?;
        }
        Ok(())
    })?;
    Ok(ExitCode::SUCCESS)
}
