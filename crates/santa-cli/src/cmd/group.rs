use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use santa_core::model::GiftCount;

use crate::cmd::{open_store, resolve_group};
use crate::output;

pub fn create(store_root: &str, name: &str, gifts: u32, max_participants: Option<usize>) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = store.create_group(name, GiftCount::new(gifts)?, max_participants)?;

    output::emit(&group, |w| {
        writeln!(
            w,
            "created group {} ({}), {} gift(s) each, up to {} participants",
            group.name, group.id, group.gifts_per_participant, group.max_participants
        )
    })?;
    Ok(ExitCode::SUCCESS)
}

pub fn update(
    store_root: &str,
    group: &str,
    name: Option<&str>,
    gifts: Option<u32>,
    max_participants: Option<usize>,
) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    let gifts = gifts.map(GiftCount::new).transpose()?;
    let group = store.update_group(&group.id, name, gifts, max_participants)?;

    output::emit(&group, |w| {
        writeln!(
            w,
            "updated group {} ({}), {} gift(s) each, up to {} participants",
            group.name, group.id, group.gifts_per_participant, group.max_participants
        )
    })?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOut {
    pub group_id: String,
    pub deleted: bool,
}

pub fn delete(store_root: &str, group: &str) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    store.delete_group(&group.id)?;

    let out = DeleteOut {
        group_id: group.id,
        deleted: true,
    };
    output::emit(&out, |w| {
        output::status_line(w, true, &format!("deleted group {}", group.name))
    })?;
    Ok(ExitCode::SUCCESS)
}

pub fn join(store_root: &str, group: &str, name: &str, email: Option<&str>) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    let participant = store.add_participant(&group.id, name, email)?;

    output::emit(&participant, |w| {
        writeln!(
            w,
            "{} joined {} as {}",
            participant.name, group.name, participant.id
        )
    })?;
    Ok(ExitCode::SUCCESS)
}
