use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;

use santa_store::{GroupRecord, Store, StoreConfig, StoreError};

use crate::args::{Cli, Command, GroupCommand};

mod draw;
mod generate;
mod group;
mod show;
mod verify;

pub fn dispatch(cli: Cli) -> Result<ExitCode> {
    let root = cli.store_root.as_str();
    match cli.command {
        Command::Generate { ref participants, gifts, seed, ref out } => {
            generate::run(participants, gifts, seed, out.as_deref())
        }
        Command::Verify { ref participants, ref assignments, gifts } => {
            verify::run(participants, assignments, gifts)
        }
        Command::Group(GroupCommand::Create { ref name, gifts, max_participants }) => {
            group::create(root, name, gifts, max_participants)
        }
        Command::Group(GroupCommand::Update { ref group, ref name, gifts, max_participants }) => {
            group::update(root, group, name.as_deref(), gifts, max_participants)
        }
        Command::Group(GroupCommand::Delete { ref group }) => group::delete(root, group),
        Command::Group(GroupCommand::Join { ref group, ref name, ref email }) => {
            group::join(root, group, name, email.as_deref())
        }
        Command::Draw { ref group, seed } => draw::draw(root, group, seed),
        Command::Clear { ref group } => draw::clear(root, group),
        Command::Mine { ref group, ref participant } => show::mine(root, group, participant),
        Command::List { ref group } => show::list(root, group),
        Command::Audit { ref group } => verify::audit(root, group),
    }
}

pub(crate) fn open_store(store_root: &str) -> Result<Store> {
    let cfg = StoreConfig::local(PathBuf::from(store_root))?;
    Ok(Store::open(cfg)?)
}

/// Look a group up by id, falling back to its name.
pub(crate) fn resolve_group(store: &Store, key: &str) -> Result<GroupRecord> {
    match store.get_group(key) {
        Ok(group) => Ok(group),
        Err(StoreError::GroupNotFound(_)) => store
            .find_group_by_name(key)?
            .ok_or_else(|| StoreError::GroupNotFound(key.to_string()).into()),
        Err(e) => Err(e.into()),
    }
}
