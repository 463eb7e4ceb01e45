//! santa-store
//!
//! Local persistence for Secret Santa groups:
//! - groups with their gifts-per-participant setting and size limit
//! - joined participants, in join order
//! - assignment triples, written atomically and generated at most once
//!
//! The store owns the idempotency guard the core relies on: a group's
//! assignments are drawn only when none exist, and clearing is the only way
//! to draw again.

mod assignments;
mod config;
mod error;
mod groups;
mod records;
mod schema;
mod store;

pub use crate::config::{StoreConfig, DEFAULT_FILE_NAME};
pub use crate::error::{StoreError, StoreResult};
pub use crate::records::{AssignmentView, GroupRecord, ParticipantRecord, ReceiverGift};
pub use crate::store::Store;
