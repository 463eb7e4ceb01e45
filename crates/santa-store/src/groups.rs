//! Groups and their joined participants.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use santa_core::model::{GiftCount, Participant};

use crate::error::{StoreError, StoreResult};
use crate::records::{GroupRecord, ParticipantRecord};
use crate::store::{new_id, now_rfc3339, Store};

const GROUP_COLUMNS: &str = "id, name, gifts_per_participant, max_participants, created_at";

impl Store {
    /// Create a group. `max_participants` defaults to the configured limit
    /// and may not exceed it.
    pub fn create_group(
        &self,
        name: &str,
        gifts: GiftCount,
        max_participants: Option<usize>,
    ) -> StoreResult<GroupRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidArgument(
                "group name must not be empty".to_string(),
            ));
        }

        let limits = &self.core_config().limits;
        let max = max_participants.unwrap_or(limits.max_participants);
        if max > limits.max_participants || max < limits.required_participants(gifts) {
            return Err(StoreError::InvalidArgument(format!(
                "max participants must be between {} and {}",
                limits.required_participants(gifts),
                limits.max_participants
            )));
        }

        let group = GroupRecord {
            id: new_id(),
            name: name.to_string(),
            gifts_per_participant: gifts,
            max_participants: max,
            created_at: now_rfc3339()?,
        };

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO groups (id, name, gifts_per_participant, max_participants, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    group.id,
                    group.name,
                    group.gifts_per_participant.get(),
                    group.max_participants as i64,
                    group.created_at
                ],
            )?;
            Ok(())
        })?;

        info!(group = %group.id, gifts = %gifts, "created group");
        Ok(group)
    }

    pub fn get_group(&self, group_id: &str) -> StoreResult<GroupRecord> {
        self.with_conn(|conn| load_group(conn, group_id))
    }

    pub fn find_group_by_name(&self, name: &str) -> StoreResult<Option<GroupRecord>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {GROUP_COLUMNS} FROM groups WHERE name = ?1 ORDER BY created_at ASC LIMIT 1"
            );
            let raw = conn
                .query_row(&sql, params![name.trim()], raw_group)
                .optional()?;
            raw.map(RawGroup::decode).transpose()
        })
    }

    /// Change a group's name, gift count or size limit. `None` keeps the
    /// current value. Refused once assignments exist; `clear` first.
    ///
    /// The size limit must still admit a drawable group for the new gift
    /// count and may not drop below the number already joined.
    pub fn update_group(
        &self,
        group_id: &str,
        name: Option<&str>,
        gifts: Option<GiftCount>,
        max_participants: Option<usize>,
    ) -> StoreResult<GroupRecord> {
        let name = name.map(str::trim);
        if name.is_some_and(str::is_empty) {
            return Err(StoreError::InvalidArgument(
                "group name must not be empty".to_string(),
            ));
        }
        let limits = &self.core_config().limits;

        let group = self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
            let current = load_group(&tx, group_id)?;

            if count_rows(&tx, "assignments", group_id)? > 0 {
                return Err(StoreError::AlreadyGenerated(current.id));
            }

            let gifts = gifts.unwrap_or(current.gifts_per_participant);
            let max = max_participants.unwrap_or(current.max_participants);
            let required = limits.required_participants(gifts);
            if max > limits.max_participants || max < required {
                return Err(StoreError::InvalidArgument(format!(
                    "max participants must be between {required} and {} for {gifts} gift(s) each",
                    limits.max_participants
                )));
            }
            let joined = count_rows(&tx, "participants", group_id)?;
            if joined > max {
                return Err(StoreError::InvalidArgument(format!(
                    "group already has {joined} participants, above the new limit of {max}"
                )));
            }

            let group = GroupRecord {
                name: name.map_or(current.name, str::to_string),
                gifts_per_participant: gifts,
                max_participants: max,
                ..current
            };
            tx.execute(
                "UPDATE groups SET name = ?2, gifts_per_participant = ?3, max_participants = ?4
                 WHERE id = ?1",
                params![
                    group.id,
                    group.name,
                    group.gifts_per_participant.get(),
                    group.max_participants as i64
                ],
            )?;
            tx.commit()?;
            Ok(group)
        })?;

        info!(group = %group.id, gifts = %group.gifts_per_participant, "updated group");
        Ok(group)
    }

    /// Delete a group with its participants and assignments.
    pub fn delete_group(&self, group_id: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            load_group(conn, group_id)?;
            conn.execute("DELETE FROM groups WHERE id = ?1", params![group_id])?;
            Ok(())
        })?;
        info!(group = %group_id, "deleted group");
        Ok(())
    }

    /// Add a joined participant. Fails once the group is full or its
    /// assignments have been drawn.
    pub fn add_participant(
        &self,
        group_id: &str,
        name: &str,
        email: Option<&str>,
    ) -> StoreResult<ParticipantRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidArgument(
                "participant name must not be empty".to_string(),
            ));
        }
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        let record = self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
            let group = load_group(&tx, group_id)?;

            if count_rows(&tx, "assignments", group_id)? > 0 {
                return Err(StoreError::AlreadyGenerated(group.id));
            }
            if count_rows(&tx, "participants", group_id)? >= group.max_participants {
                return Err(StoreError::GroupFull {
                    group: group.id,
                    max: group.max_participants,
                });
            }

            let record = ParticipantRecord {
                id: new_id(),
                group_id: group.id.clone(),
                name: name.to_string(),
                email: email.map(str::to_string),
                joined_at: now_rfc3339()?,
            };
            tx.execute(
                "INSERT INTO participants (id, group_id, name, email, joined_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.group_id,
                    record.name,
                    record.email,
                    record.joined_at
                ],
            )?;
            tx.commit()?;
            Ok(record)
        })?;

        info!(group = %group_id, participant = %record.id, "participant joined");
        Ok(record)
    }

    /// Joined participants in join order.
    pub fn participant_records(&self, group_id: &str) -> StoreResult<Vec<ParticipantRecord>> {
        self.with_conn(|conn| {
            load_group(conn, group_id)?;
            load_participants(conn, group_id)
        })
    }

    /// Joined participants as core models, in join order.
    pub fn joined_participants(&self, group_id: &str) -> StoreResult<Vec<Participant>> {
        Ok(self
            .participant_records(group_id)?
            .into_iter()
            .map(Participant::from)
            .collect())
    }
}

struct RawGroup {
    id: String,
    name: String,
    gifts: i64,
    max: i64,
    created_at: String,
}

impl RawGroup {
    fn decode(self) -> StoreResult<GroupRecord> {
        let gifts = u32::try_from(self.gifts)
            .map_err(|_| StoreError::RowDecode(format!("gifts_per_participant {}", self.gifts)))?;
        let max = usize::try_from(self.max)
            .map_err(|_| StoreError::RowDecode(format!("max_participants {}", self.max)))?;
        Ok(GroupRecord {
            id: self.id,
            name: self.name,
            gifts_per_participant: GiftCount::new(gifts)?,
            max_participants: max,
            created_at: self.created_at,
        })
    }
}

fn raw_group(row: &Row<'_>) -> rusqlite::Result<RawGroup> {
    Ok(RawGroup {
        id: row.get(0)?,
        name: row.get(1)?,
        gifts: row.get(2)?,
        max: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub(crate) fn load_group(conn: &Connection, group_id: &str) -> StoreResult<GroupRecord> {
    let sql = format!("SELECT {GROUP_COLUMNS} FROM groups WHERE id = ?1");
    let raw = conn
        .query_row(&sql, params![group_id], raw_group)
        .optional()?
        .ok_or_else(|| StoreError::GroupNotFound(group_id.to_string()))?;
    raw.decode()
}

pub(crate) fn load_participants(
    conn: &Connection,
    group_id: &str,
) -> StoreResult<Vec<ParticipantRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, group_id, name, email, joined_at FROM participants
         WHERE group_id = ?1 ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map(params![group_id], |row| {
        Ok(ParticipantRecord {
            id: row.get(0)?,
            group_id: row.get(1)?,
            name: row.get(2)?,
            email: row.get(3)?,
            joined_at: row.get(4)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Row count for one group in `table` (a fixed, internal table name).
pub(crate) fn count_rows(conn: &Connection, table: &'static str, group_id: &str) -> StoreResult<usize> {
    let n: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE group_id = ?1"),
        params![group_id],
        |row| row.get(0),
    )?;
    usize::try_from(n).map_err(|_| StoreError::RowDecode(format!("{table} count {n}")))
}
