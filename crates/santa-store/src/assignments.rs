//! Assignment persistence.
//!
//! Generation is guarded: it only runs when the group has no assignments,
//! and the guard, the draw and the insert share one IMMEDIATE transaction so
//! two concurrent draws for the same group cannot both succeed.

use rand::Rng;
use rusqlite::{params, Connection, TransactionBehavior};
use tracing::{info, warn};

use santa_core::model::{Assignment, Participant, ParticipantId};
use santa_core::pipeline::{generate_with_config, verify, GenerateReport, VerificationReport};

use crate::error::{StoreError, StoreResult};
use crate::groups::{count_rows, load_group, load_participants};
use crate::records::{AssignmentView, ReceiverGift};
use crate::store::{new_id, now_rfc3339, Store};

impl Store {
    /// Draw and persist assignments for a group that has none yet.
    pub fn generate_assignments<R>(&self, group_id: &str, rng: &mut R) -> StoreResult<GenerateReport>
    where
        R: Rng + ?Sized,
    {
        let core = self.core_config();
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let group = load_group(&tx, group_id)?;

            if count_rows(&tx, "assignments", group_id)? > 0 {
                return Err(StoreError::AlreadyGenerated(group.id));
            }

            let participants: Vec<Participant> = load_participants(&tx, group_id)?
                .into_iter()
                .map(Participant::from)
                .collect();

            let report = generate_with_config(&participants, group.gifts_per_participant, core, rng)
                .map_err(|e| {
                    warn!(group = %group.id, error = %e, "assignment generation failed");
                    StoreError::Core(e)
                })?;

            insert_assignments(&tx, group_id, &report.assignments)?;
            tx.commit()?;

            info!(
                group = %group.id,
                assignments = report.assignments.len(),
                "persisted assignments"
            );
            Ok(report)
        })
    }

    /// Replace the group's assignment set in one transaction. Every giver
    /// and receiver must be a participant of this group.
    pub fn replace_assignments(&self, group_id: &str, assignments: &[Assignment]) -> StoreResult<usize> {
        self.with_conn(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            load_group(&tx, group_id)?;
            tx.execute(
                "DELETE FROM assignments WHERE group_id = ?1",
                params![group_id],
            )?;
            let n = insert_assignments(&tx, group_id, assignments)?;
            tx.commit()?;
            Ok(n)
        })
    }

    /// Remove every assignment of the group. Returns the number removed.
    pub fn clear_assignments(&self, group_id: &str) -> StoreResult<usize> {
        let removed = self.with_conn(|conn| {
            load_group(conn, group_id)?;
            Ok(conn.execute(
                "DELETE FROM assignments WHERE group_id = ?1",
                params![group_id],
            )?)
        })?;
        info!(group = %group_id, removed, "cleared assignments");
        Ok(removed)
    }

    pub fn assignment_count(&self, group_id: &str) -> StoreResult<usize> {
        self.with_conn(|conn| {
            load_group(conn, group_id)?;
            count_rows(conn, "assignments", group_id)
        })
    }

    /// Raw triples in generation order.
    pub fn assignments(&self, group_id: &str) -> StoreResult<Vec<Assignment>> {
        self.with_conn(|conn| {
            load_group(conn, group_id)?;
            load_assignments(conn, group_id)
        })
    }

    /// The receivers one participant buys for, by gift number.
    pub fn assignments_for_giver(
        &self,
        group_id: &str,
        participant_id: &str,
    ) -> StoreResult<Vec<ReceiverGift>> {
        self.with_conn(|conn| {
            load_group(conn, group_id)?;
            let member: i64 = conn.query_row(
                "SELECT COUNT(*) FROM participants WHERE id = ?1 AND group_id = ?2",
                params![participant_id, group_id],
                |row| row.get(0),
            )?;
            if member == 0 {
                return Err(StoreError::ParticipantNotFound {
                    group: group_id.to_string(),
                    participant: participant_id.to_string(),
                });
            }

            let mut stmt = conn.prepare(
                "SELECT p.name, a.gift_number
                 FROM assignments a
                 JOIN participants p ON a.receiver_id = p.id
                 WHERE a.giver_id = ?1 AND a.group_id = ?2
                 ORDER BY a.gift_number",
            )?;
            let rows = stmt.query_map(params![participant_id, group_id], |row| {
                Ok(ReceiverGift {
                    receiver_name: row.get(0)?,
                    gift_number: row.get(1)?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    /// Organizer view: every assignment with names, ordered by giver name,
    /// then join order (givers may share a name), then gift number.
    pub fn all_assignments(&self, group_id: &str) -> StoreResult<Vec<AssignmentView>> {
        self.with_conn(|conn| {
            load_group(conn, group_id)?;
            let mut stmt = conn.prepare(
                "SELECT giver.name, giver.email, receiver.name, a.gift_number
                 FROM assignments a
                 JOIN participants giver ON a.giver_id = giver.id
                 JOIN participants receiver ON a.receiver_id = receiver.id
                 WHERE a.group_id = ?1
                 ORDER BY giver.name, giver.rowid, a.gift_number",
            )?;
            let rows = stmt.query_map(params![group_id], |row| {
                Ok(AssignmentView {
                    giver_name: row.get(0)?,
                    giver_email: row.get(1)?,
                    receiver_name: row.get(2)?,
                    gift_number: row.get(3)?,
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    /// Audit the persisted assignment set of a group.
    pub fn verify_group(&self, group_id: &str) -> StoreResult<VerificationReport> {
        let (group, participants, assignments) = self.with_conn(|conn| {
            let group = load_group(conn, group_id)?;
            let participants: Vec<Participant> = load_participants(conn, group_id)?
                .into_iter()
                .map(Participant::from)
                .collect();
            let assignments = load_assignments(conn, group_id)?;
            Ok((group, participants, assignments))
        })?;

        let report = verify(&participants, &assignments, group.gifts_per_participant)?;
        Ok(report.with_group_name(group.name))
    }
}

fn insert_assignments(conn: &Connection, group_id: &str, assignments: &[Assignment]) -> StoreResult<usize> {
    let created_at = now_rfc3339()?;
    let mut member = conn.prepare("SELECT 1 FROM participants WHERE id = ?1 AND group_id = ?2")?;
    let mut stmt = conn.prepare(
        "INSERT INTO assignments (id, group_id, giver_id, receiver_id, gift_number, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for a in assignments {
        for id in [&a.giver_id, &a.receiver_id] {
            if !member.exists(params![id.as_str(), group_id])? {
                return Err(StoreError::ParticipantNotFound {
                    group: group_id.to_string(),
                    participant: id.to_string(),
                });
            }
        }
        stmt.execute(params![
            new_id(),
            group_id,
            a.giver_id.as_str(),
            a.receiver_id.as_str(),
            a.gift_number,
            created_at
        ])?;
    }
    Ok(assignments.len())
}

fn load_assignments(conn: &Connection, group_id: &str) -> StoreResult<Vec<Assignment>> {
    let mut stmt = conn.prepare(
        "SELECT giver_id, receiver_id, gift_number FROM assignments
         WHERE group_id = ?1 ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map(params![group_id], |row| {
        Ok(Assignment {
            giver_id: ParticipantId::new(row.get::<_, String>(0)?),
            receiver_id: ParticipantId::new(row.get::<_, String>(1)?),
            gift_number: row.get(2)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
