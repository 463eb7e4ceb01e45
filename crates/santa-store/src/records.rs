//! Row types returned by the store.

use serde::Serialize;

use santa_core::model::{GiftCount, Participant, ParticipantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub id: String,
    pub name: String,
    pub gifts_per_participant: GiftCount,
    pub max_participants: usize,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub email: Option<String>,
    pub joined_at: String,
}

impl From<ParticipantRecord> for Participant {
    fn from(r: ParticipantRecord) -> Self {
        Participant {
            id: ParticipantId::new(r.id),
            name: r.name,
            email: r.email,
        }
    }
}

/// One gift a participant has to buy ("my assignments").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverGift {
    pub receiver_name: String,
    pub gift_number: u8,
}

/// Organizer view of a single assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentView {
    pub giver_name: String,
    pub giver_email: Option<String>,
    pub receiver_name: String,
    pub gift_number: u8,
}
