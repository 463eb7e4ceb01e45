//! Secret Santa data models.
//!
//! These types are the in-memory contract between the core and whatever
//! loads participants and persists assignments (the store, the CLI, tests).
//! Models are mostly "dumb" data: the generator and verifier in
//! `crate::pipeline` apply the policy.
//!
//! Notes on serde:
//! - With the `serde` feature (default) every model is serde-friendly and
//!   uses camelCase field names (`giverId`, `receiverId`, `giftNumber`).
//! - `GiftCount` deserializes from a plain integer and rejects values outside
//!   1..=3.

use std::fmt;

use crate::errors::{SantaError, SantaResult};

/// Opaque participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One eligible exchange member.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub email: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name shown to people: name, then email, then the raw id.
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        match self.email.as_deref() {
            Some(e) if !e.trim().is_empty() => e,
            _ => self.id.as_str(),
        }
    }
}

/// Uniform number of gifts every participant gives and receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct GiftCount(u8);

impl GiftCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub const ONE: GiftCount = GiftCount(1);

    pub fn new(n: u32) -> SantaResult<Self> {
        if n < u32::from(Self::MIN) || n > u32::from(Self::MAX) {
            return Err(SantaError::InvalidGiftCount(n));
        }
        Ok(Self(n as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for GiftCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for GiftCount {
    type Error = SantaError;

    fn try_from(n: u32) -> SantaResult<Self> {
        Self::new(n)
    }
}

impl From<GiftCount> for u32 {
    fn from(g: GiftCount) -> Self {
        u32::from(g.0)
    }
}

impl fmt::Display for GiftCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single gift obligation: `giver_id` buys gift number `gift_number`
/// for `receiver_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Assignment {
    pub giver_id: ParticipantId,
    pub receiver_id: ParticipantId,
    pub gift_number: u8,
}

impl Assignment {
    pub fn new(
        giver_id: impl Into<ParticipantId>,
        receiver_id: impl Into<ParticipantId>,
        gift_number: u8,
    ) -> Self {
        Self {
            giver_id: giver_id.into(),
            receiver_id: receiver_id.into(),
            gift_number,
        }
    }

    pub fn is_self_assignment(&self) -> bool {
        self.giver_id == self.receiver_id
    }
}

/// Structural validation helpers shared by the generator, the verifier and
/// the store.
pub mod validate {
    use std::collections::HashSet;

    use super::*;

    /// Reject participant lists that repeat an identifier.
    pub fn unique_participants(participants: &[Participant]) -> SantaResult<()> {
        let mut seen = HashSet::with_capacity(participants.len());
        for p in participants {
            if !seen.insert(&p.id) {
                return Err(SantaError::invalid_argument(format!(
                    "duplicate participant id: {}",
                    p.id
                )));
            }
        }
        Ok(())
    }

    /// Reject empty identifiers.
    pub fn non_empty_ids(participants: &[Participant]) -> SantaResult<()> {
        match participants.iter().find(|p| p.id.as_str().trim().is_empty()) {
            Some(p) => Err(SantaError::invalid_argument(format!(
                "participant {:?} has an empty id",
                p.name
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gift_count_bounds() {
        assert!(GiftCount::new(0).is_err());
        assert_eq!(GiftCount::new(1).unwrap().get(), 1);
        assert_eq!(GiftCount::new(3).unwrap().get(), 3);
        assert_eq!(GiftCount::new(4), Err(SantaError::InvalidGiftCount(4)));
    }

    #[test]
    fn display_name_falls_back() {
        let p = Participant::new("p1", "Mom");
        assert_eq!(p.display_name(), "Mom");

        let p = Participant::new("p2", "").with_email("dad@example.com");
        assert_eq!(p.display_name(), "dad@example.com");

        let p = Participant::new("p3", " ");
        assert_eq!(p.display_name(), "p3");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let ps = vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
            Participant::new("a", "Also A"),
        ];
        let e = validate::unique_participants(&ps).unwrap_err();
        assert!(e.to_string().contains("duplicate participant id: a"));
    }

    #[test]
    fn empty_id_rejected() {
        let ps = vec![Participant::new("", "Nobody")];
        assert!(validate::non_empty_ids(&ps).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn assignment_uses_camel_case() {
        let a = Assignment::new("mom", "dad", 1);
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["giverId"], "mom");
        assert_eq!(v["receiverId"], "dad");
        assert_eq!(v["giftNumber"], 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn gift_count_deserialize_validates() {
        let ok: GiftCount = serde_json::from_str("2").unwrap();
        assert_eq!(ok.get(), 2);
        assert!(serde_json::from_str::<GiftCount>("7").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn participant_email_is_optional() {
        let p: Participant = serde_json::from_str(r#"{"id":"x","name":"X"}"#).unwrap();
        assert_eq!(p.email, None);
    }
}
