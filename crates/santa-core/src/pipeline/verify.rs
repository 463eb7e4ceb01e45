//! Verification of persisted assignment sets.
//!
//! The verifier recomputes give/receive counts for every supplied
//! participant, collects self-assignments, and returns a report. It never
//! fails on inconsistent assignments: imbalance, self-assignments and count
//! mismatches are reported as data. Only structurally invalid input
//! (duplicate participant ids) is an error.
//!
//! `is_valid` holds iff every participant gives and receives exactly the
//! configured number of gifts, there are no self-assignments, and the total
//! number of triples equals `participants * gifts`.

use std::collections::HashMap;

use crate::errors::SantaResult;
use crate::model::{validate, Assignment, GiftCount, Participant, ParticipantId};

/// One gift a participant gives, as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GiftDetail {
    pub receiver: String,
    pub gift_number: u8,
}

/// A triple whose giver and receiver are the same person.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SelfAssignment {
    pub person: String,
    pub gift_number: u8,
}

/// Per-participant counts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ParticipantReport {
    pub id: ParticipantId,
    pub name: String,
    pub email: Option<String>,
    pub gives: usize,
    pub receives: usize,
    pub expected_gives: usize,
    pub expected_receives: usize,
    pub gives_correct: bool,
    pub receives_correct: bool,
    pub assignments: Vec<GiftDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SummaryStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub status: SummaryStatus,
    pub message: String,
}

/// Verification report for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VerificationReport {
    pub group_name: Option<String>,
    pub gifts_per_participant: u8,
    pub total_participants: usize,
    pub total_assignments: usize,
    pub expected_assignments: usize,
    pub is_valid: bool,
    pub has_self_assignments: bool,
    pub self_assignments: Vec<SelfAssignment>,
    pub all_gives_correct: bool,
    pub all_receives_correct: bool,
    pub participants: Vec<ParticipantReport>,
    /// Human-readable findings explaining an invalid verdict.
    pub issues: Vec<String>,
    pub summary: Summary,
}

impl VerificationReport {
    pub fn with_group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = Some(name.into());
        self
    }

    /// Participants whose gives or receives count is off.
    pub fn incorrect_participants(&self) -> impl Iterator<Item = &ParticipantReport> {
        self.participants
            .iter()
            .filter(|p| !p.gives_correct || !p.receives_correct)
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&ParticipantReport> {
        self.participants.iter().find(|p| &p.id == id)
    }
}

const SUCCESS_MESSAGE: &str = "All assignments are correct! Everyone gives and receives the correct number of gifts, and there are no self-assignments.";
const ERROR_MESSAGE: &str = "Issues found. Please review the participant details.";

#[derive(Default)]
struct Tally {
    gives: usize,
    receives: usize,
    details: Vec<GiftDetail>,
}

/// Audit `assignments` against `participants` and `gifts`.
pub fn verify(
    participants: &[Participant],
    assignments: &[Assignment],
    gifts: GiftCount,
) -> SantaResult<VerificationReport> {
    validate::unique_participants(participants)?;

    let k = gifts.as_usize();
    let names: HashMap<&ParticipantId, &str> = participants
        .iter()
        .map(|p| (&p.id, p.display_name()))
        .collect();
    let name_of = |id: &ParticipantId| -> String {
        names
            .get(id)
            .map(|s| s.to_string())
            .unwrap_or_else(|| id.to_string())
    };

    let mut tallies: HashMap<&ParticipantId, Tally> = participants
        .iter()
        .map(|p| (&p.id, Tally::default()))
        .collect();
    let mut self_assignments = Vec::new();
    let mut unknown: Vec<&ParticipantId> = Vec::new();

    for a in assignments {
        if a.is_self_assignment() {
            self_assignments.push(SelfAssignment {
                person: name_of(&a.giver_id),
                gift_number: a.gift_number,
            });
        }

        match tallies.get_mut(&a.giver_id) {
            Some(t) => {
                t.gives += 1;
                t.details.push(GiftDetail {
                    receiver: name_of(&a.receiver_id),
                    gift_number: a.gift_number,
                });
            }
            None => unknown.push(&a.giver_id),
        }

        match tallies.get_mut(&a.receiver_id) {
            Some(t) => t.receives += 1,
            None => unknown.push(&a.receiver_id),
        }
    }

    let mut issues = Vec::new();
    let mut reports = Vec::with_capacity(participants.len());

    for p in participants {
        let mut tally = tallies.remove(&p.id).unwrap_or_default();
        tally.details.sort_by_key(|d| d.gift_number);

        let name = p.display_name().to_string();
        if tally.gives != k {
            issues.push(format!("{name} gives {} instead of {k}", tally.gives));
        }
        if tally.receives != k {
            issues.push(format!("{name} receives {} instead of {k}", tally.receives));
        }

        reports.push(ParticipantReport {
            id: p.id.clone(),
            name,
            email: p.email.clone(),
            gives: tally.gives,
            receives: tally.receives,
            expected_gives: k,
            expected_receives: k,
            gives_correct: tally.gives == k,
            receives_correct: tally.receives == k,
            assignments: tally.details,
        });
    }

    let all_gives_correct = reports.iter().all(|r| r.gives_correct);
    let all_receives_correct = reports.iter().all(|r| r.receives_correct);
    let has_self_assignments = !self_assignments.is_empty();
    let expected_assignments = participants.len() * k;
    let total_assignments = assignments.len();

    if has_self_assignments {
        issues.push(format!(
            "{} self-assignment(s) found",
            self_assignments.len()
        ));
    }
    if total_assignments != expected_assignments {
        issues.push(format!(
            "expected {expected_assignments} assignments, found {total_assignments}"
        ));
    }
    unknown.sort();
    unknown.dedup();
    for id in unknown {
        issues.push(format!("assignment references unknown participant {id}"));
    }

    let is_valid = all_gives_correct
        && all_receives_correct
        && !has_self_assignments
        && total_assignments == expected_assignments;

    let summary = if is_valid {
        Summary {
            status: SummaryStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    } else {
        Summary {
            status: SummaryStatus::Error,
            message: ERROR_MESSAGE.to_string(),
        }
    };

    Ok(VerificationReport {
        group_name: None,
        gifts_per_participant: gifts.get(),
        total_participants: participants.len(),
        total_assignments,
        expected_assignments,
        is_valid,
        has_self_assignments,
        self_assignments,
        all_gives_correct,
        all_receives_correct,
        participants: reports,
        issues,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trio() -> Vec<Participant> {
        vec![
            Participant::new("a", "Alice"),
            Participant::new("b", "Bob").with_email("bob@example.com"),
            Participant::new("c", "Carol"),
        ]
    }

    fn ring() -> Vec<Assignment> {
        vec![
            Assignment::new("a", "b", 1),
            Assignment::new("b", "c", 1),
            Assignment::new("c", "a", 1),
        ]
    }

    #[test]
    fn valid_ring_passes() {
        let rep = verify(&trio(), &ring(), GiftCount::ONE).unwrap();
        assert!(rep.is_valid);
        assert!(rep.issues.is_empty());
        assert_eq!(rep.summary.status, SummaryStatus::Success);
        assert_eq!(rep.expected_assignments, 3);

        let bob = rep.participant(&"b".into()).unwrap();
        assert_eq!(bob.email.as_deref(), Some("bob@example.com"));
        assert_eq!(
            bob.assignments,
            vec![GiftDetail {
                receiver: "Carol".to_string(),
                gift_number: 1
            }]
        );
    }

    #[test]
    fn empty_set_reports_everyone_at_zero() {
        let rep = verify(&trio(), &[], GiftCount::ONE).unwrap();
        assert!(!rep.is_valid);
        assert_eq!(rep.total_assignments, 0);
        assert!(rep.participants.iter().all(|p| p.gives == 0 && p.receives == 0));
        assert_eq!(rep.incorrect_participants().count(), 3);
        assert_eq!(rep.summary.status, SummaryStatus::Error);
    }

    #[test]
    fn self_assignment_reported() {
        let mut asg = ring();
        asg[0].receiver_id = "a".into();
        let rep = verify(&trio(), &asg, GiftCount::ONE).unwrap();
        assert!(rep.has_self_assignments);
        assert!(!rep.is_valid);
        assert_eq!(
            rep.self_assignments,
            vec![SelfAssignment {
                person: "Alice".to_string(),
                gift_number: 1
            }]
        );
        assert!(rep.issues.iter().any(|i| i == "1 self-assignment(s) found"));
    }

    #[test]
    fn unknown_participant_is_an_issue() {
        let mut asg = ring();
        asg[2].giver_id = "zed".into();
        let rep = verify(&trio(), &asg, GiftCount::ONE).unwrap();
        assert!(!rep.is_valid);
        assert!(rep
            .issues
            .iter()
            .any(|i| i == "assignment references unknown participant zed"));
        assert_eq!(rep.participant(&"c".into()).unwrap().gives, 0);
    }

    #[test]
    fn details_sorted_by_gift_number() {
        let ps = trio();
        let asg = vec![
            Assignment::new("a", "c", 2),
            Assignment::new("a", "b", 1),
        ];
        let rep = verify(&ps, &asg, GiftCount::new(2).unwrap()).unwrap();
        let alice = rep.participant(&"a".into()).unwrap();
        let numbers: Vec<u8> = alice.assignments.iter().map(|d| d.gift_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn duplicate_participants_are_structural_errors() {
        let mut ps = trio();
        ps.push(Participant::new("a", "Alice again"));
        assert!(verify(&ps, &ring(), GiftCount::ONE).is_err());
    }

    #[test]
    fn group_name_attached() {
        let rep = verify(&trio(), &ring(), GiftCount::ONE)
            .unwrap()
            .with_group_name("Stewart Family Christmas");
        assert_eq!(rep.group_name.as_deref(), Some("Stewart Family Christmas"));
    }
}
