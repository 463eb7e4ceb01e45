//! Balanced assignment generation.
//!
//! Givers are processed in participant order. For each gift a giver owes,
//! the candidates (everyone else this giver has not picked yet) are shuffled
//! with the injected random source and then ordered by current receive
//! count, so the least-served receiver wins and ties break uniformly at
//! random. A candidate is only taken if the remaining picks can still be
//! completed into a perfectly balanced set (`feasibility::completable`).
//!
//! Guarantees, for `n >= max(3, k + 1)` participants and `k` gifts each:
//! - no self-assignments
//! - no giver picks the same receiver twice
//! - every giver's gift numbers are exactly `1..=k`
//! - every participant gives exactly `k` and receives exactly `k`
//!
//! The balance guarantee holds because the fresh problem is always
//! completable (the circulant `i -> i+1, ..., i+k` is a witness) and every
//! accepted pick keeps it completable.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::config::CoreConfig;
use crate::errors::{SantaError, SantaResult};
use crate::model::{validate, Assignment, GiftCount, Participant};
use crate::pipeline::{feasibility, Diagnostic, DiagnosticLevel, DiagnosticSink};

/// Counters for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerateStats {
    pub participants: usize,
    pub gifts_per_participant: u8,
    pub total_assignments: usize,
    pub min_received: usize,
    pub max_received: usize,
}

/// Output of a generator run: the ordered triples plus diagnostics and stats.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerateReport {
    pub assignments: Vec<Assignment>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: GenerateStats,
}

impl GenerateReport {
    pub fn warnings(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.level, DiagnosticLevel::Warning))
            .count()
    }
}

/// Generate assignments with the default configuration.
pub fn generate<R>(
    participants: &[Participant],
    gifts: GiftCount,
    rng: &mut R,
) -> SantaResult<GenerateReport>
where
    R: Rng + ?Sized,
{
    generate_with_config(participants, gifts, &CoreConfig::default(), rng)
}

/// Generate assignments for `participants`, each giving and receiving `gifts`.
///
/// Fails without partial output when the group is too small or too large,
/// when ids repeat, or when no balanced completion exists for some giver.
pub fn generate_with_config<R>(
    participants: &[Participant],
    gifts: GiftCount,
    cfg: &CoreConfig,
    rng: &mut R,
) -> SantaResult<GenerateReport>
where
    R: Rng + ?Sized,
{
    validate::non_empty_ids(participants)?;
    validate::unique_participants(participants)?;
    cfg.limits.check_group_size(participants.len(), gifts)?;

    let mut sink = DiagnosticSink::new();
    sink.push_info(
        "generate.start",
        format!(
            "generating {} gift(s) each for {} participants",
            gifts,
            participants.len()
        ),
    );

    // Each giver has exactly `k` possible receivers, so the outcome is
    // fixed and everyone can deduce it.
    if participants.len() == gifts.as_usize() + 1 {
        warn!(
            participants = participants.len(),
            gifts = gifts.get(),
            "group is at the minimum size, draw is forced"
        );
        let mut data = BTreeMap::new();
        data.insert("participants".to_string(), participants.len().to_string());
        data.insert("giftsPerParticipant".to_string(), gifts.to_string());
        sink.push_warning(
            "draw.forced",
            format!(
                "with {} participants and {} gifts each, everyone buys for everyone else",
                participants.len(),
                gifts
            ),
            data,
        );
    }

    let mut state = DrawState::new(participants.len(), gifts.as_usize());
    let mut assignments = Vec::with_capacity(participants.len() * gifts.as_usize());

    for (g, giver) in participants.iter().enumerate() {
        for gift_number in 1..=gifts.get() {
            let mut candidates: Vec<usize> = (0..participants.len())
                .filter(|&v| v != g && !state.used[g][v])
                .collect();
            candidates.shuffle(rng);
            // Stable sort: shuffled order survives among equal counts.
            candidates.sort_by_key(|&v| state.received[v]);

            let receiver = candidates
                .into_iter()
                .find(|&v| state.accepts(g, v))
                .ok_or_else(|| SantaError::AssignmentInfeasible {
                    giver: giver.display_name().to_string(),
                })?;

            state.commit(g, receiver);
            debug!(
                giver = %giver.id,
                receiver = %participants[receiver].id,
                gift_number,
                "assigned receiver"
            );

            assignments.push(Assignment {
                giver_id: giver.id.clone(),
                receiver_id: participants[receiver].id.clone(),
                gift_number,
            });
        }
    }

    if let Some(bad) = assignments.iter().find(|a| a.is_self_assignment()) {
        let name = participants
            .iter()
            .find(|p| p.id == bad.giver_id)
            .map(|p| p.display_name().to_string())
            .unwrap_or_else(|| bad.giver_id.to_string());
        error!(participant = %bad.giver_id, "generator produced a self-assignment");
        return Err(SantaError::SelfAssignmentDetected { participant: name });
    }

    let min_received = state.received.iter().copied().min().unwrap_or(0);
    let max_received = state.received.iter().copied().max().unwrap_or(0);
    if min_received != gifts.as_usize() || max_received != gifts.as_usize() {
        error!(min_received, max_received, "generator produced unbalanced receive counts");
        return Err(SantaError::invariant(format!(
            "receive counts range from {min_received} to {max_received}, expected {gifts}"
        )));
    }

    info!(
        participants = participants.len(),
        assignments = assignments.len(),
        "generated assignments"
    );
    sink.push_info(
        "generate.done",
        format!("generated {} assignments", assignments.len()),
    );

    let stats = GenerateStats {
        participants: participants.len(),
        gifts_per_participant: gifts.get(),
        total_assignments: assignments.len(),
        min_received,
        max_received,
    };

    Ok(GenerateReport {
        assignments,
        diagnostics: sink.into_vec(),
        stats,
    })
}

/// Per-run bookkeeping, indexed by participant position.
#[derive(Debug)]
struct DrawState {
    gifts: usize,
    received: Vec<usize>,
    owed: Vec<usize>,
    used: Vec<Vec<bool>>,
}

impl DrawState {
    fn new(n: usize, gifts: usize) -> Self {
        Self {
            gifts,
            received: vec![0; n],
            owed: vec![gifts; n],
            used: vec![vec![false; n]; n],
        }
    }

    /// Would picking `giver -> receiver` leave a completable problem?
    fn accepts(&mut self, giver: usize, receiver: usize) -> bool {
        if giver == receiver || self.used[giver][receiver] || self.received[receiver] >= self.gifts
        {
            return false;
        }

        self.commit(giver, receiver);
        let need: Vec<usize> = self.received.iter().map(|&r| self.gifts - r).collect();
        let ok = feasibility::completable(&self.owed, &need, &self.used);
        self.rollback(giver, receiver);
        ok
    }

    fn commit(&mut self, giver: usize, receiver: usize) {
        self.owed[giver] -= 1;
        self.received[receiver] += 1;
        self.used[giver][receiver] = true;
    }

    fn rollback(&mut self, giver: usize, receiver: usize) {
        self.owed[giver] += 1;
        self.received[receiver] -= 1;
        self.used[giver][receiver] = false;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use assert_matches::assert_matches;

    use super::*;
    use crate::determinism::rng::seeded;

    fn people(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| Participant::new(format!("p{i}"), format!("Person {i}")))
            .collect()
    }

    fn gifts(n: u32) -> GiftCount {
        GiftCount::new(n).unwrap()
    }

    #[test]
    fn three_people_one_gift_is_a_derangement() {
        let ps = people(3);
        for seed in 0..32 {
            let rep = generate(&ps, gifts(1), &mut seeded(seed)).unwrap();
            assert_eq!(rep.assignments.len(), 3);

            let receivers: HashSet<_> = rep.assignments.iter().map(|a| &a.receiver_id).collect();
            assert_eq!(receivers.len(), 3, "seed {seed}");
            assert!(rep.assignments.iter().all(|a| !a.is_self_assignment()));
        }
    }

    #[test]
    fn two_people_rejected_despite_small_gift_count() {
        let e = generate(&people(2), gifts(1), &mut seeded(1)).unwrap_err();
        assert_matches!(
            e,
            SantaError::InsufficientParticipants {
                participants: 2,
                required: 3,
                ..
            }
        );
    }

    #[test]
    fn gift_count_boundary() {
        let rep = generate(&people(4), gifts(3), &mut seeded(3)).unwrap();
        assert_eq!(rep.assignments.len(), 12);

        let e = generate(&people(3), gifts(3), &mut seeded(3)).unwrap_err();
        assert_matches!(e, SantaError::InsufficientParticipants { required: 4, .. });
    }

    #[test]
    fn gift_numbers_are_sequential_per_giver() {
        let rep = generate(&people(7), gifts(3), &mut seeded(11)).unwrap();
        let mut by_giver: HashMap<_, Vec<u8>> = HashMap::new();
        for a in &rep.assignments {
            by_giver.entry(a.giver_id.clone()).or_default().push(a.gift_number);
        }
        for numbers in by_giver.values() {
            assert_eq!(numbers, &vec![1, 2, 3]);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let ps = people(9);
        let a = generate(&ps, gifts(2), &mut seeded(42)).unwrap();
        let b = generate(&ps, gifts(2), &mut seeded(42)).unwrap();
        assert_eq!(a.assignments, b.assignments);
    }

    #[test]
    fn stats_report_exact_balance() {
        let rep = generate(&people(10), gifts(2), &mut seeded(5)).unwrap();
        assert_eq!(rep.stats.total_assignments, 20);
        assert_eq!(rep.stats.min_received, 2);
        assert_eq!(rep.stats.max_received, 2);
        assert_eq!(rep.warnings(), 0);
    }

    #[test]
    fn minimum_size_group_warns_forced_draw() {
        let rep = generate(&people(4), gifts(3), &mut seeded(2)).unwrap();
        assert_eq!(rep.warnings(), 1);
        let forced = rep
            .diagnostics
            .iter()
            .find(|d| d.code == "draw.forced")
            .unwrap();
        assert_eq!(forced.level, DiagnosticLevel::Warning);
        assert_eq!(forced.data.get("participants").map(String::as_str), Some("4"));

        let rep = generate(&people(5), gifts(3), &mut seeded(2)).unwrap();
        assert_eq!(rep.warnings(), 0);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut ps = people(4);
        ps[3].id = ps[0].id.clone();
        let e = generate(&ps, gifts(1), &mut seeded(0)).unwrap_err();
        assert_matches!(e, SantaError::InvalidArgument(_));
    }

    #[test]
    fn too_many_participants_rejected() {
        let e = generate(&people(51), gifts(1), &mut seeded(0)).unwrap_err();
        assert_matches!(e, SantaError::TooManyParticipants { max: 50, .. });
    }

    #[test]
    fn draw_state_refuses_full_receivers() {
        let mut st = DrawState::new(3, 1);
        st.commit(0, 1);
        assert!(!st.accepts(2, 1));
        assert!(!st.accepts(1, 1));
        assert!(st.accepts(1, 2));
        // A -> B then B -> A would strand C.
        assert!(!st.accepts(1, 0));
    }
}
