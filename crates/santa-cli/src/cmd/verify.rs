use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use termcolor::StandardStream;

use santa_core::prelude::*;

use crate::cmd::{open_store, resolve_group};
use crate::io::input;
use crate::output;

pub fn run(participants_path: &str, assignments_path: &str, gifts: u32) -> Result<ExitCode> {
    let participants = input::read_participants(participants_path)?;
    let assignments = input::read_assignments(assignments_path)?;
    let gifts = GiftCount::new(gifts)?;

    let report = verify(&participants, &assignments, gifts)?;
    finish(&report)
}

/// Verify the assignments persisted for a group.
pub fn audit(store_root: &str, group: &str) -> Result<ExitCode> {
    let store = open_store(store_root)?;
    let group = resolve_group(&store, group)?;
    let report = store.verify_group(&group.id)?;
    finish(&report)
}

fn finish(report: &VerificationReport) -> Result<ExitCode> {
    output::emit(report, |w| render(w, report))?;
    Ok(if report.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render(w: &mut StandardStream, report: &VerificationReport) -> io::Result<()> {
    if let Some(name) = &report.group_name {
        writeln!(w, "group: {name}")?;
    }
    writeln!(
        w,
        "{} participants, {} of {} assignments, {} gift(s) each",
        report.total_participants,
        report.total_assignments,
        report.expected_assignments,
        report.gifts_per_participant
    )?;
    for p in report.incorrect_participants() {
        writeln!(
            w,
            "  {}: gives {}/{}, receives {}/{}",
            p.name, p.gives, p.expected_gives, p.receives, p.expected_receives
        )?;
    }
    for issue in &report.issues {
        writeln!(w, "  - {issue}")?;
    }
    output::status_line(w, report.is_valid, &report.summary.message)
}
