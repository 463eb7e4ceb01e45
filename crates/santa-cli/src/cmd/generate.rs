use std::collections::HashMap;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;

use santa_core::prelude::*;

use crate::io::{export, input};
use crate::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenOut<'a> {
    pub out: &'a str,
    pub stats: &'a GenerateStats,
    pub diagnostics: &'a [Diagnostic],
}

pub fn run(participants_path: &str, gifts: u32, seed: Option<u64>, out: Option<&str>) -> Result<ExitCode> {
    let participants = input::read_participants(participants_path)?;
    let gifts = GiftCount::new(gifts)?;
    let mut rng = from_optional_seed(seed);

    let report = generate(&participants, gifts, &mut rng)?;

    if let Some(path) = out {
        export::write_json_file(path, &report.assignments)?;
        let written = WrittenOut {
            out: path,
            stats: &report.stats,
            diagnostics: &report.diagnostics,
        };
        output::emit(&written, |w| {
            output::status_line(
                w,
                true,
                &format!("wrote {} assignments to {path}", report.stats.total_assignments),
            )?;
            warnings(w, &report.diagnostics)
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    let names: HashMap<&ParticipantId, &str> = participants
        .iter()
        .map(|p| (&p.id, p.display_name()))
        .collect();
    output::emit(&report, |w| {
        for a in &report.assignments {
            let giver = names.get(&a.giver_id).copied().unwrap_or(a.giver_id.as_str());
            let receiver = names.get(&a.receiver_id).copied().unwrap_or(a.receiver_id.as_str());
            writeln!(w, "{giver} -> {receiver} (gift {})", a.gift_number)?;
        }
        warnings(w, &report.diagnostics)
    })?;
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn warnings(
    w: &mut termcolor::StandardStream,
    diagnostics: &[Diagnostic],
) -> std::io::Result<()> {
    for d in diagnostics
        .iter()
        .filter(|d| matches!(d.level, DiagnosticLevel::Warning))
    {
        output::warn_line(w, &d.message)?;
    }
    Ok(())
}
