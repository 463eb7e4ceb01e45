//! Assignment pipeline for Secret Santa groups.
//!
//! Two single-shot computations live here:
//! - `generate`: participants + gifts per participant -> balanced assignment set
//! - `verify`: participants + persisted assignments -> verification report
//!
//! Both are synchronous and perform no I/O. Callers (store, CLI) load
//! participants, persist results, and render reports.
//!
//! This module also defines the structured diagnostics collected during a
//! generator run. Diagnostics are intended for:
//! - CLI printing
//! - JSON payloads returned to the group-management layer
//! - tracing output

use std::collections::BTreeMap;

pub mod feasibility;
pub mod generate;
pub mod verify;

pub use generate::{generate, generate_with_config, GenerateReport, GenerateStats};
pub use verify::{verify, VerificationReport};

/// A structured diagnostic emitted while generating assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "BTreeMap::is_empty"))]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// Collects diagnostics for one run.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        level: DiagnosticLevel,
        code: impl Into<String>,
        message: impl Into<String>,
        data: BTreeMap<String, String>,
    ) {
        self.diagnostics.push(Diagnostic {
            level,
            code: code.into(),
            message: message.into(),
            data,
        });
    }

    pub fn push_info(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticLevel::Info, code, message, BTreeMap::new());
    }

    pub fn push_warning(
        &mut self,
        code: impl Into<String>,
        message: impl Into<String>,
        data: BTreeMap<String, String>,
    ) {
        self.push(DiagnosticLevel::Warning, code, message, data);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
