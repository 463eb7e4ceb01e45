//! santa-core
//!
//! Core primitives for Secret Santa exchanges:
//! - Participant / GiftCount / Assignment models
//! - Explicit configuration (group size limits, balance tolerance)
//! - Balanced assignment generation with an injectable random source
//! - Assignment verification reports
//!
//! The crate performs no I/O. Loading participants and persisting
//! assignments is the caller's job (see `santa-store`).

pub mod config;
pub mod determinism;
pub mod errors;
pub mod model;
pub mod pipeline;

pub use crate::errors::{SantaError, SantaResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{validate_config, CoreConfig, LimitsConfig};
    pub use crate::determinism::rng::{from_entropy, from_optional_seed, seeded};
    pub use crate::model::{Assignment, GiftCount, Participant, ParticipantId};
    pub use crate::pipeline::verify::{ParticipantReport, SummaryStatus};
    pub use crate::pipeline::{
        generate, generate_with_config, verify, Diagnostic, DiagnosticLevel, GenerateReport,
        GenerateStats, VerificationReport,
    };
    pub use crate::{SantaError, SantaResult};
}
