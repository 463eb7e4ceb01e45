//! Error types for santa-core.
//!
//! Generation fails with a typed error rather than returning a partial
//! assignment set. Verification reports inconsistencies as data and only
//! returns an error for structurally invalid input.

use thiserror::Error;

/// Result alias used throughout the core crate.
pub type SantaResult<T> = Result<T, SantaError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SantaError {
    /// Too few participants for any valid exchange, or for the requested
    /// number of gifts per person.
    #[error(
        "need at least {required} participants for {gifts_per_participant} gifts per person, got {participants}"
    )]
    InsufficientParticipants {
        participants: usize,
        gifts_per_participant: u8,
        required: usize,
    },

    #[error("group has {participants} participants, the maximum is {max}")]
    TooManyParticipants { participants: usize, max: usize },

    /// No receiver could be chosen for a giver without breaking balance.
    #[error(
        "unable to find a valid receiver for {giver}; there may be too few participants for the requested number of gifts per person"
    )]
    AssignmentInfeasible { giver: String },

    /// Post-condition failure. Indicates a generator bug, never bad input.
    #[error("invalid assignment: {participant} was assigned to themselves")]
    SelfAssignmentDetected { participant: String },

    #[error("gifts per participant must be between 1 and 3, got {0}")]
    InvalidGiftCount(u32),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl SantaError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    /// True for errors the caller should surface as an actionable hint
    /// (fix the input and retry). False for internal bugs.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::SelfAssignmentDetected { .. } | Self::Invariant(_)
        )
    }

    /// Stable machine-readable code for diagnostics and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientParticipants { .. } => "insufficient_participants",
            Self::TooManyParticipants { .. } => "too_many_participants",
            Self::AssignmentInfeasible { .. } => "assignment_infeasible",
            Self::SelfAssignmentDetected { .. } => "self_assignment_detected",
            Self::InvalidGiftCount(_) => "invalid_gift_count",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Invariant(_) => "invariant",
        }
    }
}
