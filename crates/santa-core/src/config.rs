//! Configuration structures for santa-core.
//!
//! This module defines explicit configuration objects used by higher-level
//! components (store, CLI) to control group size limits.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller.

use crate::errors::{SantaError, SantaResult};
use crate::model::GiftCount;

/// Hard floor for any exchange, independent of gifts per participant.
pub const MIN_PARTICIPANTS: usize = 3;

/// Global configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreConfig {
    pub limits: LimitsConfig,
}

/// Group size limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    pub min_participants: usize,
    pub max_participants: usize,
    pub max_gifts_per_participant: u8,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_participants: MIN_PARTICIPANTS,
            max_participants: 50,
            max_gifts_per_participant: GiftCount::MAX,
        }
    }
}

impl LimitsConfig {
    /// Participants needed for `gifts` gifts each: the hard floor, or one
    /// more than the gift count, whichever is larger.
    pub fn required_participants(&self, gifts: GiftCount) -> usize {
        self.min_participants.max(gifts.as_usize() + 1)
    }

    /// Check a group of `n` participants against the feasibility floor and
    /// the configured ceiling.
    pub fn check_group_size(&self, n: usize, gifts: GiftCount) -> SantaResult<()> {
        if gifts.get() > self.max_gifts_per_participant {
            return Err(SantaError::InvalidGiftCount(u32::from(gifts)));
        }

        let required = self.required_participants(gifts);
        if n < required {
            return Err(SantaError::InsufficientParticipants {
                participants: n,
                gifts_per_participant: gifts.get(),
                required,
            });
        }

        if n > self.max_participants {
            return Err(SantaError::TooManyParticipants {
                participants: n,
                max: self.max_participants,
            });
        }

        Ok(())
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &CoreConfig) -> SantaResult<()> {
    if cfg.limits.min_participants < MIN_PARTICIPANTS {
        return Err(SantaError::invalid_argument(format!(
            "min_participants must be at least {MIN_PARTICIPANTS}"
        )));
    }

    if cfg.limits.max_participants < cfg.limits.min_participants {
        return Err(SantaError::invalid_argument(
            "max_participants must not be below min_participants",
        ));
    }

    if !(GiftCount::MIN..=GiftCount::MAX).contains(&cfg.limits.max_gifts_per_participant) {
        return Err(SantaError::invalid_argument(format!(
            "max_gifts_per_participant must be between {} and {}",
            GiftCount::MIN,
            GiftCount::MAX
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gifts(n: u32) -> GiftCount {
        GiftCount::new(n).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = CoreConfig::default();
        validate_config(&cfg).unwrap();
    }

    #[test]
    fn low_floor_detected() {
        let mut cfg = CoreConfig::default();
        cfg.limits.min_participants = 2;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn inverted_limits_detected() {
        let mut cfg = CoreConfig::default();
        cfg.limits.max_participants = 2;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn required_participants_uses_floor() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.required_participants(gifts(1)), 3);
        assert_eq!(limits.required_participants(gifts(2)), 3);
        assert_eq!(limits.required_participants(gifts(3)), 4);
    }

    #[test]
    fn group_size_checks() {
        let limits = LimitsConfig::default();
        assert!(limits.check_group_size(2, gifts(1)).is_err());
        assert!(limits.check_group_size(3, gifts(1)).is_ok());
        assert!(limits.check_group_size(3, gifts(3)).is_err());
        assert!(limits.check_group_size(4, gifts(3)).is_ok());
        assert_eq!(
            limits.check_group_size(51, gifts(1)),
            Err(SantaError::TooManyParticipants {
                participants: 51,
                max: 50
            })
        );
    }

    #[test]
    fn gift_ceiling_applies() {
        let limits = LimitsConfig {
            max_gifts_per_participant: 2,
            ..LimitsConfig::default()
        };
        assert_eq!(
            limits.check_group_size(10, gifts(3)),
            Err(SantaError::InvalidGiftCount(3))
        );
    }
}
