//! Submission rules
//!
//! The thresholds that decide whether a valid claim enters the review queue or
//! is rejected on arrival. Rule revisions are configuration: callers load a
//! [`ClaimRules`] value (for example through the `config` crate) instead of
//! branching in code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::claim::{ClaimCandidate, ClaimStatus};
use crate::document::DocumentPolicy;

/// Default ceiling on hours per claim
pub const DEFAULT_MAX_HOURS: Decimal = dec!(252);
/// Default ceiling on the hourly rate
pub const DEFAULT_MAX_HOURLY_RATE: Decimal = dec!(200);

/// Configurable business rules applied at submission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimRules {
    /// Claims with more hours than this are rejected on submission
    pub max_hours: Decimal,
    /// Claims with a higher hourly rate than this are rejected on submission
    pub max_hourly_rate: Decimal,
    /// Which supporting documents are accepted
    pub documents: DocumentPolicy,
}

impl Default for ClaimRules {
    fn default() -> Self {
        Self {
            max_hours: DEFAULT_MAX_HOURS,
            max_hourly_rate: DEFAULT_MAX_HOURLY_RATE,
            documents: DocumentPolicy::default(),
        }
    }
}

impl ClaimRules {
    pub fn with_max_hours(mut self, max_hours: Decimal) -> Self {
        self.max_hours = max_hours;
        self
    }

    pub fn with_max_hourly_rate(mut self, max_hourly_rate: Decimal) -> Self {
        self.max_hourly_rate = max_hourly_rate;
        self
    }

    pub fn with_documents(mut self, documents: DocumentPolicy) -> Self {
        self.documents = documents;
        self
    }

    /// Applies the automatic rejection thresholds
    ///
    /// The hours ceiling is checked before the rate ceiling, so a claim that
    /// breaks both is explained by its hours.
    pub fn assess(&self, candidate: &ClaimCandidate) -> Assessment {
        if candidate.hours_worked > self.max_hours {
            return Assessment::AutoReject(AutoRejection::HoursExceeded {
                hours_worked: candidate.hours_worked,
                limit: self.max_hours,
            });
        }
        if candidate.hourly_rate > self.max_hourly_rate {
            return Assessment::AutoReject(AutoRejection::RateExceeded {
                hourly_rate: candidate.hourly_rate,
                limit: self.max_hourly_rate,
            });
        }
        Assessment::Accept
    }
}

/// Outcome of [`ClaimRules::assess`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assessment {
    /// Goes to the review queue
    Accept,
    /// Stored as rejected with an explanation
    AutoReject(AutoRejection),
}

impl Assessment {
    /// Status the claim is stored with
    pub fn initial_status(&self) -> ClaimStatus {
        match self {
            Assessment::Accept => ClaimStatus::Pending,
            Assessment::AutoReject(_) => ClaimStatus::Rejected,
        }
    }
}

/// Which threshold a claim broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoRejection {
    HoursExceeded { hours_worked: Decimal, limit: Decimal },
    RateExceeded { hourly_rate: Decimal, limit: Decimal },
}

impl AutoRejection {
    /// Explanation written into the claim's notes
    pub fn note(&self) -> String {
        match self {
            AutoRejection::HoursExceeded { hours_worked, limit } => format!(
                "Automatically rejected: {} hours worked exceeds the maximum of {} hours per claim.",
                hours_worked.normalize(),
                limit.normalize()
            ),
            AutoRejection::RateExceeded { hourly_rate, limit } => format!(
                "Automatically rejected: hourly rate of {} exceeds the maximum hourly rate of {}.",
                hourly_rate.normalize(),
                limit.normalize()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(hours: Decimal, rate: Decimal) -> ClaimCandidate {
        ClaimCandidate::new("A", hours, rate)
    }

    #[test]
    fn test_within_limits_is_accepted() {
        let rules = ClaimRules::default();
        assert_eq!(rules.assess(&candidate(dec!(10), dec!(50))), Assessment::Accept);
        assert_eq!(rules.assess(&candidate(dec!(252), dec!(200))), Assessment::Accept);
    }

    #[test]
    fn test_hours_over_limit() {
        let assessment = ClaimRules::default().assess(&candidate(dec!(300), dec!(50)));
        assert_eq!(assessment.initial_status(), ClaimStatus::Rejected);
        match assessment {
            Assessment::AutoReject(rejection) => {
                let note = rejection.note();
                assert!(note.contains("300 hours"));
                assert!(note.contains("252 hours"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_over_limit() {
        let assessment = ClaimRules::default().assess(&candidate(dec!(10), dec!(200.01)));
        match assessment {
            Assessment::AutoReject(rejection @ AutoRejection::RateExceeded { .. }) => {
                assert!(rejection.note().contains("hourly rate of 200.01"));
                assert!(rejection.note().contains("maximum hourly rate of 200"));
            }
            other => panic!("expected rate rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_hours_checked_before_rate() {
        let assessment = ClaimRules::default().assess(&candidate(dec!(253), dec!(500)));
        assert!(matches!(
            assessment,
            Assessment::AutoReject(AutoRejection::HoursExceeded { .. })
        ));
    }

    #[test]
    fn test_configured_ceilings() {
        let rules = ClaimRules::default()
            .with_max_hours(dec!(40))
            .with_max_hourly_rate(dec!(75));
        assert!(matches!(
            rules.assess(&candidate(dec!(41), dec!(10))),
            Assessment::AutoReject(AutoRejection::HoursExceeded { .. })
        ));
        assert!(matches!(
            rules.assess(&candidate(dec!(40), dec!(76))),
            Assessment::AutoReject(AutoRejection::RateExceeded { .. })
        ));
    }

    #[test]
    fn test_rules_deserialize_with_defaults() {
        let rules: ClaimRules = serde_json::from_str(r#"{"max_hours": "160"}"#).unwrap();
        assert_eq!(rules.max_hours, dec!(160));
        assert_eq!(rules.max_hourly_rate, DEFAULT_MAX_HOURLY_RATE);
        assert_eq!(rules.documents, DocumentPolicy::default());
    }
}
