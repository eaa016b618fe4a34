//! Property-Based Test Generators
//!
//! proptest strategies that produce claim figures on either side of the
//! default submission ceilings.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{ClaimCandidate, ClaimStatus};

/// Positive amounts with up to two decimal places, below `max`
fn positive_decimal_below(max_hundredths: i64) -> impl Strategy<Value = Decimal> {
    (1i64..max_hundredths).prop_map(|n| Decimal::new(n, 2))
}

/// Hours inside the default ceiling (0.01 to 252)
pub fn valid_hours_strategy() -> impl Strategy<Value = Decimal> {
    positive_decimal_below(25_201)
}

/// Rates inside the default ceiling (0.01 to 200)
pub fn valid_rate_strategy() -> impl Strategy<Value = Decimal> {
    positive_decimal_below(20_001)
}

/// Hours strictly above the default ceiling
pub fn excessive_hours_strategy() -> impl Strategy<Value = Decimal> {
    (25_201i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Rates strictly above the default ceiling
pub fn excessive_rate_strategy() -> impl Strategy<Value = Decimal> {
    (20_001i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Zero or negative figures
pub fn non_positive_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..=0i64).prop_map(|n| Decimal::new(n, 2))
}

/// Lecturer names with at least one visible character
pub fn lecturer_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,12}( [A-Z][a-z]{1,12})?"
}

/// Candidates that pass validation and the default ceilings
pub fn acceptable_candidate_strategy() -> impl Strategy<Value = ClaimCandidate> {
    (lecturer_name_strategy(), valid_hours_strategy(), valid_rate_strategy())
        .prop_map(|(name, hours, rate)| ClaimCandidate::new(name, hours, rate))
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::rules::{DEFAULT_MAX_HOURLY_RATE, DEFAULT_MAX_HOURS};

    proptest! {
        #[test]
        fn valid_hours_within_ceiling(hours in valid_hours_strategy()) {
            prop_assert!(hours > Decimal::ZERO);
            prop_assert!(hours <= DEFAULT_MAX_HOURS);
        }

        #[test]
        fn excessive_rates_above_ceiling(rate in excessive_rate_strategy()) {
            prop_assert!(rate > DEFAULT_MAX_HOURLY_RATE);
        }

        #[test]
        fn names_are_not_blank(name in lecturer_name_strategy()) {
            prop_assert!(!name.trim().is_empty());
        }
    }
}
