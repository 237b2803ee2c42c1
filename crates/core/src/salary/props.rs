//! Property-based tests for salary balance arithmetic.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::SalaryService;
use super::types::{EmployeeBalance, SalaryStatus};
use crate::period::Period;

/// Strategy to generate non-negative decimal amounts (0.00 to 10,000,000.00).
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate strictly positive decimal amounts.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a period.
fn period() -> impl Strategy<Value = Period> {
    (2000i32..2100, 1u32..=12).prop_map(|(y, m)| Period::new(y, m).unwrap())
}

fn balance(allocated: Decimal, withdrawn: Decimal) -> EmployeeBalance {
    EmployeeBalance {
        monthly_salary: Decimal::new(100_000, 2),
        period_allocated_amount: allocated,
        withdrawn_amount: withdrawn,
        current_period: None,
        last_salary_reset: None,
        salary_status: SalaryService::classify(allocated, withdrawn),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Allocation adds exactly the requested amount, never overwrites.
    #[test]
    fn prop_allocation_is_exactly_additive(
        allocated in non_negative_amount(),
        withdrawn in non_negative_amount(),
        amount in positive_amount(),
        p in period(),
    ) {
        let before = balance(allocated, withdrawn);
        let now = Utc.with_ymd_and_hms(2025, 5, 17, 12, 0, 0).unwrap();
        let applied = SalaryService::apply_allocation(&before, amount, p, now);

        prop_assert_eq!(
            applied.balance.period_allocated_amount,
            allocated + amount
        );
        prop_assert_eq!(applied.balance.withdrawn_amount, withdrawn);
    }

    /// An allocation never reduces the available balance.
    #[test]
    fn prop_allocation_never_reduces_available(
        allocated in non_negative_amount(),
        withdrawn in non_negative_amount(),
        amount in positive_amount(),
        p in period(),
    ) {
        let before = balance(allocated, withdrawn);
        let now = Utc.with_ymd_and_hms(2025, 5, 17, 12, 0, 0).unwrap();
        let applied = SalaryService::apply_allocation(&before, amount, p, now);

        prop_assert!(applied.balance.available_balance() >= before.available_balance());
    }

    /// The classifier is total and consistent with its defining rule.
    #[test]
    fn prop_classifier_matches_rule(
        allocated in non_negative_amount(),
        withdrawn in non_negative_amount(),
    ) {
        let status = SalaryService::classify(allocated, withdrawn);
        let expected = if allocated.is_zero() && withdrawn.is_zero() {
            SalaryStatus::Pending
        } else if withdrawn >= allocated {
            SalaryStatus::Exhausted
        } else if withdrawn > Decimal::ZERO {
            SalaryStatus::Partial
        } else {
            SalaryStatus::Allocated
        };
        prop_assert_eq!(status, expected);
    }

    /// A validated withdrawal never drives the available balance negative.
    #[test]
    fn prop_validated_withdrawal_never_overdraws(
        allocated in non_negative_amount(),
        withdrawn in non_negative_amount(),
        amount in positive_amount(),
    ) {
        // Start from a coherent balance (withdrawn <= allocated).
        let (allocated, withdrawn) = if withdrawn > allocated {
            (withdrawn, allocated)
        } else {
            (allocated, withdrawn)
        };
        let before = balance(allocated, withdrawn);

        if SalaryService::validate_withdrawal(&before, amount).is_ok() {
            let after = SalaryService::apply_withdrawal(&before, amount);
            prop_assert!(after.available_balance() >= Decimal::ZERO);
            prop_assert_eq!(after.withdrawn_amount, withdrawn + amount);
        }
    }

    /// Period tokens roundtrip through their canonical string form.
    #[test]
    fn prop_period_string_roundtrip(p in period()) {
        let token = p.to_string();
        let parsed: Period = token.parse().unwrap();
        prop_assert_eq!(parsed, p);
    }
}
