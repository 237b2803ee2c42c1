//! Unit tests for salary balance rules.

use chrono::{DateTime, Utc};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::SalaryError;
use super::service::SalaryService;
use super::types::{AllocationRequest, AllocationType, EmployeeBalance, SalaryStatus};
use crate::period::Period;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-05-17T09:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn may_2025() -> Period {
    Period::new(2025, 5).unwrap()
}

fn balance(monthly: Decimal, allocated: Decimal, withdrawn: Decimal) -> EmployeeBalance {
    EmployeeBalance {
        monthly_salary: monthly,
        period_allocated_amount: allocated,
        withdrawn_amount: withdrawn,
        current_period: None,
        last_salary_reset: None,
        salary_status: SalaryService::classify(allocated, withdrawn),
    }
}

fn monthly_request(amount: Decimal) -> AllocationRequest {
    AllocationRequest {
        amount,
        allocation_type: AllocationType::Monthly,
        notes: None,
    }
}

// ============================================================================
// Classifier
// ============================================================================

#[rstest]
#[case(dec!(0), dec!(0), SalaryStatus::Pending)]
#[case(dec!(1000), dec!(0), SalaryStatus::Allocated)]
#[case(dec!(1000), dec!(400), SalaryStatus::Partial)]
#[case(dec!(1000), dec!(1000), SalaryStatus::Exhausted)]
#[case(dec!(1000), dec!(999.99), SalaryStatus::Partial)]
#[case(dec!(1000), dec!(0.01), SalaryStatus::Partial)]
fn test_classify(
    #[case] allocated: Decimal,
    #[case] withdrawn: Decimal,
    #[case] expected: SalaryStatus,
) {
    assert_eq!(SalaryService::classify(allocated, withdrawn), expected);
}

// ============================================================================
// Allocation validation
// ============================================================================

#[test]
fn test_validate_rejects_zero_amount() {
    let result = SalaryService::validate_allocation(&monthly_request(dec!(0)), dec!(1000));
    assert_eq!(result, Err(SalaryError::NonPositiveAmount(dec!(0))));
}

#[test]
fn test_validate_rejects_negative_amount() {
    let result = SalaryService::validate_allocation(&monthly_request(dec!(-50)), dec!(1000));
    assert_eq!(result, Err(SalaryError::NonPositiveAmount(dec!(-50))));
}

#[test]
fn test_validate_rejects_monthly_over_salary() {
    let result = SalaryService::validate_allocation(&monthly_request(dec!(1001)), dec!(1000));
    assert_eq!(
        result,
        Err(SalaryError::ExceedsMonthlySalary {
            amount: dec!(1001),
            monthly_salary: dec!(1000),
        })
    );
}

#[test]
fn test_validate_accepts_monthly_at_salary() {
    assert!(SalaryService::validate_allocation(&monthly_request(dec!(1000)), dec!(1000)).is_ok());
}

#[rstest]
#[case(AllocationType::Bonus)]
#[case(AllocationType::Advance)]
#[case(AllocationType::Adjustment)]
fn test_salary_cap_does_not_apply_to_other_types(#[case] allocation_type: AllocationType) {
    let request = AllocationRequest {
        amount: dec!(5000),
        allocation_type,
        notes: None,
    };
    assert!(SalaryService::validate_allocation(&request, dec!(1000)).is_ok());
}

// ============================================================================
// Allocation application
// ============================================================================

#[test]
fn test_allocation_is_additive() {
    let before = balance(dec!(1000), dec!(700), dec!(0));
    let applied = SalaryService::apply_allocation(&before, dec!(1000), may_2025(), now());

    assert_eq!(applied.balance.period_allocated_amount, dec!(1700));
    assert_eq!(applied.balance.withdrawn_amount, dec!(0));
    assert_eq!(applied.balance.current_period, Some(may_2025()));
    assert_eq!(applied.balance.last_salary_reset, Some(now()));
    assert_eq!(applied.amount, dec!(1000));
    assert_eq!(applied.period, may_2025());
}

#[test]
fn test_allocation_never_reduces_available_balance() {
    let before = balance(dec!(1000), dec!(1000), dec!(300));
    let available_before = before.available_balance();

    let applied = SalaryService::apply_allocation(&before, dec!(1000), may_2025(), now());
    assert!(applied.balance.available_balance() >= available_before);
    assert_eq!(applied.balance.available_balance(), dec!(1700));
}

#[test]
fn test_allocation_reclassifies_status() {
    let pending = balance(dec!(1000), dec!(0), dec!(0));
    assert_eq!(pending.salary_status, SalaryStatus::Pending);

    let applied = SalaryService::apply_allocation(&pending, dec!(1000), may_2025(), now());
    assert_eq!(applied.balance.salary_status, SalaryStatus::Allocated);
}

// ============================================================================
// Withdrawal validation and application
// ============================================================================

#[test]
fn test_withdrawal_rejects_overdraft() {
    let b = balance(dec!(1000), dec!(1000), dec!(800));
    let result = SalaryService::validate_withdrawal(&b, dec!(300));
    assert_eq!(
        result,
        Err(SalaryError::InsufficientBalance {
            amount: dec!(300),
            available: dec!(200),
        })
    );
}

#[test]
fn test_withdrawal_rejects_non_positive() {
    let b = balance(dec!(1000), dec!(1000), dec!(0));
    assert_eq!(
        SalaryService::validate_withdrawal(&b, dec!(0)),
        Err(SalaryError::NonPositiveAmount(dec!(0)))
    );
}

#[test]
fn test_withdrawal_to_exact_balance_is_allowed() {
    let b = balance(dec!(1000), dec!(1000), dec!(400));
    assert!(SalaryService::validate_withdrawal(&b, dec!(600)).is_ok());

    let after = SalaryService::apply_withdrawal(&b, dec!(600));
    assert_eq!(after.available_balance(), dec!(0));
    assert_eq!(after.salary_status, SalaryStatus::Exhausted);
}

#[test]
fn test_withdrawal_reclassifies_to_partial() {
    let b = balance(dec!(1000), dec!(1000), dec!(0));
    let after = SalaryService::apply_withdrawal(&b, dec!(400));
    assert_eq!(after.withdrawn_amount, dec!(400));
    assert_eq!(after.salary_status, SalaryStatus::Partial);
}

// ============================================================================
// Full lifecycle scenario
// ============================================================================

#[test]
fn test_monthly_cycle_carries_unwithdrawn_balance() {
    let salary = dec!(1000000);
    let mut b = EmployeeBalance::new(salary);
    assert_eq!(b.salary_status, SalaryStatus::Pending);

    // First month's payday.
    let applied = SalaryService::apply_allocation(&b, salary, may_2025(), now());
    b = applied.balance;
    assert_eq!(b.period_allocated_amount, dec!(1000000));
    assert_eq!(b.salary_status, SalaryStatus::Allocated);

    // Employee withdraws part of it.
    b = SalaryService::apply_withdrawal(&b, dec!(300000));
    assert_eq!(b.salary_status, SalaryStatus::Partial);
    assert_eq!(b.available_balance(), dec!(700000));

    // Next period's payday: the unwithdrawn 700,000 is preserved.
    let june = may_2025().next();
    assert_eq!((june.year(), june.month()), (2025, 6));
    let applied = SalaryService::apply_allocation(&b, salary, june, now());
    b = applied.balance;
    assert_eq!(b.period_allocated_amount, dec!(2000000));
    assert_eq!(b.available_balance(), dec!(1700000));
    assert_eq!(b.salary_status, SalaryStatus::Partial);
    assert_eq!(b.current_period, Some(june));
}

// ============================================================================
// Note merging
// ============================================================================

#[rstest]
#[case(None, None, None)]
#[case(Some("first"), None, Some("first"))]
#[case(None, Some("second"), Some("second"))]
#[case(Some("first"), Some("second"), Some("first; second"))]
fn test_merge_notes(
    #[case] existing: Option<&str>,
    #[case] incoming: Option<&str>,
    #[case] expected: Option<&str>,
) {
    assert_eq!(
        SalaryService::merge_notes(existing, incoming),
        expected.map(ToString::to_string)
    );
}

// ============================================================================
// Type parsing
// ============================================================================

#[test]
fn test_allocation_type_roundtrip() {
    for t in [
        AllocationType::Monthly,
        AllocationType::Bonus,
        AllocationType::Advance,
        AllocationType::Adjustment,
    ] {
        assert_eq!(AllocationType::parse(t.as_str()), Some(t));
    }
    assert_eq!(AllocationType::parse("overtime"), None);
}

#[test]
fn test_salary_status_roundtrip() {
    for s in [
        SalaryStatus::Pending,
        SalaryStatus::Allocated,
        SalaryStatus::Partial,
        SalaryStatus::Exhausted,
    ] {
        assert_eq!(SalaryStatus::parse(s.as_str()), Some(s));
    }
    assert_eq!(SalaryStatus::parse("frozen"), None);
}
