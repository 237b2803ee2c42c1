//! Salary balance rules: validation, additive application, classification.
//!
//! This module provides the core business logic for salary allocations
//! before they are persisted to the database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::SalaryError;
use super::types::{AllocationRequest, AllocationType, AppliedAllocation, EmployeeBalance, SalaryStatus};
use crate::period::Period;

/// Salary service for allocation validation and balance arithmetic.
///
/// This service contains pure business logic with no database dependencies.
/// Repositories call into it to validate requests and compute the new
/// balance before persistence.
pub struct SalaryService;

impl SalaryService {
    /// Derives the balance status from allocated and withdrawn totals.
    ///
    /// Rules:
    /// - never allocated (both totals zero) => `Pending`
    /// - withdrawn >= allocated => `Exhausted`
    /// - 0 < withdrawn < allocated => `Partial`
    /// - otherwise => `Allocated`
    #[must_use]
    pub fn classify(allocated: Decimal, withdrawn: Decimal) -> SalaryStatus {
        if allocated.is_zero() && withdrawn.is_zero() {
            SalaryStatus::Pending
        } else if withdrawn >= allocated {
            SalaryStatus::Exhausted
        } else if withdrawn > Decimal::ZERO {
            SalaryStatus::Partial
        } else {
            SalaryStatus::Allocated
        }
    }

    /// Validates an allocation request against the employee's balance.
    ///
    /// Checks the amount is positive and, for `monthly` allocations only,
    /// that it does not exceed the fixed monthly salary. Must be called
    /// before any write; a failed validation leaves balances untouched.
    ///
    /// # Errors
    ///
    /// Returns `SalaryError` if the request violates a rule.
    pub fn validate_allocation(
        request: &AllocationRequest,
        monthly_salary: Decimal,
    ) -> Result<(), SalaryError> {
        if request.amount <= Decimal::ZERO {
            return Err(SalaryError::NonPositiveAmount(request.amount));
        }

        // The cap applies to the recurring entitlement only; bonuses,
        // advances, and adjustments are uncapped.
        if request.allocation_type == AllocationType::Monthly && request.amount > monthly_salary {
            return Err(SalaryError::ExceedsMonthlySalary {
                amount: request.amount,
                monthly_salary,
            });
        }

        Ok(())
    }

    /// Applies an allocation to a balance, additively.
    ///
    /// The existing unwithdrawn balance is never reduced: the amount is
    /// added to `period_allocated_amount`, the period and reset timestamp
    /// are advanced, and the status is reclassified from the new totals.
    /// The caller must have validated the request first.
    #[must_use]
    pub fn apply_allocation(
        balance: &EmployeeBalance,
        amount: Decimal,
        period: Period,
        now: DateTime<Utc>,
    ) -> AppliedAllocation {
        let period_allocated_amount = balance.period_allocated_amount + amount;

        let balance = EmployeeBalance {
            monthly_salary: balance.monthly_salary,
            period_allocated_amount,
            withdrawn_amount: balance.withdrawn_amount,
            current_period: Some(period),
            last_salary_reset: Some(now),
            salary_status: Self::classify(period_allocated_amount, balance.withdrawn_amount),
        };

        AppliedAllocation {
            balance,
            amount,
            period,
        }
    }

    /// Validates a withdrawal against the available balance.
    ///
    /// Rejects non-positive amounts and amounts exceeding
    /// `available_balance`, keeping `withdrawn_amount` at or below
    /// `period_allocated_amount` at write time.
    ///
    /// # Errors
    ///
    /// Returns `SalaryError` if the withdrawal violates a rule.
    pub fn validate_withdrawal(
        balance: &EmployeeBalance,
        amount: Decimal,
    ) -> Result<(), SalaryError> {
        if amount <= Decimal::ZERO {
            return Err(SalaryError::NonPositiveAmount(amount));
        }

        let available = balance.available_balance();
        if amount > available {
            return Err(SalaryError::InsufficientBalance { amount, available });
        }

        Ok(())
    }

    /// Applies a withdrawal to a balance and reclassifies the status.
    ///
    /// The caller must have validated the withdrawal first.
    #[must_use]
    pub fn apply_withdrawal(balance: &EmployeeBalance, amount: Decimal) -> EmployeeBalance {
        let withdrawn_amount = balance.withdrawn_amount + amount;

        EmployeeBalance {
            withdrawn_amount,
            salary_status: Self::classify(balance.period_allocated_amount, withdrawn_amount),
            ..balance.clone()
        }
    }

    /// Merges a new ledger note onto an existing one.
    ///
    /// Re-allocating the same type in the same period appends the note to
    /// the existing ledger row rather than replacing it.
    #[must_use]
    pub fn merge_notes(existing: Option<&str>, incoming: Option<&str>) -> Option<String> {
        match (existing, incoming) {
            (Some(a), Some(b)) => Some(format!("{a}; {b}")),
            (Some(a), None) => Some(a.to_string()),
            (None, Some(b)) => Some(b.to_string()),
            (None, None) => None,
        }
    }
}
