//! Salary domain errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by salary balance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SalaryError {
    /// Allocation or withdrawal amount must be positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Monthly allocations may not exceed the employee's monthly salary.
    #[error("Monthly allocation {amount} exceeds monthly salary {monthly_salary}")]
    ExceedsMonthlySalary {
        /// Requested allocation amount.
        amount: Decimal,
        /// The employee's fixed monthly salary.
        monthly_salary: Decimal,
    },

    /// Withdrawal would overdraw the available balance.
    #[error("Withdrawal {amount} exceeds available balance {available}")]
    InsufficientBalance {
        /// Requested withdrawal amount.
        amount: Decimal,
        /// Available balance at the time of the request.
        available: Decimal,
    },
}
