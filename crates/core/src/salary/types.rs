//! Salary allocation domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::period::Period;

/// Kind of salary allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationType {
    /// The fixed recurring monthly entitlement.
    Monthly,
    /// A discretionary bonus.
    Bonus,
    /// A salary advance.
    Advance,
    /// A manual correction.
    Adjustment,
}

impl AllocationType {
    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Bonus => "bonus",
            Self::Advance => "advance",
            Self::Adjustment => "adjustment",
        }
    }

    /// Parses a type from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "bonus" => Some(Self::Bonus),
            "advance" => Some(Self::Advance),
            "adjustment" => Some(Self::Adjustment),
            _ => None,
        }
    }
}

impl fmt::Display for AllocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived classification of an employee's allocated-vs-withdrawn standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// No allocation has ever been applied.
    Pending,
    /// Funds are allocated and untouched.
    Allocated,
    /// Some, but not all, allocated funds have been withdrawn.
    Partial,
    /// All allocated funds have been withdrawn.
    Exhausted,
}

impl SalaryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Allocated => "allocated",
            Self::Partial => "partial",
            Self::Exhausted => "exhausted",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "allocated" => Some(Self::Allocated),
            "partial" => Some(Self::Partial),
            "exhausted" => Some(Self::Exhausted),
            _ => None,
        }
    }
}

impl fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The balance-bearing fields of an employee record.
///
/// `available_balance` is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeBalance {
    /// Fixed recurring monthly entitlement.
    pub monthly_salary: Decimal,
    /// Cumulative amount made available across periods. Monotonically
    /// non-decreasing except on explicit reset.
    pub period_allocated_amount: Decimal,
    /// Cumulative amount withdrawn. Monotonically non-decreasing.
    pub withdrawn_amount: Decimal,
    /// Latest period an allocation was applied for.
    pub current_period: Option<Period>,
    /// Timestamp of the most recent allocation event.
    pub last_salary_reset: Option<DateTime<Utc>>,
    /// Derived allocated-vs-withdrawn classification.
    pub salary_status: SalaryStatus,
}

impl EmployeeBalance {
    /// A fresh balance for a newly hired employee.
    #[must_use]
    pub fn new(monthly_salary: Decimal) -> Self {
        Self {
            monthly_salary,
            period_allocated_amount: Decimal::ZERO,
            withdrawn_amount: Decimal::ZERO,
            current_period: None,
            last_salary_reset: None,
            salary_status: SalaryStatus::Pending,
        }
    }

    /// Amount currently available to withdraw.
    #[must_use]
    pub fn available_balance(&self) -> Decimal {
        self.period_allocated_amount - self.withdrawn_amount
    }
}

/// A request to allocate funds to one employee.
#[derive(Debug, Clone)]
pub struct AllocationRequest {
    /// Amount to allocate. Must be positive.
    pub amount: Decimal,
    /// Kind of allocation.
    pub allocation_type: AllocationType,
    /// Optional free-text note for the audit ledger.
    pub notes: Option<String>,
}

/// The result of applying an allocation to a balance.
#[derive(Debug, Clone)]
pub struct AppliedAllocation {
    /// The balance after the allocation.
    pub balance: EmployeeBalance,
    /// The amount that was added.
    pub amount: Decimal,
    /// The period the allocation was recorded under.
    pub period: Period,
}
