//! String-backed enum columns shared by the entities.
//!
//! Stored as VARCHAR with CHECK constraints rather than native Postgres
//! enum types, so the set of values stays visible in the schema SQL.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use salarium_core::salary;

/// Balance classification column (`employees.salary_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// No allocation has ever been applied.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Funds are allocated and untouched.
    #[sea_orm(string_value = "allocated")]
    Allocated,
    /// Some, but not all, allocated funds have been withdrawn.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// All allocated funds have been withdrawn.
    #[sea_orm(string_value = "exhausted")]
    Exhausted,
}

/// Allocation kind column (`salary_allocations.allocation_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AllocationType {
    /// The fixed recurring monthly entitlement.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// A discretionary bonus.
    #[sea_orm(string_value = "bonus")]
    Bonus,
    /// A salary advance.
    #[sea_orm(string_value = "advance")]
    Advance,
    /// A manual correction.
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
}

impl From<salary::SalaryStatus> for SalaryStatus {
    fn from(status: salary::SalaryStatus) -> Self {
        match status {
            salary::SalaryStatus::Pending => Self::Pending,
            salary::SalaryStatus::Allocated => Self::Allocated,
            salary::SalaryStatus::Partial => Self::Partial,
            salary::SalaryStatus::Exhausted => Self::Exhausted,
        }
    }
}

impl From<SalaryStatus> for salary::SalaryStatus {
    fn from(status: SalaryStatus) -> Self {
        match status {
            SalaryStatus::Pending => Self::Pending,
            SalaryStatus::Allocated => Self::Allocated,
            SalaryStatus::Partial => Self::Partial,
            SalaryStatus::Exhausted => Self::Exhausted,
        }
    }
}

impl From<salary::AllocationType> for AllocationType {
    fn from(allocation_type: salary::AllocationType) -> Self {
        match allocation_type {
            salary::AllocationType::Monthly => Self::Monthly,
            salary::AllocationType::Bonus => Self::Bonus,
            salary::AllocationType::Advance => Self::Advance,
            salary::AllocationType::Adjustment => Self::Adjustment,
        }
    }
}

impl From<AllocationType> for salary::AllocationType {
    fn from(allocation_type: AllocationType) -> Self {
        match allocation_type {
            AllocationType::Monthly => Self::Monthly,
            AllocationType::Bonus => Self::Bonus,
            AllocationType::Advance => Self::Advance,
            AllocationType::Adjustment => Self::Adjustment,
        }
    }
}
