//! Salary allocation repository.
//!
//! Owns the atomic allocation transaction: the ledger upsert and the
//! employee balance update are applied together or not at all, with the
//! employee row locked against concurrent allocations for the same period.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use salarium_core::period::Period;
use salarium_core::salary::{AllocationRequest, AllocationType, SalaryError, SalaryService};
use salarium_shared::types::AllocationId;

use crate::entities::{employees, salary_allocations};

/// Error types for allocation operations.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    /// Employee not found.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(Uuid),

    /// Employee is deactivated.
    #[error("Employee is not active: {0}")]
    EmployeeInactive(Uuid),

    /// Balance rule violation.
    #[error(transparent)]
    Salary(#[from] SalaryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AllocationError> for salarium_shared::AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::EmployeeNotFound(_) => Self::NotFound(err.to_string()),
            AllocationError::EmployeeInactive(_)
            | AllocationError::Salary(SalaryError::InsufficientBalance { .. }) => {
                Self::BusinessRule(err.to_string())
            }
            AllocationError::Salary(_) => Self::Validation(err.to_string()),
            AllocationError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for recording a single allocation.
#[derive(Debug, Clone)]
pub struct RecordAllocationInput {
    /// Target employee.
    pub employee_id: Uuid,
    /// Amount to allocate. Must be positive.
    pub amount: Decimal,
    /// Kind of allocation.
    pub allocation_type: AllocationType,
    /// Optional free-text note for the audit ledger.
    pub notes: Option<String>,
    /// Acting administrator.
    pub allocated_by: Uuid,
}

/// The committed result of one allocation.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// Employee row after the balance update.
    pub employee: employees::Model,
    /// Ledger row after the upsert.
    pub ledger_row: salary_allocations::Model,
    /// Period the allocation was recorded under.
    pub period: Period,
}

/// The committed result of a bulk monthly run.
#[derive(Debug, Clone)]
pub struct BulkAllocationOutcome {
    /// Employees that received this period's monthly allocation.
    pub allocated: Vec<employees::Model>,
    /// Employees skipped because they already had a monthly ledger row
    /// for the period.
    pub skipped: u64,
    /// Period the run was recorded under.
    pub period: Period,
}

/// Salary allocation repository.
#[derive(Debug, Clone)]
pub struct SalaryRepository {
    db: DatabaseConnection,
}

impl SalaryRepository {
    /// Creates a new salary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records one allocation atomically.
    ///
    /// Within a single transaction, with the employee row locked:
    /// 1. Upserts the ledger row for (employee, period, type) - an existing
    ///    row has the amount added and the note appended.
    /// 2. Adds the amount to `period_allocated_amount`.
    /// 3. Advances `current_period` and `last_salary_reset`.
    /// 4. Reclassifies `salary_status`.
    ///
    /// Validation failures abort before any write; persistence failures
    /// roll everything back.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is missing or inactive, the request
    /// violates a balance rule, or the transaction fails.
    pub async fn record_allocation(
        &self,
        input: RecordAllocationInput,
        now: DateTime<Utc>,
    ) -> Result<AllocationOutcome, AllocationError> {
        let period = Period::containing(now);
        let txn = self.db.begin().await?;

        let employee = employees::Entity::find_by_id(input.employee_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(AllocationError::EmployeeNotFound(input.employee_id))?;

        if !employee.is_active {
            return Err(AllocationError::EmployeeInactive(input.employee_id));
        }

        let request = AllocationRequest {
            amount: input.amount,
            allocation_type: input.allocation_type,
            notes: input.notes,
        };

        let (employee, ledger_row) =
            Self::allocate_in_txn(&txn, employee, &request, input.allocated_by, period, now)
                .await?;

        txn.commit().await?;

        Ok(AllocationOutcome {
            employee,
            ledger_row,
            period,
        })
    }

    /// Runs the monthly allocation for every eligible employee.
    ///
    /// Eligible means active with a positive monthly salary. The whole run
    /// is one transaction; eligible rows are locked up front. Employees
    /// that already have a monthly ledger row for the current period are
    /// skipped, so re-running within a period is safe and allocates
    /// nothing twice.
    ///
    /// # Errors
    ///
    /// Returns an error if any allocation in the batch fails; the whole
    /// batch rolls back.
    pub async fn allocate_monthly_for_all(
        &self,
        allocated_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<BulkAllocationOutcome, AllocationError> {
        let period = Period::containing(now);
        let txn = self.db.begin().await?;

        let eligible = employees::Entity::find()
            .filter(employees::Column::IsActive.eq(true))
            .filter(employees::Column::MonthlySalary.gt(Decimal::ZERO))
            .order_by_asc(employees::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await?;

        let mut allocated = Vec::with_capacity(eligible.len());
        let mut skipped = 0u64;

        for employee in eligible {
            let already_allocated = Self::find_ledger_row(
                &txn,
                employee.id,
                period,
                AllocationType::Monthly,
            )
            .await?
            .is_some();

            if already_allocated {
                skipped += 1;
                continue;
            }

            let request = AllocationRequest {
                amount: employee.monthly_salary,
                allocation_type: AllocationType::Monthly,
                notes: None,
            };

            let (employee, _ledger_row) =
                Self::allocate_in_txn(&txn, employee, &request, allocated_by, period, now).await?;
            allocated.push(employee);
        }

        txn.commit().await?;

        tracing::info!(
            period = %period,
            allocated = allocated.len(),
            skipped,
            "bulk monthly allocation committed"
        );

        Ok(BulkAllocationOutcome {
            allocated,
            skipped,
            period,
        })
    }

    /// Lists an employee's allocation history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_allocations(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<salary_allocations::Model>, AllocationError> {
        Ok(salary_allocations::Entity::find()
            .filter(salary_allocations::Column::EmployeeId.eq(employee_id))
            .order_by_desc(salary_allocations::Column::AllocationDate)
            .all(&self.db)
            .await?)
    }

    /// Fetches the ledger row for (employee, period, type), if present.
    async fn find_ledger_row(
        txn: &DatabaseTransaction,
        employee_id: Uuid,
        period: Period,
        allocation_type: AllocationType,
    ) -> Result<Option<salary_allocations::Model>, DbErr> {
        salary_allocations::Entity::find()
            .filter(salary_allocations::Column::EmployeeId.eq(employee_id))
            .filter(salary_allocations::Column::Period.eq(period.to_string()))
            .filter(
                salary_allocations::Column::AllocationType
                    .eq(crate::entities::sea_orm_active_enums::AllocationType::from(
                        allocation_type,
                    )),
            )
            .one(txn)
            .await
    }

    /// Applies one validated allocation inside an open transaction.
    ///
    /// The upsert is an explicit lookup-then-insert-or-update so the
    /// additive contract stays visible: an existing ledger row is
    /// incremented, never replaced.
    async fn allocate_in_txn(
        txn: &DatabaseTransaction,
        employee: employees::Model,
        request: &AllocationRequest,
        allocated_by: Uuid,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<(employees::Model, salary_allocations::Model), AllocationError> {
        SalaryService::validate_allocation(request, employee.monthly_salary)?;

        let existing = Self::find_ledger_row(txn, employee.id, period, request.allocation_type)
            .await?;

        let ledger_row = match existing {
            Some(row) => {
                let merged_notes =
                    SalaryService::merge_notes(row.notes.as_deref(), request.notes.as_deref());
                let new_amount = row.allocated_amount + request.amount;

                let mut active: salary_allocations::ActiveModel = row.into();
                active.allocated_amount = Set(new_amount);
                active.notes = Set(merged_notes);
                active.allocation_date = Set(now.into());
                active.updated_at = Set(now.into());
                active.update(txn).await?
            }
            None => {
                let row = salary_allocations::ActiveModel {
                    id: Set(AllocationId::new().into_inner()),
                    employee_id: Set(employee.id),
                    period: Set(period.to_string()),
                    allocated_amount: Set(request.amount),
                    allocation_type: Set(request.allocation_type.into()),
                    allocated_by: Set(allocated_by),
                    notes: Set(request.notes.clone()),
                    allocation_date: Set(now.into()),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                row.insert(txn).await?
            }
        };

        let applied = SalaryService::apply_allocation(&employee.balance(), request.amount, period, now);

        let mut active: employees::ActiveModel = employee.into();
        active.period_allocated_amount = Set(applied.balance.period_allocated_amount);
        active.current_period = Set(Some(period.to_string()));
        active.last_salary_reset = Set(Some(now.into()));
        active.salary_status = Set(applied.balance.salary_status.into());
        active.updated_at = Set(now.into());

        let employee = active.update(txn).await?;

        Ok((employee, ledger_row))
    }
}
