//! Employee repository for profile and balance operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use salarium_core::salary::{SalaryError, SalaryService};
use salarium_shared::types::EmployeeId;

use crate::entities::employees;

/// Error types for employee operations.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    /// Employee not found.
    #[error("Employee not found: {0}")]
    NotFound(Uuid),

    /// Employee is deactivated.
    #[error("Employee is not active: {0}")]
    Inactive(Uuid),

    /// Monthly salary cannot be negative.
    #[error("Monthly salary cannot be negative: {0}")]
    NegativeSalary(Decimal),

    /// Employee name must not be empty.
    #[error("Employee name must not be empty")]
    EmptyName,

    /// Balance rule violation.
    #[error(transparent)]
    Salary(#[from] SalaryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<EmployeeError> for salarium_shared::AppError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::NotFound(_) => Self::NotFound(err.to_string()),
            EmployeeError::Inactive(_) | EmployeeError::Salary(SalaryError::InsufficientBalance { .. }) => {
                Self::BusinessRule(err.to_string())
            }
            EmployeeError::NegativeSalary(_)
            | EmployeeError::EmptyName
            | EmployeeError::Salary(_) => Self::Validation(err.to_string()),
            EmployeeError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    /// Full display name.
    pub full_name: String,
    /// Notification phone number, if any.
    pub phone: Option<String>,
    /// Fixed monthly salary entitlement.
    pub monthly_salary: Decimal,
}

/// Employee repository for CRUD and withdrawal operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an employee with a fresh, never-allocated balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid or the insert fails.
    pub async fn create_employee(
        &self,
        input: CreateEmployeeInput,
    ) -> Result<employees::Model, EmployeeError> {
        if input.full_name.trim().is_empty() {
            return Err(EmployeeError::EmptyName);
        }
        if input.monthly_salary < Decimal::ZERO {
            return Err(EmployeeError::NegativeSalary(input.monthly_salary));
        }

        let now = Utc::now().into();

        let employee = employees::ActiveModel {
            id: Set(EmployeeId::new().into_inner()),
            full_name: Set(input.full_name),
            phone: Set(input.phone),
            is_active: Set(true),
            monthly_salary: Set(input.monthly_salary),
            period_allocated_amount: Set(Decimal::ZERO),
            withdrawn_amount: Set(Decimal::ZERO),
            current_period: Set(None),
            last_salary_reset: Set(None),
            salary_status: Set(crate::entities::sea_orm_active_enums::SalaryStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(employee.insert(&self.db).await?)
    }

    /// Gets an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is not found or the query fails.
    pub async fn get_employee(&self, employee_id: Uuid) -> Result<employees::Model, EmployeeError> {
        employees::Entity::find_by_id(employee_id)
            .one(&self.db)
            .await?
            .ok_or(EmployeeError::NotFound(employee_id))
    }

    /// Lists employees, optionally restricted to active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_employees(
        &self,
        active_only: bool,
    ) -> Result<Vec<employees::Model>, EmployeeError> {
        let mut query = employees::Entity::find().order_by_asc(employees::Column::FullName);
        if active_only {
            query = query.filter(employees::Column::IsActive.eq(true));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Deactivates an employee, removing them from future bulk runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is not found or the update fails.
    pub async fn deactivate_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<employees::Model, EmployeeError> {
        let employee = self.get_employee(employee_id).await?;

        let mut active: employees::ActiveModel = employee.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Updates the fixed monthly salary entitlement.
    ///
    /// Does not touch allocated or withdrawn totals; the new salary takes
    /// effect at the next allocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the salary is negative, the employee is not
    /// found, or the update fails.
    pub async fn update_monthly_salary(
        &self,
        employee_id: Uuid,
        monthly_salary: Decimal,
    ) -> Result<employees::Model, EmployeeError> {
        if monthly_salary < Decimal::ZERO {
            return Err(EmployeeError::NegativeSalary(monthly_salary));
        }

        let employee = self.get_employee(employee_id).await?;

        let mut active: employees::ActiveModel = employee.into();
        active.monthly_salary = Set(monthly_salary);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Records a withdrawal against the employee's available balance.
    ///
    /// The employee row is locked for the duration of the transaction so a
    /// concurrent allocation cannot interleave with the balance update.
    /// Withdrawals exceeding the available balance are rejected before any
    /// write.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is missing or inactive, the amount
    /// violates a balance rule, or the transaction fails.
    pub async fn record_withdrawal(
        &self,
        employee_id: Uuid,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<employees::Model, EmployeeError> {
        let txn = self.db.begin().await?;

        let employee = employees::Entity::find_by_id(employee_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(EmployeeError::NotFound(employee_id))?;

        if !employee.is_active {
            return Err(EmployeeError::Inactive(employee_id));
        }

        let balance = employee.balance();
        SalaryService::validate_withdrawal(&balance, amount)?;
        let updated = SalaryService::apply_withdrawal(&balance, amount);

        let mut active: employees::ActiveModel = employee.into();
        active.withdrawn_amount = Set(updated.withdrawn_amount);
        active.salary_status = Set(updated.salary_status.into());
        active.updated_at = Set(now.into());

        let model = active.update(&txn).await?;
        txn.commit().await?;

        Ok(model)
    }
}
