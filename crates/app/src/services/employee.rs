//! Employee management service.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use validator::Validate;

use salarium_db::entities::employees;
use salarium_db::repositories::{CreateEmployeeInput, EmployeeRepository};
use salarium_shared::types::EmployeeId;
use salarium_shared::{AppError, AppResult};

use crate::context::AdminContext;

/// A portal request to register a new employee.
#[derive(Debug, Clone, Validate)]
pub struct NewEmployee {
    /// Full display name.
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    /// Notification phone number, if any.
    #[validate(length(min = 7, max = 32))]
    pub phone: Option<String>,
    /// Fixed monthly salary entitlement.
    pub monthly_salary: Decimal,
}

/// Employee management service.
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    /// Creates an employee service over the given connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: EmployeeRepository::new(db),
        }
    }

    /// Registers a new employee with a fresh, never-allocated balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid or persistence fails.
    pub async fn create(
        &self,
        ctx: &AdminContext,
        input: NewEmployee,
    ) -> AppResult<employees::Model> {
        input
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let employee = self
            .repo
            .create_employee(CreateEmployeeInput {
                full_name: input.full_name,
                phone: input.phone,
                monthly_salary: input.monthly_salary,
            })
            .await?;

        tracing::info!(
            admin = %ctx.admin_id,
            employee = %employee.id,
            "employee created"
        );

        Ok(employee)
    }

    /// Gets one employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist.
    pub async fn get(&self, employee_id: EmployeeId) -> AppResult<employees::Model> {
        Ok(self.repo.get_employee(employee_id.into_inner()).await?)
    }

    /// Lists employees, optionally restricted to active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, active_only: bool) -> AppResult<Vec<employees::Model>> {
        Ok(self.repo.list_employees(active_only).await?)
    }

    /// Deactivates an employee, removing them from future payroll runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist.
    pub async fn deactivate(
        &self,
        ctx: &AdminContext,
        employee_id: EmployeeId,
    ) -> AppResult<employees::Model> {
        let employee = self
            .repo
            .deactivate_employee(employee_id.into_inner())
            .await?;

        tracing::info!(
            admin = %ctx.admin_id,
            employee = %employee.id,
            "employee deactivated"
        );

        Ok(employee)
    }

    /// Updates the fixed monthly salary entitlement.
    ///
    /// # Errors
    ///
    /// Returns an error if the salary is negative or the employee does not
    /// exist.
    pub async fn update_monthly_salary(
        &self,
        ctx: &AdminContext,
        employee_id: EmployeeId,
        monthly_salary: Decimal,
    ) -> AppResult<employees::Model> {
        let employee = self
            .repo
            .update_monthly_salary(employee_id.into_inner(), monthly_salary)
            .await?;

        tracing::info!(
            admin = %ctx.admin_id,
            employee = %employee.id,
            monthly_salary = %monthly_salary,
            "monthly salary updated"
        );

        Ok(employee)
    }

    /// Records a withdrawal against the employee's available balance.
    ///
    /// Rejected before any write if it would overdraw the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is missing or inactive, or the
    /// amount violates a balance rule.
    pub async fn record_withdrawal(
        &self,
        ctx: &AdminContext,
        employee_id: EmployeeId,
        amount: Decimal,
    ) -> AppResult<employees::Model> {
        let employee = self
            .repo
            .record_withdrawal(employee_id.into_inner(), amount, Utc::now())
            .await?;

        tracing::info!(
            admin = %ctx.admin_id,
            employee = %employee.id,
            amount = %amount,
            status = ?employee.salary_status,
            "withdrawal recorded"
        );

        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("Ayu Lestari", Some("+628120000001"), true)]
    #[case("Ayu Lestari", None, true)]
    #[case("", None, false)]
    #[case("Ayu", Some("123"), false)]
    fn test_new_employee_validation(
        #[case] full_name: &str,
        #[case] phone: Option<&str>,
        #[case] expect_ok: bool,
    ) {
        let input = NewEmployee {
            full_name: full_name.to_string(),
            phone: phone.map(ToString::to_string),
            monthly_salary: dec!(1000),
        };
        assert_eq!(input.validate().is_ok(), expect_ok);
    }
}
