//! Allocation service: the portal-facing entry point for salary
//! allocations.
//!
//! Orchestrates the repository (atomic financial update) and the
//! notification gateway (post-commit, never gating success).

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use salarium_core::period::Period;
use salarium_core::salary::AllocationType;
use salarium_db::entities::salary_allocations;
use salarium_db::repositories::{AllocationOutcome, RecordAllocationInput, SalaryRepository};
use salarium_shared::config::NotificationConfig;
use salarium_shared::types::EmployeeId;
use salarium_shared::AppResult;

use crate::context::AdminContext;
use crate::notify::NotificationGateway;

/// A portal request to allocate funds to one employee.
#[derive(Debug, Clone)]
pub struct AllocateCommand {
    /// Target employee.
    pub employee_id: EmployeeId,
    /// Amount to allocate. Must be positive.
    pub amount: Decimal,
    /// Kind of allocation.
    pub allocation_type: AllocationType,
    /// Optional free-text note for the audit ledger.
    pub notes: Option<String>,
}

/// Whether the post-commit notification reached the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The gateway accepted the message.
    Sent,
    /// The gateway failed; the financial update stands regardless.
    Failed,
    /// Dispatch was not attempted (disabled, or no recipient on file).
    Skipped,
}

/// Result of a single allocation: the committed update plus the
/// partial-success indicator for the notification side effect.
#[derive(Debug, Clone)]
pub struct AllocationReceipt {
    /// The committed financial update.
    pub outcome: AllocationOutcome,
    /// Fate of the employee notification.
    pub notification: NotificationStatus,
}

/// Summary of one bulk monthly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRunReport {
    /// Employees that received this period's monthly allocation.
    pub allocated: u64,
    /// Employees skipped because the period was already allocated.
    pub skipped: u64,
    /// The period the run applied to.
    pub period: Period,
    /// Notifications that failed to dispatch.
    pub notifications_failed: u64,
}

/// Allocation service.
pub struct AllocationService {
    repo: SalaryRepository,
    gateway: Arc<dyn NotificationGateway>,
    config: NotificationConfig,
}

impl AllocationService {
    /// Creates an allocation service over the given connection and gateway.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn NotificationGateway>,
        config: NotificationConfig,
    ) -> Self {
        Self {
            repo: SalaryRepository::new(db),
            gateway,
            config,
        }
    }

    /// Records one allocation and notifies the employee.
    ///
    /// The financial update is atomic; the notification is dispatched only
    /// after commit and its failure is reported on the receipt, never as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or persistence fails (nothing is
    /// written in either case).
    pub async fn allocate(
        &self,
        ctx: &AdminContext,
        command: AllocateCommand,
    ) -> AppResult<AllocationReceipt> {
        let now = Utc::now();
        let outcome = self
            .repo
            .record_allocation(
                RecordAllocationInput {
                    employee_id: command.employee_id.into_inner(),
                    amount: command.amount,
                    allocation_type: command.allocation_type,
                    notes: command.notes,
                    allocated_by: ctx.admin_id.into_inner(),
                },
                now,
            )
            .await?;

        tracing::info!(
            admin = %ctx.admin_id,
            employee = %outcome.employee.id,
            amount = %command.amount,
            allocation_type = %command.allocation_type,
            period = %outcome.period,
            "allocation recorded"
        );

        let text = allocation_message(
            &self.config.sender_name,
            &outcome.employee.full_name,
            command.amount,
            outcome.period,
        );
        let notification = dispatch_notification(
            self.gateway.as_ref(),
            &self.config,
            outcome.employee.phone.as_deref(),
            &text,
        )
        .await;

        Ok(AllocationReceipt {
            outcome,
            notification,
        })
    }

    /// Runs the monthly allocation over every eligible employee.
    ///
    /// Employees already allocated for the current period are skipped, so
    /// the run is safe to repeat within a period. One notification is
    /// dispatched per allocated employee after the batch commits; failures
    /// are counted, not raised.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch transaction fails (the whole batch
    /// rolls back).
    pub async fn run_monthly_payroll(&self, ctx: &AdminContext) -> AppResult<BulkRunReport> {
        let now = Utc::now();
        let outcome = self
            .repo
            .allocate_monthly_for_all(ctx.admin_id.into_inner(), now)
            .await?;

        let mut notifications_failed = 0u64;
        let mut allocated = 0u64;
        for employee in &outcome.allocated {
            let text = allocation_message(
                &self.config.sender_name,
                &employee.full_name,
                employee.monthly_salary,
                outcome.period,
            );
            let status = dispatch_notification(
                self.gateway.as_ref(),
                &self.config,
                employee.phone.as_deref(),
                &text,
            )
            .await;
            if status == NotificationStatus::Failed {
                notifications_failed += 1;
            }
            allocated += 1;
        }

        Ok(BulkRunReport {
            allocated,
            skipped: outcome.skipped,
            period: outcome.period,
            notifications_failed,
        })
    }

    /// Lists an employee's allocation history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn allocation_history(
        &self,
        employee_id: EmployeeId,
    ) -> AppResult<Vec<salary_allocations::Model>> {
        Ok(self.repo.list_allocations(employee_id.into_inner()).await?)
    }
}

/// Composes the employee-facing allocation message.
#[must_use]
pub fn allocation_message(
    sender_name: &str,
    employee_name: &str,
    amount: Decimal,
    period: Period,
) -> String {
    format!("{sender_name}: Hi {employee_name}, {amount} was added to your salary balance for {period}.")
}

/// Dispatches one notification, mapping every outcome onto the
/// partial-success indicator. Gateway errors are logged and absorbed here.
pub async fn dispatch_notification(
    gateway: &dyn NotificationGateway,
    config: &NotificationConfig,
    recipient: Option<&str>,
    text: &str,
) -> NotificationStatus {
    if !config.enabled {
        return NotificationStatus::Skipped;
    }
    let Some(recipient) = recipient else {
        return NotificationStatus::Skipped;
    };

    match gateway.send_message(recipient, text).await {
        Ok(()) => NotificationStatus::Sent,
        Err(err) => {
            tracing::warn!(recipient, error = %err, "notification dispatch failed");
            NotificationStatus::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MockNotificationGateway, NotifyError};
    use rust_decimal_macros::dec;

    fn config(enabled: bool) -> NotificationConfig {
        NotificationConfig {
            enabled,
            sender_name: "Salarium".to_string(),
        }
    }

    fn may_2025() -> Period {
        Period::new(2025, 5).unwrap()
    }

    #[test]
    fn test_allocation_message_format() {
        let text = allocation_message("Salarium", "Ayu", dec!(1000000), may_2025());
        assert_eq!(
            text,
            "Salarium: Hi Ayu, 1000000 was added to your salary balance for 2025-05."
        );
    }

    #[tokio::test]
    async fn test_dispatch_reports_sent() {
        let mut gateway = MockNotificationGateway::new();
        gateway
            .expect_send_message()
            .withf(|recipient, text| recipient == "+628120000001" && text.contains("Ayu"))
            .times(1)
            .returning(|_, _| Ok(()));

        let status = dispatch_notification(
            &gateway,
            &config(true),
            Some("+628120000001"),
            "Salarium: Hi Ayu, payday.",
        )
        .await;
        assert_eq!(status, NotificationStatus::Sent);
    }

    #[tokio::test]
    async fn test_dispatch_absorbs_gateway_failure() {
        let mut gateway = MockNotificationGateway::new();
        gateway
            .expect_send_message()
            .times(1)
            .returning(|_, _| Err(NotifyError::SendFailed("gateway timeout".to_string())));

        let status =
            dispatch_notification(&gateway, &config(true), Some("+628120000001"), "hello").await;
        assert_eq!(status, NotificationStatus::Failed);
    }

    #[tokio::test]
    async fn test_dispatch_skips_when_disabled() {
        // The gateway must never be called.
        let gateway = MockNotificationGateway::new();

        let status =
            dispatch_notification(&gateway, &config(false), Some("+628120000001"), "hello").await;
        assert_eq!(status, NotificationStatus::Skipped);
    }

    #[tokio::test]
    async fn test_dispatch_skips_without_recipient() {
        let gateway = MockNotificationGateway::new();

        let status = dispatch_notification(&gateway, &config(true), None, "hello").await;
        assert_eq!(status, NotificationStatus::Skipped);
    }
}
