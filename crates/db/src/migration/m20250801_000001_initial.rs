//! Initial schema: employees and the salary allocation ledger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS salary_allocations CASCADE;
             DROP TABLE IF EXISTS employees CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Employee profiles with embedded balance fields
CREATE TABLE employees (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    full_name VARCHAR(255) NOT NULL,
    phone VARCHAR(32),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    monthly_salary NUMERIC(18, 2) NOT NULL DEFAULT 0,
    period_allocated_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    withdrawn_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    current_period VARCHAR(7),
    last_salary_reset TIMESTAMPTZ,
    salary_status VARCHAR(16) NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_employees_salary_status
        CHECK (salary_status IN ('pending', 'allocated', 'partial', 'exhausted')),
    CONSTRAINT chk_employees_monthly_salary CHECK (monthly_salary >= 0),
    CONSTRAINT chk_employees_allocated CHECK (period_allocated_amount >= 0),
    -- Backstop: the withdrawal path also validates this before writing
    CONSTRAINT chk_employees_no_overdraft
        CHECK (withdrawn_amount >= 0 AND withdrawn_amount <= period_allocated_amount)
);

-- Index for the bulk monthly allocation scan
CREATE INDEX idx_employees_payroll_eligible
    ON employees(id) WHERE is_active AND monthly_salary > 0;

-- Allocation audit ledger
CREATE TABLE salary_allocations (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
    period VARCHAR(7) NOT NULL,
    allocated_amount NUMERIC(18, 2) NOT NULL,
    allocation_type VARCHAR(16) NOT NULL,
    allocated_by UUID NOT NULL,
    notes TEXT,
    allocation_date TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_allocations_type
        CHECK (allocation_type IN ('monthly', 'bonus', 'advance', 'adjustment')),
    CONSTRAINT chk_allocations_amount CHECK (allocated_amount > 0),
    -- One ledger row per employee, period, and type; re-allocation adds
    CONSTRAINT uq_allocations_employee_period_type
        UNIQUE (employee_id, period, allocation_type)
);

-- Index for an employee's allocation history, newest first
CREATE INDEX idx_allocations_employee
    ON salary_allocations(employee_id, allocation_date DESC);

-- Index for per-period reporting
CREATE INDEX idx_allocations_period ON salary_allocations(period);
";
