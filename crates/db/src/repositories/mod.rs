//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Each repository owns the transactions for its operations.

pub mod employee;
pub mod salary;

pub use employee::{CreateEmployeeInput, EmployeeError, EmployeeRepository};
pub use salary::{
    AllocationError, AllocationOutcome, BulkAllocationOutcome, RecordAllocationInput,
    SalaryRepository,
};
