//! Application services.

pub mod allocation;
pub mod employee;

pub use allocation::{
    AllocateCommand, AllocationReceipt, AllocationService, BulkRunReport, NotificationStatus,
};
pub use employee::EmployeeService;
