//! Salary allocation bookkeeping and balance classification.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;

pub use error::SalaryError;
pub use service::SalaryService;
pub use types::{
    AllocationRequest, AllocationType, AppliedAllocation, EmployeeBalance, SalaryStatus,
};
