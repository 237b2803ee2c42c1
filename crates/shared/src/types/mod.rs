//! Shared type definitions.

pub mod id;

pub use id::{AdminId, AllocationId, EmployeeId};
