//! In-process service facade for Salarium.
//!
//! The portal's request handlers call these services directly; no wire
//! protocol is defined at this layer. Each service method runs one
//! operation to completion: validate, persist atomically, then dispatch
//! notifications strictly after commit.

pub mod context;
pub mod notify;
pub mod services;

pub use context::AdminContext;
pub use notify::{NoopGateway, NotificationGateway, NotifyError};
pub use services::{
    AllocateCommand, AllocationReceipt, AllocationService, BulkRunReport, EmployeeService,
    NotificationStatus,
};
