//! Request-scoped caller identity.
//!
//! The authenticated admin identity is carried explicitly into every
//! operation rather than read from ambient global state. The session layer
//! that produces it is outside this crate.

use salarium_shared::types::AdminId;

/// Identity of the administrator performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    /// The acting admin's ID, recorded on every ledger row.
    pub admin_id: AdminId,
    /// Display name for logging.
    pub display_name: String,
}

impl AdminContext {
    /// Creates a context for the given admin.
    #[must_use]
    pub const fn new(admin_id: AdminId, display_name: String) -> Self {
        Self {
            admin_id,
            display_name,
        }
    }
}
