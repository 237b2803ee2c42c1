//! Notification gateway abstraction.
//!
//! The concrete SMS/message transport lives outside this system; services
//! talk to this trait. Dispatch failures never roll back a committed
//! financial update - they are logged and surfaced to the caller.

use async_trait::async_trait;
use thiserror::Error;

/// Notification dispatch errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The gateway rejected or failed to deliver the message.
    #[error("Failed to send message: {0}")]
    SendFailed(String),

    /// The recipient address is unusable.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

/// Outbound message gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Sends a message to a recipient address (phone number).
    async fn send_message(&self, recipient: &str, text: &str) -> Result<(), NotifyError>;
}

/// Gateway that logs instead of sending. Used in development and by the
/// operational binaries when no transport is wired up.
#[derive(Debug, Clone, Default)]
pub struct NoopGateway;

#[async_trait]
impl NotificationGateway for NoopGateway {
    async fn send_message(&self, recipient: &str, text: &str) -> Result<(), NotifyError> {
        tracing::info!(recipient, text, "notification suppressed (noop gateway)");
        Ok(())
    }
}
