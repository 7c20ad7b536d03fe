//! In-process email transport that records what it is asked to send.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{EmailError, EmailTransport, OutgoingEmail};

/// Records outgoing email instead of delivering it.
///
/// Used by tests, and as a stand-in transport when exercising the
/// service without network access. [`MemoryTransport::failing`] builds a
/// transport that rejects every send.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl MemoryTransport {
    /// Creates a transport that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport whose every send fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    /// Returns the emails accepted so far.
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailTransport for MemoryTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::Smtp("simulated delivery failure".to_string()));
        }
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}
