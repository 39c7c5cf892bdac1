use std::time::Duration;

use tokio::time::Instant;

/// A transient message that hides itself once its time is up.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        Instant::now() < self.expires_at
    }
}
