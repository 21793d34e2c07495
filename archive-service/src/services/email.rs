//! Verification email dispatch seam.
//!
//! There is no real mail transport: dispatch is simulated by logging the
//! destination and token. A real sender would implement `EmailProvider`.

use archive_core::error::AppError;
use async_trait::async_trait;
use std::sync::Mutex;

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send_verification_email(
        &self,
        to_email: &str,
        verification_token: &str,
    ) -> Result<(), AppError>;
}

/// Simulated transport: writes the dispatch to the log side channel.
#[derive(Debug, Clone, Default)]
pub struct LogEmailService;

#[async_trait]
impl EmailProvider for LogEmailService {
    async fn send_verification_email(
        &self,
        to_email: &str,
        verification_token: &str,
    ) -> Result<(), AppError> {
        tracing::info!(
            to = %to_email,
            token = %verification_token,
            "Dispatching verification email"
        );
        Ok(())
    }
}

/// A dispatched verification email, as captured in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub token: String,
}

/// Test transport that records every dispatch.
#[derive(Debug, Default)]
pub struct CapturingEmailService {
    outbox: Mutex<Vec<SentEmail>>,
}

impl CapturingEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.outbox.lock().expect("outbox lock poisoned").clone()
    }

    /// The most recently dispatched token for an address.
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.outbox
            .lock()
            .expect("outbox lock poisoned")
            .iter()
            .rev()
            .find(|sent| sent.to == email)
            .map(|sent| sent.token.clone())
    }
}

#[async_trait]
impl EmailProvider for CapturingEmailService {
    async fn send_verification_email(
        &self,
        to_email: &str,
        verification_token: &str,
    ) -> Result<(), AppError> {
        self.outbox
            .lock()
            .expect("outbox lock poisoned")
            .push(SentEmail {
                to: to_email.to_string(),
                token: verification_token.to_string(),
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn capturing_service_records_dispatches() {
        let service = CapturingEmailService::new();
        service
            .send_verification_email("a@x.test", "tok-1")
            .await
            .unwrap();
        service
            .send_verification_email("a@x.test", "tok-2")
            .await
            .unwrap();

        assert_eq!(service.sent().len(), 2);
        assert_eq!(service.last_token_for("a@x.test").as_deref(), Some("tok-2"));
        assert_eq!(service.last_token_for("b@x.test"), None);
    }
}
