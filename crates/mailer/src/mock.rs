//! In-memory transport for tests and local development.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::transport::{new_message_id, MailTransport};
use crate::{Email, MailerError};

/// How the mock transport behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    /// Verify succeeds and every send is accepted.
    Reachable,
    /// Verify fails; nothing can be sent.
    Unreachable,
}

/// A transport that records messages instead of delivering them.
#[derive(Debug)]
pub struct MockTransport {
    sender: String,
    mode: Mutex<MockMode>,
    rejected: Mutex<HashSet<String>>,
    sent: Mutex<Vec<(String, Email)>>,
    verify_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(mode: MockMode) -> Self {
        Self {
            sender: "bookings@roving.travel".to_string(),
            mode: Mutex::new(mode),
            rejected: Mutex::new(HashSet::new()),
            sent: Mutex::new(Vec::new()),
            verify_calls: AtomicUsize::new(0),
        }
    }

    /// A transport whose server is up.
    pub fn reachable() -> Self {
        Self::new(MockMode::Reachable)
    }

    /// A transport whose server is down.
    pub fn unreachable() -> Self {
        Self::new(MockMode::Unreachable)
    }

    /// Switch behaviour.
    pub fn set_mode(&self, mode: MockMode) {
        *lock(&self.mode) = mode;
    }

    /// Make sends to `recipient` fail while the server stays reachable.
    pub fn reject_recipient(&self, recipient: impl Into<String>) {
        lock(&self.rejected).insert(recipient.into());
    }

    /// Messages accepted so far, with their message ids.
    pub fn sent(&self) -> Vec<(String, Email)> {
        lock(&self.sent).clone()
    }

    /// Number of `verify` calls so far.
    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::reachable()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn verify(&self) -> Result<(), MailerError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match *lock(&self.mode) {
            MockMode::Reachable => Ok(()),
            MockMode::Unreachable => Err(MailerError::Unreachable(
                "connection refused (mock)".to_string(),
            )),
        }
    }

    async fn send(&self, email: &Email) -> Result<String, MailerError> {
        if *lock(&self.mode) == MockMode::Unreachable {
            return Err(MailerError::Unreachable(
                "connection refused (mock)".to_string(),
            ));
        }
        if lock(&self.rejected).contains(&email.to) {
            return Err(MailerError::Send(format!(
                "recipient rejected (mock): {}",
                email.to
            )));
        }

        let message_id = new_message_id(&self.sender);
        lock(&self.sent).push((message_id.clone(), email.clone()));
        Ok(message_id)
    }
}
