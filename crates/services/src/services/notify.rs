//! Notification channel used by the save-retry wrapper.
//!
//! The wrapper only needs somewhere to send progress and outcome
//! messages; callers inject whatever sink fits. The server logs them
//! through tracing.

use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn loading(&self, message: &str);
    async fn success(&self, message: &str);
    /// `action` is a suggested follow-up shown next to the message.
    async fn error(&self, message: &str, action: Option<&str>);
}

/// Notifier that emits tracing events.
#[derive(Debug, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn loading(&self, message: &str) {
        tracing::info!(notification = "loading", "{message}");
    }

    async fn success(&self, message: &str) {
        tracing::info!(notification = "success", "{message}");
    }

    async fn error(&self, message: &str, action: Option<&str>) {
        match action {
            Some(action) => tracing::warn!(notification = "error", action, "{message}"),
            None => tracing::warn!(notification = "error", "{message}"),
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Notification {
        Loading(String),
        Success(String),
        Error(String, Option<String>),
    }

    /// Notifier that records everything it receives, for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub fn take(&self) -> Vec<Notification> {
            std::mem::take(&mut self.sent.lock().unwrap())
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn loading(&self, message: &str) {
            self.sent
                .lock()
                .unwrap()
                .push(Notification::Loading(message.to_string()));
        }

        async fn success(&self, message: &str) {
            self.sent
                .lock()
                .unwrap()
                .push(Notification::Success(message.to_string()));
        }

        async fn error(&self, message: &str, action: Option<&str>) {
            self.sent.lock().unwrap().push(Notification::Error(
                message.to_string(),
                action.map(str::to_string),
            ));
        }
    }
}
