//! Retrying wrapper around save operations.
//!
//! Runs an async operation up to `max_retries` times with a fixed delay
//! between attempts, reporting progress through a [`Notifier`]. The
//! operation itself is never timed out, only the gap between attempts
//! is bounded.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use super::notify::Notifier;

/// Error surfaced after all attempts are exhausted. The message is the
/// raw text of the last failure, normalized so callers always have
/// something displayable.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct SaveError {
    pub message: String,
}

impl SaveError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self {
                message: "Onbekende fout bij opslaan".to_string(),
            }
        } else {
            Self { message }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Total number of attempts, not additional retries.
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub show_notifications: bool,
    pub loading_message: String,
    pub success_message: String,
    /// Overrides the translated message in the failure notification.
    pub error_message: Option<String>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
            show_notifications: true,
            loading_message: "Opslaan...".to_string(),
            success_message: "Succesvol opgeslagen".to_string(),
            error_message: None,
        }
    }
}

/// Dutch one-liner for a raw save failure, keyed on substrings of the
/// error text.
pub fn friendly_save_error_message(raw: &str) -> &'static str {
    let lower = raw.to_lowercase();
    if lower.contains("network") || lower.contains("connection") {
        "Verbindingsprobleem. Controleer uw internetverbinding."
    } else if lower.contains("permission")
        || lower.contains("forbidden")
        || lower.contains("unauthorized")
    {
        "U heeft geen toestemming voor deze actie."
    } else if lower.contains("validation") || lower.contains("invalid") {
        "De ingevoerde gegevens zijn ongeldig. Controleer uw invoer."
    } else if lower.contains("timeout") {
        "De server reageert niet. Probeer het later opnieuw."
    } else if lower.contains("duplicate") || lower.contains("unique") {
        "Deze naam bestaat al. Kies een andere naam."
    } else if lower.contains("foreign key") || lower.contains("constraint") {
        "Deze actie is niet mogelijk vanwege gekoppelde gegevens."
    } else {
        "Er is een onverwachte fout opgetreden. Probeer het opnieuw."
    }
}

/// Run `operation` until it succeeds or `max_retries` attempts are
/// spent. Failures between attempts are reported as loading updates;
/// the final failure is reported as an error with a retry action.
pub async fn execute_save_with_retry<T, E, F, Fut>(
    notifier: &dyn Notifier,
    options: &SaveOptions,
    mut operation: F,
) -> Result<T, SaveError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    if options.show_notifications {
        notifier.loading(&options.loading_message).await;
    }

    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(data) => {
                if options.show_notifications {
                    notifier.success(&options.success_message).await;
                }
                return Ok(data);
            }
            Err(err) => {
                let error = SaveError::new(err.to_string());
                tracing::warn!(attempt, max = options.max_retries, "save failed: {error}");

                if attempt >= options.max_retries {
                    if options.show_notifications {
                        let friendly = options
                            .error_message
                            .clone()
                            .unwrap_or_else(|| {
                                friendly_save_error_message(&error.message).to_string()
                            });
                        notifier
                            .error(
                                &format!("Opslaan mislukt: {friendly}"),
                                Some("Opnieuw proberen"),
                            )
                            .await;
                    }
                    return Err(error);
                }

                if options.show_notifications {
                    notifier
                        .loading(&format!(
                            "Poging {attempt} mislukt. Opnieuw proberen... ({attempt}/{})",
                            options.max_retries
                        ))
                        .await;
                }
                tokio::time::sleep(options.retry_delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::test_support::{Notification, RecordingNotifier};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_options(max_retries: u32) -> SaveOptions {
        SaveOptions {
            max_retries,
            retry_delay: Duration::from_millis(1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let notifier = RecordingNotifier::default();
        let calls = AtomicU32::new(0);

        let result = execute_save_with_retry(&notifier, &fast_options(3), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, String>("data") }
        })
        .await;

        assert_eq!(result, Ok("data"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            notifier.take(),
            vec![
                Notification::Loading("Opslaan...".to_string()),
                Notification::Success("Succesvol opgeslagen".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let notifier = RecordingNotifier::default();
        let calls = AtomicU32::new(0);

        let result = execute_save_with_retry(&notifier, &fast_options(3), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err("network error".to_string())
                } else {
                    Ok("data")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("data"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let sent = notifier.take();
        assert!(sent.contains(&Notification::Loading(
            "Poging 1 mislukt. Opnieuw proberen... (1/3)".to_string()
        )));
        assert!(sent.contains(&Notification::Loading(
            "Poging 2 mislukt. Opnieuw proberen... (2/3)".to_string()
        )));
        assert_eq!(
            sent.last(),
            Some(&Notification::Success("Succesvol opgeslagen".to_string()))
        );
    }

    #[tokio::test]
    async fn test_exhausts_attempts() {
        let notifier = RecordingNotifier::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = execute_save_with_retry(&notifier, &fast_options(2), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("persistent error".to_string()) }
        })
        .await;

        assert_eq!(result, Err(SaveError::new("persistent error")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            notifier.take().last(),
            Some(&Notification::Error(
                "Opslaan mislukt: Er is een onverwachte fout opgetreden. Probeer het opnieuw."
                    .to_string(),
                Some("Opnieuw proberen".to_string()),
            ))
        );
    }

    #[tokio::test]
    async fn test_empty_error_is_normalized() {
        let notifier = RecordingNotifier::default();

        let result: Result<(), _> = execute_save_with_retry(&notifier, &fast_options(1), || async {
            Err(String::new())
        })
        .await;

        assert_eq!(result.unwrap_err().message, "Onbekende fout bij opslaan");
    }

    #[tokio::test]
    async fn test_notifications_can_be_suppressed() {
        let notifier = RecordingNotifier::default();
        let options = SaveOptions {
            show_notifications: false,
            ..fast_options(1)
        };

        let result = execute_save_with_retry(&notifier, &options, || async {
            Ok::<_, String>(42)
        })
        .await;

        assert_eq!(result, Ok(42));
        assert!(notifier.take().is_empty());
    }

    #[test]
    fn test_friendly_messages_match_substrings() {
        assert_eq!(
            friendly_save_error_message("NETWORK ERROR"),
            "Verbindingsprobleem. Controleer uw internetverbinding."
        );
        assert_eq!(
            friendly_save_error_message("duplicate entry"),
            "Deze naam bestaat al. Kies een andere naam."
        );
        assert_eq!(
            friendly_save_error_message("foreign key constraint"),
            "Deze actie is niet mogelijk vanwege gekoppelde gegevens."
        );
        assert_eq!(
            friendly_save_error_message("mystery"),
            "Er is een onverwachte fout opgetreden. Probeer het opnieuw."
        );
    }
}
