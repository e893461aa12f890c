//! Retry wrapper for transient SQLite failures.
//!
//! Under WAL with several pool connections, writes can hit SQLITE_BUSY
//! or SQLITE_LOCKED while another writer holds the database. Those
//! errors clear on their own, so multi-statement writes run through
//! [`with_retry`] with exponential backoff instead of failing the
//! request outright.

use std::future::Future;
use std::time::Duration;

use sqlx::Error as SqlxError;

#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff base in milliseconds, doubled per attempt.
    pub base_delay_ms: u64,
    /// Cap on the backoff delay.
    pub max_delay_ms: u64,
    /// Fraction of the delay (0.0 to 1.0) added as random jitter.
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay_ms: 50,
            max_delay_ms: 2000,
            jitter_factor: 0.2,
        }
    }
}

impl RetryConfig {
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let backoff = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt))
            .min(self.max_delay_ms);

        let jitter_range = (backoff as f64 * self.jitter_factor) as u64;
        let jitter = if jitter_range > 0 {
            // Pseudo-random from the clock; spreads out waiters without
            // pulling in an RNG crate.
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .subsec_nanos() as u64;
            nanos % jitter_range
        } else {
            0
        };

        Duration::from_millis(backoff + jitter)
    }
}

/// Whether a failure is a transient SQLite condition worth retrying.
///
/// Covers SQLITE_BUSY (5), SQLITE_LOCKED (6), and SQLITE_IOERR (10 and
/// its extended codes, which carry 10 in the low byte).
pub fn is_transient_error(e: &SqlxError) -> bool {
    let SqlxError::Database(db_err) = e else {
        return false;
    };
    let Some(code) = db_err.code() else {
        return false;
    };
    match code.as_ref() {
        "5" | "6" | "10" => true,
        other => other
            .parse::<u32>()
            .is_ok_and(|n| n > 10 && (n & 0xFF) == 10),
    }
}

/// Run a database operation, retrying transient failures with backoff.
///
/// Non-transient errors return immediately; transient ones are retried
/// up to `config.max_retries` times and the last error is returned if
/// the budget runs out.
pub async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    operation: &str,
    mut f: F,
) -> Result<T, SqlxError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SqlxError>>,
{
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::debug!(operation, attempts = attempt + 1, "Write succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if is_transient_error(&e) && attempt < config.max_retries => {
                let delay = config.delay_for_attempt(attempt);
                tracing::warn!(
                    operation,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = ?e,
                    "Transient SQLite error, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = RetryConfig {
            max_retries: 5,
            base_delay_ms: 100,
            max_delay_ms: 500,
            jitter_factor: 0.0,
        };
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(500));
    }

    #[test]
    fn test_jitter_stays_within_fraction() {
        let config = RetryConfig {
            max_retries: 5,
            base_delay_ms: 100,
            max_delay_ms: 2000,
            jitter_factor: 0.2,
        };
        let delay = config.delay_for_attempt(0);
        assert!(delay >= Duration::from_millis(100));
        assert!(delay <= Duration::from_millis(120));
    }

    #[test]
    fn test_non_database_errors_are_not_transient() {
        assert!(!is_transient_error(&SqlxError::RowNotFound));
        assert!(!is_transient_error(&SqlxError::PoolClosed));
    }

    #[tokio::test]
    async fn test_non_transient_error_returns_without_retry() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&RetryConfig::default(), "find_row", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(SqlxError::RowNotFound) }
        })
        .await;
        assert!(matches!(result, Err(SqlxError::RowNotFound)));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let result = with_retry(&RetryConfig::default(), "fetch_value", || async { Ok(7) }).await;
        assert_eq!(result.expect("Operation failed"), 7);
    }
}
