//! Fail-open utilities for graceful degradation
//!
//! Infrastructure work around a cycle (activity logging, bookkeeping) must
//! never abort the cycle itself. Wrap it in [`fail_open`].
//!
//! DO NOT use fail-open for provider calls: those report their own outcome
//! so the cycle can log what actually happened.

use std::future::Future;
use tracing::warn;

use crate::Result;

/// Execute an operation that should fail open
///
/// Logs the error via `tracing::warn!` on failure and returns `None`.
///
/// ```no_run
/// use molt_core::fail_open::fail_open;
/// use molt_core::Result;
///
/// async fn append_activity() -> Result<()> {
///     Ok(())
/// }
///
/// async fn example() {
///     let written = fail_open("activity_log", || append_activity()).await;
///     // written is None if append_activity() failed
/// }
/// ```
pub async fn fail_open<F, Fut, T>(operation_name: &str, f: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match f().await {
        Ok(val) => Some(val),
        Err(e) => {
            warn!("{} failed (fail-open): {}", operation_name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoltError;

    #[tokio::test]
    async fn test_fail_open_success() {
        let result = fail_open("test_op", || async { Ok::<_, MoltError>(42) }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_fail_open_failure() {
        let result = fail_open("test_op", || async {
            Err::<i32, _>(MoltError::Other("disk full".to_string()))
        })
        .await;
        assert_eq!(result, None);
    }
}
