//! Request-scoped trace id storage.
//!
//! A task-local slot holds the trace id of the request currently being
//! handled. Each request runs inside its own [`scope`], so concurrently
//! handled requests never observe each other's ids and no locking is
//! involved. The slot is dropped when the scoped future completes.

use std::future::Future;

/// Rendered when no request scope is active.
pub const NO_TRACE_ID: &str = "-";

tokio::task_local! {
    static TRACE_ID: String;
}

/// Run `fut` with `trace_id` installed as the active trace id.
///
/// The id is visible to all code the future runs, including synchronous
/// calls into the log formatters.
pub async fn scope<F>(trace_id: String, fut: F) -> F::Output
where
    F: Future,
{
    TRACE_ID.scope(trace_id, fut).await
}

/// Synchronous variant of [`scope`] for non-async callers.
pub fn sync_scope<F, R>(trace_id: String, f: F) -> R
where
    F: FnOnce() -> R,
{
    TRACE_ID.sync_scope(trace_id, f)
}

/// The trace id installed for the current task, or [`NO_TRACE_ID`] when
/// called outside any request scope.
pub fn current_trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| NO_TRACE_ID.to_string())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn sentinel_outside_scope() {
        assert_eq!(current_trace_id(), NO_TRACE_ID);
    }

    #[test]
    fn sync_scope_installs_and_clears() {
        let seen = sync_scope("abc123".to_string(), current_trace_id);
        assert_eq!(seen, "abc123");
        assert_eq!(current_trace_id(), NO_TRACE_ID);
    }

    #[tokio::test]
    async fn concurrent_tasks_are_isolated() {
        let a = tokio::spawn(scope("task-a".to_string(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            current_trace_id()
        }));
        let b = tokio::spawn(scope("task-b".to_string(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            current_trace_id()
        }));

        assert_eq!(a.await.unwrap(), "task-a");
        assert_eq!(b.await.unwrap(), "task-b");
    }

    #[tokio::test]
    async fn next_scope_supersedes_previous() {
        let first = scope("first".to_string(), async { current_trace_id() }).await;
        let second = scope("second".to_string(), async { current_trace_id() }).await;

        assert_eq!(first, "first");
        assert_eq!(second, "second");
        assert_eq!(current_trace_id(), NO_TRACE_ID);
    }
}
