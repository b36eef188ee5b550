//! Task-local trace context for web requests.
//!
//! Minimal API for reading the current request's trace id from anywhere
//! in the request pipeline, kept in Tokio task-local storage. Part of the
//! web boundary; service code should not import it.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Trace id for the current task, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future within a trace scope. Used by middleware.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_outside_context_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn trace_id_within_context() {
        let id = "trace-abc".to_string();
        with_trace_id(id.clone(), async {
            assert_eq!(trace_id(), id);
        })
        .await;
        assert_eq!(trace_id(), "unknown");
    }
}
