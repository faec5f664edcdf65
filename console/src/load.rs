use futures::future::{AbortHandle, abortable};
use std::future::Future;

/// Owns an in-flight load. Dropping the handle aborts the load, so a row that
/// unmounts never receives a late result.
#[derive(Debug)]
pub struct LoadHandle {
    abort: AbortHandle,
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// Wrap `future` so dropping the returned handle cancels it.
///
/// The wrapped future resolves to `None` once cancelled.
pub fn cancellable<F>(future: F) -> (LoadHandle, impl Future<Output = Option<F::Output>>)
where
    F: Future,
{
    let (future, abort) = abortable(future);
    (LoadHandle { abort }, async move { future.await.ok() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_while_handle_alive() {
        let (_handle, load) = cancellable(async { 7 });
        assert_eq!(load.await, Some(7));
    }

    #[tokio::test]
    async fn test_late_result_after_drop_is_discarded() {
        let (handle, load) = cancellable(async { "late" });
        drop(handle);
        assert_eq!(load.await, None);
    }

    #[tokio::test]
    async fn test_dropping_handle_cancels() {
        let (handle, load) = cancellable(futures::future::pending::<u32>());
        drop(handle);
        assert_eq!(load.await, None);
    }
}
